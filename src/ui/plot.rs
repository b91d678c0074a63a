use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use crate::color::generate_palette;
use crate::data::compare::{ComparisonResult, ComparisonRow};
use crate::data::filter::View;
use crate::data::model::NumericAttr;
use crate::data::stats::Bin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Render pre-binned counts as adjacent bars.
pub fn histogram(ui: &mut Ui, id: &str, bins: &[Bin], x_label: &str, color: Color32) {
    if bins.is_empty() {
        ui.label("No data for the current selection.");
        return;
    }

    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new(b.center(), b.count as f64)
                .width(b.width())
                .name(format!("{:.1} – {:.1}", b.start, b.end))
        })
        .collect();

    Plot::new(id)
        .height(220.0)
        .x_axis_label(x_label)
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color));
        });
}

// ---------------------------------------------------------------------------
// Feature scatterplot
// ---------------------------------------------------------------------------

/// Scatter of the two selected features, one series per operating system.
pub fn feature_scatter(ui: &mut Ui, state: &AppState) {
    let (x, y) = (state.feature_x, state.feature_y);
    let view = View::full(&state.dataset);
    let colors = &state.os_colors;

    let series = |os: Option<&str>| -> Vec<[f64; 2]> {
        view.iter()
            .filter(|r| r.category(colors.attr) == os)
            .filter_map(|r| Some([r.numeric(x)?, r.numeric(y)?]))
            .collect()
    };

    Plot::new("feature_scatter")
        .legend(Legend::default())
        .x_axis_label(x.label())
        .y_axis_label(y.label())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for os in colors.values() {
                plot_ui.points(
                    Points::new(series(Some(os)))
                        .name(os)
                        .color(colors.color_for(Some(os)))
                        .radius(2.5),
                );
            }
            plot_ui.points(
                Points::new(series(None))
                    .name("unknown")
                    .color(colors.color_for(None))
                    .radius(2.5),
            );
        });
}

// ---------------------------------------------------------------------------
// Spec comparison bars
// ---------------------------------------------------------------------------

/// Grouped bars: one group per compared spec, one bar per phone.
pub fn spec_bars(ui: &mut Ui, result: &ComparisonResult, name_a: &str, name_b: &str) {
    const WIDTH: f64 = 0.4;
    let palette = generate_palette(2);
    let (color_a, color_b) = (palette[0], palette[1]);

    let group = |offset: f64, pick: fn(&ComparisonRow) -> Option<f64>| {
        result
            .rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let value = pick(row)?;
                Some(
                    Bar::new(i as f64 + offset, value)
                        .width(WIDTH)
                        .name(row.label),
                )
            })
            .collect::<Vec<Bar>>()
    };
    let bars_a = group(-WIDTH / 2.0, |row| row.a.as_f64());
    let bars_b = group(WIDTH / 2.0, |row| row.b.as_f64());

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (i, row) in result.rows.iter().enumerate() {
            ui.label(format!("{i}: {}", row.label));
        }
    });

    Plot::new("spec_bars")
        .legend(Legend::default())
        .height(300.0)
        .y_axis_label("Value")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars_a).name(name_a).color(color_a));
            plot_ui.bar_chart(BarChart::new(bars_b).name(name_b).color(color_b));
        });
}

/// Axis label for a numeric attribute, with the unit used on the pages.
pub fn axis_label(attr: NumericAttr) -> &'static str {
    match attr {
        NumericAttr::Price => "Price (INR)",
        NumericAttr::Rating => "Rating (0–100)",
        other => other.label(),
    }
}
