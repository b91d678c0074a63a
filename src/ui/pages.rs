use eframe::egui::{Color32, RichText, ScrollArea, Ui};

use crate::data::compare::{OTHER_FEATURES, SPEC_BARS, SPEC_TABLE};
use crate::data::filter::View;
use crate::data::model::{BoolAttr, NumericAttr};
use crate::data::stats::{self, fmt_currency, fmt_opt, fmt_percent};
use crate::state::{AppState, Page};
use crate::ui::{panels, plot, table};

/// Render the page selected in the sidebar.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    match state.page {
        Page::Overview => overview(ui, state),
        Page::BrandExplorer => brand_explorer(ui, state),
        Page::FeatureExplorer => feature_explorer(ui, state),
        Page::ComparePhones => compare_phones(ui, state),
        Page::RawData => raw_data(ui, state),
    }
}

/// Label over a large value, like a dashboard tile.
fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small());
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

fn overview(ui: &mut Ui, state: &AppState) {
    let full = View::full(&state.dataset);

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.heading("📊 Smartphone Market Overview");
        ui.separator();

        ui.columns(5, |cols| {
            metric(&mut cols[0], "Phones", stats::count(&full).to_string());
            metric(&mut cols[1], "Brands", state.brands().len().to_string());
            metric(&mut cols[2], "Avg. Price", fmt_currency(stats::mean(&full, NumericAttr::Price)));
            metric(
                &mut cols[3],
                "Median Rating",
                fmt_opt(stats::median(&full, NumericAttr::Rating), 1),
            );
            metric(
                &mut cols[4],
                "5G Adoption",
                fmt_percent(stats::adoption_rate(&full, BoolAttr::Has5g)),
            );
        });
        ui.add_space(8.0);

        ui.strong("Connectivity Adoption");
        ui.columns(BoolAttr::ALL.len(), |cols| {
            for (col, attr) in cols.iter_mut().zip(BoolAttr::ALL) {
                metric(col, attr.label(), fmt_percent(stats::adoption_rate(&full, attr)));
            }
        });
        ui.add_space(12.0);

        ui.label(format!(
            "This dashboard presents an analysis of {} smartphones from {} brands.",
            state.dataset.len(),
            state.brands().len()
        ));
        ui.add_space(6.0);
        ui.label("Phones are analysed across multiple dimensions:");
        for line in [
            "Price distribution across segments, from ultra-budget to flagship",
            "Customer ratings and which specs correlate with them",
            "Brand strategies and the price tiers each brand occupies",
            "Feature coverage: RAM, storage, battery, display and cameras",
            "Connectivity adoption: 5G, NFC, IR blaster and SD cards",
        ] {
            ui.label(format!("  • {line}"));
        }

        ui.add_space(12.0);
        ui.strong("How to use this dashboard");
        for line in [
            "Brand Explorer: filter one brand by price, RAM and storage",
            "Feature Explorer: plot two specs against each other",
            "Compare Phones: view two models side by side",
            "EDA / Raw Data: browse and export the full table",
        ] {
            ui.label(format!("  • {line}"));
        }
    });
}

// ---------------------------------------------------------------------------
// Brand Explorer
// ---------------------------------------------------------------------------

fn brand_explorer(ui: &mut Ui, state: &AppState) {
    let Some(brand) = state.brand.brand.as_deref() else {
        ui.label("No brands in the loaded dataset.");
        return;
    };
    let view = state.brand_view();

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.heading(RichText::new(brand).strong());

        ui.columns(4, |cols| {
            metric(&mut cols[0], "Total Models", stats::count(&view).to_string());
            metric(&mut cols[1], "Avg. Price", fmt_currency(stats::mean(&view, NumericAttr::Price)));
            metric(
                &mut cols[2],
                "Median Rating",
                fmt_opt(stats::median(&view, NumericAttr::Rating), 1),
            );
            metric(
                &mut cols[3],
                "5G Adoption",
                fmt_percent(stats::adoption_rate(&view, BoolAttr::Has5g)),
            );
        });
        ui.separator();

        ui.strong("Price Distribution");
        plot::histogram(
            ui,
            "price_hist",
            &stats::histogram(&view.values(NumericAttr::Price), state.config.price_bins),
            plot::axis_label(NumericAttr::Price),
            Color32::LIGHT_BLUE,
        );

        ui.strong("Rating Distribution");
        plot::histogram(
            ui,
            "rating_hist",
            &stats::histogram(&view.values(NumericAttr::Rating), state.config.rating_bins),
            plot::axis_label(NumericAttr::Rating),
            Color32::from_rgb(255, 165, 0),
        );
        ui.separator();

        table::record_table(ui, "brand_table", &view, &table::BRAND_COLUMNS);
    });
}

// ---------------------------------------------------------------------------
// Feature Explorer
// ---------------------------------------------------------------------------

fn feature_explorer(ui: &mut Ui, state: &AppState) {
    let (x, y) = (state.feature_x, state.feature_y);
    ui.heading(format!("Comparing {} & {}", x.column(), y.column()));

    ui.columns(2, |cols| {
        cols[0].heading("Scatterplot");
        metric(
            &mut cols[1],
            "Correlation Value (%)",
            fmt_opt(state.feature_correlation().map(|r| r * 100.0), 1),
        );
    });
    plot::feature_scatter(ui, state);
}

// ---------------------------------------------------------------------------
// Compare Phones
// ---------------------------------------------------------------------------

fn compare_phones(ui: &mut Ui, state: &AppState) {
    let (Some(name_a), Some(name_b)) = (state.phone_a.as_deref(), state.phone_b.as_deref()) else {
        ui.label("Select two phones in the sidebar.");
        return;
    };

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.heading(format!("Comparing {name_a} vs {name_b}"));

        let spec = match state.comparison(&SPEC_TABLE) {
            Some(Ok(result)) => result,
            Some(Err(e)) => {
                ui.label(RichText::new(e.to_string()).color(Color32::RED));
                return;
            }
            None => return,
        };
        table::comparison_table(ui, "spec_table", "", &spec, name_a, name_b);

        ui.add_space(12.0);
        ui.heading("Other Features");
        if let Some(Ok(other)) = state.comparison(&OTHER_FEATURES) {
            table::comparison_table(ui, "feature_table", "Feature", &other, name_a, name_b);
        }

        ui.add_space(12.0);
        ui.heading("Spec Comparison");
        if let Some(Ok(bars)) = state.comparison(&SPEC_BARS) {
            plot::spec_bars(ui, &bars, name_a, name_b);
        }
    });
}

// ---------------------------------------------------------------------------
// EDA / Raw Data
// ---------------------------------------------------------------------------

fn raw_data(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Smartphone Dataset");
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Export Data as CSV").clicked() {
            panels::export_file_dialog(state);
        }
    });
    ui.add_space(8.0);
    ui.label(
        RichText::new(format!("Showing {} phones.", state.dataset.len())).strong(),
    );
    ui.separator();

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        table::record_table(ui, "raw_table", &View::full(&state.dataset), &table::RAW_COLUMNS);
    });
}
