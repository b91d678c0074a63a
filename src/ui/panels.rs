use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::compare::ResolvePolicy;
use crate::data::model::NumericAttr;
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – navigation and per-page inputs
// ---------------------------------------------------------------------------

/// Render the left sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Smartphones Insights");
    ui.separator();

    let current = state.page;
    egui::ComboBox::from_id_salt("page")
        .selected_text(current.title())
        .show_ui(ui, |ui: &mut Ui| {
            for page in Page::ALL {
                ui.selectable_value(&mut state.page, page, page.title());
            }
        });
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.page {
            Page::BrandExplorer => brand_controls(ui, state),
            Page::FeatureExplorer => feature_controls(ui, state),
            Page::ComparePhones => compare_controls(ui, state),
            Page::Overview | Page::RawData => {}
        });
}

fn brand_controls(ui: &mut Ui, state: &mut AppState) {
    // Clone what we need so we can mutate state inside the widgets.
    let brands = state.brands().to_vec();
    if brands.is_empty() {
        ui.label("No dataset loaded.");
        return;
    }
    let current = state.brand.brand.clone().unwrap_or_default();

    ui.strong("Select Brand");
    egui::ComboBox::from_id_salt("brand")
        .selected_text(current.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for brand in &brands {
                if ui.selectable_label(current == *brand, brand.as_str()).clicked() {
                    state.set_brand(brand.clone());
                }
            }
        });
    ui.add_space(8.0);

    // ---- Price ----
    let (price_min, price_max) = state.brand.price_bounds;
    let (mut lo, mut hi) = state.brand.price;
    let step = state.config.price_step as f64;
    ui.strong("Select Price Range");
    let mut changed = ui
        .add(Slider::new(&mut lo, price_min.min(0)..=price_max).step_by(step).text("from"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut hi, price_min.min(0)..=price_max).step_by(step).text("to"))
        .changed();
    if changed {
        state.set_price_range(lo, hi);
    }
    ui.add_space(8.0);

    // ---- RAM ----
    let (ram_min, ram_max) = state.brand.ram_bounds;
    let (mut lo, mut hi) = state.brand.ram;
    ui.strong("RAM (GB)");
    let mut changed = ui
        .add(Slider::new(&mut lo, ram_min..=ram_max).step_by(1.0).text("from"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut hi, ram_min..=ram_max).step_by(1.0).text("to"))
        .changed();
    if changed {
        state.set_ram_range(lo, hi);
    }
    ui.add_space(8.0);

    // ---- Storage (discrete steps) ----
    let steps = state.config.storage_steps.clone();
    let last = steps.len().saturating_sub(1);
    let (mut lo, mut hi) = state.brand.storage;
    ui.strong("Storage (GB)");
    let label = |steps: Vec<i64>| {
        move |v: f64, _: std::ops::RangeInclusive<usize>| {
            steps
                .get(v as usize)
                .map_or_else(String::new, |gb| format!("{gb} GB"))
        }
    };
    let mut changed = ui
        .add(Slider::new(&mut lo, 0..=last).custom_formatter(label(steps.clone())).text("from"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut hi, 0..=last).custom_formatter(label(steps)).text("to"))
        .changed();
    if changed {
        state.set_storage_range(lo, hi);
    }
}

fn feature_controls(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Feature Explorer");
    ui.strong("Select 2 Features to compare");
    ui.add_space(4.0);

    let x = state.feature_x;
    ui.label("Select First Feature");
    egui::ComboBox::from_id_salt("feature_x")
        .selected_text(x.column())
        .show_ui(ui, |ui: &mut Ui| {
            for attr in NumericAttr::ALL {
                if ui.selectable_label(attr == x, attr.column()).clicked() {
                    state.set_feature_x(attr);
                }
            }
        });

    let (x, y) = (state.feature_x, state.feature_y);
    ui.label("Select Second Feature");
    egui::ComboBox::from_id_salt("feature_y")
        .selected_text(y.column())
        .show_ui(ui, |ui: &mut Ui| {
            for attr in NumericAttr::ALL.into_iter().filter(|&a| a != x) {
                if ui.selectable_label(attr == y, attr.column()).clicked() {
                    state.set_feature_y(attr);
                }
            }
        });
}

fn compare_controls(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Compare Phones");
    let models = state.models().to_vec();
    if models.len() < 2 {
        ui.label("Need at least two phones to compare.");
        return;
    }

    let a = state.phone_a.clone().unwrap_or_default();
    ui.label("Select 1st Phone");
    egui::ComboBox::from_id_salt("phone_a")
        .selected_text(a.as_str())
        .height(400.0)
        .show_ui(ui, |ui: &mut Ui| {
            for model in &models {
                if ui.selectable_label(*model == a, model.as_str()).clicked() {
                    state.set_phone_a(model.clone());
                }
            }
        });

    let a = state.phone_a.clone().unwrap_or_default();
    let b = state.phone_b.clone().unwrap_or_default();
    ui.label("Select 2nd Phone");
    egui::ComboBox::from_id_salt("phone_b")
        .selected_text(b.as_str())
        .height(400.0)
        .show_ui(ui, |ui: &mut Ui| {
            for model in models.iter().filter(|m| **m != a) {
                if ui.selectable_label(*model == b, model.as_str()).clicked() {
                    state.set_phone_b(model.clone());
                }
            }
        });

    ui.add_space(8.0);
    let mut strict = state.resolve_policy == ResolvePolicy::Unique;
    if ui
        .checkbox(&mut strict, "Reject duplicate model names")
        .changed()
    {
        state.resolve_policy = if strict {
            ResolvePolicy::Unique
        } else {
            ResolvePolicy::FirstMatch
        };
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export CSV…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let source = state
            .dataset
            .source()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        ui.label(format!("{} phones loaded {source}", state.dataset.len()));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open smartphone data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export smartphone data")
        .add_filter("CSV", &["csv"])
        .set_file_name("Cleaned_smartphones.csv")
        .save_file();

    if let Some(path) = file {
        state.export_csv(&path);
    }
}
