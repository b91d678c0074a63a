use eframe::egui::{self, TextStyle, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::compare::{ComparisonResult, Value};
use crate::data::filter::View;
use crate::data::model::{BoolAttr, CategoricalAttr, Field, NumericAttr, Record};

/// Columns of the Brand Explorer table.
pub const BRAND_COLUMNS: [Field; 9] = [
    Field::Category(CategoricalAttr::Model),
    Field::Numeric(NumericAttr::Price),
    Field::Numeric(NumericAttr::Rating),
    Field::Numeric(NumericAttr::RamCapacity),
    Field::Numeric(NumericAttr::StorageCapacity),
    Field::Numeric(NumericAttr::BatteryCapacity),
    Field::Numeric(NumericAttr::RefreshRate),
    Field::Numeric(NumericAttr::MaxRearCameraMp),
    Field::Category(CategoricalAttr::Os),
];

/// Columns of the raw data table.
pub const RAW_COLUMNS: [Field; 18] = [
    Field::Category(CategoricalAttr::BrandName),
    Field::Category(CategoricalAttr::Model),
    Field::Numeric(NumericAttr::Price),
    Field::Numeric(NumericAttr::Rating),
    Field::Numeric(NumericAttr::RamCapacity),
    Field::Numeric(NumericAttr::StorageCapacity),
    Field::Numeric(NumericAttr::BatteryCapacity),
    Field::Numeric(NumericAttr::ProcessorSpeed),
    Field::Numeric(NumericAttr::RefreshRate),
    Field::Numeric(NumericAttr::DisplaySize),
    Field::Flag(BoolAttr::Has5g),
    Field::Flag(BoolAttr::HasNfc),
    Field::Flag(BoolAttr::HasIrBlaster),
    Field::Flag(BoolAttr::CardSupported),
    Field::Numeric(NumericAttr::MaxRearCameraMp),
    Field::Numeric(NumericAttr::MaxFrontCameraMp),
    Field::Category(CategoricalAttr::Os),
    Field::Category(CategoricalAttr::SimType),
];

/// Scrollable table of the records in `view`, numbered from 1.
pub fn record_table(ui: &mut Ui, id: &str, view: &View<'_>, columns: &[Field]) {
    let records: Vec<&Record> = view.iter().collect();
    let row_height = ui.text_style_height(&TextStyle::Body) + 4.0;

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .column(Column::auto().at_least(36.0))
            .columns(Column::auto().at_least(60.0), columns.len())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for field in columns {
                    header.col(|ui| {
                        ui.strong(field.column());
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, records.len(), |mut row| {
                    let i = row.index();
                    let Some(record) = records.get(i) else {
                        return;
                    };
                    row.col(|ui| {
                        ui.label((i + 1).to_string());
                    });
                    for &field in columns {
                        row.col(|ui| {
                            ui.label(Value::of(record, field).to_string());
                        });
                    }
                });
            });
    });
}

/// Three-column grid: label, first phone, second phone.
pub fn comparison_table(
    ui: &mut Ui,
    id: &str,
    first_header: &str,
    result: &ComparisonResult,
    name_a: &str,
    name_b: &str,
) {
    egui::Grid::new(id)
        .striped(true)
        .num_columns(3)
        .spacing([24.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.strong(first_header);
            ui.strong(name_a);
            ui.strong(name_b);
            ui.end_row();

            for row in &result.rows {
                ui.label(row.label);
                ui.label(row.a.to_string());
                ui.label(row.b.to_string());
                ui.end_row();
            }
        });
}
