use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{REQUIRED_COLUMNS, SalesTable};
use crate::format;

const ROW_HEIGHT: f32 = 18.0;

/// Raw rows of the filtered table.
pub fn raw_data(ui: &mut Ui, table: &SalesTable) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(400.0)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(80.0), 3)
        .columns(Column::auto().at_least(90.0), 2)
        .column(Column::remainder())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for name in REQUIRED_COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, table.len(), |mut row| {
                let rec = &table.records[row.index()];
                row.col(|ui| {
                    ui.label(&rec.region);
                });
                row.col(|ui| {
                    ui.label(&rec.category);
                });
                row.col(|ui| {
                    ui.label(&rec.sub_category);
                });
                row.col(|ui| {
                    ui.label(format::currency(rec.sales));
                });
                row.col(|ui| {
                    ui.label(format::currency(rec.profit));
                });
                row.col(|ui| {
                    ui.label(rec.quantity.to_string());
                });
            });
        });
}
