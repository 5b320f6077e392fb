use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::ReitDataset;

const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 260.0;

/// Render every row and column of the view, verbatim.
pub fn data_table(ui: &mut Ui, view: &ReitDataset) {
    ui.push_id("reit_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(60.0), view.columns.len())
            .min_scrolled_height(0.0)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .header(20.0, |mut header| {
                for col in &view.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(col);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, view.len(), |mut row| {
                    let record = &view.records[row.index()];
                    for col in &view.columns {
                        row.col(|ui: &mut Ui| {
                            ui.label(record.cell(col).to_string());
                        });
                    }
                });
            });
    });
}
