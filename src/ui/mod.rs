pub mod charts;
pub mod panels;
pub mod table;

use eframe::egui::{RichText, ScrollArea, Ui};

use crate::data::export::{EXPORT_FILE_NAME, EXPORT_MIME};
use crate::state::AppState;

/// Show a non-fatal warning in place of the output it replaces.
fn warning(ui: &mut Ui, message: &str) {
    let color = ui.visuals().warn_fg_color;
    ui.label(RichText::new(format!("⚠ {message}")).color(color));
}

/// Render the central dashboard for the current frame.
///
/// Layout: table; industry pie in the left third; Market Cap and Dividend
/// Yield side by side; Beta next to an empty cell; export button.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    if let Some(err) = &state.load_error {
        let color = ui.visuals().error_fg_color;
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(RichText::new(err).color(color));
        });
        return;
    }

    let frame = match &state.frame {
        Ok(frame) => frame,
        Err(e) => {
            warning(ui, &e.to_string());
            return;
        }
    };

    let mut export_clicked = false;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("REIT Overview");
            table::data_table(ui, &frame.view);
            ui.add_space(12.0);

            ui.columns(3, |cols| {
                let ui = &mut cols[0];
                match &frame.breakdown {
                    Ok(breakdown) => {
                        ui.heading("Industry Breakdown");
                        charts::industry_pie(ui, breakdown, &frame.colors);
                    }
                    Err(e) => warning(ui, &e.to_string()),
                }
            });
            ui.add_space(12.0);

            // Two charts per row; the last row keeps an empty placeholder.
            for row in frame.bar_charts.chunks(2) {
                ui.columns(2, |cols| {
                    for (col, (spec, model)) in cols.iter_mut().zip(row) {
                        charts::bar_chart(col, spec, model, &frame.colors);
                    }
                });
                ui.add_space(12.0);
            }

            ui.heading("Export Your Data");
            export_clicked = ui
                .button("Export as CSV")
                .on_hover_text(format!("{EXPORT_FILE_NAME} ({EXPORT_MIME})"))
                .clicked();
        });

    if export_clicked {
        panels::export_dialog(state);
    }
}
