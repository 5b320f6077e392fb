use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::{export_artifact, write_artifact, EXPORT_FILE_NAME, EXPORT_MIME};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – ticker picker
// ---------------------------------------------------------------------------

/// Render the multi-select ticker picker and the industry colour key.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Select REIT Tickers");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
        ui.label(format!("{}/{}", state.selected.len(), state.tickers.len()));
    });
    ui.separator();

    if let Ok(frame) = &state.frame {
        industry_key(ui, frame.colors.legend_entries());
        ui.separator();
    }

    let mut toggled = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (ticker, industry) in &state.tickers {
                let mut checked = state.selected.contains(ticker);

                // Colour the ticker by its industry while it is on the charts.
                let mut text = RichText::new(ticker);
                if let Ok(frame) = &state.frame {
                    if checked {
                        text = text.color(frame.colors.color_for(industry.as_deref()));
                    }
                }

                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(ticker.clone());
                }
            }
        });

    if let Some(ticker) = toggled {
        state.toggle_ticker(&ticker);
    }
}

/// Colour swatch and name for every industry on the charts.
fn industry_key(ui: &mut Ui, entries: &[(String, Color32)]) {
    ui.label(RichText::new("Industries").strong());
    for (industry, color) in entries {
        ui.horizontal(|ui: &mut Ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 2.0, *color);
            ui.label(industry);
        });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui
                .add_enabled(state.frame.is_ok(), egui::Button::new("Export as CSV…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("REIT Performance & Sector Analyzer");

        if let Some(ds) = &state.dataset {
            ui.separator();
            let shown = state.frame.as_ref().map_or(0, |f| f.view.len());
            ui.label(format!("{} REITs loaded, {} shown", ds.len(), shown));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

/// Ask where to save the filtered view and write it there.
pub fn export_dialog(state: &mut AppState) {
    let Ok(frame) = &state.frame else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export filtered REIT data")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter(format!("CSV ({EXPORT_MIME})"), &["csv"])
        .save_file();

    if let Some(path) = file {
        let result = export_artifact(&frame.view).and_then(|a| write_artifact(&a, &path));
        match result {
            Ok(()) => {
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
