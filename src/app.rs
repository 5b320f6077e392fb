use eframe::egui;

use crate::state::AppState;
use crate::ui::{self, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ReitAnalyzerApp {
    pub state: AppState,
}

impl ReitAnalyzerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for ReitAnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: ticker picker ----
        if self.state.dataset.is_some() {
            egui::SidePanel::left("ticker_panel")
                .default_width(180.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: table, charts, export ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::dashboard(ui, &mut self.state);
        });
    }
}
