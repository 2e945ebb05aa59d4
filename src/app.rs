use eframe::egui;

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WaterQualityApp {
    pub state: AppState,
}

impl WaterQualityApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for WaterQualityApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title banner ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui);
        });

        // ---- Bottom panel: footer ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui);
        });

        // ---- Left side panel: prediction parameters ----
        egui::SidePanel::left("parameter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Right side panel: station information ----
        egui::SidePanel::right("station_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::station_info(ui, &self.state);
            });

        // ---- Central panel: results ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::results_panel(ui, &self.state);
        });
    }
}
