mod app;
mod color;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use app::WaterQualityApp;
use eframe::egui;
use state::AppState;
use water_quality_predictor::{load_artifacts, AppConfig};

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();
    log::debug!("Configuration: {config:?}");

    let artifacts = match load_artifacts(&config.model_path, &config.columns_path) {
        Ok(artifacts) => Arc::new(artifacts),
        Err(e) => {
            log::error!("Failed to load model artifacts: {e}");
            return Err(e).context("loading model artifacts");
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let state = AppState::new(artifacts, &config);
    eframe::run_native(
        "Water Quality Predictor",
        options,
        Box::new(move |_cc| Ok(Box::new(WaterQualityApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}
