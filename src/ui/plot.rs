use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use water_quality_predictor::{Pollutant, PredictionResult};

use crate::color::pollutant_color;

// ---------------------------------------------------------------------------
// Pollutant bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render one bar per pollutant, in output order.
pub fn pollutant_chart(ui: &mut Ui, result: &PredictionResult) {
    let bars: Vec<Bar> = result
        .iter()
        .enumerate()
        .map(|(i, (pollutant, value))| {
            Bar::new(i as f64, value)
                .name(pollutant.symbol())
                .fill(pollutant_color(pollutant))
                .width(0.6)
        })
        .collect();

    let chart = BarChart::new(bars).name("Concentration (mg/L)");

    Plot::new("pollutant_chart")
        .height(260.0)
        .y_axis_label("Concentration (mg/L)")
        .x_axis_formatter(|mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            Pollutant::ALL
                .get(idx as usize)
                .map(|p| p.symbol().to_string())
                .unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
