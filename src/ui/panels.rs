use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use water_quality_predictor::data::model::YEAR_RANGE;
use water_quality_predictor::{FeatureVector, ModelColumns, Pollutant, PredictionResult};

use crate::color::{accent, pollutant_color};
use crate::state::{AppState, Outcome};
use crate::ui::plot;

const WARNING_COLOR: Color32 = Color32::from_rgb(214, 137, 16);
const ERROR_COLOR: Color32 = Color32::from_rgb(200, 50, 50);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(40, 150, 80);
const INFO_COLOR: Color32 = Color32::from_rgb(40, 110, 200);

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title banner.
pub fn top_bar(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(6.0);
        ui.label(
            RichText::new("Water Quality Predictor")
                .size(30.0)
                .strong()
                .color(accent()),
        );
        ui.label(
            RichText::new("Advanced ML-powered water pollutant level prediction system")
                .size(15.0)
                .color(Color32::GRAY),
        );
        ui.add_space(6.0);
    });
}

// ---------------------------------------------------------------------------
// Left side panel – prediction parameters
// ---------------------------------------------------------------------------

/// Render the parameter form. Pressing the button runs a prediction.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Prediction Parameters");
    ui.label("Configure the parameters below to predict water pollutant levels");
    ui.separator();

    ui.strong("Select Year");
    ui.add(egui::Slider::new(&mut state.year, YEAR_RANGE))
        .on_hover_text("Choose the year for prediction");
    ui.add_space(8.0);

    ui.strong("Station ID");
    ui.text_edit_singleline(&mut state.station_id)
        .on_hover_text("Enter the monitoring station identifier");

    if !state.station_id.is_empty() {
        if state.station_is_known() {
            ui.label(RichText::new("Known monitoring station").small().color(SUCCESS_COLOR));
        } else {
            ui.label(
                RichText::new("Station not seen in training data; no station effect applied")
                    .small()
                    .color(WARNING_COLOR),
            );
        }
    }

    ui.separator();
    ui.strong("Model Information");
    let symbols: Vec<&str> = Pollutant::ALL.iter().map(|p| p.symbol()).collect();
    ui.label(
        RichText::new(format!(
            "This model predicts 6 key pollutants: {}",
            symbols.join(", ")
        ))
        .color(INFO_COLOR),
    );

    ui.add_space(12.0);
    let button = egui::Button::new(
        RichText::new("Predict Pollutant Levels")
            .strong()
            .color(Color32::WHITE),
    )
    .fill(accent());
    if ui
        .add_sized([ui.available_width(), 32.0], button)
        .clicked()
    {
        state.run_prediction();
    }
}

// ---------------------------------------------------------------------------
// Central panel – results
// ---------------------------------------------------------------------------

/// Render the results area for the last outcome.
pub fn results_panel(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Prediction Results");
            ui.add_space(4.0);

            match &state.outcome {
                None => {
                    ui.label(
                        RichText::new(
                            "Configure parameters in the sidebar and click 'Predict' to see water quality analysis",
                        )
                        .color(INFO_COLOR),
                    );
                    ui.add_space(8.0);
                    about_section(ui);
                }
                Some(Outcome::Warning(msg)) => {
                    ui.label(RichText::new(msg).color(WARNING_COLOR));
                }
                Some(Outcome::Failure(msg)) => {
                    ui.label(RichText::new(msg).color(ERROR_COLOR));
                }
                Some(Outcome::Success {
                    request,
                    vector,
                    result,
                }) => {
                    ui.label(
                        RichText::new(format!(
                            "Prediction completed for Station {} in {}",
                            request.station_id(),
                            request.year()
                        ))
                        .color(SUCCESS_COLOR),
                    );
                    ui.add_space(8.0);
                    metric_cards(ui, result);

                    ui.add_space(12.0);
                    ui.heading("Pollutant Levels Visualization");
                    plot::pollutant_chart(ui, result);

                    ui.add_space(12.0);
                    ui.heading("Interpretation Guide");
                    interpretation_guide(ui);

                    ui.add_space(8.0);
                    egui::CollapsingHeader::new("Model inputs")
                        .default_open(false)
                        .show(ui, |ui: &mut Ui| {
                            feature_table(ui, vector, &state.artifacts.columns);
                        });
                }
            }
        });
}

/// Three-column grid of metric cards, one per pollutant.
fn metric_cards(ui: &mut Ui, result: &PredictionResult) {
    egui::Grid::new("metric_cards")
        .num_columns(3)
        .spacing([12.0, 12.0])
        .show(ui, |ui: &mut Ui| {
            for (i, (pollutant, _)) in result.iter().enumerate() {
                egui::Frame::group(ui.style())
                    .fill(pollutant_color(pollutant))
                    .show(ui, |ui: &mut Ui| {
                        ui.set_min_width(150.0);
                        ui.vertical_centered(|ui: &mut Ui| {
                            ui.label(
                                RichText::new(pollutant.symbol())
                                    .size(14.0)
                                    .color(Color32::WHITE),
                            );
                            ui.label(
                                RichText::new(result.formatted(pollutant))
                                    .size(22.0)
                                    .strong()
                                    .color(Color32::WHITE),
                            );
                        });
                    });
                if i % 3 == 2 {
                    ui.end_row();
                }
            }
        });
}

fn interpretation_guide(ui: &mut Ui) {
    ui.columns(2, |cols: &mut [Ui]| {
        for (i, pollutant) in Pollutant::ALL.iter().enumerate() {
            let col = &mut cols[i / 3];
            col.label(RichText::new(format!("{} ({})", pollutant.name(), pollutant.symbol())).strong());
            col.label(pollutant.interpretation());
            col.add_space(6.0);
        }
    });
}

fn about_section(ui: &mut Ui) {
    ui.heading("About Water Quality Monitoring");
    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Why Monitor Water Quality?");
        for item in [
            "Public Health Protection",
            "Environmental Conservation",
            "Regulatory Compliance",
            "Scientific Research",
        ] {
            cols[0].label(format!("• {item}"));
        }

        cols[1].strong("Key Pollutants We Track:");
        for item in [
            "Dissolved Oxygen (O₂)",
            "Nitrogen Compounds (NO₃, NO₂)",
            "Sulfates and Phosphates",
            "Chloride Levels",
        ] {
            cols[1].label(format!("• {item}"));
        }
    });
}

/// The aligned row the model saw, one line per column.
fn feature_table(ui: &mut Ui, vector: &FeatureVector, columns: &ModelColumns) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Column");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Value");
            });
        })
        .body(|mut body| {
            for (name, value) in vector.named(columns) {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(name);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(value.to_string());
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Right panel – station and model information
// ---------------------------------------------------------------------------

pub fn station_info(ui: &mut Ui, state: &AppState) {
    ui.heading("Station Information");
    ui.strong("Current Selection:");
    ui.label(format!("Year: {}", state.year));
    let station = if state.station_id.is_empty() {
        "Not specified"
    } else {
        state.station_id.as_str()
    };
    ui.label(format!("Station ID: {station}"));
    ui.separator();

    ui.heading("Model Performance");
    let info = &state.artifacts.info;
    if let Some(name) = &info.name {
        ui.label(format!("Model: {name}"));
    }
    if let Some(accuracy) = info.accuracy {
        ui.label(
            RichText::new(format!("Model Accuracy: {:.1}%", accuracy * 100.0)).color(SUCCESS_COLOR),
        );
    }
    if let Some(updated) = &info.updated {
        ui.label(RichText::new(format!("Last Updated: {updated}")).color(INFO_COLOR));
    }
    let columns = &state.artifacts.columns;
    ui.label(format!("Features: {}", columns.len()));
    ui.label(format!("Known stations: {}", columns.known_stations().len()));
    ui.add_space(4.0);
    ui.label(
        RichText::new("Predictions are estimates based on historical data").color(WARNING_COLOR),
    );
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

pub fn footer(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(
                "Water Quality Prediction System | Powered by Machine Learning | Protecting Our Environment",
            )
            .color(Color32::GRAY),
        );
    });
}
