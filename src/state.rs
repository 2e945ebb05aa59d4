use std::sync::Arc;

use water_quality_predictor::{
    encode, predict, AppConfig, Artifacts, FeatureVector, PredictError, PredictionRequest,
    PredictionResult,
};

// ---------------------------------------------------------------------------
// Outcome of the last button press
// ---------------------------------------------------------------------------

pub enum Outcome {
    Success {
        request: PredictionRequest,
        vector: FeatureVector,
        result: PredictionResult,
    },
    /// Request rejected before encoding.
    Warning(String),
    /// Estimator rejected the aligned row.
    Failure(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, shared read-only.
    pub artifacts: Arc<Artifacts>,

    /// Year slider value.
    pub year: i32,

    /// Station id text box contents.
    pub station_id: String,

    /// Result of the last prediction (None until the button is pressed).
    pub outcome: Option<Outcome>,
}

impl AppState {
    pub fn new(artifacts: Arc<Artifacts>, config: &AppConfig) -> Self {
        Self {
            artifacts,
            year: config.default_year,
            station_id: config.default_station.clone(),
            outcome: None,
        }
    }

    /// Whether the current station text maps to a training-time column.
    pub fn station_is_known(&self) -> bool {
        self.artifacts.columns.is_known_station(&self.station_id)
    }

    /// Encode the current form values and run the model.
    pub fn run_prediction(&mut self) {
        self.outcome = Some(self.evaluate());
    }

    fn evaluate(&self) -> Outcome {
        let request = match PredictionRequest::new(self.year, self.station_id.as_str()) {
            Ok(request) => request,
            Err(e) => {
                log::debug!("Rejected request: {e}");
                return Outcome::Warning("Please enter a valid station ID".to_string());
            }
        };

        let vector = encode(&request, &self.artifacts.columns);
        match predict(&vector, &self.artifacts.estimator) {
            Ok(result) => {
                log::info!(
                    "Prediction completed for station {:?} in {}",
                    request.station_id(),
                    request.year()
                );
                Outcome::Success {
                    request,
                    vector,
                    result,
                }
            }
            Err(PredictError::Inference(msg)) => {
                log::error!("Inference failed: {msg}");
                Outcome::Failure("Prediction failed. Please try again later.".to_string())
            }
            Err(e) => {
                log::error!("Unexpected prediction error: {e}");
                Outcome::Failure("Prediction failed. Please try again later.".to_string())
            }
        }
    }
}
