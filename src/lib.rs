//! Water pollutant level prediction.
//!
//! Aligns a (year, station) request with the column vocabulary of a trained
//! multi-output regressor and runs it to estimate six pollutant
//! concentrations.

pub mod config;
pub mod data;
pub mod error;

pub use config::AppConfig;
pub use data::encoder::encode;
pub use data::estimator::{Estimator, SavedEstimator, SavedModel};
pub use data::inference::predict;
pub use data::loader::{load_artifacts, Artifacts};
pub use data::model::{
    FeatureVector, ModelColumns, Pollutant, PredictionRequest, PredictionResult,
};
pub use error::{ArtifactLoadError, PredictError};
