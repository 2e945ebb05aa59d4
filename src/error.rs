use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Startup errors: loading the two model artifacts
// ---------------------------------------------------------------------------

/// Failure to load the model or the model-columns artifact. Always fatal.
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("unsupported artifact extension: .{0}")]
    UnsupportedExtension(String),

    /// The artifact parsed but violates the schema contract.
    #[error("invalid artifact: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Per-request errors
// ---------------------------------------------------------------------------

/// Errors raised while turning one request into a prediction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// The request was rejected before encoding; shown inline, no prediction.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The estimator rejected an aligned vector. Indicates an encoder/model
    /// schema disagreement rather than bad user input.
    #[error("inference failed: {0}")]
    Inference(String),
}
