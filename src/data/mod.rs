/// Data layer: artifact loading, feature alignment, and inference.
///
/// Architecture:
/// ```text
///  model_columns.json      pollution_model.json
///        │                        │
///        ▼                        ▼
///   ┌──────────────────────────────────┐
///   │  loader    artifacts, checked    │  columns ↔ estimator schema
///   └──────────────────────────────────┘
///        │
///        ▼
///   ┌──────────┐   (year, station)
///   │ encoder  │  ◄──────────────── PredictionRequest
///   └──────────┘
///        │ FeatureVector (column order of the vocabulary)
///        ▼
///   ┌───────────┐
///   │ inference │  estimator → [O₂, NO₃, NO₂, SO₄, PO₄, Cl⁻]
///   └───────────┘
/// ```

pub mod encoder;
pub mod estimator;
pub mod inference;
pub mod loader;
pub mod model;
