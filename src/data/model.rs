use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{ArtifactLoadError, PredictError};

/// Years offered by the form. The core itself passes any year through.
pub const YEAR_RANGE: RangeInclusive<i32> = 2000..=2100;

/// Prefix of the one-hot station columns produced at training time.
pub const STATION_PREFIX: &str = "id_";

/// Name of the numeric year column.
pub const YEAR_COLUMN: &str = "year";

// ---------------------------------------------------------------------------
// Pollutant – the fixed output order of the model
// ---------------------------------------------------------------------------

/// One of the six pollutants the model estimates, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pollutant {
    Oxygen,
    Nitrate,
    Nitrite,
    Sulfate,
    Phosphate,
    Chloride,
}

impl Pollutant {
    /// All pollutants, positionally matching the estimator outputs.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Oxygen,
        Pollutant::Nitrate,
        Pollutant::Nitrite,
        Pollutant::Sulfate,
        Pollutant::Phosphate,
        Pollutant::Chloride,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Pollutant::Oxygen => "O₂",
            Pollutant::Nitrate => "NO₃",
            Pollutant::Nitrite => "NO₂",
            Pollutant::Sulfate => "SO₄",
            Pollutant::Phosphate => "PO₄",
            Pollutant::Chloride => "Cl⁻",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pollutant::Oxygen => "Oxygen",
            Pollutant::Nitrate => "Nitrates",
            Pollutant::Nitrite => "Nitrites",
            Pollutant::Sulfate => "Sulfates",
            Pollutant::Phosphate => "Phosphates",
            Pollutant::Chloride => "Chlorides",
        }
    }

    pub fn unit(self) -> &'static str {
        "mg/L"
    }

    /// One-line reading guide shown next to the results.
    pub fn interpretation(self) -> &'static str {
        match self {
            Pollutant::Oxygen => "Higher levels indicate better water quality",
            Pollutant::Nitrate => "High levels may indicate agricultural runoff",
            Pollutant::Nitrite => "Should be minimal in healthy water systems",
            Pollutant::Sulfate => "Natural occurrence, high levels may affect taste",
            Pollutant::Phosphate => "High levels can lead to eutrophication",
            Pollutant::Chloride => "Essential but high levels may indicate pollution",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ---------------------------------------------------------------------------
// PredictionRequest – what the form submits
// ---------------------------------------------------------------------------

/// A validated (year, station) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    year: i32,
    station_id: String,
}

impl PredictionRequest {
    /// Build a request. Only an empty station id is rejected; the year is
    /// passed through even outside [`YEAR_RANGE`].
    pub fn new(year: i32, station_id: impl Into<String>) -> Result<Self, PredictError> {
        let station_id = station_id.into();
        if station_id.is_empty() {
            return Err(PredictError::InvalidRequest(
                "station id must not be empty".to_string(),
            ));
        }
        Ok(Self { year, station_id })
    }

    /// Build a request from raw text, e.g. configuration values.
    pub fn parse(year: &str, station_id: &str) -> Result<Self, PredictError> {
        let year = year.trim().parse::<i32>().map_err(|_| {
            PredictError::InvalidRequest(format!("year '{year}' is not a whole number"))
        })?;
        Self::new(year, station_id)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    /// Column name this request's station would one-hot into.
    pub fn station_column(&self) -> String {
        format!("{STATION_PREFIX}{}", self.station_id)
    }
}

// ---------------------------------------------------------------------------
// ModelColumns – the training-time vocabulary
// ---------------------------------------------------------------------------

/// Ordered, duplicate-free column names the estimator was fit on, with a
/// precomputed name → position index.
#[derive(Debug, Clone)]
pub struct ModelColumns {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ModelColumns {
    pub fn new(names: Vec<String>) -> Result<Self, ArtifactLoadError> {
        if names.is_empty() {
            return Err(ArtifactLoadError::Invalid(
                "model columns list is empty".to_string(),
            ));
        }

        let mut positions = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(ArtifactLoadError::Invalid(format!(
                    "model column {i} has an empty name"
                )));
            }
            if positions.insert(name.clone(), i).is_some() {
                return Err(ArtifactLoadError::Invalid(format!(
                    "duplicate model column '{name}'"
                )));
            }
        }

        Ok(Self { names, positions })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Station identifiers that have a one-hot column, in training order.
    pub fn known_stations(&self) -> Vec<&str> {
        self.names
            .iter()
            .filter_map(|n| n.strip_prefix(STATION_PREFIX))
            .collect()
    }

    pub fn is_known_station(&self, station_id: &str) -> bool {
        self.positions
            .contains_key(&format!("{STATION_PREFIX}{station_id}"))
    }
}

// ---------------------------------------------------------------------------
// FeatureVector – one aligned model row
// ---------------------------------------------------------------------------

/// A single row laid out exactly as [`ModelColumns`]. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub(crate) fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pair each value with its column name.
    pub fn named<'a>(
        &'a self,
        columns: &'a ModelColumns,
    ) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        columns
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// PredictionResult – six concentrations in pollutant order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    values: [f64; 6],
}

impl PredictionResult {
    pub fn new(values: [f64; 6]) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64; 6] {
        &self.values
    }

    pub fn get(&self, pollutant: Pollutant) -> f64 {
        self.values[pollutant as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        Pollutant::ALL.iter().copied().zip(self.values.iter().copied())
    }

    /// Display string used by the metric cards, e.g. `"7.41 mg/L"`.
    pub fn formatted(&self, pollutant: Pollutant) -> String {
        format!("{:.2} {}", self.get(pollutant), pollutant.unit())
    }
}
