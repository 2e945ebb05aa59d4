use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::estimator::{Estimator, ModelInfo, SavedEstimator, SavedModel};
use super::model::{ModelColumns, Pollutant};
use crate::error::ArtifactLoadError;

// ---------------------------------------------------------------------------
// Loaded artifacts: process-wide, read-only after startup
// ---------------------------------------------------------------------------

/// The estimator and its column vocabulary, checked against each other.
#[derive(Debug)]
pub struct Artifacts {
    pub columns: ModelColumns,
    pub estimator: SavedEstimator,
    pub info: ModelInfo,
}

impl Artifacts {
    /// Pair an estimator with its columns, rejecting any schema disagreement.
    pub fn new(
        columns: ModelColumns,
        mut estimator: SavedEstimator,
        info: ModelInfo,
    ) -> Result<Self, ArtifactLoadError> {
        estimator.validate()?;

        if estimator.n_outputs() != Pollutant::ALL.len() {
            return Err(ArtifactLoadError::Invalid(format!(
                "estimator produces {} outputs, expected {}",
                estimator.n_outputs(),
                Pollutant::ALL.len()
            )));
        }
        if estimator.n_features() != columns.len() {
            return Err(ArtifactLoadError::Invalid(format!(
                "estimator expects {} features but {} model columns were loaded",
                estimator.n_features(),
                columns.len()
            )));
        }

        Ok(Self {
            columns,
            estimator,
            info,
        })
    }
}

/// Load both artifacts. Any failure is fatal to startup.
pub fn load_artifacts(
    model_path: &Path,
    columns_path: &Path,
) -> Result<Artifacts, ArtifactLoadError> {
    let columns = load_columns(columns_path)?;
    let model = load_model(model_path)?;
    let artifacts = Artifacts::new(columns, model.estimator, model.info)?;

    log::info!(
        "Loaded {} estimator from {} ({} features, {} outputs) with {} columns from {}",
        artifacts.estimator.kind(),
        model_path.display(),
        artifacts.estimator.n_features(),
        artifacts.estimator.n_outputs(),
        artifacts.columns.len(),
        columns_path.display()
    );
    Ok(artifacts)
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// Model artifact
// ---------------------------------------------------------------------------

/// Load the serialized estimator. Only JSON is supported.
pub fn load_model(path: &Path) -> Result<SavedModel, ArtifactLoadError> {
    match extension(path).as_str() {
        "json" => {}
        other => return Err(ArtifactLoadError::UnsupportedExtension(other.to_string())),
    }

    let file = File::open(path).map_err(|source| ArtifactLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactLoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Column vocabulary
// ---------------------------------------------------------------------------

/// Load the ordered model columns.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `["year", "id_1", "id_2", ...]`
/// * `.txt` – one name per line, optional `column` header
/// * `.csv` – single-column CSV, optional `column` header
pub fn load_columns(path: &Path) -> Result<ModelColumns, ArtifactLoadError> {
    let names = match extension(path).as_str() {
        "json" => load_columns_json(path)?,
        "csv" => load_columns_csv(path)?,
        "txt" => load_columns_txt(path)?,
        other => return Err(ArtifactLoadError::UnsupportedExtension(other.to_string())),
    };
    ModelColumns::new(names)
}

fn load_columns_json(path: &Path) -> Result<Vec<String>, ArtifactLoadError> {
    let file = File::open(path).map_err(|source| ArtifactLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactLoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// `.txt`: every non-blank line is one name, taken whole.
fn load_columns_txt(path: &Path) -> Result<Vec<String>, ArtifactLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| ArtifactLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    Ok(skip_header(lines).map(str::to_string).collect())
}

/// `.csv`: a single column; names containing commas must be quoted.
fn load_columns_csv(path: &Path) -> Result<Vec<String>, ArtifactLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| ArtifactLoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut names = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|source| ArtifactLoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if record.len() > 1 {
            return Err(ArtifactLoadError::Invalid(format!(
                "{} row {row_no} has {} fields, expected one column name",
                path.display(),
                record.len()
            )));
        }
        let name = record.get(0).unwrap_or("").trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(skip_header(names.iter().map(String::as_str))
        .map(str::to_string)
        .collect())
}

/// Drop a leading `column` / `columns` header line.
fn skip_header<'a>(mut names: impl Iterator<Item = &'a str>) -> impl Iterator<Item = &'a str> {
    let first = names.next().filter(|n| !matches!(*n, "column" | "columns"));
    first.into_iter().chain(names)
}
