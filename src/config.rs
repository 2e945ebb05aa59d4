//! Runtime configuration read from the environment.

use std::path::PathBuf;

use crate::data::model::{PredictionRequest, YEAR_RANGE};

pub const MODEL_PATH_VAR: &str = "WQP_MODEL_PATH";
pub const COLUMNS_PATH_VAR: &str = "WQP_COLUMNS_PATH";
pub const DEFAULT_YEAR_VAR: &str = "WQP_DEFAULT_YEAR";
pub const DEFAULT_STATION_VAR: &str = "WQP_DEFAULT_STATION";

/// Artifact locations and initial form values.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub columns_path: PathBuf,
    pub default_year: i32,
    pub default_station: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("pollution_model.json"),
            columns_path: PathBuf::from("model_columns.json"),
            default_year: 2025,
            default_station: "1".to_string(),
        }
    }
}

impl AppConfig {
    /// Read `WQP_*` variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(MODEL_PATH_VAR) {
            config.model_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(COLUMNS_PATH_VAR) {
            config.columns_path = PathBuf::from(path);
        }

        // Year and station fall back to their defaults independently.
        if let Some(year) = lookup(DEFAULT_YEAR_VAR) {
            match PredictionRequest::parse(&year, &config.default_station) {
                Ok(request) => {
                    let clamped = request
                        .year()
                        .clamp(*YEAR_RANGE.start(), *YEAR_RANGE.end());
                    if clamped != request.year() {
                        log::warn!(
                            "{DEFAULT_YEAR_VAR}={} is outside {}..={}, using {clamped}",
                            request.year(),
                            YEAR_RANGE.start(),
                            YEAR_RANGE.end()
                        );
                    }
                    config.default_year = clamped;
                }
                Err(e) => log::warn!("Ignoring {DEFAULT_YEAR_VAR}: {e}"),
            }
        }
        if let Some(station) = lookup(DEFAULT_STATION_VAR) {
            match PredictionRequest::new(config.default_year, station) {
                Ok(request) => config.default_station = request.station_id().to_string(),
                Err(e) => log::warn!("Ignoring {DEFAULT_STATION_VAR}: {e}"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        assert_eq!(AppConfig::from_lookup(|_| None), AppConfig::default());
    }

    #[test]
    fn paths_and_selection_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (MODEL_PATH_VAR, "/models/m.json"),
            (COLUMNS_PATH_VAR, "/models/cols.csv"),
            (DEFAULT_YEAR_VAR, "2040"),
            (DEFAULT_STATION_VAR, "17"),
        ]));
        assert_eq!(config.model_path, PathBuf::from("/models/m.json"));
        assert_eq!(config.columns_path, PathBuf::from("/models/cols.csv"));
        assert_eq!(config.default_year, 2040);
        assert_eq!(config.default_station, "17");
    }

    #[test]
    fn invalid_selection_falls_back() {
        let config = AppConfig::from_lookup(lookup(&[(DEFAULT_YEAR_VAR, "soon")]));
        assert_eq!(config.default_year, 2025);
        assert_eq!(config.default_station, "1");

        let config = AppConfig::from_lookup(lookup(&[(DEFAULT_STATION_VAR, "")]));
        assert_eq!(config.default_station, "1");
    }

    #[test]
    fn year_and_station_fall_back_independently() {
        let config = AppConfig::from_lookup(lookup(&[
            (DEFAULT_YEAR_VAR, "2040"),
            (DEFAULT_STATION_VAR, ""),
        ]));
        assert_eq!(config.default_year, 2040);
        assert_eq!(config.default_station, "1");

        let config = AppConfig::from_lookup(lookup(&[
            (DEFAULT_YEAR_VAR, "soon"),
            (DEFAULT_STATION_VAR, "Mill Creek"),
        ]));
        assert_eq!(config.default_year, 2025);
        assert_eq!(config.default_station, "Mill Creek");
    }

    #[test]
    fn out_of_range_year_is_clamped_for_the_form() {
        let config = AppConfig::from_lookup(lookup(&[(DEFAULT_YEAR_VAR, "2300")]));
        assert_eq!(config.default_year, 2100);
    }
}
