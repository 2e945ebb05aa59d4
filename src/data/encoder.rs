use super::model::{FeatureVector, ModelColumns, PredictionRequest, YEAR_COLUMN};

// ---------------------------------------------------------------------------
// Feature alignment: request → model row
// ---------------------------------------------------------------------------

/// Encode a request into a row aligned with `columns`.
///
/// The request contributes two candidate columns: `year` (numeric) and the
/// one-hot station indicator `id_<station_id>` set to 1. Each candidate is
/// written at its position in `columns` if it exists there and dropped
/// otherwise; every other position stays 0. An unknown station therefore
/// yields an all-zero station block rather than an error.
pub fn encode(request: &PredictionRequest, columns: &ModelColumns) -> FeatureVector {
    let mut values = vec![0.0; columns.len()];

    if let Some(pos) = columns.position(YEAR_COLUMN) {
        values[pos] = f64::from(request.year());
    }

    let station_column = request.station_column();
    let known = match columns.position(&station_column) {
        Some(pos) => {
            values[pos] = 1.0;
            true
        }
        None => false,
    };

    log::debug!(
        "Encoded year={} station={:?} (known: {known}) into {} columns",
        request.year(),
        request.station_id(),
        values.len()
    );

    FeatureVector::from_values(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> ModelColumns {
        ModelColumns::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn request(year: i32, station: &str) -> PredictionRequest {
        PredictionRequest::new(year, station).unwrap()
    }

    #[test]
    fn known_station_is_one_hot() {
        let cols = columns(&["year", "id_1", "id_2"]);
        let v = encode(&request(2025, "1"), &cols);
        assert_eq!(v.values(), &[2025.0, 1.0, 0.0]);
    }

    #[test]
    fn unknown_station_is_all_zero() {
        let cols = columns(&["year", "id_1", "id_2"]);
        let v = encode(&request(2025, "99"), &cols);
        assert_eq!(v.values(), &[2025.0, 0.0, 0.0]);
    }

    #[test]
    fn output_follows_column_order() {
        let fixtures: [&[&str]; 4] = [
            &["year", "id_1", "id_2"],
            &["id_2", "id_1", "year"],
            &["id_5", "year", "extra", "id_3", "id_1"],
            &["id_1"],
        ];
        for names in fixtures {
            let cols = columns(names);
            for station in ["1", "2", "3", "42"] {
                let v = encode(&request(2040, station), &cols);
                assert_eq!(v.len(), cols.len());

                for (name, value) in v.named(&cols) {
                    let expected = if name == "year" {
                        2040.0
                    } else if name == format!("id_{station}") {
                        1.0
                    } else {
                        0.0
                    };
                    assert_eq!(value, expected, "column {name} for station {station}");
                }
            }
        }
    }

    #[test]
    fn exactly_one_station_column_is_hot() {
        let cols = columns(&["year", "id_1", "id_2", "id_3", "id_4"]);
        let v = encode(&request(2010, "3"), &cols);
        let hot: Vec<&str> = v
            .named(&cols)
            .filter(|(name, value)| name.starts_with("id_") && *value == 1.0)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(hot, vec!["id_3"]);
    }

    #[test]
    fn year_absent_from_vocabulary_is_dropped() {
        let cols = columns(&["id_1", "id_2"]);
        let v = encode(&request(2025, "2"), &cols);
        assert_eq!(v.values(), &[0.0, 1.0]);
    }

    #[test]
    fn station_named_like_year_does_not_collide() {
        let cols = columns(&["year", "id_year"]);
        let v = encode(&request(2001, "year"), &cols);
        assert_eq!(v.values(), &[2001.0, 1.0]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let cols = columns(&["year", "id_a", "id_b", "id_c"]);
        let req = request(2077, "b");
        let first = encode(&req, &cols);
        for _ in 0..10 {
            assert_eq!(encode(&req, &cols), first);
        }
    }
}
