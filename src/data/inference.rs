use super::estimator::Estimator;
use super::model::{FeatureVector, Pollutant, PredictionResult};
use crate::error::PredictError;

/// Run the estimator on one aligned row and read the outputs positionally
/// as the six pollutants.
pub fn predict(
    vector: &FeatureVector,
    estimator: &dyn Estimator,
) -> Result<PredictionResult, PredictError> {
    let outputs = estimator.predict_row(vector.values())?;

    let values: [f64; 6] = outputs.as_slice().try_into().map_err(|_| {
        PredictError::Inference(format!(
            "estimator returned {} values, expected {}",
            outputs.len(),
            Pollutant::ALL.len()
        ))
    })?;

    log::debug!("Predicted {values:?}");
    Ok(PredictionResult::new(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::encoder::encode;
    use crate::data::estimator::LinearEstimator;
    use crate::data::model::{ModelColumns, PredictionRequest};

    /// Sums the row into every output, scaled by output index.
    struct Scaled {
        n_features: usize,
        n_outputs: usize,
    }

    impl Estimator for Scaled {
        fn n_features(&self) -> usize {
            self.n_features
        }

        fn n_outputs(&self) -> usize {
            self.n_outputs
        }

        fn predict_row(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
            if row.len() != self.n_features {
                return Err(PredictError::Inference("bad row".to_string()));
            }
            let total: f64 = row.iter().sum();
            Ok((0..self.n_outputs).map(|k| total * k as f64).collect())
        }
    }

    fn columns() -> ModelColumns {
        ModelColumns::new(vec!["year".into(), "id_1".into(), "id_2".into()]).unwrap()
    }

    #[test]
    fn returns_six_values_in_order() {
        let est = Scaled {
            n_features: 3,
            n_outputs: 6,
        };
        let req = PredictionRequest::new(2025, "1").unwrap();
        let result = predict(&encode(&req, &columns()), &est).unwrap();
        assert_eq!(
            result.values(),
            &[0.0, 2026.0, 4052.0, 6078.0, 8104.0, 10130.0]
        );
        assert_eq!(result.get(Pollutant::Nitrate), 2026.0);
    }

    #[test]
    fn wrong_output_count_is_inference_error() {
        let est = Scaled {
            n_features: 3,
            n_outputs: 5,
        };
        let req = PredictionRequest::new(2025, "1").unwrap();
        let err = predict(&encode(&req, &columns()), &est).unwrap_err();
        assert!(matches!(err, PredictError::Inference(_)));
    }

    #[test]
    fn column_count_mismatch_is_inference_error() {
        let est = Scaled {
            n_features: 4,
            n_outputs: 6,
        };
        let vector = FeatureVector::from_values(vec![2025.0, 1.0, 0.0]);
        assert!(matches!(
            predict(&vector, &est),
            Err(PredictError::Inference(_))
        ));
    }

    #[test]
    fn prediction_is_deterministic() {
        let est = LinearEstimator {
            coefficients: (0..6).map(|k| vec![0.001 * k as f64, 0.3, -0.7]).collect(),
            intercepts: vec![8.0, 2.0, 0.1, 30.0, 0.5, 60.0],
        };
        let req = PredictionRequest::new(2033, "2").unwrap();
        let vector = encode(&req, &columns());
        let first = predict(&vector, &est).unwrap();
        for _ in 0..10 {
            let again = predict(&vector, &est).unwrap();
            for (a, b) in first.values().iter().zip(again.values()) {
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }
}
