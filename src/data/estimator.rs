use serde::{Deserialize, Serialize};

use crate::error::{ArtifactLoadError, PredictError};

// ---------------------------------------------------------------------------
// Estimator trait
// ---------------------------------------------------------------------------

/// A trained multi-output regressor applied one row at a time.
pub trait Estimator: Send + Sync {
    /// Number of input features the estimator was fit on.
    fn n_features(&self) -> usize;

    /// Number of values produced per row.
    fn n_outputs(&self) -> usize;

    /// Predict all outputs for a single row.
    fn predict_row(&self, row: &[f64]) -> Result<Vec<f64>, PredictError>;
}

fn check_row_len(expected: usize, row: &[f64]) -> Result<(), PredictError> {
    if row.len() != expected {
        return Err(PredictError::Inference(format!(
            "estimator expects {expected} features, got {}",
            row.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Linear multi-output regression
// ---------------------------------------------------------------------------

/// `y[k] = intercepts[k] + coefficients[k] · x`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearEstimator {
    /// One coefficient row per output.
    pub coefficients: Vec<Vec<f64>>,
    /// One intercept per output.
    pub intercepts: Vec<f64>,
}

impl LinearEstimator {
    pub fn validate(&self) -> Result<(), ArtifactLoadError> {
        let n_features = self.n_features();
        if self.coefficients.is_empty() || n_features == 0 {
            return Err(ArtifactLoadError::Invalid(
                "linear estimator has no coefficients".to_string(),
            ));
        }
        if let Some((k, row)) = self
            .coefficients
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != n_features)
        {
            return Err(ArtifactLoadError::Invalid(format!(
                "coefficient row {k} has {} values, expected {n_features}",
                row.len()
            )));
        }
        if self.intercepts.len() != self.coefficients.len() {
            return Err(ArtifactLoadError::Invalid(format!(
                "{} intercepts for {} outputs",
                self.intercepts.len(),
                self.coefficients.len()
            )));
        }
        Ok(())
    }
}

impl Estimator for LinearEstimator {
    fn n_features(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    fn n_outputs(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_row(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
        check_row_len(self.n_features(), row)?;
        Ok(self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(coef, b)| b + coef.iter().zip(row).map(|(w, x)| w * x).sum::<f64>())
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Random forest of multi-output regression trees
// ---------------------------------------------------------------------------

/// A node of a regression tree. Rows with `row[feature] <= threshold` go left.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        values: Vec<f64>,
    },
}

impl TreeNode {
    fn leaf_for(&self, row: &[f64]) -> &[f64] {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { values } => return values,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { &**left } else { &**right };
                }
            }
        }
    }

    /// Walk the tree checking split features and leaf widths; the width
    /// shared by every leaf is recorded in `width`.
    fn validate(
        &self,
        n_features: usize,
        width: &mut Option<usize>,
    ) -> Result<(), ArtifactLoadError> {
        match self {
            TreeNode::Leaf { values } => match *width {
                None if values.is_empty() => Err(ArtifactLoadError::Invalid(
                    "tree leaf has no values".to_string(),
                )),
                None => {
                    *width = Some(values.len());
                    Ok(())
                }
                Some(w) if w != values.len() => Err(ArtifactLoadError::Invalid(format!(
                    "tree leaf has {} values, expected {w}",
                    values.len()
                ))),
                Some(_) => Ok(()),
            },
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= n_features {
                    return Err(ArtifactLoadError::Invalid(format!(
                        "split on feature {feature} but only {n_features} features"
                    )));
                }
                if !threshold.is_finite() {
                    return Err(ArtifactLoadError::Invalid(format!(
                        "split on feature {feature} has non-finite threshold"
                    )));
                }
                left.validate(n_features, width)?;
                right.validate(n_features, width)
            }
        }
    }
}

/// Averages the leaf vectors of its trees. Only constructed validated, so
/// every split feature indexes inside a row of `n_features` values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ForestParts")]
pub struct ForestEstimator {
    n_features: usize,
    trees: Vec<TreeNode>,
    #[serde(skip)]
    n_outputs: usize,
}

/// Unchecked serialized layout of a forest.
#[derive(Deserialize)]
struct ForestParts {
    n_features: usize,
    trees: Vec<TreeNode>,
}

impl TryFrom<ForestParts> for ForestEstimator {
    type Error = ArtifactLoadError;

    fn try_from(parts: ForestParts) -> Result<Self, Self::Error> {
        Self::new(parts.n_features, parts.trees)
    }
}

impl ForestEstimator {
    pub fn new(n_features: usize, trees: Vec<TreeNode>) -> Result<Self, ArtifactLoadError> {
        let mut forest = Self {
            n_features,
            trees,
            n_outputs: 0,
        };
        forest.validate()?;
        Ok(forest)
    }

    pub fn trees(&self) -> &[TreeNode] {
        &self.trees
    }

    /// Check the tree structure and record the output width.
    fn validate(&mut self) -> Result<(), ArtifactLoadError> {
        if self.trees.is_empty() {
            return Err(ArtifactLoadError::Invalid("forest has no trees".to_string()));
        }
        let mut width = None;
        for tree in &self.trees {
            tree.validate(self.n_features, &mut width)?;
        }
        self.n_outputs = width.unwrap_or(0);
        Ok(())
    }
}

impl Estimator for ForestEstimator {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_outputs(&self) -> usize {
        self.n_outputs
    }

    fn predict_row(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
        check_row_len(self.n_features, row)?;
        let mut sums = vec![0.0; self.n_outputs];
        for tree in &self.trees {
            for (sum, v) in sums.iter_mut().zip(tree.leaf_for(row)) {
                *sum += v;
            }
        }
        let n = self.trees.len() as f64;
        Ok(sums.into_iter().map(|s| s / n).collect())
    }
}

// ---------------------------------------------------------------------------
// Serialized form
// ---------------------------------------------------------------------------

/// The estimator as stored in the model artifact, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SavedEstimator {
    Linear(LinearEstimator),
    Forest(ForestEstimator),
}

impl SavedEstimator {
    pub fn kind(&self) -> &'static str {
        match self {
            SavedEstimator::Linear(_) => "linear",
            SavedEstimator::Forest(_) => "forest",
        }
    }

    pub fn validate(&mut self) -> Result<(), ArtifactLoadError> {
        match self {
            SavedEstimator::Linear(m) => m.validate(),
            SavedEstimator::Forest(m) => m.validate(),
        }
    }

    fn inner(&self) -> &dyn Estimator {
        match self {
            SavedEstimator::Linear(m) => m,
            SavedEstimator::Forest(m) => m,
        }
    }
}

impl Estimator for SavedEstimator {
    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn n_outputs(&self) -> usize {
        self.inner().n_outputs()
    }

    fn predict_row(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
        self.inner().predict_row(row)
    }
}

/// Descriptive metadata carried alongside the estimator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Held-out accuracy in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// Top-level layout of the model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedModel {
    #[serde(default)]
    pub info: ModelInfo,
    pub estimator: SavedEstimator,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(values: &[f64]) -> TreeNode {
        TreeNode::Leaf {
            values: values.to_vec(),
        }
    }

    fn split(feature: usize, threshold: f64, left: TreeNode, right: TreeNode) -> TreeNode {
        TreeNode::Split {
            feature,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn linear_predicts_each_output() {
        let m = LinearEstimator {
            coefficients: vec![vec![1.0, 2.0], vec![0.5, -1.0]],
            intercepts: vec![10.0, 0.0],
        };
        m.validate().unwrap();
        let out = m.predict_row(&[3.0, 4.0]).unwrap();
        assert_eq!(out, vec![21.0, -2.5]);
    }

    #[test]
    fn linear_rejects_wrong_row_length() {
        let m = LinearEstimator {
            coefficients: vec![vec![1.0, 2.0]],
            intercepts: vec![0.0],
        };
        assert!(matches!(
            m.predict_row(&[1.0]),
            Err(PredictError::Inference(_))
        ));
    }

    #[test]
    fn linear_validation_catches_ragged_rows() {
        let ragged = LinearEstimator {
            coefficients: vec![vec![1.0, 2.0], vec![1.0]],
            intercepts: vec![0.0, 0.0],
        };
        assert!(ragged.validate().is_err());

        let missing_intercept = LinearEstimator {
            coefficients: vec![vec![1.0], vec![1.0]],
            intercepts: vec![0.0],
        };
        assert!(missing_intercept.validate().is_err());
    }

    #[test]
    fn forest_averages_tree_leaves() {
        let t1 = split(0, 2010.0, leaf(&[1.0, 10.0]), leaf(&[3.0, 30.0]));
        let t2 = split(1, 0.5, leaf(&[5.0, 50.0]), leaf(&[7.0, 70.0]));
        let forest = ForestEstimator::new(2, vec![t1, t2]).unwrap();
        assert_eq!(forest.n_outputs(), 2);

        // year 2005 → left in t1; station flag 1 → right in t2
        let out = forest.predict_row(&[2005.0, 1.0]).unwrap();
        assert_eq!(out, vec![4.0, 40.0]);

        // threshold is inclusive on the left
        let out = forest.predict_row(&[2010.0, 0.5]).unwrap();
        assert_eq!(out, vec![3.0, 30.0]);
    }

    #[test]
    fn forest_validation() {
        assert!(ForestEstimator::new(2, vec![]).is_err());
        assert!(ForestEstimator::new(1, vec![split(3, 0.0, leaf(&[1.0]), leaf(&[2.0]))]).is_err());
        assert!(ForestEstimator::new(1, vec![split(0, 0.0, leaf(&[1.0]), leaf(&[2.0, 3.0]))]).is_err());
        assert!(ForestEstimator::new(1, vec![split(0, f64::NAN, leaf(&[1.0]), leaf(&[2.0]))]).is_err());
    }

    #[test]
    fn forest_is_validated_on_deserialize() {
        let bad = r#"{
            "n_features": 1,
            "trees": [
                { "split": { "feature": 4, "threshold": 0.5,
                             "left": { "leaf": { "values": [1.0] } },
                             "right": { "leaf": { "values": [2.0] } } } }
            ]
        }"#;
        let err = serde_json::from_str::<ForestEstimator>(bad).unwrap_err();
        assert!(err.to_string().contains("feature 4"));

        let good = r#"{ "n_features": 2, "trees": [ { "leaf": { "values": [1.0, 2.0] } } ] }"#;
        let forest: ForestEstimator = serde_json::from_str(good).unwrap();
        assert_eq!(forest.n_outputs(), 2);
        assert_eq!(forest.trees().len(), 1);
        assert_eq!(forest.predict_row(&[0.0, 0.0]).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn saved_model_deserializes_both_kinds() {
        let linear = r#"{
            "info": { "accuracy": 0.942, "updated": "July 2025" },
            "estimator": { "kind": "linear", "coefficients": [[1.0]], "intercepts": [2.0] }
        }"#;
        let mut model: SavedModel = serde_json::from_str(linear).unwrap();
        model.estimator.validate().unwrap();
        assert_eq!(model.estimator.kind(), "linear");
        assert_eq!(model.info.accuracy, Some(0.942));
        assert_eq!(model.estimator.predict_row(&[3.0]).unwrap(), vec![5.0]);

        let forest = r#"{
            "estimator": {
                "kind": "forest",
                "n_features": 1,
                "trees": [
                    { "split": { "feature": 0, "threshold": 0.5,
                                 "left": { "leaf": { "values": [1.0] } },
                                 "right": { "leaf": { "values": [9.0] } } } }
                ]
            }
        }"#;
        let mut model: SavedModel = serde_json::from_str(forest).unwrap();
        model.estimator.validate().unwrap();
        assert_eq!(model.estimator.kind(), "forest");
        assert!(model.info.name.is_none());
        assert_eq!(model.estimator.n_outputs(), 1);
        assert_eq!(model.estimator.predict_row(&[1.0]).unwrap(), vec![9.0]);
    }
}
