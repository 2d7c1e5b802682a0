use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::{ArtifactError, DetectError, N_FEATURES};

/// Pre-trained binary classifier over normalized feature vectors.
///
/// Logistic regression: `p(AI) = sigmoid(w . x + b)`. Label 1 is
/// AI-generated, label 0 is human. Immutable after load; no online
/// learning or model-update path.
#[derive(Debug, Clone, Deserialize)]
pub struct Classifier {
    n_features: usize,
    weights: Vec<f64>,
    bias: f64,
}

impl Classifier {
    /// Loads the classifier artifact from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let file = File::open(path)?;
        let clf: Classifier = serde_json::from_reader(BufReader::new(file))?;
        clf.check_dimensions()?;
        Ok(clf)
    }

    /// Builds a classifier from raw parameters. Used by tests and tooling.
    pub fn from_params(weights: Vec<f64>, bias: f64) -> Result<Self, ArtifactError> {
        let clf = Classifier {
            n_features: weights.len(),
            weights,
            bias,
        };
        clf.check_dimensions()?;
        Ok(clf)
    }

    fn check_dimensions(&self) -> Result<(), ArtifactError> {
        for &got in &[self.n_features, self.weights.len()] {
            if got != N_FEATURES {
                return Err(ArtifactError::Dimension {
                    expected: N_FEATURES,
                    got,
                });
            }
        }
        Ok(())
    }

    /// Probability of each class, `[p(human), p(ai)]`.
    pub fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], DetectError> {
        if features.len() != N_FEATURES {
            return Err(DetectError::Inference(format!(
                "feature vector has {} elements, expected {}",
                features.len(),
                N_FEATURES
            )));
        }
        let logit: f64 = self
            .weights
            .iter()
            .zip(features)
            .map(|(&w, &x)| w * x)
            .sum::<f64>()
            + self.bias;
        let p_ai = sigmoid(logit);
        Ok([1.0 - p_ai, p_ai])
    }

    /// Predicted label: 1 = AI-generated, 0 = human.
    pub fn predict(&self, features: &[f64]) -> Result<u8, DetectError> {
        let proba = self.predict_proba(features)?;
        Ok(if proba[1] >= proba[0] { 1 } else { 0 })
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_weight_classifier(index: usize, weight: f64, bias: f64) -> Classifier {
        let mut weights = vec![0.0f64; N_FEATURES];
        weights[index] = weight;
        Classifier::from_params(weights, bias).unwrap()
    }

    #[test]
    fn test_zero_model_is_uncertain() {
        let clf = Classifier::from_params(vec![0.0; N_FEATURES], 0.0).unwrap();
        let proba = clf.predict_proba(&vec![1.0; N_FEATURES]).unwrap();
        assert!((proba[0] - 0.5).abs() < 1e-12);
        assert!((proba[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let clf = single_weight_classifier(0, 3.0, -1.0);
        for x in [-5.0, -1.0, 0.0, 0.5, 10.0] {
            let mut features = vec![0.0f64; N_FEATURES];
            features[0] = x;
            let proba = clf.predict_proba(&features).unwrap();
            assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_predict_label_follows_sign() {
        let clf = single_weight_classifier(7, 2.0, 0.0);
        let mut features = vec![0.0f64; N_FEATURES];
        features[7] = 5.0;
        assert_eq!(clf.predict(&features).unwrap(), 1);
        features[7] = -5.0;
        assert_eq!(clf.predict(&features).unwrap(), 0);
    }

    #[test]
    fn test_deterministic() {
        let clf = single_weight_classifier(3, 1.5, 0.25);
        let features: Vec<f64> = (0..N_FEATURES).map(|i| (i as f64).sin()).collect();
        let a = clf.predict_proba(&features).unwrap();
        let b = clf.predict_proba(&features).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sigmoid_extreme_inputs_stay_finite() {
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(sigmoid(1000.0).is_finite());
        assert!(sigmoid(-1000.0).is_finite());
    }

    #[test]
    fn test_wrong_dimension_rejected() {
        let err = Classifier::from_params(vec![0.0; 5], 0.0).unwrap_err();
        assert!(matches!(err, ArtifactError::Dimension { .. }));

        let clf = single_weight_classifier(0, 1.0, 0.0);
        let err = clf.predict_proba(&[0.0; 3]).unwrap_err();
        assert!(matches!(err, DetectError::Inference(_)));
    }
}
