use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::{ArtifactError, DetectError, N_FEATURES};

/// Pre-fitted per-feature affine normalizer.
///
/// Applies `x' = (x - mean) / scale` with statistics fixed at training
/// time. Immutable after load.
#[derive(Debug, Clone, Deserialize)]
pub struct Scaler {
    n_features: usize,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl Scaler {
    /// Loads the scaler artifact from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let file = File::open(path)?;
        let scaler: Scaler = serde_json::from_reader(BufReader::new(file))?;
        scaler.check_dimensions()?;
        Ok(scaler)
    }

    /// Builds a scaler from raw statistics. Used by tests and tooling.
    pub fn from_stats(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactError> {
        let scaler = Scaler {
            n_features: mean.len(),
            mean,
            scale,
        };
        scaler.check_dimensions()?;
        Ok(scaler)
    }

    fn check_dimensions(&self) -> Result<(), ArtifactError> {
        for &got in &[self.n_features, self.mean.len(), self.scale.len()] {
            if got != N_FEATURES {
                return Err(ArtifactError::Dimension {
                    expected: N_FEATURES,
                    got,
                });
            }
        }
        Ok(())
    }

    /// Applies the affine transform to a raw feature vector.
    pub fn transform(&self, features: &[f32]) -> Result<Vec<f64>, DetectError> {
        if features.len() != N_FEATURES {
            return Err(DetectError::Inference(format!(
                "feature vector has {} elements, expected {}",
                features.len(),
                N_FEATURES
            )));
        }
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&x, (&m, &s))| (x as f64 - m) / s)
            .collect())
    }
}
