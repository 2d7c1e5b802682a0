//! AI-voice detection: classifier and normalizer artifacts plus the canned
//! explanation strings.
//!
//! # Pipeline
//!
//! 1. [`Scaler::transform`]: raw 173-dim feature vector -> normalized vector
//! 2. [`Classifier::predict_proba`]: normalized vector -> class probabilities
//! 3. [`explanation`]: (label, confidence) -> one of eight fixed strings
//!
//! Both artifacts are JSON files loaded once at startup ([`Detector::load`])
//! and immutable for the process lifetime; a `Detector` is safe to share
//! across concurrent requests.

mod classifier;
mod detector;
mod error;
mod explain;
mod scaler;

pub use classifier::Classifier;
pub use detector::{Detection, Detector, CLASSIFIER_FILE, SCALER_FILE};
pub use error::{ArtifactError, DetectError};
pub use explain::{explanation, Classification};
pub use scaler::Scaler;

/// Dimensionality of the feature vector the artifacts were fitted on.
pub const N_FEATURES: usize = 173;
