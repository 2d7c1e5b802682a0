use std::path::Path;

use crate::{explanation, ArtifactError, Classification, Classifier, DetectError, Scaler};

/// Artifact file name for the classifier, relative to the models directory.
pub const CLASSIFIER_FILE: &str = "voice_detector.json";

/// Artifact file name for the feature scaler.
pub const SCALER_FILE: &str = "scaler.json";

/// Outcome of classifying one clip.
#[derive(Debug, Clone, Copy)]
pub struct Detection {
    pub classification: Classification,
    /// Maximum class probability, in [0.5, 1].
    pub confidence: f64,
}

impl Detection {
    /// The canned explanation for this detection.
    pub fn explanation(&self) -> &'static str {
        explanation(self.classification, self.confidence)
    }
}

/// Loaded classifier + scaler pair.
///
/// Read-only after construction; share one instance across all requests.
#[derive(Debug)]
pub struct Detector {
    scaler: Scaler,
    classifier: Classifier,
}

impl Detector {
    /// Loads both artifacts from the models directory.
    ///
    /// Fails if either file is missing, malformed, or fitted on a
    /// dimension other than [`crate::N_FEATURES`].
    pub fn load(models_dir: &Path) -> Result<Self, ArtifactError> {
        let classifier = Classifier::load(&models_dir.join(CLASSIFIER_FILE))?;
        let scaler = Scaler::load(&models_dir.join(SCALER_FILE))?;
        Ok(Self { scaler, classifier })
    }

    /// Assembles a detector from already-built artifacts. Used by tests.
    pub fn from_parts(scaler: Scaler, classifier: Classifier) -> Self {
        Self { scaler, classifier }
    }

    /// Normalizes a raw feature vector and classifies it.
    pub fn detect(&self, raw_features: &[f32]) -> Result<Detection, DetectError> {
        let scaled = self.scaler.transform(raw_features)?;
        let proba = self.classifier.predict_proba(&scaled)?;
        let label = self.classifier.predict(&scaled)?;

        let classification = if label == 1 {
            Classification::AiGenerated
        } else {
            Classification::Human
        };
        let confidence = proba[0].max(proba[1]);
        Ok(Detection {
            classification,
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::N_FEATURES;

    fn detector_with_weight(index: usize, weight: f64, bias: f64) -> Detector {
        let scaler =
            Scaler::from_stats(vec![0.0; N_FEATURES], vec![1.0; N_FEATURES]).unwrap();
        let mut weights = vec![0.0f64; N_FEATURES];
        weights[index] = weight;
        let classifier = Classifier::from_params(weights, bias).unwrap();
        Detector::from_parts(scaler, classifier)
    }

    #[test]
    fn test_detect_ai_label() {
        let detector = detector_with_weight(0, 4.0, 0.0);
        let mut features = vec![0.0f32; N_FEATURES];
        features[0] = 1.0;
        let detection = detector.detect(&features).unwrap();
        assert_eq!(detection.classification, Classification::AiGenerated);
        assert!(detection.confidence > 0.9);
    }

    #[test]
    fn test_detect_human_label() {
        let detector = detector_with_weight(0, 4.0, 0.0);
        let mut features = vec![0.0f32; N_FEATURES];
        features[0] = -1.0;
        let detection = detector.detect(&features).unwrap();
        assert_eq!(detection.classification, Classification::Human);
    }

    #[test]
    fn test_confidence_is_max_class_probability() {
        let detector = detector_with_weight(0, 1.0, 0.0);
        let features = vec![0.0f32; N_FEATURES];
        let detection = detector.detect(&features).unwrap();
        // Logit 0 -> both classes at 0.5
        assert!((detection.confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_detect_idempotent() {
        let detector = detector_with_weight(10, -2.5, 0.7);
        let features: Vec<f32> = (0..N_FEATURES).map(|i| (i as f32) * 0.01).collect();
        let a = detector.detect(&features).unwrap();
        let b = detector.detect(&features).unwrap();
        assert_eq!(a.classification, b.classification);
        assert_eq!(a.confidence, b.confidence);
    }

    #[test]
    fn test_detection_explanation_is_canned() {
        let detector = detector_with_weight(0, 10.0, 0.0);
        let mut features = vec![0.0f32; N_FEATURES];
        features[0] = 1.0;
        let detection = detector.detect(&features).unwrap();
        assert!(detection.explanation().starts_with("Strong AI indicators"));
    }

    #[test]
    fn test_load_missing_dir_fails() {
        let err = Detector::load(Path::new("/nonexistent/models")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io(_)));
    }
}
