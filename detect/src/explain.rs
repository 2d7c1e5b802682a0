/// Binary classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    AiGenerated,
    Human,
}

impl Classification {
    /// The wire-format label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::AiGenerated => "AI_GENERATED",
            Classification::Human => "HUMAN",
        }
    }
}

/// Maps a classification and its confidence to a canned explanation.
///
/// Thresholds are strict: a confidence of exactly 0.9, 0.75 or 0.6 selects
/// the lower bucket. Total over the whole [0, 1] range.
pub fn explanation(classification: Classification, confidence: f64) -> &'static str {
    match classification {
        Classification::AiGenerated => {
            if confidence > 0.9 {
                "Strong AI indicators: unnatural spectral consistency and robotic prosody patterns detected"
            } else if confidence > 0.75 {
                "High probability of AI generation based on voice characteristics and temporal patterns"
            } else if confidence > 0.6 {
                "Moderate AI-like features detected in audio analysis"
            } else {
                "Some AI characteristics present but confidence is low"
            }
        }
        Classification::Human => {
            if confidence > 0.9 {
                "Strong human characteristics: natural voice variations, breath patterns, and organic prosody"
            } else if confidence > 0.75 {
                "Voice exhibits clear human qualities with natural acoustic variations"
            } else if confidence > 0.6 {
                "Human voice detected with typical natural speech patterns"
            } else {
                "Human classification but with some unusual acoustic features"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Classification::{AiGenerated, Human};

    #[test]
    fn test_boundaries_select_lower_bucket() {
        // Strict > comparisons: exact threshold values fall through
        assert_eq!(
            explanation(AiGenerated, 0.9),
            "High probability of AI generation based on voice characteristics and temporal patterns"
        );
        assert_eq!(
            explanation(AiGenerated, 0.75),
            "Moderate AI-like features detected in audio analysis"
        );
        assert_eq!(
            explanation(AiGenerated, 0.6),
            "Some AI characteristics present but confidence is low"
        );
        assert_eq!(
            explanation(Human, 0.9),
            "Voice exhibits clear human qualities with natural acoustic variations"
        );
        assert_eq!(
            explanation(Human, 0.75),
            "Human voice detected with typical natural speech patterns"
        );
        assert_eq!(
            explanation(Human, 0.6),
            "Human classification but with some unusual acoustic features"
        );
    }

    #[test]
    fn test_top_buckets() {
        assert!(explanation(AiGenerated, 0.95).starts_with("Strong AI indicators"));
        assert!(explanation(Human, 0.99).starts_with("Strong human characteristics"));
    }

    #[test]
    fn test_total_over_unit_interval() {
        let all: [&str; 8] = [
            explanation(AiGenerated, 1.0),
            explanation(AiGenerated, 0.8),
            explanation(AiGenerated, 0.65),
            explanation(AiGenerated, 0.0),
            explanation(Human, 1.0),
            explanation(Human, 0.8),
            explanation(Human, 0.65),
            explanation(Human, 0.0),
        ];
        // Eight distinct strings, one per (label, bucket) pair
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_wire_labels() {
        assert_eq!(AiGenerated.as_str(), "AI_GENERATED");
        assert_eq!(Human.as_str(), "HUMAN");
    }
}
