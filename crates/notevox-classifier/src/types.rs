use serde::{Deserialize, Serialize};

/// A per-class confidence score.
///
/// Confidence is clamped to [0, 1] and rounded to 2 decimal places so the
/// rendered list does not flicker through float noise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

impl Prediction {
    /// Build a prediction with display-stable confidence.
    pub fn rounded(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence: round2(confidence.clamp(0.0, 1.0)),
        }
    }

    /// Placeholder entry used before the first classification of a session.
    pub fn empty() -> Self {
        Self {
            label: String::new(),
            confidence: 0.0,
        }
    }
}

pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// The winning prediction, resolved by strictly-greater comparison so the
/// first class seen at the maximum confidence wins ties.
pub fn top_prediction(predictions: &[Prediction]) -> Option<&Prediction> {
    let mut best: Option<&Prediction> = None;
    for p in predictions {
        match best {
            Some(b) if p.confidence > b.confidence => best = Some(p),
            None => best = Some(p),
            _ => {}
        }
    }
    best
}

/// Where to fetch the model from: a base URL yielding a model descriptor
/// and a metadata document.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelLocation {
    base_url: String,
}

impl ModelLocation {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    pub fn metadata_url(&self) -> String {
        format!("{}metadata.json", self.base_url)
    }

    pub fn model_url(&self) -> String {
        format!("{}model.onnx", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounded_clamps_and_truncates() {
        assert_eq!(Prediction::rounded("x", 1.7).confidence, 1.0);
        assert_eq!(Prediction::rounded("x", -0.2).confidence, 0.0);
        assert_eq!(Prediction::rounded("x", 0.12345).confidence, 0.12);
        assert_eq!(Prediction::rounded("x", 0.705).confidence, 0.71);
    }

    #[test]
    fn tie_resolves_to_first_seen() {
        let preds = vec![
            Prediction::rounded("A", 0.9),
            Prediction::rounded("B", 0.9),
        ];
        assert_eq!(top_prediction(&preds).unwrap().label, "A");
    }

    #[test]
    fn top_prediction_of_empty_is_none() {
        assert!(top_prediction(&[]).is_none());
    }

    #[test]
    fn location_urls_handle_missing_slash() {
        let loc = ModelLocation::new("https://example.com/models/abc");
        assert_eq!(loc.metadata_url(), "https://example.com/models/abc/metadata.json");
        assert_eq!(loc.model_url(), "https://example.com/models/abc/model.onnx");
    }
}
