//! No-op classifier: knows its labels, never detects anything.
//!
//! The fallback backend when the crate is built without `onnx`; keeps the
//! pipeline runnable end to end without inference dependencies.

use crate::classifier::Classifier;
use crate::types::Prediction;
use async_trait::async_trait;
use notevox_camera::Frame;
use notevox_foundation::ClassifyError;

pub struct NoopClassifier {
    labels: Vec<String>,
}

impl NoopClassifier {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

#[async_trait]
impl Classifier for NoopClassifier {
    async fn classify(&self, _frame: &Frame) -> Result<Vec<Prediction>, ClassifyError> {
        Ok(self
            .labels
            .iter()
            .map(|label| Prediction::rounded(label.clone(), 0.0))
            .collect())
    }

    fn class_count(&self) -> usize {
        self.labels.len()
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}
