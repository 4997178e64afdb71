//! Scriptable classifier and loader for exercising the detection session.

use crate::classifier::{Classifier, ClassifierLoader};
use crate::types::{ModelLocation, Prediction};
use async_trait::async_trait;
use notevox_camera::Frame;
use notevox_foundation::{ClassifyError, ModelError};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// One scripted classify outcome: per-class confidences or an error message.
pub type MockOutcome = Result<Vec<f32>, String>;

/// Classifier whose per-tick outcomes are scripted up front.
///
/// Outcomes are consumed in order; once the script is exhausted the fallback
/// confidences repeat forever.
pub struct MockClassifier {
    labels: Vec<String>,
    script: Mutex<VecDeque<MockOutcome>>,
    fallback: Vec<f32>,
    calls: AtomicUsize,
}

impl MockClassifier {
    pub fn new(labels: Vec<String>) -> Self {
        let fallback = vec![0.0; labels.len()];
        Self {
            labels,
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always return the same confidences.
    pub fn constant(labels: Vec<String>, confidences: Vec<f32>) -> Self {
        assert_eq!(labels.len(), confidences.len());
        let mut mock = Self::new(labels);
        mock.fallback = confidences;
        mock
    }

    /// Consume `outcomes` in order, then fall back to all-zero confidences.
    pub fn scripted(labels: Vec<String>, outcomes: Vec<MockOutcome>) -> Self {
        let mock = Self::new(labels);
        *mock.script.lock() = outcomes.into();
        mock
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, _frame: &Frame) -> Result<Vec<Prediction>, ClassifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()));
        match outcome {
            Ok(confidences) => Ok(self
                .labels
                .iter()
                .zip(confidences)
                .map(|(label, c)| Prediction::rounded(label.clone(), c))
                .collect()),
            Err(message) => Err(ClassifyError::Inference(message)),
        }
    }

    fn class_count(&self) -> usize {
        self.labels.len()
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Loader returning the same result on every load, with an optional gate so
/// tests can hold a load in flight and issue `stop()` before it resolves.
pub struct MockLoader {
    result: Result<Arc<dyn Classifier>, ModelError>,
    gate: Option<Arc<Notify>>,
    loads: AtomicUsize,
}

impl MockLoader {
    pub fn ok(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            result: Ok(classifier),
            gate: None,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: ModelError) -> Self {
        Self {
            result: Err(error),
            gate: None,
            loads: AtomicUsize::new(0),
        }
    }

    /// Each load waits until the returned gate is notified.
    pub fn gated(classifier: Arc<dyn Classifier>) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let loader = Self {
            result: Ok(classifier),
            gate: Some(gate.clone()),
            loads: AtomicUsize::new(0),
        };
        (loader, gate)
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClassifierLoader for MockLoader {
    async fn load(&self, _location: &ModelLocation) -> Result<Arc<dyn Classifier>, ModelError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_outcomes_run_in_order() {
        let clf = MockClassifier::scripted(
            vec!["A".into(), "B".into()],
            vec![Ok(vec![0.9, 0.1]), Err("tick failed".into())],
        );
        let frame = Frame::filled(4, 4, [0, 0, 0]);

        let first = clf.classify(&frame).await.unwrap();
        assert_eq!(first[0].confidence, 0.9);

        assert!(clf.classify(&frame).await.is_err());

        // Script exhausted: falls back to zeros.
        let third = clf.classify(&frame).await.unwrap();
        assert!(third.iter().all(|p| p.confidence == 0.0));
        assert_eq!(clf.calls(), 3);
    }
}
