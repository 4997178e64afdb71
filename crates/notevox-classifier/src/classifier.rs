//! Classifier abstraction.
//!
//! The detection session treats the model as a black box behind these two
//! traits; any backend (ONNX, mock, no-op) is dependency-injected and never
//! hard-wired into the session.

use crate::types::{ModelLocation, Prediction};
use async_trait::async_trait;
use notevox_camera::Frame;
use notevox_foundation::{ClassifyError, ModelError};
use std::sync::Arc;

/// A loaded image classifier.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Score one frame. Returns exactly one [`Prediction`] per known class,
    /// in the model's native class order. Confidences need not sum to 1.
    async fn classify(&self, frame: &Frame) -> Result<Vec<Prediction>, ClassifyError>;

    /// Number of classes; fixed once loaded.
    fn class_count(&self) -> usize;

    /// Class labels in native order.
    fn labels(&self) -> &[String];
}

/// Loads a classifier from a model location.
///
/// Loading is asynchronous and network-bound; each session start loads a
/// fresh handle (no cross-session cache).
#[async_trait]
pub trait ClassifierLoader: Send + Sync {
    async fn load(&self, location: &ModelLocation) -> Result<Arc<dyn Classifier>, ModelError>;
}
