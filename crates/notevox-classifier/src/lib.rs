//! Image classifier abstraction for NoteVox.
//!
//! The session depends only on the [`Classifier`] and [`ClassifierLoader`]
//! traits; concrete backends live behind them. The default build ships the
//! HTTP loader (metadata + model fetch), the no-op backend, and the
//! scriptable mock; `onnx` adds tract-based inference.

pub mod classifier;
pub mod fetch;
pub mod metadata;
pub mod mock;
pub mod noop;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod types;

pub use classifier::{Classifier, ClassifierLoader};
pub use fetch::HttpLoader;
pub use metadata::ModelMetadata;
pub use mock::{MockClassifier, MockLoader};
pub use noop::NoopClassifier;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
pub use types::{round2, top_prediction, ModelLocation, Prediction};
