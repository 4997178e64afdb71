use thiserror::Error;

/// Errors from the video capture device.
///
/// Kept separate from [`ModelError`] so the UI can surface a camera-specific
/// message when acquisition fails (permission denial reads very differently
/// from a failed model download).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("No camera device found")]
    DeviceNotFound,

    #[error("Camera access denied: {0}")]
    PermissionDenied(String),

    #[error("Camera disconnected")]
    DeviceDisconnected,

    #[error("Camera not acquired")]
    NotAcquired,

    #[error("Capture backend error: {0}")]
    Backend(String),
}

/// Errors while fetching or loading the classifier model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Failed to fetch model resource {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Model metadata is invalid: {0}")]
    InvalidMetadata(String),

    #[error("Model descriptor is invalid: {0}")]
    InvalidModel(String),

    #[error("Model backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// A single classification call failed.
///
/// Non-fatal by policy: the detection loop logs these and keeps running.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Frame rejected by model: {0}")]
    BadFrame(String),
}
