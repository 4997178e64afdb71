//! Camera acquisition for NoteVox.
//!
//! Exposes the [`CameraSource`] trait plus a synthetic test-pattern backend.
//! A real webcam backend over OpenCV is available behind the `opencv`
//! feature.

pub mod frame;
#[cfg(feature = "opencv")]
pub mod opencv_camera;
pub mod source;
pub mod synthetic;

pub use frame::Frame;
#[cfg(feature = "opencv")]
pub use opencv_camera::OpencvCamera;
pub use source::CameraSource;
pub use synthetic::{SyntheticCamera, SyntheticControls};
