use crate::frame::Frame;
use notevox_foundation::CameraError;

/// A video capture device.
///
/// The detection session owns exactly one source for its lifetime and drives
/// the full acquire / frame-pull / release cycle through this trait, so any
/// backend (webcam, synthetic test pattern) can be swapped in.
///
/// Contract:
/// - `acquire` opens the device; failure must be a [`CameraError`] so the UI
///   can show a camera-specific message.
/// - `next_frame` is pull-based and returns the most recent captured image.
/// - `release` is idempotent and safe on an unacquired source.
pub trait CameraSource: Send {
    fn acquire(&mut self, width: u32, height: u32, mirrored: bool) -> Result<(), CameraError>;

    fn next_frame(&mut self) -> Result<Frame, CameraError>;

    fn release(&mut self);

    fn is_acquired(&self) -> bool;
}
