//! Synthetic camera producing a deterministic test pattern.
//!
//! The default backend when the crate is built without a hardware capture
//! feature, and the workhorse for session tests: acquisition failures,
//! mid-stream device loss, and release counting are all scriptable.

use crate::frame::Frame;
use crate::source::CameraSource;
use notevox_foundation::CameraError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared handles for observing and steering a [`SyntheticCamera`] from a
/// test while the session owns the camera itself.
#[derive(Clone, Default)]
pub struct SyntheticControls {
    fail_acquire: Arc<AtomicBool>,
    fail_next_frame: Arc<AtomicBool>,
    release_count: Arc<AtomicUsize>,
    acquire_count: Arc<AtomicUsize>,
}

impl SyntheticControls {
    pub fn fail_acquire(&self, fail: bool) {
        self.fail_acquire.store(fail, Ordering::SeqCst);
    }

    /// Simulate the device disappearing mid-stream.
    pub fn fail_next_frame(&self, fail: bool) {
        self.fail_next_frame.store(fail, Ordering::SeqCst);
    }

    pub fn release_count(&self) -> usize {
        self.release_count.load(Ordering::SeqCst)
    }

    pub fn acquire_count(&self) -> usize {
        self.acquire_count.load(Ordering::SeqCst)
    }
}

pub struct SyntheticCamera {
    controls: SyntheticControls,
    acquired: bool,
    width: u32,
    height: u32,
    mirrored: bool,
    frame_counter: u64,
}

impl SyntheticCamera {
    pub fn new() -> Self {
        Self::with_controls(SyntheticControls::default())
    }

    pub fn with_controls(controls: SyntheticControls) -> Self {
        Self {
            controls,
            acquired: false,
            width: 0,
            height: 0,
            mirrored: false,
            frame_counter: 0,
        }
    }

    pub fn controls(&self) -> SyntheticControls {
        self.controls.clone()
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraSource for SyntheticCamera {
    fn acquire(&mut self, width: u32, height: u32, mirrored: bool) -> Result<(), CameraError> {
        self.controls.acquire_count.fetch_add(1, Ordering::SeqCst);
        if self.controls.fail_acquire.load(Ordering::SeqCst) {
            return Err(CameraError::PermissionDenied(
                "synthetic camera scripted to deny access".into(),
            ));
        }
        self.acquired = true;
        self.width = width;
        self.height = height;
        self.mirrored = mirrored;
        self.frame_counter = 0;
        tracing::debug!(width, height, mirrored, "synthetic camera acquired");
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Frame, CameraError> {
        if !self.acquired {
            return Err(CameraError::NotAcquired);
        }
        if self.controls.fail_next_frame.load(Ordering::SeqCst) {
            return Err(CameraError::DeviceDisconnected);
        }
        self.frame_counter += 1;
        // A moving gray gradient so consecutive frames differ.
        let shade = (self.frame_counter % 256) as u8;
        let mut frame = Frame::filled(self.width, self.height, [shade, shade, shade]);
        if self.mirrored {
            frame.mirror();
        }
        Ok(frame)
    }

    fn release(&mut self) {
        // Idempotent: count every call, drop state only once.
        self.controls.release_count.fetch_add(1, Ordering::SeqCst);
        if self.acquired {
            self.acquired = false;
            tracing::debug!("synthetic camera released");
        }
    }

    fn is_acquired(&self) -> bool {
        self.acquired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_match_requested_geometry() {
        let mut cam = SyntheticCamera::new();
        cam.acquire(300, 300, true).unwrap();
        let frame = cam.next_frame().unwrap();
        assert_eq!((frame.width, frame.height), (300, 300));
        assert_eq!(frame.data.len(), 300 * 300 * 3);
    }

    #[test]
    fn next_frame_before_acquire_fails() {
        let mut cam = SyntheticCamera::new();
        assert!(matches!(cam.next_frame(), Err(CameraError::NotAcquired)));
    }

    #[test]
    fn release_is_idempotent() {
        let mut cam = SyntheticCamera::new();
        let controls = cam.controls();
        cam.release();
        cam.acquire(64, 64, false).unwrap();
        cam.release();
        cam.release();
        assert_eq!(controls.release_count(), 3);
        assert!(!cam.is_acquired());
    }

    #[test]
    fn scripted_acquire_failure_is_camera_error() {
        let mut cam = SyntheticCamera::new();
        cam.controls().fail_acquire(true);
        assert!(matches!(
            cam.acquire(300, 300, true),
            Err(CameraError::PermissionDenied(_))
        ));
        assert!(!cam.is_acquired());
    }
}
