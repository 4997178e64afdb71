//! Webcam backend over OpenCV's videoio.

use crate::frame::Frame;
use crate::source::CameraSource;
use notevox_foundation::CameraError;
use opencv::core::{self, Mat, Size};
use opencv::imgproc;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

pub struct OpencvCamera {
    capture: Option<VideoCapture>,
    device_index: i32,
    width: u32,
    height: u32,
    mirrored: bool,
}

impl OpencvCamera {
    pub fn new(device_index: i32) -> Self {
        Self {
            capture: None,
            device_index,
            width: 0,
            height: 0,
            mirrored: false,
        }
    }

    fn map_err(e: opencv::Error) -> CameraError {
        CameraError::Backend(e.to_string())
    }
}

impl CameraSource for OpencvCamera {
    fn acquire(&mut self, width: u32, height: u32, mirrored: bool) -> Result<(), CameraError> {
        let mut capture =
            VideoCapture::new(self.device_index, videoio::CAP_ANY).map_err(Self::map_err)?;
        if !capture.is_opened().map_err(Self::map_err)? {
            return Err(CameraError::DeviceNotFound);
        }
        // Hint the native capture size; frames are resized on read regardless.
        let _ = capture.set(videoio::CAP_PROP_FRAME_WIDTH, width as f64);
        let _ = capture.set(videoio::CAP_PROP_FRAME_HEIGHT, height as f64);

        self.capture = Some(capture);
        self.width = width;
        self.height = height;
        self.mirrored = mirrored;
        tracing::info!(
            device = self.device_index,
            width,
            height,
            mirrored,
            "opencv camera acquired"
        );
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Frame, CameraError> {
        let capture = self.capture.as_mut().ok_or(CameraError::NotAcquired)?;

        let mut bgr = Mat::default();
        let got = capture.read(&mut bgr).map_err(Self::map_err)?;
        if !got || bgr.empty() {
            return Err(CameraError::DeviceDisconnected);
        }

        let mut resized = Mat::default();
        imgproc::resize_def(
            &bgr,
            &mut resized,
            Size::new(self.width as i32, self.height as i32),
        )
        .map_err(Self::map_err)?;

        let mut rgb = Mat::default();
        imgproc::cvt_color_def(&resized, &mut rgb, imgproc::COLOR_BGR2RGB)
            .map_err(Self::map_err)?;

        if self.mirrored {
            let mut flipped = Mat::default();
            core::flip(&rgb, &mut flipped, 1).map_err(Self::map_err)?;
            rgb = flipped;
        }

        let data = rgb
            .data_bytes()
            .map_err(Self::map_err)?
            .to_vec();
        Ok(Frame::new(self.width, self.height, data))
    }

    fn release(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            let _ = capture.release();
            tracing::info!("opencv camera released");
        }
    }

    fn is_acquired(&self) -> bool {
        self.capture.is_some()
    }
}

impl Drop for OpencvCamera {
    fn drop(&mut self) {
        self.release();
    }
}
