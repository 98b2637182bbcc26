//! Webcam frame acquisition.

mod command_camera;

pub use command_camera::CommandCamera;

use image::RgbImage;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// The capture process is not running (failed to start or its stream ended).
    Unavailable(String),
    /// The capture process is running but has not delivered a frame yet.
    NoFrame,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Unavailable(reason) => write!(f, "camera unavailable: {}", reason),
            CameraError::NoFrame => write!(f, "camera has not produced a frame yet"),
        }
    }
}

impl std::error::Error for CameraError {}

pub trait FrameSource {
    /// Latest frame from the device. Failures are recoverable; call again on a later tick.
    fn acquire(&mut self) -> Result<RgbImage, CameraError>;
}
