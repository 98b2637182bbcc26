use common::config::{Validate, ensure_range};
use serde::{Deserialize, Serialize};

/// External capture command writing raw `rgb24` frames of `frame_width` x `frame_height` to stdout.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct CameraConfig {
    pub command: String,
    /// `{width}` and `{height}` are replaced with the frame size.
    pub args: Vec<String>,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Flip frames horizontally so the feed behaves like a mirror.
    pub mirror: bool,
    pub retry_interval_ms: u64,
    /// A frame older than this counts as no frame (the device stalled).
    pub stale_after_ms: u64,
}

impl CameraConfig {
    pub fn expanded_args(&self) -> Vec<String> {
        let width = self.frame_width.to_string();
        let height = self.frame_height.to_string();
        self.args
            .iter()
            .map(|arg| arg.replace("{width}", &width).replace("{height}", &height))
            .collect()
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        let args = [
            "-loglevel", "error",
            "-f", "v4l2",
            "-video_size", "{width}x{height}",
            "-i", "/dev/video0",
            "-f", "rawvideo",
            "-pix_fmt", "rgb24",
            "-",
        ];
        Self {
            command: "ffmpeg".to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            frame_width: 640,
            frame_height: 480,
            mirror: true,
            retry_interval_ms: 1000,
            stale_after_ms: 500,
        }
    }
}

impl Validate for CameraConfig {
    fn validate(&self) -> Result<(), String> {
        if self.command.trim().is_empty() {
            return Err("camera command must not be empty".to_string());
        }
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err("camera frame dimensions must be greater than 0".to_string());
        }
        if self.frame_width > 4096 || self.frame_height > 4096 {
            return Err("camera frame dimensions must not exceed 4096".to_string());
        }
        ensure_range("stale_after_ms", self.stale_after_ms, 50, 60_000)
    }
}
