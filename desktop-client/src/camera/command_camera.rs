use common::log;
use image::RgbImage;
use image::imageops::flip_horizontal_in_place;
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::{CameraError, FrameSource};
use crate::config::CameraConfig;

struct ReceivedFrame {
    image: RgbImage,
    received_at: Instant,
}

#[derive(Default)]
struct FrameSlot {
    latest: Option<ReceivedFrame>,
    closed: Option<String>,
}

impl FrameSlot {
    /// The newest frame unless it is older than `max_age` at `now`.
    fn fresh_frame(&self, now: Instant, max_age: Duration) -> Option<RgbImage> {
        self.latest
            .as_ref()
            .filter(|frame| now.saturating_duration_since(frame.received_at) <= max_age)
            .map(|frame| frame.image.clone())
    }
}

fn lock(slot: &Mutex<FrameSlot>) -> MutexGuard<'_, FrameSlot> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Reads fixed-size raw RGB frames until the stream ends, keeping only the newest one.
fn read_frames<R: Read>(mut source: R, width: u32, height: u32, slot: &Mutex<FrameSlot>) {
    let frame_len = width as usize * height as usize * 3;
    loop {
        let mut buffer = vec![0u8; frame_len];
        if let Err(e) = source.read_exact(&mut buffer) {
            lock(slot).closed = Some(format!("capture stream ended: {}", e));
            return;
        }
        if let Some(image) = RgbImage::from_raw(width, height, buffer) {
            lock(slot).latest = Some(ReceivedFrame {
                image,
                received_at: Instant::now(),
            });
        }
    }
}

/// A running capture command. Dropping it kills the process; the reader thread is left to
/// finish once the pipe closes, which may outlive us if the command forked helpers.
struct CaptureProcess {
    child: Child,
    slot: Arc<Mutex<FrameSlot>>,
}

impl CaptureProcess {
    fn spawn(config: &CameraConfig) -> Result<Self, String> {
        let mut child = Command::new(&config.command)
            .args(config.expanded_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| format!("failed to start '{}': {}", config.command, e))?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err("capture process has no stdout".to_string());
        };

        let slot = Arc::new(Mutex::new(FrameSlot::default()));
        let reader_slot = Arc::clone(&slot);
        let (width, height) = (config.frame_width, config.frame_height);
        let reader = std::thread::Builder::new()
            .name("camera-reader".to_string())
            .spawn(move || read_frames(stdout, width, height, &reader_slot));

        if let Err(e) = reader {
            let _ = child.kill();
            let _ = child.wait();
            return Err(format!("failed to start camera reader thread: {}", e));
        }

        Ok(Self { child, slot })
    }

    fn closed_reason(&self) -> Option<String> {
        lock(&self.slot).closed.clone()
    }

    fn fresh_frame(&self, max_age: Duration) -> Option<RgbImage> {
        lock(&self.slot).fresh_frame(Instant::now(), max_age)
    }
}

impl Drop for CaptureProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Camera backed by an external capture command (ffmpeg by default).
/// The process is started lazily and restarted at most once per retry interval.
pub struct CommandCamera {
    config: CameraConfig,
    capture: Option<CaptureProcess>,
    last_start_attempt: Option<Instant>,
    last_failure: Option<String>,
}

impl CommandCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            capture: None,
            last_start_attempt: None,
            last_failure: None,
        }
    }

    fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.config.retry_interval_ms)
    }

    fn record_failure(&mut self, reason: String) -> CameraError {
        if self.last_failure.as_deref() != Some(reason.as_str()) {
            log!("Camera unavailable: {}", reason);
        }
        self.last_failure = Some(reason.clone());
        CameraError::Unavailable(reason)
    }

    fn ensure_started(&mut self) -> Result<&CaptureProcess, CameraError> {
        if let Some(reason) = self.capture.as_ref().and_then(|c| c.closed_reason()) {
            self.capture = None;
            return Err(self.record_failure(reason));
        }

        if self.capture.is_none() {
            let now = Instant::now();
            if let Some(last) = self.last_start_attempt
                && now.duration_since(last) < self.retry_interval()
            {
                let reason = self.last_failure.clone().unwrap_or_else(|| "waiting to retry".to_string());
                return Err(CameraError::Unavailable(reason));
            }
            self.last_start_attempt = Some(now);

            match CaptureProcess::spawn(&self.config) {
                Ok(capture) => {
                    log!(
                        "Camera started: {} ({}x{})",
                        self.config.command,
                        self.config.frame_width,
                        self.config.frame_height
                    );
                    self.last_failure = None;
                    self.capture = Some(capture);
                }
                Err(reason) => return Err(self.record_failure(reason)),
            }
        }

        self.capture
            .as_ref()
            .ok_or_else(|| CameraError::Unavailable("camera not started".to_string()))
    }
}

impl FrameSource for CommandCamera {
    fn acquire(&mut self) -> Result<RgbImage, CameraError> {
        let mirror = self.config.mirror;
        let max_age = Duration::from_millis(self.config.stale_after_ms);
        let mut frame = self.ensure_started()?.fresh_frame(max_age).ok_or(CameraError::NoFrame)?;
        if mirror {
            flip_horizontal_in_place(&mut frame);
        }
        Ok(frame)
    }
}

impl Drop for CommandCamera {
    fn drop(&mut self) {
        if self.capture.take().is_some() {
            log!("Camera released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_frames_keeps_latest_and_reports_end() {
        let mut bytes = vec![1u8; 2 * 2 * 3];
        bytes.extend(vec![9u8; 2 * 2 * 3]);
        bytes.extend(vec![5u8; 4]);
        let slot = Mutex::new(FrameSlot::default());

        read_frames(Cursor::new(bytes), 2, 2, &slot);

        let slot = lock(&slot);
        let latest = &slot.latest.as_ref().unwrap().image;
        assert_eq!(latest.dimensions(), (2, 2));
        assert!(latest.as_raw().iter().all(|&b| b == 9));
        assert!(slot.closed.is_some());
    }

    #[test]
    fn test_read_frames_empty_stream() {
        let slot = Mutex::new(FrameSlot::default());
        read_frames(Cursor::new(Vec::<u8>::new()), 4, 4, &slot);
        assert!(lock(&slot).latest.is_none());
        assert!(lock(&slot).closed.is_some());
    }

    #[test]
    fn test_missing_command_is_unavailable_and_waits_before_retry() {
        let config = CameraConfig {
            command: "definitely-not-a-real-capture-binary".to_string(),
            retry_interval_ms: 60_000,
            ..CameraConfig::default()
        };
        let mut camera = CommandCamera::new(config);

        let first = camera.acquire().unwrap_err();
        assert!(matches!(first, CameraError::Unavailable(_)));
        let first_attempt = camera.last_start_attempt;

        let second = camera.acquire().unwrap_err();
        assert_eq!(first, second);
        assert_eq!(camera.last_start_attempt, first_attempt);
    }

    #[test]
    fn test_old_frame_is_not_fresh() {
        let received_at = Instant::now();
        let slot = FrameSlot {
            latest: Some(ReceivedFrame {
                image: RgbImage::new(2, 2),
                received_at,
            }),
            closed: None,
        };
        let max_age = Duration::from_millis(500);

        assert!(slot.fresh_frame(received_at, max_age).is_some());
        assert!(slot.fresh_frame(received_at + Duration::from_millis(500), max_age).is_some());
        assert!(slot.fresh_frame(received_at + Duration::from_millis(501), max_age).is_none());
        assert!(FrameSlot::default().fresh_frame(received_at, max_age).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_stalled_capture_stops_delivering_and_drops_quickly() {
        let config = CameraConfig {
            command: "sh".to_string(),
            args: vec!["-c".to_string(), "head -c 12 /dev/zero; sleep 30".to_string()],
            frame_width: 2,
            frame_height: 2,
            stale_after_ms: 100,
            ..CameraConfig::default()
        };
        let mut camera = CommandCamera::new(config);

        let deadline = Instant::now() + Duration::from_secs(3);
        while camera.acquire().is_err() {
            assert!(Instant::now() < deadline, "no frame from capture command");
            std::thread::sleep(Duration::from_millis(10));
        }

        std::thread::sleep(Duration::from_millis(300));
        assert_eq!(camera.acquire().unwrap_err(), CameraError::NoFrame);

        let started = Instant::now();
        drop(camera);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
