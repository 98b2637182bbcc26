//! Landmark detection in a separate process.
//!
//! The sidecar prints `READY` once its model is loaded. For every frame it reads a header of
//! three little-endian `u32` values (width, height, channels) followed by the raw RGB bytes on
//! stdin, and answers with one JSON line on stdout:
//!
//! ```text
//! {"hands":[{"handedness":"Right","score":0.93,"landmarks":[{"x":0.41,"y":0.52,"z":-0.01}, ...]}]}
//! ```
//!
//! An optional `"error"` string reports a per-frame problem without ending the session.
//!
//! The exchange runs on a worker thread. The UI side only publishes frames and reads the latest
//! answer, and a sidecar that stays silent past its timeout is treated as failed.

use common::gesture::{HandLandmarks, LANDMARK_COUNT, Landmark};
use common::log;
use image::RgbImage;
use serde::Deserialize;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::LandmarkDetector;
use crate::config::TrackerConfig;

const READY_SIGNAL: &str = "READY";
const RGB_CHANNELS: u32 = 3;

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
    #[serde(default)]
    z: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    handedness: String,
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionResult {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Parses one response line and picks the first sufficiently confident, complete hand.
fn parse_detection(line: &str, min_confidence: f32) -> Result<Option<HandLandmarks>, String> {
    let result: DetectionResult = serde_json::from_str(line.trim())
        .map_err(|e| format!("failed to parse sidecar response {:?}: {}", line.trim(), e))?;

    if let Some(error) = result.error {
        log!("Landmark sidecar reported: {}", error);
        return Ok(None);
    }

    for hand in result.hands {
        if hand.score < min_confidence {
            continue;
        }
        if hand.landmarks.len() != LANDMARK_COUNT {
            log!("Expected {} landmarks, got {}", LANDMARK_COUNT, hand.landmarks.len());
            continue;
        }

        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (slot, lm) in landmarks.iter_mut().zip(&hand.landmarks) {
            *slot = Landmark { x: lm.x, y: lm.y, z: lm.z };
        }

        return Ok(Some(HandLandmarks {
            landmarks,
            confidence: hand.score,
            handedness: hand.handedness,
        }));
    }

    Ok(None)
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    /// Spawned, the ready line has not arrived yet.
    Starting(Instant),
    Idle,
    /// A frame was sent and its reply is outstanding.
    Busy(Instant),
}

struct DetectionSlot {
    phase: Phase,
    latest: Option<HandLandmarks>,
    failed: Option<String>,
}

impl DetectionSlot {
    fn starting(now: Instant) -> Self {
        Self {
            phase: Phase::Starting(now),
            latest: None,
            failed: None,
        }
    }
}

fn lock(slot: &Mutex<DetectionSlot>) -> MutexGuard<'_, DetectionSlot> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<String, String> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| format!("failed to read from sidecar: {}", e))?;
    if read == 0 {
        return Err("sidecar closed its output".to_string());
    }
    Ok(line)
}

fn send_frame<W: Write>(writer: &mut W, frame: &RgbImage) -> Result<(), String> {
    let (width, height) = frame.dimensions();
    let write_error = |e: std::io::Error| format!("failed to send frame to sidecar: {}", e);

    writer.write_all(&width.to_le_bytes()).map_err(write_error)?;
    writer.write_all(&height.to_le_bytes()).map_err(write_error)?;
    writer.write_all(&RGB_CHANNELS.to_le_bytes()).map_err(write_error)?;
    writer.write_all(frame.as_raw()).map_err(write_error)?;
    writer.flush().map_err(write_error)
}

/// Worker loop: waits for the ready line, then answers one frame at a time until the frame
/// channel closes or the sidecar fails. Every state change is published through `slot`.
fn serve<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    frames: Receiver<RgbImage>,
    min_confidence: f32,
    slot: &Mutex<DetectionSlot>,
) {
    let ready = read_line(&mut reader).and_then(|line| {
        if line.trim() == READY_SIGNAL {
            Ok(())
        } else {
            Err(format!("sidecar did not signal ready, got: {:?}", line.trim()))
        }
    });
    if let Err(e) = ready {
        lock(slot).failed = Some(e);
        return;
    }
    lock(slot).phase = Phase::Idle;
    log!("Landmark sidecar ready");

    while let Ok(frame) = frames.recv() {
        lock(slot).phase = Phase::Busy(Instant::now());
        let result = send_frame(&mut writer, &frame)
            .and_then(|()| read_line(&mut reader))
            .and_then(|line| parse_detection(&line, min_confidence));

        let mut state = lock(slot);
        match result {
            Ok(hand) => {
                state.latest = hand;
                state.phase = Phase::Idle;
            }
            Err(e) => {
                state.failed = Some(e);
                return;
            }
        }
    }
}

/// A running sidecar with its worker thread. Dropping it kills the process; the worker then
/// sees its pipes close and exits on its own.
struct SidecarWorker {
    child: Child,
    frames: SyncSender<RgbImage>,
    slot: Arc<Mutex<DetectionSlot>>,
}

impl SidecarWorker {
    fn spawn(config: &TrackerConfig) -> Result<Self, String> {
        let mut child = Command::new(&config.command)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| format!("failed to start '{}': {}", config.command, e))?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err("sidecar process has no stdio pipes".to_string());
        };

        let slot = Arc::new(Mutex::new(DetectionSlot::starting(Instant::now())));
        let worker_slot = Arc::clone(&slot);
        // Rendezvous channel: a frame is handed over only while the worker waits for one.
        let (frames_tx, frames_rx) = mpsc::sync_channel(0);
        let min_confidence = config.min_confidence;
        let worker = std::thread::Builder::new()
            .name("landmark-sidecar".to_string())
            .spawn(move || serve(BufReader::new(stdout), stdin, frames_rx, min_confidence, &worker_slot));

        if let Err(e) = worker {
            let _ = child.kill();
            let _ = child.wait();
            return Err(format!("failed to start landmark worker thread: {}", e));
        }

        Ok(Self {
            child,
            frames: frames_tx,
            slot,
        })
    }

    /// Latest detection, or an error once the sidecar failed or stopped answering in time.
    fn poll(&self, now: Instant, config: &TrackerConfig) -> Result<Option<HandLandmarks>, String> {
        let mut state = lock(&self.slot);
        if let Some(reason) = state.failed.take() {
            return Err(reason);
        }
        match state.phase {
            Phase::Starting(since) if now.duration_since(since) > Duration::from_millis(config.startup_timeout_ms) => {
                Err(format!("sidecar did not signal ready within {} ms", config.startup_timeout_ms))
            }
            Phase::Busy(since) if now.duration_since(since) > Duration::from_millis(config.response_timeout_ms) => {
                Err(format!("sidecar did not answer within {} ms", config.response_timeout_ms))
            }
            _ => Ok(state.latest.clone()),
        }
    }

    /// Hands `frame` to the worker if it is idle. Otherwise the frame is skipped.
    fn submit(&self, frame: &RgbImage) {
        if lock(&self.slot).phase == Phase::Idle {
            let _ = self.frames.try_send(frame.clone());
        }
    }
}

impl Drop for SidecarWorker {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Detector hosted in an external process and driven from a worker thread, so `detect` never
/// waits on the sidecar. It reports the most recent answer, which lags the frame by a tick.
/// A failed or unresponsive sidecar is killed and restarted after the retry interval; until
/// then every frame reports no hand.
pub struct SidecarDetector {
    config: TrackerConfig,
    worker: Option<SidecarWorker>,
    last_start_attempt: Option<Instant>,
}

impl SidecarDetector {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            worker: None,
            last_start_attempt: None,
        }
    }

    fn retry_pending(&self, now: Instant) -> bool {
        self.last_start_attempt
            .is_some_and(|last| now.duration_since(last) < Duration::from_millis(self.config.retry_interval_ms))
    }
}

impl LandmarkDetector for SidecarDetector {
    fn detect(&mut self, frame: &RgbImage) -> Result<Option<HandLandmarks>, String> {
        if self.worker.is_none() {
            let now = Instant::now();
            if self.retry_pending(now) {
                return Ok(None);
            }
            self.last_start_attempt = Some(now);

            log!("Starting landmark sidecar: {}", self.config.command);
            self.worker = Some(SidecarWorker::spawn(&self.config)?);
        }

        let Some(worker) = self.worker.as_ref() else {
            return Ok(None);
        };

        match worker.poll(Instant::now(), &self.config) {
            Ok(hand) => {
                worker.submit(frame);
                Ok(hand)
            }
            Err(e) => {
                self.worker = None;
                Err(e)
            }
        }
    }
}

impl Drop for SidecarDetector {
    fn drop(&mut self) {
        if self.worker.take().is_some() {
            log!("Landmark sidecar stopped");
        }
    }
}
