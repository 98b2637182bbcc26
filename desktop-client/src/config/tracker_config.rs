use common::config::{Validate, ensure_range};
use common::gesture::{GestureClassifier, GestureThresholds, LANDMARK_COUNT};
use serde::{Deserialize, Serialize};

/// MediaPipe sidecar shipped with the client, relative to the workspace root.
pub const DEFAULT_SIDECAR_SCRIPT: &str = "desktop-client/sidecar/hand_landmark_sidecar.py";

/// Landmark sidecar process and the gesture zones applied to its output.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct TrackerConfig {
    pub enabled: bool,
    pub command: String,
    pub args: Vec<String>,
    pub min_confidence: f32,
    pub landmark_index: usize,
    pub low_threshold: f32,
    pub high_threshold: f32,
    pub retry_interval_ms: u64,
    /// Time allowed for the ready line after start (model loading).
    pub startup_timeout_ms: u64,
    /// Time allowed for the reply to one frame.
    pub response_timeout_ms: u64,
}

impl TrackerConfig {
    pub fn classifier(&self) -> GestureClassifier {
        GestureClassifier::new(
            GestureThresholds {
                low: self.low_threshold,
                high: self.high_threshold,
            },
            self.landmark_index,
        )
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "python3".to_string(),
            args: vec![DEFAULT_SIDECAR_SCRIPT.to_string()],
            min_confidence: 0.5,
            landmark_index: 8,
            low_threshold: 0.3,
            high_threshold: 0.7,
            retry_interval_ms: 2000,
            startup_timeout_ms: 15_000,
            response_timeout_ms: 1000,
        }
    }
}

impl Validate for TrackerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.command.trim().is_empty() {
            return Err("tracker command must not be empty".to_string());
        }
        ensure_range("startup_timeout_ms", self.startup_timeout_ms, 100, 120_000)?;
        ensure_range("response_timeout_ms", self.response_timeout_ms, 50, 60_000)?;
        ensure_range("min_confidence", self.min_confidence, 0.0, 1.0)?;
        if self.landmark_index >= LANDMARK_COUNT {
            return Err(format!("landmark_index must be less than {}", LANDMARK_COUNT));
        }
        if !(0.0 <= self.low_threshold && self.low_threshold < self.high_threshold && self.high_threshold <= 1.0) {
            return Err("thresholds must satisfy 0 <= low_threshold < high_threshold <= 1".to_string());
        }
        Ok(())
    }
}
