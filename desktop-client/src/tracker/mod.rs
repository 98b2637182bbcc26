//! Hand tracking: a landmark detector feeding the gesture classifier.

mod hand_tracker;
mod sidecar;

pub use hand_tracker::HandTracker;
pub use sidecar::SidecarDetector;

use common::gesture::HandLandmarks;
use image::RgbImage;

pub trait LandmarkDetector {
    /// Landmarks of the most confident hand in `frame`, or `None` when no hand is visible.
    fn detect(&mut self, frame: &RgbImage) -> Result<Option<HandLandmarks>, String>;
}

/// Used when tracking is switched off: never sees a hand.
pub struct DisabledDetector;

impl LandmarkDetector for DisabledDetector {
    fn detect(&mut self, _frame: &RgbImage) -> Result<Option<HandLandmarks>, String> {
        Ok(None)
    }
}
