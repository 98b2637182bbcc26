use common::games::snake::Direction;
use common::gesture::{GestureClassifier, HandLandmarks, Landmark};
use common::log;
use image::RgbImage;

use super::LandmarkDetector;

pub struct HandTracker {
    detector: Box<dyn LandmarkDetector>,
    classifier: GestureClassifier,
    hand: Option<HandLandmarks>,
}

impl HandTracker {
    pub fn new(detector: Box<dyn LandmarkDetector>, classifier: GestureClassifier) -> Self {
        Self {
            detector,
            classifier,
            hand: None,
        }
    }

    /// Steering signal for one frame. Detector failures count as "no signal".
    pub fn direction(&mut self, frame: &RgbImage) -> Option<Direction> {
        self.hand = match self.detector.detect(frame) {
            Ok(hand) => hand,
            Err(e) => {
                log!("Hand tracking failed: {}", e);
                None
            }
        };
        self.tracked_point()
            .and_then(|point| self.classifier.classify_point(&point))
    }

    /// The hand seen in the last frame.
    pub fn hand(&self) -> Option<&HandLandmarks> {
        self.hand.as_ref()
    }

    /// The steering landmark seen in the last frame, in normalized frame coordinates.
    pub fn tracked_point(&self) -> Option<Landmark> {
        self.hand
            .as_ref()
            .and_then(|hand| self.classifier.tracked_point(hand))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::gesture::{LANDMARK_COUNT, landmark_index};
    use std::collections::VecDeque;

    struct ScriptedDetector {
        results: VecDeque<Result<Option<HandLandmarks>, String>>,
    }

    impl LandmarkDetector for ScriptedDetector {
        fn detect(&mut self, _frame: &RgbImage) -> Result<Option<HandLandmarks>, String> {
            self.results.pop_front().unwrap_or(Ok(None))
        }
    }

    fn hand_at(x: f32, y: f32) -> HandLandmarks {
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        landmarks[landmark_index::INDEX_FINGER_TIP] = Landmark::new(x, y);
        HandLandmarks {
            landmarks,
            confidence: 0.8,
            handedness: "Left".to_string(),
        }
    }

    fn tracker(results: Vec<Result<Option<HandLandmarks>, String>>) -> HandTracker {
        HandTracker::new(
            Box::new(ScriptedDetector { results: results.into() }),
            GestureClassifier::default(),
        )
    }

    #[test]
    fn test_direction_follows_fingertip() {
        let frame = RgbImage::new(4, 4);
        let mut tracker = tracker(vec![Ok(Some(hand_at(0.9, 0.5))), Ok(Some(hand_at(0.5, 0.2)))]);

        assert_eq!(tracker.direction(&frame), Some(Direction::Right));
        assert_eq!(tracker.tracked_point(), Some(Landmark::new(0.9, 0.5)));
        assert_eq!(tracker.hand().map(|hand| hand.handedness.as_str()), Some("Left"));
        assert_eq!(tracker.direction(&frame), Some(Direction::Up));
    }

    #[test]
    fn test_hand_in_center_keeps_point_without_signal() {
        let frame = RgbImage::new(4, 4);
        let mut tracker = tracker(vec![Ok(Some(hand_at(0.5, 0.5)))]);
        assert_eq!(tracker.direction(&frame), None);
        assert!(tracker.tracked_point().is_some());
    }

    #[test]
    fn test_missing_hand_and_errors_are_no_signal() {
        let frame = RgbImage::new(4, 4);
        let mut tracker = tracker(vec![
            Ok(Some(hand_at(0.1, 0.5))),
            Ok(None),
            Err("sidecar exited".to_string()),
        ]);

        assert_eq!(tracker.direction(&frame), Some(Direction::Left));
        assert_eq!(tracker.direction(&frame), None);
        assert!(tracker.tracked_point().is_none());
        assert!(tracker.hand().is_none());
        assert_eq!(tracker.direction(&frame), None);
        assert!(tracker.tracked_point().is_none());
    }
}
