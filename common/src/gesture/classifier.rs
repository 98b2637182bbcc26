use crate::games::snake::Direction;
use super::landmarks::{HandLandmarks, Landmark, landmark_index};

/// Edge zones of the frame. A point left of `low` steers left, right of `high` steers right,
/// and likewise for the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureThresholds {
    pub low: f32,
    pub high: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self { low: 0.3, high: 0.7 }
    }
}

#[derive(Clone, Debug)]
pub struct GestureClassifier {
    thresholds: GestureThresholds,
    landmark_index: usize,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureThresholds::default(), landmark_index::INDEX_FINGER_TIP)
    }
}

impl GestureClassifier {
    pub fn new(thresholds: GestureThresholds, landmark_index: usize) -> Self {
        Self {
            thresholds,
            landmark_index,
        }
    }

    /// The landmark that steers, if the hand has it.
    pub fn tracked_point<'a>(&self, hand: &'a HandLandmarks) -> Option<&'a Landmark> {
        hand.get(self.landmark_index)
    }

    pub fn classify(&self, hand: &HandLandmarks) -> Option<Direction> {
        self.tracked_point(hand).and_then(|point| self.classify_point(point))
    }

    /// Horizontal zones are checked before vertical ones, so corners resolve to left/right.
    pub fn classify_point(&self, point: &Landmark) -> Option<Direction> {
        let GestureThresholds { low, high } = self.thresholds;
        if point.x < low {
            Some(Direction::Left)
        } else if point.x > high {
            Some(Direction::Right)
        } else if point.y < low {
            Some(Direction::Up)
        } else if point.y > high {
            Some(Direction::Down)
        } else {
            None
        }
    }
}
