//! Turning hand landmarks into steering directions.

mod classifier;
mod landmarks;

pub use classifier::{GestureClassifier, GestureThresholds};
pub use landmarks::{HAND_CONNECTIONS, HandLandmarks, LANDMARK_COUNT, Landmark, landmark_index};
