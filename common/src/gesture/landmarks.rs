/// Number of points in one tracked hand.
pub const LANDMARK_COUNT: usize = 21;

/// Indices into [`HandLandmarks::landmarks`], following the usual 21-point hand model.
pub mod landmark_index {
    pub const WRIST: usize = 0;
    pub const INDEX_FINGER_TIP: usize = 8;
}

/// Bones of the hand skeleton as pairs of landmark indices.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (17, 18), (18, 19), (19, 20),
    (0, 17),
];

/// A tracked point. `x` and `y` are normalized to the frame (0.0 to 1.0), `z` is relative depth.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    pub landmarks: [Landmark; LANDMARK_COUNT],
    /// Detection confidence, 0.0 to 1.0.
    pub confidence: f32,
    pub handedness: String,
}

impl HandLandmarks {
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }
}
