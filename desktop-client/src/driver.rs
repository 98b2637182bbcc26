use common::games::SessionRng;
use common::games::snake::{SnakeGameState, TickOutcome};
use image::RgbImage;

use crate::camera::FrameSource;
use crate::tracker::HandTracker;

/// Result of one pass through the frame pipeline.
pub enum FrameStep {
    Advanced { frame: RgbImage, outcome: TickOutcome },
    /// No frame this time; the game did not move.
    CameraUnavailable(String),
}

/// Owns the game and its collaborators and runs camera -> gesture -> tick once per call.
pub struct TickDriver {
    game: SnakeGameState,
    rng: SessionRng,
    camera: Box<dyn FrameSource>,
    tracker: HandTracker,
}

impl TickDriver {
    pub fn new(
        game: SnakeGameState,
        rng: SessionRng,
        camera: Box<dyn FrameSource>,
        tracker: HandTracker,
    ) -> Self {
        Self {
            game,
            rng,
            camera,
            tracker,
        }
    }

    pub fn game(&self) -> &SnakeGameState {
        &self.game
    }

    pub fn tracker(&self) -> &HandTracker {
        &self.tracker
    }

    pub fn advance(&mut self) -> FrameStep {
        let frame = match self.camera.acquire() {
            Ok(frame) => frame,
            Err(e) => return FrameStep::CameraUnavailable(e.to_string()),
        };

        let signal = self.tracker.direction(&frame);
        let outcome = self.game.update(signal, &mut self.rng);
        FrameStep::Advanced { frame, outcome }
    }
}
