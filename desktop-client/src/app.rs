use common::engine::FrameClock;
use common::games::SessionRng;
use common::games::snake::SnakeGameState;
use common::log;
use std::time::Instant;

use crate::camera::FrameSource;
use crate::config::Config;
use crate::driver::{FrameStep, TickDriver};
use crate::tracker::HandTracker;
use crate::ui::GameView;

pub const WINDOW_TITLE: &str = "Hand-Gesture Controlled Snake Game";

/// The window. Each repaint that lands on a tick runs the driver once, then the scene is drawn
/// and the next repaint is scheduled for the remainder of the frame budget.
pub struct GestureSnakeApp {
    driver: TickDriver,
    clock: FrameClock,
    view: GameView,
    camera_missing: bool,
}

impl GestureSnakeApp {
    pub fn new(
        config: &Config,
        camera: Box<dyn FrameSource>,
        tracker: HandTracker,
        mut rng: SessionRng,
    ) -> Self {
        let settings = config.game.session_settings();
        let game = SnakeGameState::new(settings.field_size(), &mut rng);
        Self {
            driver: TickDriver::new(game, rng, camera, tracker),
            clock: FrameClock::new(settings.tick_interval()),
            view: GameView::new(config.display.clone()),
            camera_missing: false,
        }
    }

    fn run_tick(&mut self, ctx: &egui::Context) {
        match self.driver.advance() {
            FrameStep::Advanced { frame, outcome } => {
                if self.camera_missing {
                    log!("Camera frames resumed");
                }
                self.camera_missing = false;
                self.view.set_camera_frame(ctx, &frame);
                if outcome.reset {
                    log!("Game restarted");
                }
            }
            FrameStep::CameraUnavailable(reason) => {
                if !self.camera_missing {
                    log!("Game paused: {}", reason);
                }
                self.camera_missing = true;
            }
        }
    }
}

impl eframe::App for GestureSnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.clock.poll(Instant::now()) {
            self.run_tick(ctx);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if self.camera_missing {
                    self.view.render_camera_missing(ui);
                } else {
                    let tracker = self.driver.tracker();
                    self.view
                        .render_game(ui, self.driver.game(), tracker.hand(), tracker.tracked_point());
                }
            });

        ctx.request_repaint_after(self.clock.time_until_next(Instant::now()));
    }
}
