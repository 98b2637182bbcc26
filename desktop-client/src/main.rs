mod app;
mod camera;
mod config;
mod driver;
mod tracker;
mod ui;

use clap::Parser;
use common::games::SessionRng;
use common::{log, logger};
use std::path::PathBuf;

use app::{GestureSnakeApp, WINDOW_TITLE};
use camera::CommandCamera;
use config::{CONFIG_FILE, Config, get_config_manager};
use tracker::{DisabledDetector, HandTracker, LandmarkDetector, SidecarDetector};

#[derive(Parser)]
#[command(name = "gesture_snake", version, about = "Snake steered by hand gestures in front of a webcam")]
struct Args {
    /// Path to the YAML config file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[arg(long)]
    use_log_prefix: bool,

    /// Run without the landmark sidecar (the snake keeps its heading)
    #[arg(long)]
    no_tracker: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write the default config to --config and exit
    #[arg(long)]
    write_default_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = get_config_manager(&args.config);
    if args.write_default_config {
        config_manager.set_config(&Config::default())?;
        log!("Default config written to {}", args.config.display());
        return Ok(());
    }
    let config = config_manager.get_config()?;

    let seed: u64 = args.seed.unwrap_or_else(rand::random);
    log!(
        "Starting {}x{} field at {} ticks/s, seed {}",
        config.game.field_width,
        config.game.field_height,
        config.game.ticks_per_second,
        seed
    );

    let detector: Box<dyn LandmarkDetector> = if args.no_tracker || !config.tracker.enabled {
        log!("Hand tracking disabled");
        Box::new(DisabledDetector)
    } else {
        Box::new(SidecarDetector::new(config.tracker.clone()))
    };
    let tracker = HandTracker::new(detector, config.tracker.classifier());
    let camera = CommandCamera::new(config.camera.clone());

    let app = GestureSnakeApp::new(&config, Box::new(camera), tracker, SessionRng::new(seed));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size())
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(WINDOW_TITLE, options, Box::new(|_cc| Ok(Box::new(app))))?;

    log!("Window closed");
    Ok(())
}
