mod camera_config;
mod game_config;
mod tracker_config;

pub use camera_config::CameraConfig;
pub use game_config::{DisplayConfig, GameConfig};
pub use tracker_config::TrackerConfig;

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "gesture_snake_config.yaml";

pub fn get_config_manager(path: &Path) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub game: GameConfig,
    pub display: DisplayConfig,
    pub camera: CameraConfig,
    pub tracker: TrackerConfig,
}

impl Config {
    /// Initial window size: the whole field at `display.cell_size` pixels per cell.
    pub fn window_size(&self) -> [f32; 2] {
        [
            (self.game.field_width * self.display.cell_size) as f32,
            (self.game.field_height * self.display.cell_size) as f32,
        ]
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.display.validate()?;
        self.camera.validate()?;
        self.tracker.validate()?;
        Ok(())
    }
}
