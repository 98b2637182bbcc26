use common::config::{Validate, ensure_range};
use common::games::snake::SnakeSessionSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct GameConfig {
    pub field_width: u32,
    pub field_height: u32,
    pub ticks_per_second: u32,
}

impl GameConfig {
    pub fn session_settings(&self) -> SnakeSessionSettings {
        SnakeSessionSettings {
            field_width: self.field_width as usize,
            field_height: self.field_height as usize,
            ticks_per_second: self.ticks_per_second,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 40,
            field_height: 30,
            ticks_per_second: 15,
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        ensure_range("field_width", self.field_width, 5, 200)?;
        ensure_range("field_height", self.field_height, 5, 200)?;
        ensure_range("ticks_per_second", self.ticks_per_second, 1, 60)?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Pixels per grid cell at the initial window size.
    pub cell_size: u32,
    /// Draw the tracked hand skeleton and the steering fingertip over the frame.
    pub show_hand: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_size: 20,
            show_hand: true,
        }
    }
}

impl Validate for DisplayConfig {
    fn validate(&self) -> Result<(), String> {
        ensure_range("cell_size", self.cell_size, 4, 100)
    }
}
