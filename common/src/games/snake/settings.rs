use std::time::Duration;

use super::types::FieldSize;

#[derive(Clone, Debug, PartialEq)]
pub struct SnakeSessionSettings {
    pub field_width: usize,
    pub field_height: usize,
    pub ticks_per_second: u32,
}

impl SnakeSessionSettings {
    pub fn field_size(&self) -> FieldSize {
        FieldSize::new(self.field_width, self.field_height)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.ticks_per_second.max(1) as f64)
    }
}

impl Default for SnakeSessionSettings {
    fn default() -> Self {
        Self {
            field_width: 40,
            field_height: 30,
            ticks_per_second: 15,
        }
    }
}
