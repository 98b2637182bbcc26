//! Single-player snake on a wrapped field.

mod food;
mod game_state;
mod settings;
mod snake;
mod types;

pub use food::{Food, FoodKind};
pub use game_state::{SnakeGameState, TickOutcome};
pub use settings::SnakeSessionSettings;
pub use snake::Snake;
pub use types::{ColorTier, Direction, FieldSize, Point};
