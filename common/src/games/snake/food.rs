use crate::games::SessionRng;
use super::types::{FieldSize, Point};

/// Cosmetic food variety; only the color differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FoodKind {
    Apple,
    Banana,
    Grape,
}

impl FoodKind {
    pub const ALL: [FoodKind; 3] = [FoodKind::Apple, FoodKind::Banana, FoodKind::Grape];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    pub position: Point,
    pub kind: FoodKind,
}

impl Food {
    pub fn new(position: Point, kind: FoodKind) -> Self {
        Self { position, kind }
    }

    /// Uniform cell and kind. The snake body is not avoided, so food may appear under it.
    pub fn spawn(field_size: &FieldSize, rng: &mut SessionRng) -> Self {
        let x = rng.random_range(0..field_size.width);
        let y = rng.random_range(0..field_size.height);
        let kind = rng.choose(&FoodKind::ALL).copied().unwrap_or(FoodKind::Apple);
        Self::new(Point::new(x, y), kind)
    }
}
