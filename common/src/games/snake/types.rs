#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Moves one cell in `direction`, re-entering from the opposite edge when leaving the field.
    pub fn wrapping_step(&self, direction: Direction, field_size: &FieldSize) -> Point {
        let (dx, dy) = direction.delta();
        Point::new(
            wrap_axis(self.x, dx, field_size.width),
            wrap_axis(self.y, dy, field_size.height),
        )
    }
}

fn wrap_axis(value: usize, delta: i32, size: usize) -> usize {
    (value as i64 + delta as i64).rem_euclid(size as i64) as usize
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }

    /// Unit vector in screen coordinates (y grows downwards).
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// Only the four cardinal unit vectors map to a direction.
    pub fn from_delta(delta: (i32, i32)) -> Option<Direction> {
        match delta {
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSize {
    pub width: usize,
    pub height: usize,
}

impl FieldSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }
}

/// Display class of the snake, derived from the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColorTier {
    Low,
    Mid,
    High,
}

impl ColorTier {
    pub const MID_SCORE: u32 = 5;
    pub const HIGH_SCORE: u32 = 10;

    pub fn for_score(score: u32) -> ColorTier {
        if score >= Self::HIGH_SCORE {
            ColorTier::High
        } else if score >= Self::MID_SCORE {
            ColorTier::Mid
        } else {
            ColorTier::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Left.is_opposite(&Direction::Right));
        assert!(Direction::Up.is_opposite(&Direction::Down));
        assert!(!Direction::Up.is_opposite(&Direction::Left));
        assert!(!Direction::Right.is_opposite(&Direction::Right));
    }

    #[test]
    fn test_from_delta_only_accepts_cardinal_units() {
        assert_eq!(Direction::from_delta((1, 0)), Some(Direction::Right));
        assert_eq!(Direction::from_delta((0, -1)), Some(Direction::Up));
        assert_eq!(Direction::from_delta((1, 1)), None);
        assert_eq!(Direction::from_delta((2, 0)), None);
        assert_eq!(Direction::from_delta((0, 0)), None);
    }

    #[test]
    fn test_wrapping_step_crosses_edges() {
        let field = FieldSize::new(40, 30);
        assert_eq!(Point::new(0, 5).wrapping_step(Direction::Left, &field), Point::new(39, 5));
        assert_eq!(Point::new(39, 5).wrapping_step(Direction::Right, &field), Point::new(0, 5));
        assert_eq!(Point::new(3, 0).wrapping_step(Direction::Up, &field), Point::new(3, 29));
        assert_eq!(Point::new(3, 29).wrapping_step(Direction::Down, &field), Point::new(3, 0));
        assert_eq!(Point::new(10, 10).wrapping_step(Direction::Down, &field), Point::new(10, 11));
    }

    #[test]
    fn test_color_tier_thresholds() {
        assert_eq!(ColorTier::for_score(0), ColorTier::Low);
        assert_eq!(ColorTier::for_score(4), ColorTier::Low);
        assert_eq!(ColorTier::for_score(5), ColorTier::Mid);
        assert_eq!(ColorTier::for_score(9), ColorTier::Mid);
        assert_eq!(ColorTier::for_score(10), ColorTier::High);
        assert_eq!(ColorTier::for_score(999), ColorTier::High);
    }

    #[test]
    fn test_field_center() {
        assert_eq!(FieldSize::new(40, 30).center(), Point::new(20, 15));
        assert!(FieldSize::new(40, 30).contains(Point::new(39, 29)));
        assert!(!FieldSize::new(40, 30).contains(Point::new(40, 0)));
    }
}
