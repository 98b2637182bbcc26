use std::collections::VecDeque;

use super::types::{Direction, FieldSize, Point};

#[derive(Clone, Debug, PartialEq)]
pub struct Snake {
    head: Point,
    /// Occupied cells, head first.
    body: VecDeque<Point>,
    direction: Direction,
    target_length: usize,
}

impl Snake {
    pub const DEFAULT_DIRECTION: Direction = Direction::Right;

    pub fn new(start_pos: Point, direction: Direction) -> Self {
        Self {
            head: start_pos,
            body: VecDeque::from([start_pos]),
            direction,
            target_length: 1,
        }
    }

    /// Fresh snake in the middle of the field.
    pub fn spawn(field_size: &FieldSize) -> Self {
        Self::new(field_size.center(), Self::DEFAULT_DIRECTION)
    }

    /// Builds a snake from head-first segments. Returns `None` for an empty body.
    pub fn from_segments(segments: Vec<Point>, direction: Direction) -> Option<Self> {
        let head = *segments.first()?;
        let target_length = segments.len();
        Some(Self {
            head,
            body: segments.into(),
            direction,
            target_length,
        })
    }

    pub fn head(&self) -> Point {
        self.head
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn body(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Applies a requested heading unless it is absent or reverses the current one.
    /// Returns `true` when the heading changed.
    pub fn set_heading(&mut self, requested: Option<Direction>) -> bool {
        match requested {
            Some(direction) if !direction.is_opposite(&self.direction) => {
                let changed = direction != self.direction;
                self.direction = direction;
                changed
            }
            _ => false,
        }
    }

    pub fn tick(&mut self, field_size: &FieldSize) {
        self.head = self.head.wrapping_step(self.direction, field_size);
        self.body.push_front(self.head);
        self.body.truncate(self.target_length);
    }

    /// The extra segment appears on the next `tick`.
    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    pub fn collides_with_self(&self) -> bool {
        self.body.iter().skip(1).any(|segment| *segment == self.head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> FieldSize {
        FieldSize::new(40, 30)
    }

    fn snake_from(segments: &[(usize, usize)], direction: Direction) -> Snake {
        let points = segments.iter().map(|&(x, y)| Point::new(x, y)).collect();
        Snake::from_segments(points, direction).unwrap()
    }

    #[test]
    fn test_spawn_is_centered_with_length_one() {
        let snake = Snake::spawn(&field());
        assert_eq!(snake.head(), Point::new(20, 15));
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.target_length(), 1);
    }

    #[test]
    fn test_from_segments_rejects_empty_body() {
        assert!(Snake::from_segments(vec![], Direction::Up).is_none());
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut snake = Snake::spawn(&field());
        assert!(!snake.set_heading(Some(Direction::Left)));
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn test_no_signal_keeps_heading() {
        let mut snake = Snake::spawn(&field());
        assert!(!snake.set_heading(None));
        assert_eq!(snake.direction(), Direction::Right);
        assert!(snake.set_heading(Some(Direction::Up)));
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn test_tick_keeps_target_length() {
        let mut snake = snake_from(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
        snake.tick(&field());
        assert_eq!(snake.head(), Point::new(6, 5));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.body().copied().collect::<Vec<_>>(), vec![
            Point::new(6, 5),
            Point::new(5, 5),
            Point::new(4, 5),
        ]);
        assert!(!snake.collides_with_self());
    }

    #[test]
    fn test_growth_takes_effect_on_next_tick() {
        let mut snake = Snake::spawn(&field());
        snake.grow();
        assert_eq!(snake.target_length(), 2);
        assert_eq!(snake.len(), 1);
        snake.tick(&field());
        assert_eq!(snake.len(), 2);
        snake.tick(&field());
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn test_head_stays_in_bounds_while_wrapping() {
        let field = FieldSize::new(5, 4);
        for direction in [Direction::Left, Direction::Right, Direction::Up, Direction::Down] {
            let mut snake = Snake::new(Point::new(0, 0), direction);
            for _ in 0..12 {
                snake.tick(&field);
                assert!(field.contains(snake.head()), "{:?} left the field", direction);
                assert_eq!(snake.len(), snake.target_length());
            }
        }
    }

    #[test]
    fn test_self_collision_when_head_enters_body() {
        // Heading up from (5,6) lands on (5,5), which is still occupied.
        let mut snake = snake_from(&[(5, 6), (6, 6), (6, 5), (5, 5), (4, 5)], Direction::Left);
        assert!(snake.set_heading(Some(Direction::Up)));
        snake.tick(&field());
        assert_eq!(snake.head(), Point::new(5, 5));
        assert!(snake.collides_with_self());
    }

    #[test]
    fn test_moving_into_vacated_tail_is_not_a_collision() {
        let mut snake = snake_from(&[(5, 6), (6, 6), (6, 5), (5, 5)], Direction::Left);
        snake.set_heading(Some(Direction::Up));
        snake.tick(&field());
        assert_eq!(snake.head(), Point::new(5, 5));
        assert!(!snake.collides_with_self());
    }
}
