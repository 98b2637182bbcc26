use crate::games::SessionRng;
use crate::log;
use super::food::Food;
use super::snake::Snake;
use super::types::{ColorTier, Direction, FieldSize};

/// What happened during one `update`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub ate_food: bool,
    /// The snake bit itself and the whole game was restarted.
    pub reset: bool,
}

#[derive(Clone, Debug)]
pub struct SnakeGameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub tier: ColorTier,
    pub field_size: FieldSize,
}

impl SnakeGameState {
    pub fn new(field_size: FieldSize, rng: &mut SessionRng) -> Self {
        Self::from_parts(Snake::spawn(&field_size), Food::spawn(&field_size, rng), field_size)
    }

    pub fn from_parts(snake: Snake, food: Food, field_size: FieldSize) -> Self {
        Self {
            snake,
            food,
            score: 0,
            tier: ColorTier::Low,
            field_size,
        }
    }

    /// Advances the game by one tick using at most one steering signal.
    pub fn update(&mut self, signal: Option<Direction>, rng: &mut SessionRng) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        self.snake.set_heading(signal);
        self.snake.tick(&self.field_size);
        self.tier = ColorTier::for_score(self.score);

        if self.snake.head() == self.food.position {
            self.snake.grow();
            self.score += 1;
            self.food = Food::spawn(&self.field_size, rng);
            outcome.ate_food = true;
            log!(
                "Food eaten at ({}, {}). Score: {}",
                self.snake.head().x,
                self.snake.head().y,
                self.score
            );
        }

        if self.snake.collides_with_self() {
            log!("Snake hit itself with score {}, restarting", self.score);
            self.reset(rng);
            outcome.reset = true;
        }

        outcome
    }

    pub fn reset(&mut self, rng: &mut SessionRng) {
        self.snake = Snake::spawn(&self.field_size);
        self.food = Food::spawn(&self.field_size, rng);
        self.score = 0;
        self.tier = ColorTier::Low;
    }
}
