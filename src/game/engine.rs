use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{Collision, Direction, GameConfig, GameState, Position, Snake};

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    AteFood,
    Collided(Collision),
}

/// Plays the rules of [`GameConfig`] on a [`GameState`]
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// A fresh game: one segment at the start cell, score 0, food somewhere free.
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(self.config.start, self.config.start_direction);
        let mut state = GameState::new(snake, None, self.config.grid_width, self.config.grid_height);
        state.food = self.spawn_food(&state);
        state
    }

    /// Advances the snake by one cell.
    /// A turn back onto the snake's own neck is ignored.
    pub fn step(&mut self, state: &mut GameState, turn: Option<Direction>) -> StepOutcome {
        if let Some(direction) = turn {
            if !state.snake.direction.is_opposite(direction) {
                state.snake.direction = direction;
            }
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        if !state.is_in_bounds(new_head) {
            return StepOutcome::Collided(Collision::Wall);
        }
        // The tail still counts: it only moves away after the head has moved.
        if state.snake.occupies(new_head) {
            return StepOutcome::Collided(Collision::SelfCollision);
        }

        let ate_food = state.food == Some(new_head);
        state.snake.advance(new_head, ate_food);

        if ate_food {
            state.score += 1;
            state.food = self.spawn_food(state);
            StepOutcome::AteFood
        } else {
            StepOutcome::Moved
        }
    }

    fn spawn_food(&mut self, state: &GameState) -> Option<Position> {
        state.free_cells().choose(&mut self.rng).copied()
    }
}
