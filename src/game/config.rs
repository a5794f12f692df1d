use std::time::Duration;

use super::{Direction, Position};

/// Largest grid side that still fits a terminal.
pub const MAX_GRID_SIZE: u16 = 100;

/// Rules of a game of snake
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Where the single-segment snake starts
    pub start: Position,
    pub start_direction: Direction,
    /// Time between two steps
    pub tick: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            start: Position::new(8, 8),
            start_direction: Direction::Right,
            tick: Duration::from_millis(150),
        }
    }
}

impl GameConfig {
    /// A grid of the given size, clamped to `1..=MAX_GRID_SIZE`.
    /// The start is clamped inside it.
    pub fn new(width: u16, height: u16) -> Self {
        let default = Self::default();
        let width = width.clamp(1, MAX_GRID_SIZE);
        let height = height.clamp(1, MAX_GRID_SIZE);
        let start = Position::new(
            default.start.x.min(i32::from(width) - 1),
            default.start.y.min(i32::from(height) - 1),
        );

        Self {
            grid_width: usize::from(width),
            grid_height: usize::from(height),
            start,
            ..default
        }
    }

    pub fn with_tick(self, tick: Duration) -> Self {
        Self { tick, ..self }
    }
}
