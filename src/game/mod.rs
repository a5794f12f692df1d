//! Snake rules, free of any I/O.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

pub use config::{GameConfig, MAX_GRID_SIZE};
pub use direction::Direction;
pub use engine::{GameEngine, StepOutcome};
pub use state::{Collision, GameState, Position, Snake};
