use rand::Rng;

use crate::database::GameScore;
use crate::game::{Collision, Direction, GameEngine, GameState, StepOutcome};

/// Longest name the game-over prompt accepts.
pub const MAX_NAME_LENGTH: usize = 24;

/// One play-through, from the first step to its (single) score submission.
///
/// `Running -> Ended -> Submitted | Declined`. The only way to obtain a
/// [`PendingSubmission`] is [`Session::confirm_name`] on an ended session,
/// which leaves that state for good.
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    Running(GameState),
    Ended(GameOver),
    Submitted { final_state: GameState },
    Declined { final_state: GameState },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameOver {
    pub final_state: GameState,
    pub collision: Collision,
    /// What the player typed so far
    pub name: String,
}

/// A score on its way to the leaderboard
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub name: String,
    pub score: GameScore,
}

impl Session {
    pub fn start<R: Rng>(engine: &mut GameEngine<R>) -> Self {
        Self::Running(engine.reset())
    }

    /// Throws the current session away and begins a new one.
    pub fn restart<R: Rng>(&mut self, engine: &mut GameEngine<R>) {
        *self = Self::start(engine);
    }

    /// Advances a running game by one step. Returns the collision that ended it, if any.
    pub fn tick<R: Rng>(
        &mut self,
        engine: &mut GameEngine<R>,
        turn: Option<Direction>,
    ) -> Option<Collision> {
        let state = match self {
            Self::Running(state) => state,
            _ => return None,
        };

        match engine.step(state, turn) {
            StepOutcome::Collided(collision) => {
                let final_state = state.clone();
                *self = Self::Ended(GameOver {
                    final_state,
                    collision,
                    name: String::new(),
                });
                Some(collision)
            }
            StepOutcome::Moved | StepOutcome::AteFood => None,
        }
    }

    pub fn state(&self) -> &GameState {
        match self {
            Self::Running(state) => state,
            Self::Ended(game_over) => &game_over.final_state,
            Self::Submitted { final_state } | Self::Declined { final_state } => final_state,
        }
    }

    pub fn score(&self) -> u32 {
        self.state().score
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }

    /// Whether the game-over name prompt is open.
    pub fn is_asking_name(&self) -> bool {
        matches!(self, Self::Ended(_))
    }

    pub fn name_input(&self) -> Option<&str> {
        match self {
            Self::Ended(game_over) => Some(&game_over.name),
            _ => None,
        }
    }

    pub fn push_name_char(&mut self, c: char) {
        if let Self::Ended(game_over) = self {
            if !c.is_control() && game_over.name.chars().count() < MAX_NAME_LENGTH {
                game_over.name.push(c);
            }
        }
    }

    pub fn pop_name_char(&mut self) {
        if let Self::Ended(game_over) = self {
            game_over.name.pop();
        }
    }

    /// Closes the prompt. A blank name counts as declining.
    pub fn confirm_name(&mut self) -> Option<PendingSubmission> {
        let game_over = match self {
            Self::Ended(game_over) => game_over,
            _ => return None,
        };

        let name = game_over.name.trim().to_owned();
        let final_state = game_over.final_state.clone();

        if name.is_empty() {
            *self = Self::Declined { final_state };
            return None;
        }

        let score = GameScore::from(final_state.score);
        *self = Self::Submitted { final_state };
        Some(PendingSubmission { name, score })
    }

    /// The player does not want the score on the leaderboard.
    pub fn decline(&mut self) {
        if let Self::Ended(game_over) = self {
            let final_state = game_over.final_state.clone();
            *self = Self::Declined { final_state };
        }
    }
}
