use log::{debug, error};

use super::{ClientError, ClientResult, ScoreSource};
use crate::database::ScoreRecord;

/// The last leaderboard fetched from the server.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LeaderboardDisplay {
    scores: Vec<ScoreRecord>,
}

impl LeaderboardDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-fetches the leaderboard. On failure the error is logged
    /// and the previous list stays on screen.
    pub fn refresh(&mut self, source: &impl ScoreSource) -> bool {
        match source.fetch_top() {
            Ok(scores) => {
                debug!("Fetched {} leaderboard entries", scores.len());
                self.scores = scores;
                true
            }
            Err(err) => {
                error!("Error loading scores: {}", err);
                false
            }
        }
    }

    /// Refreshes once the server has answered a submission, whether it
    /// accepted it or not. Returns whether a refresh was attempted.
    pub fn after_submission(
        &mut self,
        result: ClientResult<()>,
        source: &impl ScoreSource,
    ) -> bool {
        match result {
            Ok(()) => {}
            Err(ClientError::Rejected { status, message }) => {
                error!("Error saving score: server answered {}: {}", status, message);
            }
            Err(err) => {
                error!("Error saving score: {}", err);
                return false;
            }
        }

        self.refresh(source);
        true
    }

    pub fn scores(&self) -> &[ScoreRecord] {
        &self.scores
    }

    /// `1. name - score`, one line per entry.
    pub fn lines(&self) -> Vec<String> {
        self.scores
            .iter()
            .enumerate()
            .map(|(index, record)| format!("{}. {} - {}", index + 1, record.name, record.score))
            .collect()
    }
}
