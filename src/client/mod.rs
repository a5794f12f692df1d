//! Talks to the leaderboard server from the game.

use reqwest::blocking::{Client, Response};

use crate::database::{ErrorBody, GameScore, NewScore, ScoreRecord};

mod display;

pub use display::LeaderboardDisplay;

pub const DEFAULT_SERVER: &str = "http://localhost:5000";

#[derive(Debug)]
pub enum ClientError {
    /// The server could not be reached or answered garbage
    Network(reqwest::Error),
    /// The server answered with an error status
    Rejected { status: u16, message: String },
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Network(error) => Some(error),
            Self::Rejected { .. } => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(error) => write!(f, "network error: {}", error),
            Self::Rejected { status, message } => {
                write!(f, "server answered {}: {}", status, message)
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Anything the leaderboard display can read scores from.
pub trait ScoreSource {
    fn fetch_top(&self) -> ClientResult<Vec<ScoreRecord>>;
}

pub struct LeaderboardClient {
    http: Client,
    scores_url: String,
}

impl LeaderboardClient {
    pub fn new(server: &str) -> ClientResult<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            scores_url: scores_url(server),
        })
    }

    pub fn scores_url(&self) -> &str {
        &self.scores_url
    }

    pub fn submit(&self, name: &str, score: GameScore) -> ClientResult<()> {
        let response = self
            .http
            .post(&self.scores_url)
            .json(&NewScore::new(name, score))
            .send()?;
        check_status(response)?;
        Ok(())
    }
}

impl ScoreSource for LeaderboardClient {
    fn fetch_top(&self) -> ClientResult<Vec<ScoreRecord>> {
        let response = self.http.get(&self.scores_url).send()?;
        let scores = check_status(response)?.json()?;
        Ok(scores)
    }
}

fn scores_url(server: &str) -> String {
    format!("{}/scores", server.trim_end_matches('/'))
}

fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>() {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_owned(),
    };
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_the_scores_url() {
        assert_eq!(scores_url("http://localhost:5000"), "http://localhost:5000/scores");
        assert_eq!(scores_url("http://example.com/api/"), "http://example.com/api/scores");
    }

    #[test]
    fn rejected_errors_mention_the_status() {
        let error = ClientError::Rejected {
            status: 400,
            message: "Invalid name or score".to_owned(),
        };
        assert_eq!(error.to_string(), "server answered 400: Invalid name or score");
    }
}
