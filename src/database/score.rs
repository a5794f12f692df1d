use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rocket::serde::{json::Value, Deserialize, Serialize};

use super::RequestError;

/// Any finite JSON number is a valid score.
pub type GameScore = f64;
pub type ScoreId = i64;

/// A stored leaderboard entry.
///
/// Ordering follows rank: a greater record has a higher score, or the same
/// score and an earlier submission.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ScoreRecord {
    pub id: ScoreId,
    pub name: String,
    pub score: GameScore,
    pub created_at: DateTime<Utc>,
}

impl Ord for ScoreRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.id.cmp(&self.id))
            .then_with(|| other.created_at.cmp(&self.created_at))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for ScoreRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScoreRecord {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoreRecord {}

/// A validated score that is ready to be stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct NewScore {
    pub name: String,
    pub score: GameScore,
}

impl NewScore {
    pub fn new(name: impl Into<String>, score: impl Into<GameScore>) -> Self {
        Self {
            name: name.into(),
            score: score.into(),
        }
    }
}

/// Raw body of a score submission, before validation.
/// Fields are kept loose so that bad input is reported as a 400.
#[derive(Debug, Default)]
pub struct ScoreSubmission {
    pub name: Option<Value>,
    pub score: Option<Value>,
}

impl ScoreSubmission {
    /// Only a JSON object carries named fields; arrays and scalars are rejected.
    pub fn from_json(body: Value) -> Result<Self, RequestError> {
        match body {
            Value::Object(mut fields) => Ok(Self {
                name: fields.remove("name"),
                score: fields.remove("score"),
            }),
            _ => Err(RequestError::invalid_input("body must be a JSON object")),
        }
    }

    pub fn validate(self) -> Result<NewScore, RequestError> {
        let name = match self.name {
            Some(Value::String(name)) if !name.is_empty() => name,
            _ => return Err(RequestError::invalid_input("name must be a non-empty string")),
        };

        let score = match self.score {
            Some(Value::Number(number)) => number.as_f64().filter(|score| score.is_finite()),
            _ => None,
        }
        .ok_or_else(|| RequestError::invalid_input("score must be a number"))?;

        Ok(NewScore { name, score })
    }
}
