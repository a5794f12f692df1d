use super::{NewScore, ScoreRecord};

pub type StoreResult<T> = Result<T, sqlx::Error>;

/// The store behind the HTTP routes.
pub type SharedStore = Box<dyn ScoreStore>;

/// Outcome of a successful submission.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    /// The record as it was inserted.
    pub record: ScoreRecord,
    /// Whether the record survived the prune.
    pub ranked: bool,
    /// How many records the prune removed, the new one included.
    pub pruned: u64,
}

/// A top-N leaderboard.
///
/// Implementations keep at most [`ScoreStore::capacity`] records at rest:
/// the highest scores, earlier submissions first among equals.
/// Insert and prune are applied atomically.
#[rocket::async_trait]
pub trait ScoreStore: Send + Sync {
    /// Maximum number of records kept.
    fn capacity(&self) -> usize;

    /// Returns up to `limit` records, best first.
    async fn top(&self, limit: usize) -> StoreResult<Vec<ScoreRecord>>;

    /// Inserts a new record and removes everything that no longer ranks.
    async fn submit(&self, score: NewScore) -> StoreResult<Submission>;
}
