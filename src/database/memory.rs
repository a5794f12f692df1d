use chrono::Utc;
use tokio::sync::RwLock;

use super::*;
use crate::leaderboard::Leaderboard;

/// Scores kept in process memory. Nothing survives a restart.
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    capacity: usize,
}

struct MemoryState {
    leaderboard: Leaderboard<ScoreRecord>,
    next_id: ScoreId,
}

impl MemoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: RwLock::new(MemoryState {
                leaderboard: Leaderboard::new(capacity),
                next_id: 1,
            }),
            capacity,
        }
    }
}

#[rocket::async_trait]
impl ScoreStore for MemoryStore {
    fn capacity(&self) -> usize {
        self.capacity
    }

    async fn top(&self, limit: usize) -> StoreResult<Vec<ScoreRecord>> {
        let state = self.state.read().await;
        Ok(state.leaderboard.top(limit).cloned().collect())
    }

    async fn submit(&self, score: NewScore) -> StoreResult<Submission> {
        let mut state = self.state.write().await;

        let record = ScoreRecord {
            id: state.next_id,
            name: score.name,
            score: score.score,
            created_at: Utc::now(),
        };
        state.next_id += 1;

        let evicted = state.leaderboard.add(record.clone());
        let ranked = evicted
            .as_ref()
            .map_or(true, |evicted| evicted.id != record.id);

        Ok(Submission {
            record,
            ranked,
            pruned: evicted.map_or(0, |_| 1),
        })
    }
}
