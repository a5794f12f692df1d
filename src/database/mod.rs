mod memory;
mod request_error;
pub mod requests;
mod score;
mod sql;
mod store;

pub use memory::MemoryStore;
pub use request_error::*;
pub use score::{GameScore, NewScore, ScoreId, ScoreRecord, ScoreSubmission};
pub use sql::SqlStore;
pub use store::{ScoreStore, SharedStore, StoreResult, Submission};
