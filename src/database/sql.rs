use std::str::FromStr;

use chrono::Utc;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::*;

pub type DatabasePool = sqlx::SqlitePool;

/// Scores kept in an SQLite database.
pub struct SqlStore {
    pool: DatabasePool,
    capacity: usize,
}

impl SqlStore {
    /// Connects to `database_url` and creates the schema if needed.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        capacity: usize,
    ) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!("Connected to the scores database at {}", database_url);
        Self::with_pool(pool, capacity).await
    }

    /// A private in-memory database. The pool holds a single connection
    /// that never expires, otherwise the data would go with it.
    pub async fn in_memory(capacity: usize) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::with_pool(pool, capacity).await
    }

    pub async fn with_pool(pool: DatabasePool, capacity: usize) -> StoreResult<Self> {
        let store = Self { pool, capacity };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
                CREATE TABLE IF NOT EXISTS scores (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    score REAL NOT NULL,
                    created_at TEXT NOT NULL
                )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
                CREATE INDEX IF NOT EXISTS scores_rank
                ON scores (score DESC, id ASC)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Number of rows in the table, ranked or not.
    pub async fn count(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM scores")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[rocket::async_trait]
impl ScoreStore for SqlStore {
    fn capacity(&self) -> usize {
        self.capacity
    }

    async fn top(&self, limit: usize) -> StoreResult<Vec<ScoreRecord>> {
        let limit = sql_limit(limit.min(self.capacity));

        sqlx::query_as::<_, ScoreRecord>(
            r#"
                SELECT id, name, score, created_at
                FROM scores
                ORDER BY score DESC, id ASC
                LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn submit(&self, score: NewScore) -> StoreResult<Submission> {
        // Insert and prune commit together, so readers never see
        // more than `capacity` rows and a failed prune leaves no trace.
        let mut transaction = self.pool.begin().await?;

        let record = sqlx::query_as::<_, ScoreRecord>(
            r#"
                INSERT INTO scores (name, score, created_at)
                VALUES (?, ?, ?)
                RETURNING id, name, score, created_at
            "#,
        )
        .bind(&score.name)
        .bind(score.score)
        .bind(Utc::now())
        .fetch_one(&mut *transaction)
        .await?;

        let pruned = sqlx::query(
            r#"
                DELETE FROM scores
                WHERE id NOT IN (
                    SELECT id
                    FROM scores
                    ORDER BY score DESC, id ASC
                    LIMIT ?
                )
            "#,
        )
        .bind(sql_limit(self.capacity))
        .execute(&mut *transaction)
        .await?
        .rows_affected();

        let (survivors,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM scores WHERE id = ?")
            .bind(record.id)
            .fetch_one(&mut *transaction)
            .await?;

        transaction.commit().await?;

        Ok(Submission {
            record,
            ranked: survivors > 0,
            pruned,
        })
    }
}

/// SQLite reads a negative `LIMIT` as "no limit", so saturate instead of wrapping.
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}
