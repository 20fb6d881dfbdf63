//! Sequence repository - atomic named counters.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement};

use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Produces the next integer of a named monotonic counter.
///
/// Implementations must guarantee that concurrent callers for the same
/// name never observe the same value.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SequenceRepository: Send + Sync {
    /// Atomically increment the counter and return the new value.
    /// A counter that does not exist yet starts at 1.
    async fn next_value(&self, name: &str) -> AppResult<i64>;
}

/// Concrete implementation of SequenceRepository over SeaORM
pub struct SequenceStore {
    db: DatabaseConnection,
}

impl SequenceStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SequenceRepository for SequenceStore {
    async fn next_value(&self, name: &str) -> AppResult<i64> {
        // Single conditional upsert: the increment and the read happen in
        // one statement, so two in-flight callers cannot receive the same
        // value. A read-then-write pair here would race.
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "INSERT INTO counters (name, value) VALUES ($1, 1) \
             ON CONFLICT (name) DO UPDATE SET value = counters.value + 1 \
             RETURNING value",
            [name.into()],
        );

        let row = self
            .db
            .query_one(stmt)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::internal("Counter upsert returned no row"))?;

        row.try_get::<i64>("", "value").map_err(AppError::from)
    }
}
