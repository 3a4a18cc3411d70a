//! Data access for user records: the `UserStore` contract and its adapters.

#[cfg(test)]
pub(crate) mod memory;
mod postgres;

pub use postgres::{ensure_database_exists, ensure_users_table, PgUserStore};

use crate::model::{User, UserFields, UserFilter};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Failures surfaced by the store. The core never retries or translates them further.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("database: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::UniqueViolation(db.constraint().unwrap_or_default().to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

/// One call per request: handlers never compose store operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user; the store assigns `id`.
    async fn create(&self, fields: &UserFields) -> Result<User, StoreError>;

    /// All users matching every set filter key, ordered by id.
    async fn find_many(&self, filter: &UserFilter) -> Result<Vec<User>, StoreError>;

    /// Overwrite supplied fields. `NotFound` when no row has `id`.
    async fn update(&self, id: Uuid, fields: &UserFields) -> Result<User, StoreError>;

    /// Remove and return the row. `NotFound` when no row has `id`.
    async fn delete(&self, id: Uuid) -> Result<User, StoreError>;

    /// Round-trip to the backing database.
    async fn ping(&self) -> Result<(), StoreError>;
}
