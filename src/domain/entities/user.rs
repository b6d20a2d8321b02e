//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::shared::error::AppError;

/// Represents a registered user.
///
/// Maps to the `users` table:
/// - id: UUID PRIMARY KEY
/// - username: VARCHAR(64) NOT NULL UNIQUE
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// A user is immutable once created and is never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Primary key
    pub id: Uuid,

    /// Unique username: at least 3 characters of letters, digits and `_`
    pub username: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Repository trait for user data access.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user row inside the given transaction and return the
    /// created user.
    async fn create(&self, conn: &mut PgConnection, username: &str) -> Result<User, AppError>;

    /// Check whether a username is already taken.
    async fn username_exists(&self, username: &str) -> Result<bool, AppError>;

    /// Check that every id in `ids` references an existing user.
    ///
    /// Count-based: the number of matching rows is compared against the
    /// number of *supplied* ids, so duplicate ids produce a false negative
    /// even when every referenced user exists. Callers must de-duplicate.
    async fn all_exist(&self, ids: &[Uuid]) -> Result<bool, AppError>;
}
