//! Chat entity and repository trait.
//!
//! Maps to the `chats` and `chats_users` tables. The chat repository owns
//! both: a chat row and its membership rows are created together and the
//! membership is immutable afterwards.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::shared::error::AppError;

/// Represents a conversation between two or more users.
///
/// Maps to the `chats` table:
/// - id: UUID PRIMARY KEY
/// - name: TEXT NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    /// Primary key
    pub id: Uuid,

    /// Chat display name, non-empty
    pub name: String,

    /// Chat creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A chat as it appears in a user's chat list.
///
/// `last_activity_at` is the chat's activity timestamp: the time of its most
/// recent message, or the chat's own creation time while it has no messages.
/// The member set is fetched separately in one batched query.
#[derive(Debug, Clone)]
pub struct ChatSummary {
    pub id: Uuid,
    pub name: String,
    pub last_activity_at: DateTime<Utc>,
}

/// Repository trait for chat and membership data access.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Insert a new chat row inside the given transaction and return the
    /// created chat.
    async fn create(&self, conn: &mut PgConnection, name: &str) -> Result<Chat, AppError>;

    /// Insert one membership row per user for `chat_id`, as a single batched
    /// multi-row statement inside the given transaction.
    async fn add_members(
        &self,
        conn: &mut PgConnection,
        chat_id: Uuid,
        user_ids: &[Uuid],
    ) -> Result<(), AppError>;

    /// List the chats `user_id` belongs to, ordered by activity timestamp
    /// descending (most recently active first).
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ChatSummary>, AppError>;

    /// Fetch the member ids of every chat in `chat_ids` with one query.
    async fn members_for_chats(
        &self,
        chat_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Uuid>>, AppError>;

    /// Check whether a chat row with this id exists.
    async fn exists(&self, chat_id: Uuid) -> Result<bool, AppError>;

    /// Check whether `user_id` is a member of `chat_id`.
    async fn member_exists(&self, user_id: Uuid, chat_id: Uuid) -> Result<bool, AppError>;
}
