//! Message entity and repository trait.
//!
//! Maps to the `messages` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::shared::error::AppError;

/// Represents a message sent in a chat.
///
/// Maps to the `messages` table:
/// - id: UUID PRIMARY KEY
/// - chat_id: UUID NOT NULL REFERENCES chats(id)
/// - author_id: UUID NOT NULL REFERENCES users(id)
/// - text: TEXT NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// The author must be a member of the chat. Messages are immutable and are
/// never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Primary key
    pub id: Uuid,

    /// Chat the message was sent to
    pub chat_id: Uuid,

    /// Author user id, a member of `chat_id`
    pub author_id: Uuid,

    /// Message text, non-blank after trimming
    pub text: String,

    /// Timestamp assigned by the store at insert time
    pub created_at: DateTime<Utc>,
}

/// Repository trait for message data access.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Insert a new message row inside the given transaction and return the
    /// created message. The timestamp is assigned by the store.
    async fn create(
        &self,
        conn: &mut PgConnection,
        chat_id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<Message, AppError>;

    /// List all messages of `chat_id` ordered by creation time ascending
    /// (oldest first).
    async fn list_for_chat(&self, chat_id: Uuid) -> Result<Vec<Message>, AppError>;
}
