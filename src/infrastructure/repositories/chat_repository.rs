//! Chat Repository Implementation
//!
//! PostgreSQL implementation of the ChatRepository trait, covering the
//! `chats` table and the `chats_users` membership table.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::{Chat, ChatRepository, ChatSummary};
use crate::shared::error::AppError;

/// Database row representation matching the `chats` table schema.
#[derive(Debug, sqlx::FromRow)]
struct ChatRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl ChatRow {
    /// Convert database row to domain Chat entity.
    fn into_chat(self) -> Chat {
        Chat {
            id: self.id,
            name: self.name,
            created_at: self.created_at,
        }
    }
}

/// Database row for a chat-list entry with its activity timestamp.
#[derive(Debug, sqlx::FromRow)]
struct ChatSummaryRow {
    id: Uuid,
    name: String,
    last_activity_at: DateTime<Utc>,
}

impl ChatSummaryRow {
    fn into_summary(self) -> ChatSummary {
        ChatSummary {
            id: self.id,
            name: self.name,
            last_activity_at: self.last_activity_at,
        }
    }
}

/// Database row for one membership pair.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    chat_id: Uuid,
    user_id: Uuid,
}

/// PostgreSQL chat repository implementation.
#[derive(Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    /// Create a new PgChatRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    /// Insert a new chat row.
    async fn create(&self, conn: &mut PgConnection, name: &str) -> Result<Chat, AppError> {
        let row = sqlx::query_as::<_, ChatRow>(
            r#"
            INSERT INTO chats (id, name)
            VALUES ($1, $2)
            RETURNING id, name, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

        Ok(row.into_chat())
    }

    /// Insert every membership row for a new chat in one statement.
    async fn add_members(
        &self,
        conn: &mut PgConnection,
        chat_id: Uuid,
        user_ids: &[Uuid],
    ) -> Result<(), AppError> {
        let mut builder =
            QueryBuilder::<Postgres>::new("INSERT INTO chats_users (chat_id, user_id) ");
        builder.push_values(user_ids, |mut row, user_id| {
            row.push_bind(chat_id).push_bind(*user_id);
        });

        builder.build().execute(&mut *conn).await?;

        Ok(())
    }

    /// List a user's chats, most recently active first.
    ///
    /// The activity timestamp is the latest message time per chat, falling
    /// back to the chat's own creation time while it has no messages.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ChatSummary>, AppError> {
        let rows = sqlx::query_as::<_, ChatSummaryRow>(
            r#"
            SELECT c.id,
                   c.name,
                   COALESCE(MAX(m.created_at), c.created_at) AS last_activity_at
            FROM chats c
            JOIN chats_users cu ON cu.chat_id = c.id
            LEFT JOIN messages m ON m.chat_id = c.id
            WHERE cu.user_id = $1
            GROUP BY c.id, c.name, c.created_at
            ORDER BY last_activity_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_summary()).collect())
    }

    /// Fetch member ids for a set of chats with one query.
    async fn members_for_chats(
        &self,
        chat_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Uuid>>, AppError> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            "SELECT chat_id, user_id FROM chats_users WHERE chat_id = ANY($1)",
        )
        .bind(chat_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut members: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in rows {
            members.entry(row.chat_id).or_default().push(row.user_id);
        }

        Ok(members)
    }

    /// Check whether a chat with this id exists.
    async fn exists(&self, chat_id: Uuid) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM chats WHERE id = $1)")
                .bind(chat_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Check whether a user is a member of a chat.
    async fn member_exists(&self, user_id: Uuid, chat_id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM chats_users WHERE user_id = $1 AND chat_id = $2)",
        )
        .bind(user_id)
        .bind(chat_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
