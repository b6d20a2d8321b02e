//! Message Service
//!
//! Sends messages into chats and lists a chat's history.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{ChatRepository, Message, MessageRepository};
use crate::infrastructure::database::UnitOfWork;
use crate::shared::error::AppError;

/// Message service trait
#[async_trait]
pub trait MessageService: Send + Sync {
    /// Send a message to a chat on behalf of one of its members, returning
    /// the new message's id.
    async fn send_message(
        &self,
        chat_id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<Uuid, AppError>;

    /// List a chat's messages, oldest first.
    async fn get_message_list(&self, chat_id: Uuid) -> Result<Vec<MessageDto>, AppError>;
}

/// Message data transfer object
#[derive(Debug, Clone)]
pub struct MessageDto {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageDto {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            chat_id: message.chat_id,
            author_id: message.author_id,
            text: message.text,
            created_at: message.created_at,
        }
    }
}

/// MessageService implementation
pub struct MessageServiceImpl<M, C, W>
where
    M: MessageRepository,
    C: ChatRepository,
    W: UnitOfWork,
{
    message_repo: Arc<M>,
    chat_repo: Arc<C>,
    uow: Arc<W>,
}

impl<M, C, W> MessageServiceImpl<M, C, W>
where
    M: MessageRepository,
    C: ChatRepository,
    W: UnitOfWork,
{
    pub fn new(message_repo: Arc<M>, chat_repo: Arc<C>, uow: Arc<W>) -> Self {
        Self {
            message_repo,
            chat_repo,
            uow,
        }
    }
}

#[async_trait]
impl<M, C, W> MessageService for MessageServiceImpl<M, C, W>
where
    M: MessageRepository + 'static,
    C: ChatRepository + 'static,
    W: UnitOfWork + 'static,
{
    async fn send_message(
        &self,
        chat_id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<Uuid, AppError> {
        // A membership row can only reference existing users and chats, so
        // this check also validates both ids.
        if !self.chat_repo.member_exists(author_id, chat_id).await? {
            return Err(AppError::Conflict(
                "author is not a member of this chat".into(),
            ));
        }

        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "message text must not be blank".into(),
            ));
        }

        let mut tx = self.uow.begin().await?;

        let message = match self
            .message_repo
            .create(tx.as_mut(), chat_id, author_id, text)
            .await
        {
            Ok(message) => message,
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!("rollback failed: {}", rollback_err);
                }
                return Err(e);
            }
        };

        tx.commit().await?;

        tracing::info!(message_id = %message.id, chat_id = %chat_id, "message sent");
        Ok(message.id)
    }

    async fn get_message_list(&self, chat_id: Uuid) -> Result<Vec<MessageDto>, AppError> {
        if !self.chat_repo.exists(chat_id).await? {
            return Err(AppError::Conflict("chat does not exist".into()));
        }

        let messages = self.message_repo.list_for_chat(chat_id).await?;

        Ok(messages.into_iter().map(MessageDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    use pretty_assertions::assert_eq;
    use sqlx::PgConnection;

    use super::*;
    use crate::domain::{Chat, ChatSummary};
    use crate::infrastructure::database::TransactionContext;

    struct FakeChatRepo {
        chat_exists: bool,
        is_member: bool,
    }

    #[async_trait]
    impl ChatRepository for FakeChatRepo {
        async fn create(&self, _conn: &mut PgConnection, name: &str) -> Result<Chat, AppError> {
            Ok(Chat {
                id: Uuid::new_v4(),
                name: name.to_string(),
                created_at: Utc::now(),
            })
        }

        async fn add_members(
            &self,
            _conn: &mut PgConnection,
            _chat_id: Uuid,
            _user_ids: &[Uuid],
        ) -> Result<(), AppError> {
            Ok(())
        }

        async fn list_for_user(&self, _user_id: Uuid) -> Result<Vec<ChatSummary>, AppError> {
            Ok(Vec::new())
        }

        async fn members_for_chats(
            &self,
            _chat_ids: &[Uuid],
        ) -> Result<HashMap<Uuid, Vec<Uuid>>, AppError> {
            Ok(HashMap::new())
        }

        async fn exists(&self, _chat_id: Uuid) -> Result<bool, AppError> {
            Ok(self.chat_exists)
        }

        async fn member_exists(&self, _user_id: Uuid, _chat_id: Uuid) -> Result<bool, AppError> {
            Ok(self.is_member)
        }
    }

    struct FakeMessageRepo {
        history: Vec<Message>,
        wrote: AtomicBool,
    }

    impl FakeMessageRepo {
        fn empty() -> Self {
            Self {
                history: Vec::new(),
                wrote: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl MessageRepository for FakeMessageRepo {
        async fn create(
            &self,
            _conn: &mut PgConnection,
            chat_id: Uuid,
            author_id: Uuid,
            text: &str,
        ) -> Result<Message, AppError> {
            self.wrote.store(true, Ordering::SeqCst);
            Ok(Message {
                id: Uuid::new_v4(),
                chat_id,
                author_id,
                text: text.to_string(),
                created_at: Utc::now(),
            })
        }

        async fn list_for_chat(&self, _chat_id: Uuid) -> Result<Vec<Message>, AppError> {
            Ok(self.history.clone())
        }
    }

    /// Unit-of-work fake that refuses to begin. Reaching it means a
    /// precondition failed to short-circuit the operation.
    struct NoTxUnitOfWork;

    #[async_trait]
    impl UnitOfWork for NoTxUnitOfWork {
        async fn begin(&self) -> Result<TransactionContext, AppError> {
            Err(AppError::Internal("transaction must not be opened".into()))
        }
    }

    fn service(
        is_member: bool,
        chat_exists: bool,
        message_repo: FakeMessageRepo,
    ) -> MessageServiceImpl<FakeMessageRepo, FakeChatRepo, NoTxUnitOfWork> {
        MessageServiceImpl::new(
            Arc::new(message_repo),
            Arc::new(FakeChatRepo {
                chat_exists,
                is_member,
            }),
            Arc::new(NoTxUnitOfWork),
        )
    }

    #[tokio::test]
    async fn non_member_author_is_a_conflict_without_any_write() {
        let service = service(false, true, FakeMessageRepo::empty());

        let err = service
            .send_message(Uuid::new_v4(), Uuid::new_v4(), "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(service.message_repo.wrote.load(Ordering::SeqCst), false);
    }

    #[tokio::test]
    async fn membership_is_checked_before_the_text() {
        let service = service(false, true, FakeMessageRepo::empty());

        let err = service
            .send_message(Uuid::new_v4(), Uuid::new_v4(), "   ")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn blank_text_from_a_member_is_rejected() {
        let service = service(true, true, FakeMessageRepo::empty());

        let err = service
            .send_message(Uuid::new_v4(), Uuid::new_v4(), "   ")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(service.message_repo.wrote.load(Ordering::SeqCst), false);
    }

    #[tokio::test]
    async fn message_list_requires_an_existing_chat() {
        let service = service(true, false, FakeMessageRepo::empty());

        let err = service.get_message_list(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn message_list_preserves_repository_order() {
        let chat_id = Uuid::new_v4();
        let author = Uuid::new_v4();
        let t1 = Utc::now();
        let t2 = t1 + chrono::Duration::seconds(5);

        let mut repo = FakeMessageRepo::empty();
        repo.history = vec![
            Message {
                id: Uuid::new_v4(),
                chat_id,
                author_id: author,
                text: "first".into(),
                created_at: t1,
            },
            Message {
                id: Uuid::new_v4(),
                chat_id,
                author_id: author,
                text: "second".into(),
                created_at: t2,
            },
        ];

        let service = service(true, true, repo);

        let messages = service.get_message_list(chat_id).await.unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "first");
        assert_eq!(messages[1].text, "second");
        assert_eq!(messages[0].created_at, t1);
    }
}
