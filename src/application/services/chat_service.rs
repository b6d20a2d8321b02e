//! Chat Service
//!
//! Creates chats with their membership and lists a user's chats.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{ChatRepository, UserRepository};
use crate::infrastructure::database::UnitOfWork;
use crate::shared::error::AppError;

/// A chat requires at least this many distinct participants.
const MIN_CHAT_MEMBERS: usize = 2;

/// Chat service trait
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Create a chat with the given member set, returning its id.
    async fn create_chat(&self, name: &str, users: &[Uuid]) -> Result<Uuid, AppError>;

    /// List the chats a user belongs to, most recently active first.
    async fn get_chat_list(&self, user_id: Uuid) -> Result<Vec<ChatDto>, AppError>;
}

/// A chat entry in a user's chat list.
#[derive(Debug, Clone)]
pub struct ChatDto {
    pub id: Uuid,
    pub name: String,
    pub users: Vec<Uuid>,

    /// Activity timestamp: the latest message time, or the chat's own
    /// creation time while it has no messages.
    pub created_at: DateTime<Utc>,
}

/// ChatService implementation
pub struct ChatServiceImpl<U, C, W>
where
    U: UserRepository,
    C: ChatRepository,
    W: UnitOfWork,
{
    user_repo: Arc<U>,
    chat_repo: Arc<C>,
    uow: Arc<W>,
}

impl<U, C, W> ChatServiceImpl<U, C, W>
where
    U: UserRepository,
    C: ChatRepository,
    W: UnitOfWork,
{
    pub fn new(user_repo: Arc<U>, chat_repo: Arc<C>, uow: Arc<W>) -> Self {
        Self {
            user_repo,
            chat_repo,
            uow,
        }
    }
}

#[async_trait]
impl<U, C, W> ChatService for ChatServiceImpl<U, C, W>
where
    U: UserRepository + 'static,
    C: ChatRepository + 'static,
    W: UnitOfWork + 'static,
{
    async fn create_chat(&self, name: &str, users: &[Uuid]) -> Result<Uuid, AppError> {
        if name.is_empty() {
            return Err(AppError::Validation("chat name must not be empty".into()));
        }

        if users.len() < MIN_CHAT_MEMBERS {
            return Err(AppError::Validation(
                "a chat requires at least two participants".into(),
            ));
        }

        if !self.user_repo.all_exist(users).await? {
            return Err(AppError::Conflict("one or more users do not exist".into()));
        }

        let mut tx = self.uow.begin().await?;

        let chat = match self.chat_repo.create(tx.as_mut(), name).await {
            Ok(chat) => chat,
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!("rollback failed: {}", rollback_err);
                }
                return Err(e);
            }
        };

        if let Err(e) = self.chat_repo.add_members(tx.as_mut(), chat.id, users).await {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!("rollback failed: {}", rollback_err);
            }
            return Err(e);
        }

        tx.commit().await?;

        tracing::info!(chat_id = %chat.id, members = users.len(), "chat created");
        Ok(chat.id)
    }

    async fn get_chat_list(&self, user_id: Uuid) -> Result<Vec<ChatDto>, AppError> {
        let ids = [user_id];
        if !self.user_repo.all_exist(&ids).await? {
            return Err(AppError::Conflict("user does not exist".into()));
        }

        let summaries = self.chat_repo.list_for_user(user_id).await?;
        if summaries.is_empty() {
            return Ok(Vec::new());
        }

        let chat_ids: Vec<Uuid> = summaries.iter().map(|c| c.id).collect();
        let mut members = self.chat_repo.members_for_chats(&chat_ids).await?;

        Ok(summaries
            .into_iter()
            .map(|c| ChatDto {
                id: c.id,
                name: c.name,
                users: members.remove(&c.id).unwrap_or_default(),
                created_at: c.last_activity_at,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    use pretty_assertions::assert_eq;
    use sqlx::PgConnection;

    use super::*;
    use crate::domain::{Chat, ChatSummary, User};
    use crate::infrastructure::database::TransactionContext;

    struct FakeUserRepo {
        all_exist: bool,
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn create(
            &self,
            _conn: &mut PgConnection,
            username: &str,
        ) -> Result<User, AppError> {
            Ok(User {
                id: Uuid::new_v4(),
                username: username.to_string(),
                created_at: Utc::now(),
            })
        }

        async fn username_exists(&self, _username: &str) -> Result<bool, AppError> {
            Ok(false)
        }

        async fn all_exist(&self, _ids: &[Uuid]) -> Result<bool, AppError> {
            Ok(self.all_exist)
        }
    }

    /// Chat repository fake serving canned listings and recording writes.
    struct FakeChatRepo {
        summaries: Vec<ChatSummary>,
        members: HashMap<Uuid, Vec<Uuid>>,
        wrote: AtomicBool,
    }

    impl FakeChatRepo {
        fn empty() -> Self {
            Self {
                summaries: Vec::new(),
                members: HashMap::new(),
                wrote: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl ChatRepository for FakeChatRepo {
        async fn create(&self, _conn: &mut PgConnection, name: &str) -> Result<Chat, AppError> {
            self.wrote.store(true, Ordering::SeqCst);
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
            self.wrote.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn list_for_user(&self, _user_id: Uuid) -> Result<Vec<ChatSummary>, AppError> {
            Ok(self.summaries.clone())
        }

        async fn members_for_chats(
            &self,
            _chat_ids: &[Uuid],
        ) -> Result<HashMap<Uuid, Vec<Uuid>>, AppError> {
            Ok(self.members.clone())
        }

        async fn exists(&self, _chat_id: Uuid) -> Result<bool, AppError> {
            Ok(true)
        }

        async fn member_exists(&self, _user_id: Uuid, _chat_id: Uuid) -> Result<bool, AppError> {
            Ok(true)
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
        users_exist: bool,
        chat_repo: FakeChatRepo,
    ) -> ChatServiceImpl<FakeUserRepo, FakeChatRepo, NoTxUnitOfWork> {
        ChatServiceImpl::new(
            Arc::new(FakeUserRepo {
                all_exist: users_exist,
            }),
            Arc::new(chat_repo),
            Arc::new(NoTxUnitOfWork),
        )
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let service = service(true, FakeChatRepo::empty());
        let users = [Uuid::new_v4(), Uuid::new_v4()];

        let err = service.create_chat("", &users).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(service.chat_repo.wrote.load(Ordering::SeqCst), false);
    }

    #[tokio::test]
    async fn single_participant_is_rejected() {
        let service = service(true, FakeChatRepo::empty());
        let users = [Uuid::new_v4()];

        let err = service.create_chat("Team", &users).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_participant_is_a_conflict_and_opens_no_transaction() {
        let service = service(false, FakeChatRepo::empty());
        let users = [Uuid::new_v4(), Uuid::new_v4()];

        let err = service.create_chat("Team", &users).await.unwrap_err();

        // The unit-of-work fake turns any begin() into an internal fault, so
        // a Conflict here proves the precondition short-circuited.
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(service.chat_repo.wrote.load(Ordering::SeqCst), false);
    }

    #[tokio::test]
    async fn chat_list_requires_an_existing_user() {
        let service = service(false, FakeChatRepo::empty());

        let err = service.get_chat_list(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn chat_list_attaches_member_sets_in_listing_order() {
        let chat_a = Uuid::new_v4();
        let chat_b = Uuid::new_v4();
        let u1 = Uuid::new_v4();
        let u2 = Uuid::new_v4();

        let newer = Utc::now();
        let older = newer - chrono::Duration::hours(1);

        let mut repo = FakeChatRepo::empty();
        repo.summaries = vec![
            ChatSummary {
                id: chat_b,
                name: "B".into(),
                last_activity_at: newer,
            },
            ChatSummary {
                id: chat_a,
                name: "A".into(),
                last_activity_at: older,
            },
        ];
        repo.members.insert(chat_b, vec![u1, u2]);

        let service = service(true, repo);

        let chats = service.get_chat_list(u1).await.unwrap();

        assert_eq!(chats.len(), 2);
        assert_eq!(chats[0].id, chat_b);
        assert_eq!(chats[0].users, vec![u1, u2]);
        assert_eq!(chats[0].created_at, newer);
        // A membership row is guaranteed by the schema; an absent entry in
        // the batched map still yields an (empty) member list.
        assert_eq!(chats[1].id, chat_a);
        assert_eq!(chats[1].users, Vec::<Uuid>::new());
    }

    #[tokio::test]
    async fn chat_list_is_empty_for_a_user_with_no_chats() {
        let service = service(true, FakeChatRepo::empty());

        let chats = service.get_chat_list(Uuid::new_v4()).await.unwrap();

        assert!(chats.is_empty());
    }
}
