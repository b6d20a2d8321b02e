//! User Service
//!
//! Validates and registers user accounts.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::domain::UserRepository;
use crate::infrastructure::database::UnitOfWork;
use crate::shared::error::AppError;

/// Usernames are latin letters, digits and underscore only.
static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Za-z0-9_]+$").expect("username pattern"));

/// Minimum username length in characters.
const MIN_USERNAME_LEN: usize = 3;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a new user, returning its id.
    async fn create_user(&self, username: &str) -> Result<Uuid, AppError>;
}

/// UserService implementation
pub struct UserServiceImpl<U, W>
where
    U: UserRepository,
    W: UnitOfWork,
{
    user_repo: Arc<U>,
    uow: Arc<W>,
}

impl<U, W> UserServiceImpl<U, W>
where
    U: UserRepository,
    W: UnitOfWork,
{
    pub fn new(user_repo: Arc<U>, uow: Arc<W>) -> Self {
        Self { user_repo, uow }
    }
}

#[async_trait]
impl<U, W> UserService for UserServiceImpl<U, W>
where
    U: UserRepository + 'static,
    W: UnitOfWork + 'static,
{
    async fn create_user(&self, username: &str) -> Result<Uuid, AppError> {
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(AppError::Validation(
                "username must contain at least 3 characters".into(),
            ));
        }

        if !USERNAME_PATTERN.is_match(username) {
            return Err(AppError::Validation(
                "username may contain only latin letters, digits and '_'".into(),
            ));
        }

        if self.user_repo.username_exists(username).await? {
            return Err(AppError::Conflict("user already exists".into()));
        }

        let mut tx = self.uow.begin().await?;

        let user = match self.user_repo.create(tx.as_mut(), username).await {
            Ok(user) => user,
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!("rollback failed: {}", rollback_err);
                }
                return Err(e);
            }
        };

        tx.commit().await?;

        tracing::info!(user_id = %user.id, username, "user created");
        Ok(user.id)
    }
}
