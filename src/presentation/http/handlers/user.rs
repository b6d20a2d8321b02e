//! User Handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::application::dto::request::CreateUserRequest;
use crate::application::dto::response::CreatedResponse;
use crate::application::services::{UserService, UserServiceImpl};
use crate::infrastructure::database::PgUnitOfWork;
use crate::infrastructure::repositories::PgUserRepository;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Register a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<Json<CreatedResponse>, AppError> {
    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let uow = Arc::new(PgUnitOfWork::new(state.db.clone()));
    let service = UserServiceImpl::new(user_repo, uow);

    let id = service.create_user(&body.username).await?;

    Ok(Json(CreatedResponse { id }))
}
