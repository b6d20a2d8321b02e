//! Chat Handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::application::dto::request::{ChatListRequest, CreateChatRequest};
use crate::application::dto::response::{ChatListResponse, ChatResponse, CreatedResponse};
use crate::application::services::{ChatService, ChatServiceImpl};
use crate::infrastructure::database::PgUnitOfWork;
use crate::infrastructure::repositories::{PgChatRepository, PgUserRepository};
use crate::shared::error::AppError;
use crate::startup::AppState;

fn chat_service(
    state: &AppState,
) -> ChatServiceImpl<PgUserRepository, PgChatRepository, PgUnitOfWork> {
    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let chat_repo = Arc::new(PgChatRepository::new(state.db.clone()));
    let uow = Arc::new(PgUnitOfWork::new(state.db.clone()));

    ChatServiceImpl::new(user_repo, chat_repo, uow)
}

/// Create a chat between users
pub async fn create_chat(
    State(state): State<AppState>,
    Json(body): Json<CreateChatRequest>,
) -> Result<Json<CreatedResponse>, AppError> {
    let service = chat_service(&state);

    let id = service.create_chat(&body.name, &body.users).await?;

    Ok(Json(CreatedResponse { id }))
}

/// List a user's chats, most recently active first
pub async fn get_chat_list(
    State(state): State<AppState>,
    Json(body): Json<ChatListRequest>,
) -> Result<Json<ChatListResponse>, AppError> {
    let service = chat_service(&state);

    let chats = service.get_chat_list(body.user).await?;

    Ok(Json(ChatListResponse {
        chats: chats.into_iter().map(ChatResponse::from).collect(),
    }))
}
