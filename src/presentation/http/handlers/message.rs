//! Message Handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::application::dto::request::{MessageListRequest, SendMessageRequest};
use crate::application::dto::response::{CreatedResponse, MessageListResponse, MessageResponse};
use crate::application::services::{MessageService, MessageServiceImpl};
use crate::infrastructure::database::PgUnitOfWork;
use crate::infrastructure::repositories::{PgChatRepository, PgMessageRepository};
use crate::shared::error::AppError;
use crate::startup::AppState;

fn message_service(
    state: &AppState,
) -> MessageServiceImpl<PgMessageRepository, PgChatRepository, PgUnitOfWork> {
    let message_repo = Arc::new(PgMessageRepository::new(state.db.clone()));
    let chat_repo = Arc::new(PgChatRepository::new(state.db.clone()));
    let uow = Arc::new(PgUnitOfWork::new(state.db.clone()));

    MessageServiceImpl::new(message_repo, chat_repo, uow)
}

/// Send a message on behalf of a chat member
pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<CreatedResponse>, AppError> {
    let service = message_service(&state);

    let id = service
        .send_message(body.chat, body.author, &body.text)
        .await?;

    Ok(Json(CreatedResponse { id }))
}

/// List a chat's messages, oldest first
pub async fn get_message_list(
    State(state): State<AppState>,
    Json(body): Json<MessageListRequest>,
) -> Result<Json<MessageListResponse>, AppError> {
    let service = message_service(&state);

    let messages = service.get_message_list(body.chat).await?;

    Ok(Json(MessageListResponse {
        messages: messages.into_iter().map(MessageResponse::from).collect(),
    }))
}
