//! Request DTOs
//!
//! Data structures for API request bodies. Validation of the contained
//! values is owned by the domain services.

use serde::Deserialize;
use uuid::Uuid;

/// Create user request
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
}

/// Create chat request
#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    pub name: String,
    pub users: Vec<Uuid>,
}

/// Send message request
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub chat: Uuid,
    pub author: Uuid,
    pub text: String,
}

/// Chat list request
#[derive(Debug, Deserialize)]
pub struct ChatListRequest {
    pub user: Uuid,
}

/// Message list request
#[derive(Debug, Deserialize)]
pub struct MessageListRequest {
    pub chat: Uuid,
}
