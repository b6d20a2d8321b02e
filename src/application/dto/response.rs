//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;
use uuid::Uuid;

use crate::application::services::{ChatDto, MessageDto};

/// Response carrying the id of a newly created entity
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

/// Chat entry in a chat-list response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub id: Uuid,
    pub name: String,
    pub users: Vec<Uuid>,

    /// Activity timestamp (RFC 3339): latest message time, or the chat's
    /// creation time while it has no messages
    pub created_at: String,
}

impl From<ChatDto> for ChatResponse {
    fn from(dto: ChatDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            users: dto.users,
            created_at: dto.created_at.to_rfc3339(),
        }
    }
}

/// Chat list response
#[derive(Debug, Serialize)]
pub struct ChatListResponse {
    pub chats: Vec<ChatResponse>,
}

/// Message entry in a message-list response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub chat: Uuid,
    pub author: Uuid,
    pub text: String,
    pub created_at: String,
}

impl From<MessageDto> for MessageResponse {
    fn from(dto: MessageDto) -> Self {
        Self {
            id: dto.id,
            chat: dto.chat_id,
            author: dto.author_id,
            text: dto.text,
            created_at: dto.created_at.to_rfc3339(),
        }
    }
}

/// Message list response
#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageResponse>,
}
