//! # Domain Entities
//!
//! The three business objects of the messaging system, each mapping to its
//! database table(s):
//!
//! - **User**: a registered account identified by a unique username
//! - **Chat**: a conversation between two or more users, with its membership
//! - **Message**: a text message authored by a chat member
//!
//! Each entity file also declares the repository trait for its table(s).
//! Write operations take the open transaction's connection handle so that
//! dependent writes of one service operation share a single transaction.

mod chat;
mod message;
mod user;

pub use chat::{Chat, ChatRepository, ChatSummary};
pub use message::{Message, MessageRepository};
pub use user::{User, UserRepository};
