//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **UserService**: user registration
//! - **ChatService**: chat creation and per-user chat listings
//! - **MessageService**: sending messages and per-chat message listings
//!
//! Every operation returns either a value or one `AppError` kind: a
//! `Validation` fault for malformed input, a `Conflict` fault for a violated
//! business precondition, or an internal fault when the store fails.

pub mod chat_service;
pub mod message_service;
pub mod user_service;

// Re-export user service types
pub use user_service::{UserService, UserServiceImpl};

// Re-export chat service types
pub use chat_service::{ChatDto, ChatService, ChatServiceImpl};

// Re-export message service types
pub use message_service::{MessageDto, MessageService, MessageServiceImpl};
