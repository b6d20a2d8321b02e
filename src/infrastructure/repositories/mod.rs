//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits.
//!
//! Each repository owns the SQL shape of the queries against its table(s):
//!
//! - **PgUserRepository** — `users`
//! - **PgChatRepository** — `chats` and `chats_users`
//! - **PgMessageRepository** — `messages`
//!
//! Reads run directly on the pool; writes take the connection handle of the
//! transaction opened by the calling service.

pub mod chat_repository;
pub mod message_repository;
pub mod user_repository;

pub use chat_repository::PgChatRepository;
pub use message_repository::PgMessageRepository;
pub use user_repository::PgUserRepository;
