//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/users/add", post(handlers::user::create_user))
        .route("/chats/add", post(handlers::chat::create_chat))
        .route("/chats/get", post(handlers::chat::get_chat_list))
        .route("/messages/add", post(handlers::message::send_message))
        .route("/messages/get", post(handlers::message::get_message_list))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness))
        .with_state(state)
}
