//! Route definitions for Zai conversations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Chat routes: conversation lifecycle and messages.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profiles/{id}/conversations",
            post(chat::open_conversation),
        )
        .route(
            "/conversations/{id}/messages",
            get(chat::list_messages).post(chat::send_message),
        )
}
