//! Handlers for Zai conversations.
//!
//! A conversation opens with a starter message; each user message gets
//! exactly one completion attempt, and a failed attempt appends the
//! canned apology instead of surfacing an error.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use serde::{Deserialize, Serialize};

use zerozero_core::chat::{ChatMessage, ChatRole, MAX_HISTORY_TURNS};
use zerozero_core::error::CoreError;
use zerozero_core::pagination::{clamp_limit, clamp_offset};
use zerozero_core::types::DbId;
use zerozero_db::models::conversation::{Conversation, ConversationMessage};
use zerozero_db::repositories::ConversationRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::profiles::ensure_profile_exists;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Inbound user message.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

/// A new conversation plus its opening assistant message.
#[derive(Debug, Serialize)]
pub struct OpenConversationResponse {
    pub conversation: Conversation,
    pub starter: ConversationMessage,
    /// True when the starter came from the local fallback.
    pub degraded: bool,
}

/// The assistant's reply to one user message.
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub reply: ConversationMessage,
    /// True when the reply is the canned apology.
    pub degraded: bool,
}

/// Pagination parameters for listing messages.
#[derive(Debug, Deserialize)]
pub struct ListMessagesParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a conversation exists, returning the full row.
async fn ensure_conversation_exists(
    pool: &sqlx::PgPool,
    id: DbId,
) -> AppResult<Conversation> {
    ConversationRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Conversation",
            id,
        })
    })
}

// ---------------------------------------------------------------------------
// POST /profiles/{id}/conversations
// ---------------------------------------------------------------------------

/// Open a conversation for a profile and fetch its starter message.
pub async fn open_conversation(
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let profile = ensure_profile_exists(&state.pool, profile_id).await?;
    let lifestyle = profile.lifestyle()?;

    let conversation = ConversationRepo::create(&state.pool, profile_id).await?;
    let outcome = state.chat_bridge.starter(&lifestyle).await;

    let starter = ConversationRepo::append_message(
        &state.pool,
        conversation.id,
        outcome.reply.role.as_str(),
        &outcome.reply.content,
    )
    .await?;

    tracing::info!(
        conversation_id = conversation.id,
        profile_id,
        degraded = outcome.degraded,
        "Conversation opened"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: OpenConversationResponse {
                conversation,
                starter,
                degraded: outcome.degraded,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// POST /conversations/{id}/messages
// ---------------------------------------------------------------------------

/// Send one user message and relay the assistant's reply.
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<SendMessageRequest>,
) -> AppResult<impl IntoResponse> {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message must not be empty".to_string(),
        )));
    }

    let conversation = ensure_conversation_exists(&state.pool, id).await?;
    let profile = ensure_profile_exists(&state.pool, conversation.profile_id).await?;
    let lifestyle = profile.lifestyle()?;

    // Recent turns become the completion history.
    let rows =
        ConversationRepo::recent_messages(&state.pool, id, MAX_HISTORY_TURNS as i64).await?;
    let mut history = Vec::with_capacity(rows.len());
    for row in &rows {
        history.push(ChatMessage {
            role: ChatRole::from_str_db(&row.role)?,
            content: row.content.clone(),
        });
    }

    let outcome = state.chat_bridge.send(&lifestyle, &history, message).await;

    ConversationRepo::append_message(&state.pool, id, ChatRole::User.as_str(), message).await?;
    let reply = ConversationRepo::append_message(
        &state.pool,
        id,
        outcome.reply.role.as_str(),
        &outcome.reply.content,
    )
    .await?;

    tracing::info!(
        conversation_id = id,
        degraded = outcome.degraded,
        "Chat message exchanged"
    );

    Ok(Json(DataResponse {
        data: SendMessageResponse {
            reply,
            degraded: outcome.degraded,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /conversations/{id}/messages
// ---------------------------------------------------------------------------

/// List a conversation's messages in chronological order.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ListMessagesParams>,
) -> AppResult<impl IntoResponse> {
    ensure_conversation_exists(&state.pool, id).await?;

    let limit = clamp_limit(params.limit, 50, 200);
    let offset = clamp_offset(params.offset);

    let messages = ConversationRepo::list_messages(&state.pool, id, limit, offset).await?;
    Ok(Json(DataResponse { data: messages }))
}
