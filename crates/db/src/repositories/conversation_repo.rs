//! Repository for the `zai_conversations` and `zai_messages` tables.

use sqlx::PgPool;

use zerozero_core::types::DbId;

use crate::models::conversation::{Conversation, ConversationMessage};

/// Column list for `zai_conversations` queries.
const CONVERSATION_COLUMNS: &str = "id, profile_id, created_at, updated_at";

/// Column list for `zai_messages` queries.
const MESSAGE_COLUMNS: &str = "id, conversation_id, role, content, created_at";

/// Provides CRUD operations for conversations and their messages.
pub struct ConversationRepo;

impl ConversationRepo {
    /// Open a new conversation for a profile.
    pub async fn create(pool: &PgPool, profile_id: DbId) -> Result<Conversation, sqlx::Error> {
        let query = format!(
            "INSERT INTO zai_conversations (profile_id) VALUES ($1) \
             RETURNING {CONVERSATION_COLUMNS}"
        );
        sqlx::query_as::<_, Conversation>(&query)
            .bind(profile_id)
            .fetch_one(pool)
            .await
    }

    /// Find a conversation by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Conversation>, sqlx::Error> {
        let query = format!("SELECT {CONVERSATION_COLUMNS} FROM zai_conversations WHERE id = $1");
        sqlx::query_as::<_, Conversation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Append a message and touch the conversation's updated_at.
    pub async fn append_message(
        pool: &PgPool,
        conversation_id: DbId,
        role: &str,
        content: &str,
    ) -> Result<ConversationMessage, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert = format!(
            "INSERT INTO zai_messages (conversation_id, role, content) \
             VALUES ($1, $2, $3) \
             RETURNING {MESSAGE_COLUMNS}"
        );
        let message = sqlx::query_as::<_, ConversationMessage>(&insert)
            .bind(conversation_id)
            .bind(role)
            .bind(content)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE zai_conversations SET updated_at = now() WHERE id = $1")
            .bind(conversation_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(message)
    }

    /// List messages for a conversation in chronological order.
    pub async fn list_messages(
        pool: &PgPool,
        conversation_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ConversationMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM zai_messages \
             WHERE conversation_id = $1 \
             ORDER BY id ASC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ConversationMessage>(&query)
            .bind(conversation_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// The most recent messages for a conversation, oldest first.
    ///
    /// Used to build completion-request history without loading the
    /// whole conversation.
    pub async fn recent_messages(
        pool: &PgPool,
        conversation_id: DbId,
        limit: i64,
    ) -> Result<Vec<ConversationMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM ( \
                 SELECT {MESSAGE_COLUMNS} FROM zai_messages \
                 WHERE conversation_id = $1 \
                 ORDER BY id DESC \
                 LIMIT $2 \
             ) recent \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, ConversationMessage>(&query)
            .bind(conversation_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Count messages in a conversation.
    pub async fn count_messages(
        pool: &PgPool,
        conversation_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM zai_messages WHERE conversation_id = $1")
                .bind(conversation_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
