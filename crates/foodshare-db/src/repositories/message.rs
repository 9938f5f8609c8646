//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use foodshare_core::entities::{Message, MessageWithNames};
use foodshare_core::traits::{MessageRepository, RepoResult};
use foodshare_core::value_objects::Snowflake;

use crate::models::{MessageModel, MessageWithNamesModel};

use super::error::map_db_error;

const MESSAGE_COLUMNS: &str =
    "m.id, m.conversation_id, m.sender_id, m.recipient_id, m.content, m.read, m.created_at";

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    /// Insert the message and refresh the conversation preview atomically
    #[instrument(skip(self, message))]
    async fn append(&self, message: &Message) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO messages (id, conversation_id, sender_id, recipient_id, content, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(message.id.into_inner())
        .bind(message.conversation_id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(message.recipient_id.into_inner())
        .bind(&message.content)
        .bind(message.read)
        .bind(message.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            UPDATE conversations
            SET last_message_content = $2, last_message_at = $3, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(message.conversation_id.into_inner())
        .bind(&message.content)
        .bind(message.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn inbox(&self, user_id: Snowflake) -> RepoResult<Vec<MessageWithNames>> {
        let rows = sqlx::query_as::<_, MessageWithNamesModel>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}, s.name AS sender_name, r.name AS recipient_name
            FROM messages m
            JOIN users s ON s.id = m.sender_id
            JOIN users r ON r.id = m.recipient_id
            WHERE m.recipient_id = $1
            ORDER BY m.created_at DESC
            "#,
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(MessageWithNames::from).collect())
    }

    #[instrument(skip(self))]
    async fn outbox(&self, user_id: Snowflake) -> RepoResult<Vec<MessageWithNames>> {
        let rows = sqlx::query_as::<_, MessageWithNamesModel>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}, s.name AS sender_name, r.name AS recipient_name
            FROM messages m
            JOIN users s ON s.id = m.sender_id
            JOIN users r ON r.id = m.recipient_id
            WHERE m.sender_id = $1
            ORDER BY m.created_at DESC
            "#,
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(MessageWithNames::from).collect())
    }

    #[instrument(skip(self))]
    async fn for_conversation(&self, conversation_id: Snowflake) -> RepoResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, conversation_id, sender_id, recipient_id, content, read, created_at
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(conversation_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn for_listing(
        &self,
        listing_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Vec<Message>> {
        // Only threads the requester participates in; anchoring alone does
        // not grant access to other people's negotiations.
        let rows = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT m.id, m.conversation_id, m.sender_id, m.recipient_id, m.content, m.read, m.created_at
            FROM messages m
            JOIN conversations c ON c.id = m.conversation_id
            WHERE c.listing_id = $1
              AND (c.participant_low = $2 OR c.participant_high = $2)
            ORDER BY m.created_at ASC
            "#,
        )
        .bind(listing_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn mark_read(
        &self,
        conversation_id: Snowflake,
        recipient_id: Snowflake,
    ) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET read = TRUE
            WHERE conversation_id = $1 AND recipient_id = $2 AND read = FALSE
            "#,
        )
        .bind(conversation_id.into_inner())
        .bind(recipient_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
