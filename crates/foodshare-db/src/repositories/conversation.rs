//! PostgreSQL implementation of ConversationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use foodshare_core::entities::{Conversation, ConversationSummary};
use foodshare_core::traits::{ConversationRepository, RepoResult};
use foodshare_core::value_objects::Snowflake;

use crate::models::{ConversationModel, ConversationSummaryModel};

use super::error::map_db_error;

/// PostgreSQL implementation of ConversationRepository
#[derive(Clone)]
pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    /// Create a new PgConversationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, participant_low, participant_high, listing_id,
                   last_message_content, last_message_at, created_at, updated_at
            FROM conversations
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    /// Race-free get-or-create keyed on the unique sorted participant pair.
    ///
    /// The no-op `DO UPDATE` makes a conflicting insert return the existing
    /// row, so two concurrent first-contact requests both land on one
    /// conversation and neither fails.
    #[instrument(skip(self, candidate))]
    async fn get_or_create(&self, candidate: &Conversation) -> RepoResult<Conversation> {
        let result = sqlx::query_as::<_, ConversationModel>(
            r"
            INSERT INTO conversations
                (id, participant_low, participant_high, listing_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (participant_low, participant_high)
                DO UPDATE SET participant_low = EXCLUDED.participant_low
            RETURNING id, participant_low, participant_high, listing_id,
                      last_message_content, last_message_at, created_at, updated_at
            ",
        )
        .bind(candidate.id.into_inner())
        .bind(candidate.participant_low.into_inner())
        .bind(candidate.participant_high.into_inner())
        .bind(candidate.listing_id.map(|s| s.into_inner()))
        .bind(candidate.created_at)
        .bind(candidate.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Conversation::from(result))
    }

    #[instrument(skip(self))]
    async fn summaries_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<ConversationSummary>> {
        // Threads without any message yet are not part of the overview
        let rows = sqlx::query_as::<_, ConversationSummaryModel>(
            r"
            SELECT c.id, c.participant_low, c.participant_high, c.listing_id,
                   c.last_message_content, c.last_message_at, c.created_at, c.updated_at,
                   u.id AS counterpart_id, u.name AS counterpart_name
            FROM conversations c
            JOIN users u
              ON u.id = CASE WHEN c.participant_low = $1
                             THEN c.participant_high
                             ELSE c.participant_low END
            WHERE (c.participant_low = $1 OR c.participant_high = $1)
              AND c.last_message_at IS NOT NULL
            ORDER BY c.last_message_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ConversationSummary::from).collect())
    }
}
