//! Conversation database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for conversations table
///
/// The participant pair is stored sorted; a unique index on
/// `(participant_low, participant_high)` makes get-or-create race-free.
#[derive(Debug, Clone, FromRow)]
pub struct ConversationModel {
    pub id: i64,
    pub participant_low: i64,
    pub participant_high: i64,
    pub listing_id: Option<i64>,
    pub last_message_content: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Conversation row joined with the counterpart's identity
#[derive(Debug, Clone, FromRow)]
pub struct ConversationSummaryModel {
    #[sqlx(flatten)]
    pub conversation: ConversationModel,
    pub counterpart_id: i64,
    pub counterpart_name: String,
}
