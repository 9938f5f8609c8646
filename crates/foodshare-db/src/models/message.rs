//! Message database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Message row joined with both parties' display names
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithNamesModel {
    #[sqlx(flatten)]
    pub message: MessageModel,
    pub sender_name: String,
    pub recipient_name: String,
}
