//! Message entity - one entry in a conversation

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A message inside a conversation. The recipient is denormalized so
/// inbox/outbox projections need no pair arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: Snowflake,
    pub conversation_id: Snowflake,
    pub sender_id: Snowflake,
    pub recipient_id: Snowflake,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        id: Snowflake,
        conversation_id: Snowflake,
        sender_id: Snowflake,
        recipient_id: Snowflake,
        content: String,
    ) -> Self {
        Self {
            id,
            conversation_id,
            sender_id,
            recipient_id,
            content,
            read: false,
            created_at: Utc::now(),
        }
    }
}

/// A message decorated with both parties' display names
#[derive(Debug, Clone)]
pub struct MessageWithNames {
    pub message: Message,
    pub sender_name: String,
    pub recipient_name: String,
}
