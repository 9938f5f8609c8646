//! Conversation entity - a two-party message thread

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A persistent two-participant thread, optionally anchored to a listing.
///
/// The participant pair is stored canonically sorted (`participant_low <=
/// participant_high`) so the unordered pair maps to exactly one row; the
/// store enforces uniqueness on that sorted pair. Conversations have no
/// status field - they are open from creation onward.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: Snowflake,
    pub participant_low: Snowflake,
    pub participant_high: Snowflake,
    pub listing_id: Option<Snowflake>,
    /// Denormalized preview of the most recent message
    pub last_message_content: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Build a new conversation for an unordered participant pair
    pub fn new(
        id: Snowflake,
        user_a: Snowflake,
        user_b: Snowflake,
        listing_id: Option<Snowflake>,
    ) -> Self {
        let (participant_low, participant_high) = Snowflake::ordered_pair(user_a, user_b);
        let now = Utc::now();
        Self {
            id,
            participant_low,
            participant_high,
            listing_id,
            last_message_content: None,
            last_message_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_participant(&self, user_id: Snowflake) -> bool {
        self.participant_low == user_id || self.participant_high == user_id
    }

    /// The other party, if `user_id` participates at all
    pub fn counterpart_of(&self, user_id: Snowflake) -> Option<Snowflake> {
        if user_id == self.participant_low {
            Some(self.participant_high)
        } else if user_id == self.participant_high {
            Some(self.participant_low)
        } else {
            None
        }
    }

    /// Record a newly posted message in the denormalized preview fields
    pub fn record_message(&mut self, content: &str, at: DateTime<Utc>) {
        self.last_message_content = Some(content.to_string());
        self.last_message_at = Some(at);
        self.updated_at = at;
    }
}

/// Inbox-style projection: one entry per counterpart, newest thread first
#[derive(Debug, Clone)]
pub struct ConversationSummary {
    pub conversation: Conversation,
    pub counterpart_id: Snowflake,
    pub counterpart_name: String,
}
