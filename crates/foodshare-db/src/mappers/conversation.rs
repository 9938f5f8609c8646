//! Conversation entity <-> model mapper

use foodshare_core::entities::{Conversation, ConversationSummary};
use foodshare_core::value_objects::Snowflake;

use crate::models::{ConversationModel, ConversationSummaryModel};

impl From<ConversationModel> for Conversation {
    fn from(model: ConversationModel) -> Self {
        Conversation {
            id: Snowflake::new(model.id),
            participant_low: Snowflake::new(model.participant_low),
            participant_high: Snowflake::new(model.participant_high),
            listing_id: model.listing_id.map(Snowflake::new),
            last_message_content: model.last_message_content,
            last_message_at: model.last_message_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ConversationSummaryModel> for ConversationSummary {
    fn from(model: ConversationSummaryModel) -> Self {
        ConversationSummary {
            conversation: Conversation::from(model.conversation),
            counterpart_id: Snowflake::new(model.counterpart_id),
            counterpart_name: model.counterpart_name,
        }
    }
}
