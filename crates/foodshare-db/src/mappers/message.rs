//! Message entity <-> model mapper

use foodshare_core::entities::{Message, MessageWithNames};
use foodshare_core::value_objects::Snowflake;

use crate::models::{MessageModel, MessageWithNamesModel};

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            conversation_id: Snowflake::new(model.conversation_id),
            sender_id: Snowflake::new(model.sender_id),
            recipient_id: Snowflake::new(model.recipient_id),
            content: model.content,
            read: model.read,
            created_at: model.created_at,
        }
    }
}

impl From<MessageWithNamesModel> for MessageWithNames {
    fn from(model: MessageWithNamesModel) -> Self {
        MessageWithNames {
            message: Message::from(model.message),
            sender_name: model.sender_name,
            recipient_name: model.recipient_name,
        }
    }
}
