//! Messaging service
//!
//! Conversations are two-party threads, optionally anchored to a listing.
//! Opening one is an atomic get-or-create on the unordered participant pair;
//! inbox, outbox and the conversation overview are projections over the
//! stored messages.

use foodshare_core::entities::{Conversation, Message};
use foodshare_core::error::DomainError;
use foodshare_core::Snowflake;
use tracing::{debug, info, instrument};

use crate::dto::{ConversationResponse, MessageResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Messaging service
pub struct MessagingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessagingService<'a> {
    /// Create a new MessagingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get or create the conversation between the caller and a counterpart.
    ///
    /// Rejected when the caller addresses themselves, and when the
    /// conversation targets a listing the caller posted (self-messaging
    /// guard). Concurrent first-contact calls land on the same row.
    #[instrument(skip(self))]
    pub async fn get_or_create_conversation(
        &self,
        user_id: Snowflake,
        recipient_id: Snowflake,
        listing_id: Option<Snowflake>,
    ) -> ServiceResult<Conversation> {
        if user_id == recipient_id {
            return Err(DomainError::SelfConversation.into());
        }

        self.ctx
            .user_repo()
            .find_by_id(recipient_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", recipient_id.to_string()))?;

        if let Some(listing_id) = listing_id {
            let listing = self
                .ctx
                .listing_repo()
                .find_by_id(listing_id)
                .await?
                .ok_or(DomainError::ListingNotFound(listing_id))?;

            if listing.is_owned_by(user_id) {
                return Err(DomainError::OwnListingConversation.into());
            }
        }

        let candidate = Conversation::new(self.ctx.generate_id(), user_id, recipient_id, listing_id);
        let conversation = self.ctx.conversation_repo().get_or_create(&candidate).await?;

        if conversation.id == candidate.id {
            info!(conversation_id = %conversation.id, "Conversation created");
        } else {
            debug!(conversation_id = %conversation.id, "Existing conversation reused");
        }

        Ok(conversation)
    }

    /// Post a message into a conversation the caller participates in.
    ///
    /// The message row and the conversation's last-message preview are
    /// written in one transaction.
    #[instrument(skip(self, content))]
    pub async fn post_message(
        &self,
        sender_id: Snowflake,
        conversation_id: Snowflake,
        content: String,
    ) -> ServiceResult<MessageResponse> {
        let conversation = self
            .ctx
            .conversation_repo()
            .find_by_id(conversation_id)
            .await?
            .ok_or(DomainError::ConversationNotFound(conversation_id))?;

        let recipient_id = conversation
            .counterpart_of(sender_id)
            .ok_or(DomainError::NotParticipant)?;

        let message = Message::new(
            self.ctx.generate_id(),
            conversation_id,
            sender_id,
            recipient_id,
            content,
        );

        self.ctx.message_repo().append(&message).await?;

        info!(message_id = %message.id, conversation_id = %conversation_id, "Message posted");

        Ok(MessageResponse::from(&message))
    }

    /// Messages received by the caller, newest first
    #[instrument(skip(self))]
    pub async fn inbox(&self, user_id: Snowflake) -> ServiceResult<Vec<MessageResponse>> {
        let messages = self.ctx.message_repo().inbox(user_id).await?;
        Ok(messages.iter().map(MessageResponse::from).collect())
    }

    /// Messages sent by the caller, newest first
    #[instrument(skip(self))]
    pub async fn outbox(&self, user_id: Snowflake) -> ServiceResult<Vec<MessageResponse>> {
        let messages = self.ctx.message_repo().outbox(user_id).await?;
        Ok(messages.iter().map(MessageResponse::from).collect())
    }

    /// One overview entry per counterpart the caller has exchanged messages
    /// with, newest thread first
    #[instrument(skip(self))]
    pub async fn conversations(&self, user_id: Snowflake) -> ServiceResult<Vec<ConversationResponse>> {
        let summaries = self.ctx.conversation_repo().summaries_for_user(user_id).await?;
        Ok(summaries.iter().map(ConversationResponse::from).collect())
    }

    /// All messages of one conversation, chronological ascending.
    ///
    /// Only participants may read; everyone else gets the same not-found
    /// outcome as a missing conversation. Fetching marks the caller's
    /// incoming messages read.
    #[instrument(skip(self))]
    pub async fn messages_for_conversation(
        &self,
        user_id: Snowflake,
        conversation_id: Snowflake,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let conversation = self
            .ctx
            .conversation_repo()
            .find_by_id(conversation_id)
            .await?
            .filter(|c| c.has_participant(user_id))
            .ok_or(DomainError::NotFoundOrForbidden("Conversation"))?;

        let messages = self
            .ctx
            .message_repo()
            .for_conversation(conversation.id)
            .await?;

        let marked = self
            .ctx
            .message_repo()
            .mark_read(conversation.id, user_id)
            .await?;
        if marked > 0 {
            debug!(conversation_id = %conversation.id, marked, "Marked incoming messages read");
        }

        Ok(messages.iter().map(MessageResponse::from).collect())
    }

    /// Messages of the caller's conversations anchored to one listing,
    /// chronological ascending
    #[instrument(skip(self))]
    pub async fn messages_for_listing(
        &self,
        user_id: Snowflake,
        listing_id: Snowflake,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let messages = self
            .ctx
            .message_repo()
            .for_listing(listing_id, user_id)
            .await?;
        Ok(messages.iter().map(MessageResponse::from).collect())
    }
}
