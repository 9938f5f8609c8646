//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use foodshare_core::entities::{
    ConversationSummary, FoodListing, ListingWithPoster, Message, MessageWithNames, User,
};

use super::responses::{
    ConversationResponse, CurrentUserResponse, ListingResponse, MessageResponse, QuantityResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            location: user.location.clone(),
            phone: user.phone.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Listing Mappers
// ============================================================================

fn listing_response(listing: &FoodListing, poster_name: String) -> ListingResponse {
    ListingResponse {
        id: listing.id.to_string(),
        creator_id: listing.creator_id.to_string(),
        poster_name,
        food_type: listing.food_type.clone(),
        description: listing.description.clone(),
        quantity: QuantityResponse {
            value: listing.quantity.value,
            unit: listing.quantity.unit.symbol(),
        },
        expiration: listing.expiration,
        location: listing.location.clone(),
        images: listing.images.clone(),
        created_at: listing.created_at,
        updated_at: listing.updated_at,
    }
}

impl From<&ListingWithPoster> for ListingResponse {
    fn from(decorated: &ListingWithPoster) -> Self {
        listing_response(&decorated.listing, decorated.poster_name.clone())
    }
}

impl From<ListingWithPoster> for ListingResponse {
    fn from(decorated: ListingWithPoster) -> Self {
        Self::from(&decorated)
    }
}

impl ListingResponse {
    /// Build from a bare listing plus an already-known poster name
    pub fn with_poster(listing: &FoodListing, poster_name: impl Into<String>) -> Self {
        listing_response(listing, poster_name.into())
    }
}

// ============================================================================
// Messaging Mappers
// ============================================================================

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            conversation_id: message.conversation_id.to_string(),
            sender_id: message.sender_id.to_string(),
            sender_name: None,
            recipient_id: message.recipient_id.to_string(),
            recipient_name: None,
            content: message.content.clone(),
            read: message.read,
            created_at: message.created_at,
        }
    }
}

impl From<&MessageWithNames> for MessageResponse {
    fn from(decorated: &MessageWithNames) -> Self {
        Self {
            sender_name: Some(decorated.sender_name.clone()),
            recipient_name: Some(decorated.recipient_name.clone()),
            ..Self::from(&decorated.message)
        }
    }
}

impl From<MessageWithNames> for MessageResponse {
    fn from(decorated: MessageWithNames) -> Self {
        Self::from(&decorated)
    }
}

impl From<&ConversationSummary> for ConversationResponse {
    fn from(summary: &ConversationSummary) -> Self {
        Self {
            id: summary.conversation.id.to_string(),
            counterpart_id: summary.counterpart_id.to_string(),
            counterpart_name: summary.counterpart_name.clone(),
            listing_id: summary.conversation.listing_id.map(|id| id.to_string()),
            last_message: summary.conversation.last_message_content.clone(),
            last_message_at: summary.conversation.last_message_at,
            created_at: summary.conversation.created_at,
        }
    }
}

impl From<ConversationSummary> for ConversationResponse {
    fn from(summary: ConversationSummary) -> Self {
        Self::from(&summary)
    }
}
