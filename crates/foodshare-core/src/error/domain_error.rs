//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Listing not found: {0}")]
    ListingNotFound(Snowflake),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(Snowflake),

    /// Deliberately conflates "does not exist" with "not yours": callers
    /// must not be able to probe for existence of other users' resources.
    #[error("{0} not found or not authorized")]
    NotFoundOrForbidden(&'static str),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Invalid quantity unit: {0}")]
    InvalidQuantityUnit(String),

    #[error("Too many images: a listing holds at most {max}")]
    TooManyImages { max: usize },

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Cannot open a conversation with yourself")]
    SelfConversation,

    #[error("Cannot message yourself about your own listing")]
    OwnListingConversation,

    #[error("Sender is not a participant of this conversation")]
    NotParticipant,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ListingNotFound(_) => "UNKNOWN_LISTING",
            Self::ConversationNotFound(_) => "UNKNOWN_CONVERSATION",
            Self::NotFoundOrForbidden(_) => "NOT_FOUND",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InvalidQuantityUnit(_) => "INVALID_QUANTITY_UNIT",
            Self::TooManyImages { .. } => "TOO_MANY_IMAGES",

            Self::SelfConversation => "SELF_CONVERSATION",
            Self::OwnListingConversation => "OWN_LISTING_CONVERSATION",
            Self::NotParticipant => "NOT_PARTICIPANT",

            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error (including the conflated
    /// not-found-or-forbidden outcome, which must surface as 404)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ListingNotFound(_)
                | Self::ConversationNotFound(_)
                | Self::NotFoundOrForbidden(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::InvalidQuantityUnit(_)
                | Self::TooManyImages { .. }
                | Self::SelfConversation
                | Self::OwnListingConversation
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotParticipant)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }
}
