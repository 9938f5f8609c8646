//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User signup request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: String,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update account settings request
///
/// Every change re-verifies the caller's current password.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    pub current_password: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: Option<String>,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,
}

// ============================================================================
// Listing Requests
// ============================================================================

/// Create listing request (the field part of the multipart submission;
/// images arrive separately)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateListingRequest {
    #[validate(length(min = 1, max = 255, message = "Food type must be 1-255 characters"))]
    pub food_type: String,

    #[validate(length(min = 1, max = 2000, message = "Description must be 1-2000 characters"))]
    pub description: String,

    #[validate(range(min = 0.001, message = "Quantity must be positive"))]
    pub quantity_value: f64,

    /// Unit symbol: g, kg, ml or l (case-insensitive)
    pub quantity_unit: String,

    pub expiration: DateTime<Utc>,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: String,
}

/// Update listing request; `keep_images` lists the existing image URLs to
/// retain, new uploads come on top of that subset
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateListingRequest {
    #[validate(length(min = 1, max = 255, message = "Food type must be 1-255 characters"))]
    pub food_type: String,

    #[validate(length(min = 1, max = 2000, message = "Description must be 1-2000 characters"))]
    pub description: String,

    #[validate(range(min = 0.001, message = "Quantity must be positive"))]
    pub quantity_value: f64,

    pub quantity_unit: String,

    pub expiration: DateTime<Utc>,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: String,

    #[serde(default)]
    pub keep_images: Vec<String>,
}

/// Listing search filters, straight from the query string.
///
/// `quantity` is a raw JSON string (`{"value": 1500, "unit": "g"}`);
/// malformed input drops the filter rather than erroring.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingFilters {
    pub search: Option<String>,
    pub location: Option<String>,
    /// Calendar day in `YYYY-MM-DD`
    pub date_posted: Option<String>,
    pub quantity: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub posted_by: Option<String>,
}

// ============================================================================
// Messaging Requests
// ============================================================================

/// Post a message.
///
/// Addressed either by `conversation_id`, or by `recipient_id` (with an
/// optional `listing_id`), in which case the conversation is created on
/// first contact.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// Conversation ID (Snowflake as string)
    pub conversation_id: Option<String>,

    /// Counterpart user ID (Snowflake as string)
    pub recipient_id: Option<String>,

    /// Listing the conversation is about, if any
    pub listing_id: Option<String>,

    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub content: String,
}
