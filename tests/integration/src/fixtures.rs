//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use chrono::{Duration, Utc};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Signup request
#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl SignupRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test User {suffix}"),
            email: format!("test{suffix}@example.com"),
            password: "TestPass123!".to_string(),
            location: "Springfield".to_string(),
            phone: None,
        }
    }

    pub fn unique_named(name: &str) -> Self {
        let mut request = Self::unique();
        request.name = name.to_string();
        request
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_signup(signup: &SignupRequest) -> Self {
        Self {
            email: signup.email.clone(),
            password: signup.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Current user response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub location: String,
    pub phone: Option<String>,
    pub created_at: String,
}

/// Listing form builder for multipart submissions
#[derive(Debug, Clone)]
pub struct ListingForm {
    pub food_type: String,
    pub description: String,
    pub quantity_value: f64,
    pub quantity_unit: String,
    pub expiration: String,
    pub location: String,
}

impl ListingForm {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            food_type: format!("Sourdough bread {suffix}"),
            description: "Baked this morning, more than we can eat".to_string(),
            quantity_value: 500.0,
            quantity_unit: "g".to_string(),
            expiration: (Utc::now() + Duration::days(3)).to_rfc3339(),
            location: "Springfield".to_string(),
        }
    }

    pub fn with_quantity(mut self, value: f64, unit: &str) -> Self {
        self.quantity_value = value;
        self.quantity_unit = unit.to_string();
        self
    }

    pub fn with_food_type(mut self, food_type: &str) -> Self {
        self.food_type = food_type.to_string();
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    pub fn with_expiration(mut self, expiration: chrono::DateTime<Utc>) -> Self {
        self.expiration = expiration.to_rfc3339();
        self
    }

    /// Build a multipart form, attaching `image_count` fake PNG uploads
    pub fn into_form(self, image_count: usize) -> Form {
        let mut form = Form::new()
            .text("food_type", self.food_type)
            .text("description", self.description)
            .text("quantity_value", self.quantity_value.to_string())
            .text("quantity_unit", self.quantity_unit)
            .text("expiration", self.expiration)
            .text("location", self.location);

        for i in 0..image_count {
            form = form.part("images", fake_png_part(i));
        }

        form
    }
}

/// A minimal PNG-ish payload; the server stores bytes without sniffing
pub fn fake_png_part(index: usize) -> Part {
    Part::bytes(vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00])
        .file_name(format!("photo{index}.png"))
        .mime_str("image/png")
        .expect("valid mime")
}

/// Listing response
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    pub id: String,
    pub creator_id: String,
    pub poster_name: String,
    pub food_type: String,
    pub description: String,
    pub quantity: QuantityResponse,
    pub expiration: String,
    pub location: String,
    pub images: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Quantity response
#[derive(Debug, Deserialize)]
pub struct QuantityResponse {
    pub value: f64,
    pub unit: String,
}

/// Send message request, addressed by conversation or by recipient
#[derive(Debug, Serialize)]
pub struct SendMessageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<String>,
    pub content: String,
}

impl SendMessageRequest {
    pub fn to_conversation(conversation_id: &str, content: &str) -> Self {
        Self {
            conversation_id: Some(conversation_id.to_string()),
            recipient_id: None,
            listing_id: None,
            content: content.to_string(),
        }
    }

    pub fn to_recipient(recipient_id: &str, listing_id: Option<&str>, content: &str) -> Self {
        Self {
            conversation_id: None,
            recipient_id: Some(recipient_id.to_string()),
            listing_id: listing_id.map(ToString::to_string),
            content: content.to_string(),
        }
    }
}

/// Message response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub sender_name: Option<String>,
    pub recipient_id: String,
    pub recipient_name: Option<String>,
    pub content: String,
    pub read: bool,
    pub created_at: String,
}

/// Chat thread response
#[derive(Debug, Deserialize)]
pub struct ChatThreadResponse {
    pub conversation_id: String,
    pub messages: Vec<MessageResponse>,
}

/// Conversation overview entry
#[derive(Debug, Deserialize)]
pub struct ConversationResponse {
    pub id: String,
    pub counterpart_id: String,
    pub counterpart_name: String,
    pub listing_id: Option<String>,
    pub last_message: Option<String>,
    pub last_message_at: Option<String>,
    pub created_at: String,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
