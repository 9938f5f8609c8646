//! Data Transfer Objects
//!
//! Request DTOs (deserialized + validated input) and response DTOs
//! (serialized output), plus entity-to-response mappers.

mod mappers;
mod requests;
mod responses;

pub use requests::{
    CreateListingRequest, ListingFilters, LoginRequest, SendMessageRequest, SignupRequest,
    UpdateListingRequest, UpdateSettingsRequest,
};
pub use responses::{
    AuthResponse, ConversationResponse, CurrentUserResponse, HealthChecks, HealthResponse,
    ListingResponse, MessageResponse, QuantityResponse, ReadinessResponse,
};
