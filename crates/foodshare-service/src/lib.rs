//! # foodshare-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;
pub mod storage;

pub use dto::{
    AuthResponse, ConversationResponse, CreateListingRequest, CurrentUserResponse,
    HealthResponse, ListingFilters, ListingResponse, LoginRequest, MessageResponse,
    QuantityResponse, ReadinessResponse, SendMessageRequest, SignupRequest,
    UpdateListingRequest, UpdateSettingsRequest,
};
pub use services::{
    AuthService, ListingService, MessagingService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UserService,
};
pub use storage::{ImageStore, ImageUpload};
