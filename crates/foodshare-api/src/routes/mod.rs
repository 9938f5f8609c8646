//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.
//! Uploaded listing images are served statically under /uploads.

use std::path::Path;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers::{auth, chat, health, listings, messages, users};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router(upload_dir: &Path) -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
        // Health endpoints live outside the versioned prefix
        .merge(health_routes())
        // Static serving of uploaded listing images
        .nest_service("/uploads", ServeDir::new(upload_dir))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(listing_routes())
        .merge(messaging_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
}

/// Current-user routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(users::get_current_user))
        .route("/user/settings", put(users::update_settings))
}

/// Listing routes
fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/listings", get(listings::search_listings))
        .route("/listings", post(listings::create_listing))
        .route("/listings/:listing_id", put(listings::update_listing))
        .route("/listings/:listing_id", delete(listings::delete_listing))
}

/// Messaging routes
fn messaging_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", get(messages::get_messages))
        .route("/chat", get(chat::get_chat))
        .route("/chat", post(chat::post_chat))
        .route("/conversations", get(chat::get_conversations))
}
