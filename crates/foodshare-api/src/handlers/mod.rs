//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod chat;
pub mod health;
pub mod listings;
pub mod messages;
pub mod users;
