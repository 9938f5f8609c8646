//! Entity to model mappers
//!
//! This module provides conversions between domain entities (foodshare-core)
//! and database models.
//! - `From<Model>`/`TryFrom<Model>` impls: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod conversation;
mod listing;
mod message;
mod user;

pub use listing::ListingInsert;
pub use user::UserInsert;
