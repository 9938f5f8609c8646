//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! foodshare-core. Each repository handles database operations for a
//! specific domain entity.

mod conversation;
mod error;
mod listing;
mod message;
mod user;

pub use conversation::PgConversationRepository;
pub use listing::PgListingRepository;
pub use message::PgMessageRepository;
pub use user::PgUserRepository;
