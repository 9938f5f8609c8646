//! # foodshare-core
//!
//! Domain layer for the foodshare marketplace: entities, value objects,
//! search criteria, repository traits, and domain errors.

pub mod entities;
pub mod error;
pub mod search;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Conversation, ConversationSummary, FoodListing, ListingWithPoster, Message,
    MessageWithNames, User,
};
pub use error::DomainError;
pub use search::ListingSearch;
pub use traits::{
    ConversationRepository, ListingRepository, MessageRepository, RepoResult, UserRepository,
};
pub use value_objects::{Phase, Quantity, QuantityUnit, Snowflake, SnowflakeGenerator};
