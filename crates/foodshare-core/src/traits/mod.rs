//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ConversationRepository, ListingRepository, MessageRepository, RepoResult, UserRepository,
};
