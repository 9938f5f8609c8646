//! Domain entities

mod conversation;
mod listing;
mod message;
mod user;

pub use conversation::{Conversation, ConversationSummary};
pub use listing::{FoodListing, ListingWithPoster};
pub use message::{Message, MessageWithNames};
pub use user::User;
