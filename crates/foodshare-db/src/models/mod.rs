//! Database models with SQLx `FromRow` derives

mod conversation;
mod listing;
mod message;
mod user;

pub use conversation::{ConversationModel, ConversationSummaryModel};
pub use listing::{ListingModel, ListingWithPosterModel};
pub use message::{MessageModel, MessageWithNamesModel};
pub use user::UserModel;
