//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and exposes the
//! use cases of one domain area.

mod auth;
mod context;
mod error;
mod listing;
mod messaging;
mod user;

pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use listing::ListingService;
pub use messaging::MessagingService;
pub use user::UserService;
