//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer
//! provides the PostgreSQL implementation.

use async_trait::async_trait;

use crate::entities::{
    Conversation, ConversationSummary, FoodListing, ListingWithPoster, Message, MessageWithNames,
    User,
};
use crate::error::DomainError;
use crate::search::ListingSearch;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Case-insensitive exact-or-partial display-name match, used by the
    /// posted-by search criterion
    async fn find_ids_by_name(&self, name: &str) -> RepoResult<Vec<Snowflake>>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update profile fields (email, phone)
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Listing Repository
// ============================================================================

#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Find listing by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<FoodListing>>;

    /// Translate the criteria into one store query; results are non-expired
    /// only, newest first, decorated with the poster's display name
    async fn search(&self, criteria: &ListingSearch) -> RepoResult<Vec<ListingWithPoster>>;

    /// Create a new listing
    async fn create(&self, listing: &FoodListing) -> RepoResult<()>;

    /// Update a listing iff `owner_id` created it; reports the conflated
    /// not-found-or-forbidden outcome otherwise
    async fn update_owned(&self, listing: &FoodListing, owner_id: Snowflake) -> RepoResult<()>;

    /// Delete a listing iff `owner_id` created it; same conflation as update
    async fn delete_owned(&self, id: Snowflake, owner_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Conversation Repository
// ============================================================================

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Find conversation by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Conversation>>;

    /// Atomic get-or-create keyed on the sorted participant pair.
    ///
    /// `candidate` carries the ID and listing anchor to use when no row for
    /// the pair exists yet. Two concurrent calls for the same pair both
    /// receive the same stored conversation; no duplicate is ever created.
    async fn get_or_create(&self, candidate: &Conversation) -> RepoResult<Conversation>;

    /// One summary per counterpart for threads with at least one message,
    /// newest last message first
    async fn summaries_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<ConversationSummary>>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message and refresh the conversation's denormalized
    /// last-message preview in the same transaction
    async fn append(&self, message: &Message) -> RepoResult<()>;

    /// Messages received by a user, newest first, with party names
    async fn inbox(&self, user_id: Snowflake) -> RepoResult<Vec<MessageWithNames>>;

    /// Messages sent by a user, newest first, with party names
    async fn outbox(&self, user_id: Snowflake) -> RepoResult<Vec<MessageWithNames>>;

    /// All messages of a conversation, chronological ascending
    async fn for_conversation(&self, conversation_id: Snowflake) -> RepoResult<Vec<Message>>;

    /// Messages of conversations anchored to a listing that involve the
    /// given user, chronological ascending
    async fn for_listing(
        &self,
        listing_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Vec<Message>>;

    /// Mark a conversation's messages addressed to `recipient_id` as read
    async fn mark_read(&self, conversation_id: Snowflake, recipient_id: Snowflake)
        -> RepoResult<u64>;
}
