//! FoodListing entity - a posted donation offer

use chrono::{DateTime, Utc};

use crate::value_objects::{Quantity, Snowflake};

/// A surplus-food donation offer
#[derive(Debug, Clone, PartialEq)]
pub struct FoodListing {
    pub id: Snowflake,
    pub creator_id: Snowflake,
    pub food_type: String,
    pub description: String,
    pub quantity: Quantity,
    pub expiration: DateTime<Utc>,
    pub location: String,
    /// Relative URLs of uploaded images, at most [`Self::MAX_IMAGES`]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FoodListing {
    /// Upper bound on images per listing, enforced before any write
    pub const MAX_IMAGES: usize = 5;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        creator_id: Snowflake,
        food_type: String,
        description: String,
        quantity: Quantity,
        expiration: DateTime<Utc>,
        location: String,
        images: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            creator_id,
            food_type,
            description,
            quantity,
            expiration,
            location,
            images,
            created_at: now,
            updated_at: now,
        }
    }

    /// A listing is active while its expiration lies in the future;
    /// searches exclude inactive listings by default.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expiration > now
    }

    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.creator_id == user_id
    }
}

/// A listing decorated with its poster's display name for rendering.
/// Never carries the poster's credentials.
#[derive(Debug, Clone)]
pub struct ListingWithPoster {
    pub listing: FoodListing,
    pub poster_name: String,
}
