//! Listing entity <-> model mapper

use foodshare_core::entities::{FoodListing, ListingWithPoster};
use foodshare_core::error::DomainError;
use foodshare_core::value_objects::{Quantity, QuantityUnit, Snowflake};

use crate::models::{ListingModel, ListingWithPosterModel};

/// Convert ListingModel to FoodListing entity.
///
/// Fallible: the stored unit symbol must parse back into a known unit.
impl TryFrom<ListingModel> for FoodListing {
    type Error = DomainError;

    fn try_from(model: ListingModel) -> Result<Self, Self::Error> {
        let unit: QuantityUnit = model
            .quantity_unit
            .parse()
            .map_err(|_| DomainError::InvalidQuantityUnit(model.quantity_unit.clone()))?;

        Ok(FoodListing {
            id: Snowflake::new(model.id),
            creator_id: Snowflake::new(model.creator_id),
            food_type: model.food_type,
            description: model.description,
            quantity: Quantity::new(model.quantity_value, unit),
            expiration: model.expiration,
            location: model.location,
            images: model.images,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<ListingWithPosterModel> for ListingWithPoster {
    type Error = DomainError;

    fn try_from(model: ListingWithPosterModel) -> Result<Self, Self::Error> {
        Ok(ListingWithPoster {
            listing: FoodListing::try_from(model.listing)?,
            poster_name: model.poster_name,
        })
    }
}

/// Convert FoodListing entity reference to values for database insertion/update
pub struct ListingInsert<'a> {
    pub id: i64,
    pub creator_id: i64,
    pub food_type: &'a str,
    pub description: &'a str,
    pub quantity_value: f64,
    pub quantity_unit: &'static str,
    pub expiration: chrono::DateTime<chrono::Utc>,
    pub location: &'a str,
    pub images: &'a [String],
}

impl<'a> ListingInsert<'a> {
    pub fn new(listing: &'a FoodListing) -> Self {
        Self {
            id: listing.id.into_inner(),
            creator_id: listing.creator_id.into_inner(),
            food_type: &listing.food_type,
            description: &listing.description,
            quantity_value: listing.quantity.value,
            quantity_unit: listing.quantity.unit.symbol(),
            expiration: listing.expiration,
            location: &listing.location,
            images: &listing.images,
        }
    }
}
