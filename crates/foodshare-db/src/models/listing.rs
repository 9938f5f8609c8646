//! Listing database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for listings table
#[derive(Debug, Clone, FromRow)]
pub struct ListingModel {
    pub id: i64,
    pub creator_id: i64,
    pub food_type: String,
    pub description: String,
    pub quantity_value: f64,
    /// Canonical lowercase unit symbol: g, kg, ml or l
    pub quantity_unit: String,
    pub expiration: DateTime<Utc>,
    pub location: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row joined with the poster's display name
#[derive(Debug, Clone, FromRow)]
pub struct ListingWithPosterModel {
    #[sqlx(flatten)]
    pub listing: ListingModel,
    pub poster_name: String,
}
