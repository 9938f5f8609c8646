//! PostgreSQL implementation of ListingRepository

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

use foodshare_core::entities::{FoodListing, ListingWithPoster};
use foodshare_core::search::ListingSearch;
use foodshare_core::traits::{ListingRepository, RepoResult};
use foodshare_core::value_objects::Snowflake;

use crate::mappers::ListingInsert;
use crate::models::{ListingModel, ListingWithPosterModel};

use super::error::{listing_not_owned, map_db_error};

const LISTING_COLUMNS: &str = "l.id, l.creator_id, l.food_type, l.description, \
     l.quantity_value, l.quantity_unit, l.expiration, l.location, l.images, \
     l.created_at, l.updated_at";

/// PostgreSQL implementation of ListingRepository
#[derive(Clone)]
pub struct PgListingRepository {
    pool: PgPool,
}

impl PgListingRepository {
    /// Create a new PgListingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<FoodListing>> {
        let result = sqlx::query_as::<_, ListingModel>(
            r"
            SELECT id, creator_id, food_type, description, quantity_value, quantity_unit,
                   expiration, location, images, created_at, updated_at
            FROM listings
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(FoodListing::try_from).transpose()
    }

    /// All present criteria AND together on top of the non-expired base
    /// predicate; results are newest first with the poster's name joined in.
    #[instrument(skip(self))]
    async fn search(&self, criteria: &ListingSearch) -> RepoResult<Vec<ListingWithPoster>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {LISTING_COLUMNS}, u.name AS poster_name \
             FROM listings l \
             JOIN users u ON u.id = l.creator_id \
             WHERE l.expiration > NOW()"
        ));

        if let Some(text) = criteria.text.as_deref() {
            let pattern = format!("%{text}%");
            qb.push(" AND (l.food_type ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR l.description ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }

        // Every location token must appear somewhere in the stored location
        for token in criteria.location_tokens() {
            qb.push(" AND l.location ILIKE ");
            qb.push_bind(format!("%{token}%"));
        }

        if let Some((day_start, day_end)) = criteria.posted_on_bounds() {
            qb.push(" AND l.created_at >= ");
            qb.push_bind(day_start);
            qb.push(" AND l.created_at <= ");
            qb.push_bind(day_end);
        }

        if let Some(quantity) = &criteria.quantity {
            // Same phase, then at-least comparison in base units (grams/ml)
            let family: Vec<String> = quantity
                .unit
                .phase_family()
                .iter()
                .map(|s| (*s).to_string())
                .collect();
            qb.push(" AND l.quantity_unit = ANY(");
            qb.push_bind(family);
            qb.push(") AND l.quantity_value * (CASE WHEN l.quantity_unit IN ('kg', 'l') THEN 1000.0 ELSE 1.0 END) >= ");
            qb.push_bind(quantity.base_value());
        }

        if let Some(min_expiry) = criteria.min_expiry {
            qb.push(" AND l.expiration >= ");
            qb.push_bind(min_expiry);
        }

        if let Some(poster_ids) = &criteria.poster_ids {
            let ids: Vec<i64> = poster_ids.iter().map(|s| s.into_inner()).collect();
            qb.push(" AND l.creator_id = ANY(");
            qb.push_bind(ids);
            qb.push(")");
        }

        qb.push(" ORDER BY l.created_at DESC");

        let rows = qb
            .build_query_as::<ListingWithPosterModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(ListingWithPoster::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn create(&self, listing: &FoodListing) -> RepoResult<()> {
        let insert = ListingInsert::new(listing);

        sqlx::query(
            r"
            INSERT INTO listings (id, creator_id, food_type, description, quantity_value,
                                  quantity_unit, expiration, location, images, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(insert.id)
        .bind(insert.creator_id)
        .bind(insert.food_type)
        .bind(insert.description)
        .bind(insert.quantity_value)
        .bind(insert.quantity_unit)
        .bind(insert.expiration)
        .bind(insert.location)
        .bind(insert.images)
        .bind(listing.created_at)
        .bind(listing.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_owned(&self, listing: &FoodListing, owner_id: Snowflake) -> RepoResult<()> {
        let insert = ListingInsert::new(listing);

        // Ownership enforced in the WHERE clause; a zero-row update cannot
        // reveal whether the listing is missing or someone else's.
        let result = sqlx::query(
            r"
            UPDATE listings
            SET food_type = $3, description = $4, quantity_value = $5, quantity_unit = $6,
                expiration = $7, location = $8, images = $9, updated_at = NOW()
            WHERE id = $1 AND creator_id = $2
            ",
        )
        .bind(insert.id)
        .bind(owner_id.into_inner())
        .bind(insert.food_type)
        .bind(insert.description)
        .bind(insert.quantity_value)
        .bind(insert.quantity_unit)
        .bind(insert.expiration)
        .bind(insert.location)
        .bind(insert.images)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(listing_not_owned());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_owned(&self, id: Snowflake, owner_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM listings
            WHERE id = $1 AND creator_id = $2
            ",
        )
        .bind(id.into_inner())
        .bind(owner_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(listing_not_owned());
        }

        Ok(())
    }
}
