//! Listing service - search, creation, update, deletion
//!
//! Search filters are best-effort: malformed quantity or date filters are
//! dropped rather than surfaced as errors. Image uploads are best-effort per
//! file; the image cap is enforced before anything is written.

use chrono::NaiveDate;
use foodshare_core::entities::FoodListing;
use foodshare_core::error::DomainError;
use foodshare_core::search::ListingSearch;
use foodshare_core::value_objects::{Quantity, QuantityUnit, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{CreateListingRequest, ListingFilters, ListingResponse, UpdateListingRequest};
use crate::storage::ImageUpload;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Listing service
pub struct ListingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ListingService<'a> {
    /// Create a new ListingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Search listings with the given filters.
    ///
    /// A `posted_by` name that matches nobody short-circuits to an empty
    /// result without touching the listing store.
    #[instrument(skip(self))]
    pub async fn search(&self, filters: ListingFilters) -> ServiceResult<Vec<ListingResponse>> {
        let criteria = self.resolve_filters(filters).await?;

        if criteria.is_unsatisfiable() {
            return Ok(Vec::new());
        }

        let results = self.ctx.listing_repo().search(&criteria).await?;
        Ok(results.iter().map(ListingResponse::from).collect())
    }

    /// Create a listing with up to five images.
    ///
    /// The image cap is checked before any file or row is written. Individual
    /// image failures are logged and skipped; the listing is still created.
    #[instrument(skip(self, request, images), fields(creator_id = %creator_id, image_count = images.len()))]
    pub async fn create(
        &self,
        creator_id: Snowflake,
        request: CreateListingRequest,
        images: Vec<ImageUpload>,
    ) -> ServiceResult<ListingResponse> {
        if images.len() > FoodListing::MAX_IMAGES {
            return Err(DomainError::TooManyImages {
                max: FoodListing::MAX_IMAGES,
            }
            .into());
        }

        let quantity = parse_quantity(request.quantity_value, &request.quantity_unit)?;

        let poster = self
            .ctx
            .user_repo()
            .find_by_id(creator_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", creator_id.to_string()))?;

        let image_urls = self.store_images(&images).await;

        let listing = FoodListing::new(
            self.ctx.generate_id(),
            creator_id,
            request.food_type,
            request.description,
            quantity,
            request.expiration,
            request.location,
            image_urls,
        );

        self.ctx.listing_repo().create(&listing).await?;

        info!(listing_id = %listing.id, creator_id = %creator_id, "Listing created");

        Ok(ListingResponse::with_poster(&listing, poster.name))
    }

    /// Update a listing the caller owns.
    ///
    /// The final image set is the retained subset of existing images plus the
    /// new uploads, capped at five; the cap is enforced before any write.
    /// Non-owners get the same not-found outcome as a missing listing.
    #[instrument(skip(self, request, new_images), fields(listing_id = %listing_id, owner_id = %owner_id))]
    pub async fn update(
        &self,
        owner_id: Snowflake,
        listing_id: Snowflake,
        request: UpdateListingRequest,
        new_images: Vec<ImageUpload>,
    ) -> ServiceResult<ListingResponse> {
        let existing = self
            .ctx
            .listing_repo()
            .find_by_id(listing_id)
            .await?
            .filter(|l| l.is_owned_by(owner_id))
            .ok_or(DomainError::NotFoundOrForbidden("Listing"))?;

        // Only URLs the listing actually has can be retained
        let kept: Vec<String> = existing
            .images
            .iter()
            .filter(|url| request.keep_images.contains(url))
            .cloned()
            .collect();

        if kept.len() + new_images.len() > FoodListing::MAX_IMAGES {
            return Err(DomainError::TooManyImages {
                max: FoodListing::MAX_IMAGES,
            }
            .into());
        }

        let quantity = parse_quantity(request.quantity_value, &request.quantity_unit)?;

        let mut images = kept;
        images.extend(self.store_images(&new_images).await);

        let mut listing = existing;
        listing.food_type = request.food_type;
        listing.description = request.description;
        listing.quantity = quantity;
        listing.expiration = request.expiration;
        listing.location = request.location;
        listing.images = images;

        self.ctx
            .listing_repo()
            .update_owned(&listing, owner_id)
            .await?;

        info!(listing_id = %listing_id, "Listing updated");

        let poster = self
            .ctx
            .user_repo()
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| ServiceError::internal("listing owner missing"))?;

        Ok(ListingResponse::with_poster(&listing, poster.name))
    }

    /// Delete a listing the caller owns
    #[instrument(skip(self))]
    pub async fn delete(&self, owner_id: Snowflake, listing_id: Snowflake) -> ServiceResult<()> {
        self.ctx
            .listing_repo()
            .delete_owned(listing_id, owner_id)
            .await?;

        info!(listing_id = %listing_id, "Listing deleted");
        Ok(())
    }

    /// Translate raw query filters into resolved search criteria
    async fn resolve_filters(&self, filters: ListingFilters) -> ServiceResult<ListingSearch> {
        // Malformed day or quantity filters are dropped, not errors
        let posted_on = filters
            .date_posted
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());

        let quantity = filters
            .quantity
            .as_deref()
            .and_then(Quantity::parse_lenient);

        let poster_ids = match filters.posted_by.as_deref() {
            Some(name) => Some(self.ctx.user_repo().find_ids_by_name(name).await?),
            None => None,
        };

        Ok(ListingSearch {
            text: filters.search,
            location: filters.location,
            posted_on,
            quantity,
            min_expiry: filters.expiry_date,
            poster_ids,
        })
    }

    /// Store uploads one by one, skipping failures with a warning
    async fn store_images(&self, images: &[ImageUpload]) -> Vec<String> {
        let mut urls = Vec::with_capacity(images.len());
        for upload in images {
            match self.ctx.image_store().save(upload).await {
                Ok(url) => urls.push(url),
                Err(e) => {
                    warn!(filename = %upload.filename, error = %e, "Image upload failed, skipping");
                }
            }
        }
        urls
    }
}

fn parse_quantity(value: f64, unit: &str) -> ServiceResult<Quantity> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ServiceError::validation("Quantity must be positive"));
    }
    let unit: QuantityUnit = unit
        .parse()
        .map_err(|_| DomainError::InvalidQuantityUnit(unit.to_string()))?;
    Ok(Quantity::new(value, unit))
}
