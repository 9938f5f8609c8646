//! Listing handlers
//!
//! Endpoints for searching, creating, updating and deleting food listings.
//! Create and update accept `multipart/form-data`: scalar fields plus up to
//! five `images` file parts (update additionally takes repeatable
//! `keep_images` fields naming existing image URLs to retain).

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use foodshare_core::Snowflake;
use foodshare_service::{
    CreateListingRequest, ImageUpload, ListingFilters, ListingResponse, ListingService,
    UpdateListingRequest,
};
use validator::Validate;

use crate::extractors::AuthUser;
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Search listings
///
/// GET /listings
pub async fn search_listings(
    State(state): State<AppState>,
    Query(filters): Query<ListingFilters>,
) -> ApiResult<Json<Vec<ListingResponse>>> {
    let service = ListingService::new(state.service_context());
    let listings = service.search(filters).await?;
    Ok(Json(listings))
}

/// Create a listing
///
/// POST /listings (multipart)
pub async fn create_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<Created<Json<ListingResponse>>> {
    let form = ListingForm::parse(multipart).await?;
    let (request, images) = form.into_create_request()?;
    request.validate()?;

    let service = ListingService::new(state.service_context());
    let response = service.create(auth.user_id, request, images).await?;
    Ok(Created(Json(response)))
}

/// Update a listing the caller owns
///
/// PUT /listings/{listing_id} (multipart)
pub async fn update_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(listing_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Json<ListingResponse>> {
    let listing_id = parse_listing_id(&listing_id)?;

    let form = ListingForm::parse(multipart).await?;
    let (request, images) = form.into_update_request()?;
    request.validate()?;

    let service = ListingService::new(state.service_context());
    let response = service
        .update(auth.user_id, listing_id, request, images)
        .await?;
    Ok(Json(response))
}

/// Delete a listing the caller owns
///
/// DELETE /listings/{listing_id}
pub async fn delete_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(listing_id): Path<String>,
) -> ApiResult<NoContent> {
    let listing_id = parse_listing_id(&listing_id)?;

    let service = ListingService::new(state.service_context());
    service.delete(auth.user_id, listing_id).await?;
    Ok(NoContent)
}

fn parse_listing_id(raw: &str) -> ApiResult<Snowflake> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid listing_id format"))
}

/// Accumulated multipart form for listing create/update
#[derive(Debug, Default)]
struct ListingForm {
    food_type: Option<String>,
    description: Option<String>,
    quantity_value: Option<String>,
    quantity_unit: Option<String>,
    expiration: Option<String>,
    location: Option<String>,
    keep_images: Vec<String>,
    images: Vec<ImageUpload>,
}

impl ListingForm {
    /// Drain the multipart stream into named fields and file parts
    async fn parse(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = Self::default();

        while let Some(part) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::invalid_body(e.to_string()))?
        {
            let name = part.name().unwrap_or_default().to_string();
            match name.as_str() {
                "images" => {
                    let filename = part.file_name().unwrap_or("upload").to_string();
                    let bytes = part
                        .bytes()
                        .await
                        .map_err(|e| ApiError::invalid_body(e.to_string()))?;
                    form.images.push(ImageUpload {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
                "keep_images" => {
                    form.keep_images.push(Self::text(part).await?);
                }
                "food_type" => form.food_type = Some(Self::text(part).await?),
                "description" => form.description = Some(Self::text(part).await?),
                "quantity_value" => form.quantity_value = Some(Self::text(part).await?),
                "quantity_unit" => form.quantity_unit = Some(Self::text(part).await?),
                "expiration" => form.expiration = Some(Self::text(part).await?),
                "location" => form.location = Some(Self::text(part).await?),
                // Unknown parts are ignored
                _ => {}
            }
        }

        Ok(form)
    }

    async fn text(part: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
        part.text()
            .await
            .map_err(|e| ApiError::invalid_body(e.to_string()))
    }

    fn into_create_request(self) -> ApiResult<(CreateListingRequest, Vec<ImageUpload>)> {
        let request = CreateListingRequest {
            food_type: require(self.food_type, "food_type")?,
            description: require(self.description, "description")?,
            quantity_value: parse_value(require(self.quantity_value, "quantity_value")?)?,
            quantity_unit: require(self.quantity_unit, "quantity_unit")?,
            expiration: parse_expiration(&require(self.expiration, "expiration")?)?,
            location: require(self.location, "location")?,
        };
        Ok((request, self.images))
    }

    fn into_update_request(self) -> ApiResult<(UpdateListingRequest, Vec<ImageUpload>)> {
        let request = UpdateListingRequest {
            food_type: require(self.food_type, "food_type")?,
            description: require(self.description, "description")?,
            quantity_value: parse_value(require(self.quantity_value, "quantity_value")?)?,
            quantity_unit: require(self.quantity_unit, "quantity_unit")?,
            expiration: parse_expiration(&require(self.expiration, "expiration")?)?,
            location: require(self.location, "location")?,
            keep_images: self.keep_images,
        };
        Ok((request, self.images))
    }
}

fn require(field: Option<String>, name: &str) -> ApiResult<String> {
    field.ok_or_else(|| ApiError::invalid_body(format!("Missing field: {name}")))
}

fn parse_value(raw: String) -> ApiResult<f64> {
    raw.parse()
        .map_err(|_| ApiError::invalid_body("quantity_value must be a number"))
}

fn parse_expiration(raw: &str) -> ApiResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ApiError::invalid_body("expiration must be an RFC 3339 timestamp"))
}
