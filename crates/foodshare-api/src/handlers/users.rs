//! User handlers
//!
//! Endpoints for the current user's profile and account settings.

use axum::{extract::State, Json};
use foodshare_service::{CurrentUserResponse, UpdateSettingsRequest, UserService};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the current user's profile
///
/// GET /user
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.profile(auth.user_id).await?;
    Ok(Json(response))
}

/// Update account settings (email, phone, password)
///
/// PUT /user/settings
pub async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateSettingsRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_settings(auth.user_id, request).await?;
    Ok(Json(response))
}
