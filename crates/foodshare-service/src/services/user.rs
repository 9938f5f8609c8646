//! User profile service

use foodshare_common::auth::{hash_password, validate_password_strength, verify_password};
use foodshare_core::Snowflake;
use tracing::{info, instrument, warn};

use crate::dto::{CurrentUserResponse, UpdateSettingsRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User profile service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the current user's profile
    #[instrument(skip(self))]
    pub async fn profile(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(CurrentUserResponse::from(&user))
    }

    /// Update account settings (email, phone, password).
    ///
    /// The current password is re-verified before any change is applied.
    #[instrument(skip(self, request))]
    pub async fn update_settings(
        &self,
        user_id: Snowflake,
        request: UpdateSettingsRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or_else(|| ServiceError::internal("missing password hash"))?;

        let verified = verify_password(&request.current_password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;
        if !verified {
            warn!(user_id = %user_id, "Settings update rejected: wrong current password");
            return Err(ServiceError::App(
                foodshare_common::AppError::InvalidCredentials,
            ));
        }

        // Validate and hash the new password before any write, so a rejected
        // password leaves email and phone untouched too
        let new_hash = match request.new_password {
            Some(new_password) => {
                validate_password_strength(&new_password).map_err(ServiceError::from)?;
                Some(
                    hash_password(&new_password)
                        .map_err(|e| ServiceError::internal(e.to_string()))?,
                )
            }
            None => None,
        };

        if let Some(email) = request.email {
            if email != user.email && self.ctx.user_repo().email_exists(&email).await? {
                return Err(ServiceError::conflict("Email already registered"));
            }
            user.set_email(email);
        }

        if let Some(phone) = request.phone {
            user.set_phone(Some(phone));
        }

        self.ctx.user_repo().update(&user).await?;

        if let Some(new_hash) = new_hash {
            self.ctx
                .user_repo()
                .update_password(user_id, &new_hash)
                .await?;
        }

        info!(user_id = %user_id, "Account settings updated");

        Ok(CurrentUserResponse::from(&user))
    }
}
