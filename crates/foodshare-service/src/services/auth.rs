//! Authentication service
//!
//! Handles user signup and login. Tokens are single access tokens with a
//! fixed TTL; there is no refresh flow.

use foodshare_common::auth::{hash_password, validate_password_strength, verify_password};
use foodshare_core::entities::User;
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, CurrentUserResponse, LoginRequest, SignupRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<AuthResponse> {
        // Validate password strength before proceeding
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        // Check if email already exists
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        // Hash password
        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        // Create user
        let user_id = self.ctx.generate_id();
        let mut user = User::new(user_id, request.name, request.email, request.location);
        user.phone = request.phone;

        // Save to database; the unique index backstops the exists check
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user_id, "User registered successfully");

        let token = self
            .ctx
            .jwt_service()
            .issue_token(user_id)
            .map_err(ServiceError::from)?;

        Ok(AuthResponse::new(
            token.access_token,
            token.expires_in,
            CurrentUserResponse::from(&user),
        ))
    }

    /// Login with email and password.
    ///
    /// Every failure path returns the same `InvalidCredentials` error so the
    /// response cannot be used to probe which emails are registered; logs
    /// carry the distinction.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(foodshare_common::AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(foodshare_common::AppError::InvalidCredentials)
            })?;

        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(
                foodshare_common::AppError::InvalidCredentials,
            ));
        }

        info!(user_id = %user.id, "User logged in successfully");

        let token = self
            .ctx
            .jwt_service()
            .issue_token(user.id)
            .map_err(ServiceError::from)?;

        Ok(AuthResponse::new(
            token.access_token,
            token.expires_in,
            CurrentUserResponse::from(&user),
        ))
    }
}
