//! Profile service: name, email, and password changes.

use std::sync::Arc;

use tracing::info;

use notez_auth::password::{PasswordHasher, PasswordValidator};
use notez_core::error::AppError;
use notez_database::traits::{EMAIL_TAKEN, UserStore};
use notez_entity::user::User;

use crate::auth::service::{hash_blocking, verify_blocking};
use crate::context::RequestContext;

/// Input for a password change.
#[derive(Debug, Clone)]
pub struct ChangePasswordRequest {
    /// The password in use now.
    pub current_password: String,
    /// The replacement.
    pub password: String,
    /// Confirmation of the replacement.
    pub confirm_password: String,
}

/// Updates the caller's own account.
#[derive(Debug, Clone)]
pub struct ProfileService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
        }
    }

    /// Sets or clears the display name. Blank names clear it.
    pub async fn update_name(
        &self,
        ctx: &RequestContext,
        name: Option<String>,
    ) -> Result<User, AppError> {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let user = self
            .users
            .update_name(ctx.user_id(), name.as_deref())
            .await?
            .ok_or_else(|| AppError::not_found("User not found."))?;
        info!(user_id = %user.id, "Profile name updated");
        Ok(user)
    }

    /// Changes the email address.
    pub async fn update_email(&self, ctx: &RequestContext, email: &str) -> Result<User, AppError> {
        if ctx.user.has_email(email) {
            return Err(AppError::bad_request("Email still the same."));
        }
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }
        let user = self
            .users
            .update_email(ctx.user_id(), email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found."))?;
        info!(user_id = %user.id, "Profile email updated");
        Ok(user)
    }

    /// Changes the password after verifying the current one.
    pub async fn update_password(
        &self,
        ctx: &RequestContext,
        req: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let user = self
            .users
            .find_by_id(ctx.user_id())
            .await?
            .ok_or_else(|| AppError::not_found("User not found."))?;

        let current_ok =
            verify_blocking(&self.hasher, req.current_password.clone(), user.password_hash).await?;
        if !current_ok {
            return Err(AppError::validation("Current password is incorrect."));
        }

        self.validator.validate(&req.password)?;
        self.validator
            .validate_confirmation(&req.password, &req.confirm_password)?;
        self.validator
            .validate_not_same(&req.current_password, &req.password)?;

        let password_hash = hash_blocking(&self.hasher, req.password).await?;
        if !self
            .users
            .update_password(ctx.user_id(), &password_hash)
            .await?
        {
            return Err(AppError::not_found("User not found."));
        }
        info!(user_id = %ctx.user_id(), "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fixture, PASSWORD};
    use notez_core::error::ErrorKind;

    #[tokio::test]
    async fn test_update_name_trims_and_clears() {
        let fx = Fixture::new();
        let ctx = fx.actor("ann@example.com").await;
        let user = fx
            .profile
            .update_name(&ctx, Some("  Ann  ".to_string()))
            .await
            .unwrap();
        assert_eq!(user.name.as_deref(), Some("Ann"));

        let user = fx.profile.update_name(&ctx, Some("   ".to_string())).await.unwrap();
        assert!(user.name.is_none());
    }

    #[tokio::test]
    async fn test_update_email_rules() {
        let fx = Fixture::new();
        let ann = fx.actor("ann@example.com").await;
        fx.user("bob@example.com").await;

        let same = fx.profile.update_email(&ann, "ANN@example.com").await.unwrap_err();
        assert_eq!(same.kind, ErrorKind::BadRequest);

        let taken = fx.profile.update_email(&ann, "Bob@example.com").await.unwrap_err();
        assert_eq!(taken.kind, ErrorKind::Conflict);

        let user = fx.profile.update_email(&ann, "ann@new.example").await.unwrap();
        assert_eq!(user.email, "ann@new.example");
    }

    #[tokio::test]
    async fn test_update_password() {
        let fx = Fixture::new();
        let ann = fx.actor("ann@example.com").await;

        let wrong = fx
            .profile
            .update_password(
                &ann,
                ChangePasswordRequest {
                    current_password: "not-it-at-all".to_string(),
                    password: "brand-new-pass".to_string(),
                    confirm_password: "brand-new-pass".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(wrong.kind, ErrorKind::Validation);

        let reused = fx
            .profile
            .update_password(
                &ann,
                ChangePasswordRequest {
                    current_password: PASSWORD.to_string(),
                    password: PASSWORD.to_string(),
                    confirm_password: PASSWORD.to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(reused.kind, ErrorKind::Validation);

        fx.profile
            .update_password(
                &ann,
                ChangePasswordRequest {
                    current_password: PASSWORD.to_string(),
                    password: "brand-new-pass".to_string(),
                    confirm_password: "brand-new-pass".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(fx.auth.login("ann@example.com", PASSWORD).await.is_err());
        assert!(fx.auth.login("ann@example.com", "brand-new-pass").await.is_ok());
    }
}
