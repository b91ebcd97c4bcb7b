//! Password policy enforcement for new passwords.

use notez_core::config::AuthConfig;
use notez_core::error::AppError;

/// Validates passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    max_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            max_length: config.password_max_length,
        }
    }

    /// Validates a new password. Length is counted in characters.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();
        if length < self.min_length || length > self.max_length {
            return Err(AppError::validation(format!(
                "Password must be between {} and {} characters.",
                self.min_length, self.max_length
            )));
        }

        if password.chars().any(char::is_control) {
            return Err(AppError::validation(
                "Password must not contain control characters.",
            ));
        }

        Ok(())
    }

    /// Validates that the confirmation matches.
    pub fn validate_confirmation(
        &self,
        password: &str,
        confirmation: &str,
    ) -> Result<(), AppError> {
        if password != confirmation {
            return Err(AppError::validation("Passwords do not match."));
        }
        Ok(())
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if old_password == new_password {
            return Err(AppError::validation(
                "New password must be different from the current password.",
            ));
        }
        Ok(())
    }
}
