//! Account authentication service.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use notez_auth::password::{PasswordHasher, PasswordValidator};
use notez_auth::session::{IssuedSession, SessionManager};
use notez_core::error::AppError;
use notez_database::traits::{EMAIL_TAKEN, UserStore};
use notez_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;

/// Message returned for any failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// Password behind the hash verified when the email matches no account.
const DECOY_PASSWORD: &str = "notez-decoy-password";

/// Input for account registration.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    /// Email address.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Password confirmation.
    pub confirm_password: String,
    /// Optional display name.
    pub name: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// The newly issued session.
    pub session: IssuedSession,
}

/// Registers accounts and manages login sessions.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    sessions: Arc<SessionManager>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    /// Hashed with the configured parameters on first use so an unknown
    /// email costs the same Argon2 work as a wrong password.
    decoy_hash: Arc<OnceCell<String>>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<SessionManager>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            validator,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Creates an account. The unique index on email settles races between
    /// the existence check and the insert.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        self.validator.validate(&req.password)?;
        self.validator
            .validate_confirmation(&req.password, &req.confirm_password)?;

        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }

        let password_hash = hash_blocking(&self.hasher, req.password).await?;
        let user = self
            .users
            .create(&CreateUser {
                email: req.email,
                password_hash,
                name: req.name,
                role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Verifies credentials and issues a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            self.verify_decoy(password).await?;
            warn!("Login rejected: unknown email");
            return Err(AppError::unauthenticated(INVALID_CREDENTIALS));
        };

        if !verify_blocking(&self.hasher, password.to_string(), user.password_hash.clone()).await? {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::unauthenticated(INVALID_CREDENTIALS));
        }

        let session = self.sessions.create_session(user.id).await?;
        info!(user_id = %user.id, "User logged in");
        Ok(LoginResult { user, session })
    }

    async fn verify_decoy(&self, password: &str) -> Result<(), AppError> {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| hash_blocking(&self.hasher, DECOY_PASSWORD.to_string()))
            .await?;
        verify_blocking(&self.hasher, password.to_string(), decoy.clone()).await?;
        Ok(())
    }

    /// Revokes the session behind the request. A session already gone is
    /// reported as unauthenticated.
    pub async fn logout(&self, ctx: &RequestContext) -> Result<(), AppError> {
        if !self.sessions.revoke(&ctx.session_token).await? {
            return Err(AppError::unauthenticated("Already logged out."));
        }
        info!(user_id = %ctx.user_id(), "User logged out");
        Ok(())
    }

    /// Creates an account directly, skipping confirmation. Used by the CLI.
    pub async fn provision(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
        role: UserRole,
    ) -> Result<User, AppError> {
        self.validator.validate(password)?;
        let password_hash = hash_blocking(&self.hasher, password.to_string()).await?;
        let user = self
            .users
            .create(&CreateUser {
                email: email.to_string(),
                password_hash,
                name,
                role,
            })
            .await?;
        info!(user_id = %user.id, role = %role, "User provisioned");
        Ok(user)
    }
}

/// Runs Argon2 off the async executor.
pub(crate) async fn hash_blocking(
    hasher: &Arc<PasswordHasher>,
    password: String,
) -> Result<String, AppError> {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || hasher.hash_password(&password))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
}

/// Runs Argon2 verification off the async executor.
pub(crate) async fn verify_blocking(
    hasher: &Arc<PasswordHasher>,
    password: String,
    hash: String,
) -> Result<bool, AppError> {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
}
