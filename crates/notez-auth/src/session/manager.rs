//! Session lifecycle manager: issue, resolve, revoke.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use notez_core::config::SessionConfig;
use notez_core::config::session::MAX_TTL_DAYS;
use notez_core::error::AppError;
use notez_database::traits::SessionStore;
use notez_entity::session::SessionUser;

use super::token::{generate_token, is_well_formed};

/// Message for every failed resolution; the cause is never disclosed.
pub const UNAUTHENTICATED: &str = "Authentication required.";

/// A freshly issued session.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Opaque bearer token.
    pub token: String,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

/// Issues, validates, and revokes opaque bearer tokens.
///
/// Expiry is fixed at issuance. Resolution never extends it and expired rows
/// are left for an external sweep.
#[derive(Debug, Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    config: SessionConfig,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(store: Arc<dyn SessionStore>, config: SessionConfig) -> Self {
        Self { store, config }
    }

    /// Session configuration, for cookie attributes.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Lifetime of every issued session, held to `1..=MAX_TTL_DAYS` days.
    pub fn ttl(&self) -> Duration {
        Duration::days(self.config.ttl_days.clamp(1, MAX_TTL_DAYS))
    }

    /// Issue a session for the user starting now.
    pub async fn create_session(&self, user_id: Uuid) -> Result<IssuedSession, AppError> {
        self.create_session_at(user_id, Utc::now()).await
    }

    /// Issue a session for the user starting at `now`.
    pub async fn create_session_at(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, AppError> {
        let token = generate_token(self.config.token_bytes);
        let expires_at = now + self.ttl();
        self.store.create(&token, user_id, expires_at).await?;

        info!(user_id = %user_id, expires_at = %expires_at, "Session created");
        Ok(IssuedSession { token, expires_at })
    }

    /// Resolve a token to its user.
    pub async fn resolve(&self, token: &str) -> Result<SessionUser, AppError> {
        self.resolve_at(token, Utc::now()).await
    }

    /// Resolve a token as of `now`. Empty, malformed, unknown, and expired
    /// tokens all yield `Unauthenticated`.
    pub async fn resolve_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionUser, AppError> {
        if !is_well_formed(token) {
            debug!("Rejected malformed session token");
            return Err(AppError::unauthenticated(UNAUTHENTICATED));
        }

        self.store
            .find_user(token, now)
            .await?
            .ok_or_else(|| AppError::unauthenticated(UNAUTHENTICATED))
    }

    /// Delete the session. Returns whether it existed.
    pub async fn revoke(&self, token: &str) -> Result<bool, AppError> {
        if !is_well_formed(token) {
            return Ok(false);
        }
        let existed = self.store.delete(token).await?;
        if existed {
            info!("Session revoked");
        }
        Ok(existed)
    }

    /// Delete every session expired as of `now`.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let purged = self.store.delete_expired(now).await?;
        info!(purged, "Expired sessions purged");
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notez_core::error::ErrorKind;
    use notez_database::MemoryStore;
    use notez_database::traits::UserStore;
    use notez_entity::user::{CreateUser, UserRole};

    async fn setup() -> (SessionManager, Uuid) {
        let store = MemoryStore::new();
        let user = UserStore::create(
            &store,
            &CreateUser {
                email: "u@example.com".to_string(),
                password_hash: "hash".to_string(),
                name: None,
                role: UserRole::User,
            },
        )
        .await
        .unwrap();
        let manager = SessionManager::new(Arc::new(store), SessionConfig::default());
        (manager, user.id)
    }

    #[tokio::test]
    async fn test_seven_day_window() {
        let (manager, user_id) = setup().await;
        let t = Utc::now();
        let issued = manager.create_session_at(user_id, t).await.unwrap();
        assert_eq!(issued.expires_at, t + Duration::days(7));

        let resolved = manager
            .resolve_at(&issued.token, t + Duration::days(6))
            .await
            .unwrap();
        assert_eq!(resolved.user.id, user_id);

        let err = manager
            .resolve_at(&issued.token, t + Duration::days(8))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[test]
    fn test_ttl_is_bounded() {
        let config = SessionConfig {
            ttl_days: i64::MAX,
            ..SessionConfig::default()
        };
        let manager = SessionManager::new(Arc::new(MemoryStore::new()), config);
        assert_eq!(manager.ttl(), Duration::days(MAX_TTL_DAYS));
    }

    #[tokio::test]
    async fn test_expiry_boundary_is_invalid() {
        let (manager, user_id) = setup().await;
        let t = Utc::now();
        let issued = manager.create_session_at(user_id, t).await.unwrap();
        assert!(manager.resolve_at(&issued.token, issued.expires_at).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_and_unknown_tokens() {
        let (manager, _) = setup().await;
        for token in ["", "   ", "definitely-not-issued"] {
            let err = manager.resolve(token).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Unauthenticated);
        }
    }

    #[tokio::test]
    async fn test_revoke_reports_existence() {
        let (manager, user_id) = setup().await;
        let issued = manager.create_session(user_id).await.unwrap();
        assert!(manager.revoke(&issued.token).await.unwrap());
        assert!(!manager.revoke(&issued.token).await.unwrap());
        assert!(manager.resolve(&issued.token).await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_sessions_are_independent() {
        let (manager, user_id) = setup().await;
        let first = manager.create_session(user_id).await.unwrap();
        let second = manager.create_session(user_id).await.unwrap();
        assert_ne!(first.token, second.token);

        manager.revoke(&first.token).await.unwrap();
        assert!(manager.resolve(&second.token).await.is_ok());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let (manager, user_id) = setup().await;
        let t = Utc::now();
        manager.create_session_at(user_id, t - Duration::days(10)).await.unwrap();
        let live = manager.create_session_at(user_id, t).await.unwrap();

        assert_eq!(manager.purge_expired(t).await.unwrap(), 1);
        assert!(manager.resolve_at(&live.token, t).await.is_ok());
    }
}
