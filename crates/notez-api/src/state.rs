//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use notez_auth::acl::AccessEvaluator;
use notez_auth::password::{PasswordHasher, PasswordValidator};
use notez_auth::session::SessionManager;
use notez_core::config::AppConfig;
use notez_core::error::AppError;
use notez_database::{DatabasePool, Repositories};
use notez_service::{
    AuthService, InvitationService, MemberService, NoteService, ProfileService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool; absent when running on the in-memory store
    pub db_pool: Option<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    /// Session lifecycle manager
    pub session_manager: Arc<SessionManager>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login, logout
    pub auth_service: Arc<AuthService>,
    /// Name, email, and password changes
    pub profile_service: Arc<ProfileService>,
    /// Note CRUD
    pub note_service: Arc<NoteService>,
    /// Invitation lifecycle
    pub invitation_service: Arc<InvitationService>,
    /// Membership administration
    pub member_service: Arc<MemberService>,
}

impl AppState {
    /// Wires repositories, auth primitives, and services together.
    pub fn new(
        config: AppConfig,
        repos: Repositories,
        db_pool: Option<DatabasePool>,
    ) -> Result<Self, AppError> {
        let password_hasher = Arc::new(PasswordHasher::new(&config.auth.hash)?);
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&repos.sessions),
            config.session.clone(),
        ));
        let access = Arc::new(AccessEvaluator::new(Arc::clone(&repos.notes)));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repos.users),
            Arc::clone(&session_manager),
            Arc::clone(&password_hasher),
            Arc::clone(&password_validator),
        ));
        let profile_service = Arc::new(ProfileService::new(
            Arc::clone(&repos.users),
            password_hasher,
            password_validator,
        ));
        let note_service = Arc::new(NoteService::new(
            Arc::clone(&repos.notes),
            Arc::clone(&access),
        ));
        let invitation_service = Arc::new(InvitationService::new(
            Arc::clone(&repos.users),
            Arc::clone(&repos.memberships),
            Arc::clone(&repos.invitations),
            Arc::clone(&access),
        ));
        let member_service = Arc::new(MemberService::new(
            Arc::clone(&repos.memberships),
            access,
        ));

        Ok(Self {
            config: Arc::new(config),
            db_pool,
            session_manager,
            auth_service,
            profile_service,
            note_service,
            invitation_service,
            member_service,
        })
    }
}
