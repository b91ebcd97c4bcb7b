//! Route definitions for the Notez HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes, the body limit, and request logging.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    Router::new()
        .merge(auth_routes())
        .merge(profile_routes())
        .merge(note_routes())
        .merge(invitation_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Register, login, logout, check
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/check", get(handlers::auth::check))
}

/// Self-service profile changes
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", patch(handlers::profile::update_name))
        .route("/profile/email", patch(handlers::profile::update_email))
        .route("/profile/password", patch(handlers::profile::update_password))
}

/// Note CRUD and member administration
fn note_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notes",
            post(handlers::note::create_note).get(handlers::note::list_notes),
        )
        .route(
            "/notes/{id}",
            get(handlers::note::get_note)
                .put(handlers::note::update_note)
                .patch(handlers::note::update_note)
                .delete(handlers::note::delete_note),
        )
        .route(
            "/notes/{id}/members/{member_id}",
            patch(handlers::member::update_member_role).delete(handlers::member::remove_member),
        )
}

/// Invitation lifecycle
fn invitation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/note-invitations",
            post(handlers::invitation::create_invitation)
                .get(handlers::invitation::list_invitations),
        )
        .route(
            "/note-invitations/{id}",
            patch(handlers::invitation::respond_invitation),
        )
}

/// Liveness and database reachability
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
