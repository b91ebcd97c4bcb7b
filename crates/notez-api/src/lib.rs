//! # notez-api
//!
//! HTTP API layer for Notez built on Axum.
//!
//! Provides the REST endpoints, middleware (request logging, CORS),
//! extractors (session cookie, validated JSON and query), DTOs, and the
//! mapping from `AppError` to HTTP responses via `ApiError`.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
