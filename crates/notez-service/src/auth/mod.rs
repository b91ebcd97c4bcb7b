//! Registration, login, and logout.

pub mod service;

pub use service::{AuthService, INVALID_CREDENTIALS, LoginResult, RegisterRequest};
