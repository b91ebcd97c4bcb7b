//! # notez-core
//!
//! Core crate for Notez. Contains configuration schemas, pagination and
//! sorting types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Notez crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
