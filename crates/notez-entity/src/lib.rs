//! # notez-entity
//!
//! Domain entity models for Notez. Every struct in this crate represents a
//! database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`; enums stored in PostgreSQL derive `sqlx::Type`.

pub mod invitation;
pub mod note;
pub mod session;
pub mod user;
