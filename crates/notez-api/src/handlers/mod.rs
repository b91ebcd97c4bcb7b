//! HTTP request handlers.

pub mod auth;
pub mod health;
pub mod invitation;
pub mod member;
pub mod note;
pub mod profile;
