//! Profile changes for the signed-in user.

pub mod service;

pub use service::{ChangePasswordRequest, ProfileService};
