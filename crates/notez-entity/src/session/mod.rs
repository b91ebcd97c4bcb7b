//! Session domain entities.

pub mod model;

pub use model::{Session, SessionUser};
