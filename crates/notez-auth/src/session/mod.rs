//! Session token issuance, resolution, and revocation.

pub mod manager;
pub mod token;

pub use manager::{IssuedSession, SessionManager};
pub use token::generate_token;
