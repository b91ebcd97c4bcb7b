//! # notez-auth
//!
//! Authentication and authorization primitives for Notez.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and password policy
//! - `session`: opaque session tokens: issue, resolve, revoke
//! - `acl`: effective role of a user on a note and action checks

pub mod acl;
pub mod password;
pub mod session;

pub use acl::{AccessEvaluator, NoteAction};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{IssuedSession, SessionManager};
