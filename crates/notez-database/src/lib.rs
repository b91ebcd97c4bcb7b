//! # notez-database
//!
//! Storage access for Notez. Services depend on the traits in [`traits`];
//! [`repositories`] implements them on PostgreSQL and [`memory`] implements
//! them in process with the same uniqueness, foreign-key, and transaction
//! guarantees for tests and local runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod traits;

use std::sync::Arc;

use sqlx::PgPool;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use traits::{InvitationStore, MembershipStore, NoteStore, SessionStore, UserStore};

/// The full set of storage handles injected into services.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Credential store.
    pub users: Arc<dyn UserStore>,
    /// Session rows.
    pub sessions: Arc<dyn SessionStore>,
    /// Notes and access lookups.
    pub notes: Arc<dyn NoteStore>,
    /// Note memberships.
    pub memberships: Arc<dyn MembershipStore>,
    /// Pending invitations.
    pub invitations: Arc<dyn InvitationStore>,
}

impl Repositories {
    /// Build PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(repositories::UserRepository::new(pool.clone())),
            sessions: Arc::new(repositories::SessionRepository::new(pool.clone())),
            notes: Arc::new(repositories::NoteRepository::new(pool.clone())),
            memberships: Arc::new(repositories::MembershipRepository::new(pool.clone())),
            invitations: Arc::new(repositories::InvitationRepository::new(pool)),
        }
    }

    /// Build repositories over a fresh in-memory store.
    pub fn memory() -> Self {
        Self::from_memory(MemoryStore::new())
    }

    /// Build repositories over an existing in-memory store.
    pub fn from_memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            sessions: Arc::new(store.clone()),
            notes: Arc::new(store.clone()),
            memberships: Arc::new(store.clone()),
            invitations: Arc::new(store),
        }
    }
}
