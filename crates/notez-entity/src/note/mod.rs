//! Note, membership, and access-role entities.

pub mod membership;
pub mod model;
pub mod query;
pub mod role;

pub use membership::Membership;
pub use model::{CreateNote, Note, NoteAccess, NoteWithRole, UpdateNote};
pub use query::{NoteQuery, NoteSort};
pub use role::{EffectiveRole, NoteRole};
