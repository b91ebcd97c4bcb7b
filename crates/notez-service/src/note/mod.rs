//! Note CRUD gated by the access evaluator.

pub mod service;

pub use service::{NoteInput, NoteService};
