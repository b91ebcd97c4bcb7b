//! In-process implementation of every storage trait.

pub mod store;

pub use store::MemoryStore;
