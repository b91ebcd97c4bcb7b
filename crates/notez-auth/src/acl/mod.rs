//! Note access evaluation.

pub mod evaluator;

pub use evaluator::{AccessEvaluator, NOTE_NOT_FOUND, NoteAction};
