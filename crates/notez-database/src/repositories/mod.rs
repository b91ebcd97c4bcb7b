//! PostgreSQL implementations of the storage traits.

pub mod invitation;
pub mod membership;
pub mod note;
pub mod session;
pub mod user;

pub use invitation::InvitationRepository;
pub use membership::MembershipRepository;
pub use note::NoteRepository;
pub use session::SessionRepository;
pub use user::UserRepository;

use notez_core::error::{AppError, ErrorKind};

/// Map a sqlx error, turning a unique violation into a `Conflict` with the
/// given message.
pub(crate) fn unique_or_database(
    err: sqlx::Error,
    conflict_message: &str,
    context: &str,
) -> AppError {
    let is_unique = matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation());
    if is_unique {
        AppError::with_source(ErrorKind::Conflict, conflict_message, err)
    } else {
        AppError::with_source(ErrorKind::Database, context, err)
    }
}

/// Escape `%`, `_`, and `\` for use inside an `ILIKE` pattern.
pub(crate) fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
