//! Error handling for lexoboard-store
//!
//! Connection and migration failures surface as `ExError`; failures inside
//! store-contract calls surface as `BoardError::Persistence` so that core
//! operations can propagate them with `?`.

use lexoboard_core::errors::{BoardError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_entity_id(migration_id)
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Map a rusqlite error raised by a store-contract call into the domain error
///
/// ```
/// use lexoboard_store::errors::db_error;
///
/// let err = db_error("get_card")(rusqlite::Error::InvalidQuery);
/// assert!(err.to_string().contains("get_card"));
/// ```
pub fn db_error(op: &'static str) -> impl Fn(rusqlite::Error) -> BoardError {
    move |err| BoardError::Persistence {
        op: op.to_string(),
        message: err.to_string(),
    }
}
