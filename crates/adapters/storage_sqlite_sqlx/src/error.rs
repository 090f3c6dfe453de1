//! Storage-specific error type wrapping sqlx errors.

use nutrihub_domain::error::{ConflictError, NutriHubError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for NutriHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Map a unique-constraint violation onto a [`ConflictError`], anything
/// else onto a storage error.
pub(crate) fn conflict_or_storage(
    err: sqlx::Error,
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> NutriHubError {
    let is_unique = matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation());
    if is_unique {
        ConflictError {
            entity,
            field,
            value: value.to_string(),
        }
        .into()
    } else {
        StorageError::from(err).into()
    }
}
