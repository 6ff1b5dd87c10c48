//! Failures of the substation store.
//!
//! Every variant surfaces to the service as an opaque
//! [`RegistryError::Storage`]; the distinction only matters for logs.

use substations_domain::error::RegistryError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The database URL was rejected or the file could not be opened.
    #[error("cannot open substation database")]
    Open(#[source] sqlx::Error),

    /// The `substations` schema could not be brought up to date.
    #[error("cannot migrate substation schema")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A read or write against the `substations` table failed, including
    /// rows that no longer decode into a valid record.
    #[error("substation query failed")]
    Query(#[from] sqlx::Error),
}

impl From<StorageError> for RegistryError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
