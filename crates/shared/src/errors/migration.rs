use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Store error: {0}")]
    Store(#[from] SqlxError),

    #[error("Failed to add column {column}: {source}")]
    AddColumn {
        column: &'static str,
        #[source]
        source: SqlxError,
    },

    #[error("Default row \"{name}\" missing from {table} after insertion")]
    DefaultLookupMissing {
        table: &'static str,
        name: &'static str,
    },

    #[error("Shadow table swap failed: {0}")]
    ShadowSwap(String),
}
