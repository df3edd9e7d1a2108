use std::io;

use tempfile::PersistError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Table [{table}] was not found")]
    TableNotFound {
        table: String
    },
    #[error("Table [{table}] does not hold {expected} rows")]
    SchemaMismatch {
        table: String,
        expected: &'static str
    },
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Storage CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Storage commit error: {0}")]
    Persist(#[from] PersistError)
}
