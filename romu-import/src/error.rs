use std::path::PathBuf;

use romu_db::OperationError;
use thiserror::Error;

/// Errors from import, match, gamelist and enrichment batches.
///
/// Any of these aborts the batch; its transaction is rolled back.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{0}")]
    Dat(#[from] romu_dat::DatError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Errors that abort a scan. Per-file failures are counted instead.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
