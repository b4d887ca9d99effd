use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
  #[error("Database error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("Failed to create database directory: {0}")]
  Io(#[from] std::io::Error),

  #[error("Database lock poisoned")]
  LockPoisoned,

  #[error("Could not determine data directory")]
  NoDataDir,
}
