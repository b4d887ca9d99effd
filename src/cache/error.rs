use thiserror::Error;

use crate::api::{ApiError, EntryError};
use crate::db::StorageError;

#[derive(Error, Debug)]
pub enum SyncError {
  #[error("Failed to fetch roster: {0}")]
  Network(#[from] ApiError),

  #[error("Rejected roster: {0}")]
  Parse(#[from] EntryError),

  #[error("Failed to store roster: {0}")]
  Storage(#[from] StorageError),
}
