mod error;
pub mod schema;

pub use error::StorageError;

use rusqlite::Connection;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::Config;

/// Database connection wrapper for the roster store
pub struct Database {
  conn: Connection,
}

impl Database {
  /// Open or create the database at `path`, or at the default location
  pub fn open(path: Option<&Path>) -> Result<Self, StorageError> {
    let path = match path {
      Some(p) => p.to_path_buf(),
      None => Self::default_path()?,
    };

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }

    debug!("Opening roster database at {}", path.display());
    Self::init(Connection::open(&path)?)
  }

  /// Open a private in-memory database
  #[cfg(test)]
  pub fn open_in_memory() -> Result<Self, StorageError> {
    Self::init(Connection::open_in_memory()?)
  }

  fn init(conn: Connection) -> Result<Self, StorageError> {
    // Collations must exist before any table that names them is touched
    conn.create_collation(schema::NAME_COLLATION, localized_nocase)?;

    let db = Self { conn };
    db.run_migrations()?;
    Ok(db)
  }

  /// Get the default database path
  fn default_path() -> Result<PathBuf, StorageError> {
    Config::data_dir()
      .map(|dir| dir.join("roster.db"))
      .ok_or(StorageError::NoDataDir)
  }

  /// Run database migrations
  fn run_migrations(&self) -> Result<(), StorageError> {
    self.conn.execute_batch(schema::SCHEMA)?;
    Ok(())
  }

  /// Give up the wrapper and keep the configured connection
  pub fn into_connection(self) -> Connection {
    self.conn
  }
}

/// Locale-aware, case-insensitive name comparison.
///
/// Names are compared first with accents and case folded away (canonical
/// decomposition, combining marks dropped, lowercased), so "Émile" sorts
/// between "elodie" and "eve". Ties are broken on the lowercase accented form,
/// then on the raw string, so ordering stays total.
fn localized_nocase(a: &str, b: &str) -> Ordering {
  fold_accents(a)
    .cmp(&fold_accents(b))
    .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
    .then_with(|| a.cmp(b))
}

fn fold_accents(s: &str) -> String {
  s.nfd()
    .filter(|c| !is_combining_mark(*c))
    .flat_map(char::to_lowercase)
    .collect()
}
