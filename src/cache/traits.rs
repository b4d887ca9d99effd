//! Core traits and types for the roster cache.

use std::future::Future;

use crate::api::api_types::ApiRosterEntry;
use crate::api::types::RosterKey;
use crate::api::ApiError;

/// Where roster entries come from when the local store is empty.
pub trait RosterSource: Send + Sync {
  /// Fetch the raw roster entries for one home/guest pairing.
  fn fetch_roster(
    &self,
    key: RosterKey,
  ) -> impl Future<Output = Result<Vec<ApiRosterEntry>, ApiError>> + Send;
}

/// Indicates where the roster came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
  /// Store was empty, roster fetched and persisted
  Network,
  /// Store already held the roster, no request made
  Cache,
}

/// Result of ensuring a roster is present locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
  pub source: CacheSource,
  /// Players stored for the roster after the sync
  pub players: usize,
}

impl SyncOutcome {
  pub fn cached(players: usize) -> Self {
    Self {
      source: CacheSource::Cache,
      players,
    }
  }

  pub fn fetched(players: usize) -> Self {
    Self {
      source: CacheSource::Network,
      players,
    }
  }

  pub fn was_fetched(&self) -> bool {
    self.source == CacheSource::Network
  }
}
