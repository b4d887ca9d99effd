//! Roster sync policy: fill the local store once, when it is empty.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, error, info};

use crate::api::types::{Player, RosterKey};

use super::error::SyncError;
use super::storage::PlayerStore;
use super::traits::{RosterSource, SyncOutcome};

/// Sits between the application and a roster source.
///
/// A roster that has any rows locally is never fetched again. Concurrent
/// calls for the same roster are serialized, so only the first one fetches.
pub struct RosterSync<S: RosterSource> {
  source: S,
  store: Arc<PlayerStore>,
  /// One lock per roster with a sync running or waiting
  in_flight: Mutex<HashMap<RosterKey, Arc<AsyncMutex<()>>>>,
}

impl<S: RosterSource> RosterSync<S> {
  pub fn new(source: S, store: Arc<PlayerStore>) -> Self {
    Self {
      source,
      store,
      in_flight: Mutex::new(HashMap::new()),
    }
  }

  /// Make sure the store holds the roster for `key`.
  ///
  /// 1. If the store already has players for `key`, return without a request
  /// 2. Otherwise fetch, convert every entry, and save them in one transaction
  ///
  /// A bad entry rejects the whole roster before anything is written.
  pub async fn ensure_roster(&self, key: RosterKey) -> Result<SyncOutcome, SyncError> {
    let slot = self.acquire_slot(key);
    let result = {
      let _held = slot.lock().await;
      self.fill_if_empty(key).await
    };
    self.release_slot(key, slot);
    result
  }

  /// Stored players for `key`, by jersey number then name.
  pub fn roster(&self, key: RosterKey) -> Result<Vec<Player>, SyncError> {
    Ok(self.store.players_ordered(key)?)
  }

  async fn fill_if_empty(&self, key: RosterKey) -> Result<SyncOutcome, SyncError> {
    let existing = self.store.count_players(key)?;
    if existing > 0 {
      debug!(roster = %key, players = existing, "Roster cached, skipping fetch");
      return Ok(SyncOutcome::cached(existing));
    }

    info!(roster = %key, "Roster not cached, fetching");
    let entries = match self.source.fetch_roster(key).await {
      Ok(entries) => entries,
      Err(e) => {
        error!(roster = %key, "Failed to fetch roster: {}", e);
        return Err(e.into());
      }
    };

    let mut players = entries
      .iter()
      .map(|entry| entry.to_player())
      .collect::<Result<Vec<_>, _>>()?;

    self.store.save_roster(key, &mut players)?;
    info!(roster = %key, players = players.len(), "Roster stored");

    Ok(SyncOutcome::fetched(players.len()))
  }

  fn acquire_slot(&self, key: RosterKey) -> Arc<AsyncMutex<()>> {
    let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
    Arc::clone(in_flight.entry(key).or_default())
  }

  /// Drop the map entry once no other caller holds or waits on it.
  fn release_slot(&self, key: RosterKey, slot: Arc<AsyncMutex<()>>) {
    let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
    if Arc::strong_count(&slot) == 2 {
      in_flight.remove(&key);
    }
  }

  #[cfg(test)]
  fn in_flight_len(&self) -> usize {
    self.in_flight.lock().unwrap().len()
  }
}
