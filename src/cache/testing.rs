//! Fake roster source shared by the cache and app tests.

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::api::api_types::{ApiRosterEntry, ApiRosterPerson};
use crate::api::types::RosterKey;
use crate::api::ApiError;

use super::traits::RosterSource;

/// Serves a fixed roster (or fails when `entries` is None) and counts calls.
/// Keys added with `fail_for` always fail.
pub struct FakeSource {
  entries: Mutex<Option<Vec<ApiRosterEntry>>>,
  failing_keys: Mutex<HashSet<RosterKey>>,
  calls: AtomicUsize,
}

impl FakeSource {
  pub fn serving(entries: Vec<ApiRosterEntry>) -> Self {
    Self {
      entries: Mutex::new(Some(entries)),
      failing_keys: Mutex::new(HashSet::new()),
      calls: AtomicUsize::new(0),
    }
  }

  pub fn failing() -> Self {
    Self {
      entries: Mutex::new(None),
      failing_keys: Mutex::new(HashSet::new()),
      calls: AtomicUsize::new(0),
    }
  }

  pub fn set_entries(&self, entries: Vec<ApiRosterEntry>) {
    *self.entries.lock().unwrap() = Some(entries);
  }

  pub fn fail_for(self, key: RosterKey) -> Self {
    self.failing_keys.lock().unwrap().insert(key);
    self
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

impl RosterSource for FakeSource {
  fn fetch_roster(
    &self,
    key: RosterKey,
  ) -> impl Future<Output = Result<Vec<ApiRosterEntry>, ApiError>> + Send {
    self.calls.fetch_add(1, Ordering::SeqCst);
    let entries = if self.failing_keys.lock().unwrap().contains(&key) {
      None
    } else {
      self.entries.lock().unwrap().clone()
    };
    let result = entries.ok_or_else(|| ApiError::ServerError("unavailable".into()));
    async move {
      // Give concurrent callers a chance to interleave
      tokio::task::yield_now().await;
      result
    }
  }
}

pub fn entry(name: &str, number: &str) -> ApiRosterEntry {
  ApiRosterEntry {
    roster: ApiRosterPerson {
      name: name.to_string(),
    },
    number: number.to_string(),
  }
}

pub fn arthur_and_barbara() -> Vec<ApiRosterEntry> {
  vec![entry("Arthur", "23"), entry("Barbara", "4")]
}
