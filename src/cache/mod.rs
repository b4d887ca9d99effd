//! Local roster cache.
//!
//! Rosters are filled once, when the store holds no players for them, and are
//! never refreshed afterwards:
//! - Emptiness is checked per roster key, under a per-key lock
//! - Fetched rosters are saved all-or-nothing
//! - Network failures leave the store untouched

mod error;
mod layer;
mod storage;
mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use error::SyncError;
pub use layer::RosterSync;
pub use storage::PlayerStore;
pub use traits::{CacheSource, RosterSource, SyncOutcome};
