//! SQLite-backed roster store.

use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::api::types::{Player, RosterKey};
use crate::db::{Database, StorageError};

/// Player rows keyed by roster. All access goes through one connection
/// behind a mutex, so writes are serialized.
pub struct PlayerStore {
  conn: Mutex<Connection>,
}

impl PlayerStore {
  pub fn new(db: Database) -> Self {
    Self {
      conn: Mutex::new(db.into_connection()),
    }
  }

  /// Open the store at `path`, or at the default location.
  pub fn open(path: Option<&Path>) -> Result<Self, StorageError> {
    Ok(Self::new(Database::open(path)?))
  }

  #[cfg(test)]
  pub fn in_memory() -> Result<Self, StorageError> {
    Ok(Self::new(Database::open_in_memory()?))
  }

  /// Run raw SQL against the store's connection
  #[cfg(test)]
  pub fn execute_batch(&self, sql: &str) -> Result<(), StorageError> {
    Ok(self.lock()?.execute_batch(sql)?)
  }

  fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
    self.conn.lock().map_err(|_| StorageError::LockPoisoned)
  }

  /// Number of players stored for a roster.
  pub fn count_players(&self, key: RosterKey) -> Result<usize, StorageError> {
    let conn = self.lock()?;
    let count: i64 = conn.query_row(
      "SELECT COUNT(*) FROM players WHERE roster_key = ?",
      params![key.to_string()],
      |row| row.get(0),
    )?;
    Ok(count as usize)
  }

  /// Insert a new player, or update a persisted one. Assigns `player.id` on
  /// insert.
  pub fn save(&self, key: RosterKey, player: &mut Player) -> Result<(), StorageError> {
    let conn = self.lock()?;
    player.id = Some(save_row(&conn, key, player)?);
    Ok(())
  }

  /// Save a whole roster in one transaction. On failure nothing is written
  /// and no ids are assigned.
  pub fn save_roster(&self, key: RosterKey, players: &mut [Player]) -> Result<(), StorageError> {
    let mut conn = self.lock()?;
    let tx = conn.transaction()?;

    let mut ids = Vec::with_capacity(players.len());
    for player in players.iter() {
      ids.push(save_row(&tx, key, player)?);
    }
    tx.commit()?;

    for (player, id) in players.iter_mut().zip(ids) {
      player.id = Some(id);
    }
    Ok(())
  }

  /// Players of a roster ordered by jersey number, then name.
  pub fn players_ordered(&self, key: RosterKey) -> Result<Vec<Player>, StorageError> {
    let conn = self.lock()?;
    let mut stmt = conn.prepare(
      "SELECT id, name, jerseyNo FROM players
       WHERE roster_key = ?
       ORDER BY jerseyNo ASC, name",
    )?;

    let players = stmt
      .query_map(params![key.to_string()], |row| {
        Ok(Player {
          id: Some(row.get(0)?),
          name: row.get(1)?,
          jersey_no: row.get(2)?,
        })
      })?
      .collect::<Result<Vec<_>, _>>()?;

    Ok(players)
  }
}

/// Insert when the player has no id, otherwise update by id (re-inserting
/// under that id if the row is gone). Returns the row id.
fn save_row(conn: &Connection, key: RosterKey, player: &Player) -> rusqlite::Result<i64> {
  let roster_key = key.to_string();

  match player.id {
    None => {
      conn.execute(
        "INSERT INTO players (roster_key, name, jerseyNo) VALUES (?, ?, ?)",
        params![roster_key, player.name, player.jersey_no],
      )?;
      Ok(conn.last_insert_rowid())
    }
    Some(id) => {
      let changed = conn.execute(
        "UPDATE players SET roster_key = ?, name = ?, jerseyNo = ? WHERE id = ?",
        params![roster_key, player.name, player.jersey_no, id],
      )?;
      if changed == 0 {
        conn.execute(
          "INSERT INTO players (id, roster_key, name, jerseyNo) VALUES (?, ?, ?, ?)",
          params![id, roster_key, player.name, player.jersey_no],
        )?;
      }
      Ok(id)
    }
  }
}
