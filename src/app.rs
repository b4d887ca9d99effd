use crate::api::types::{Player, RosterKey};
use crate::api::ApiClient;
use crate::cache::{PlayerStore, RosterSource, RosterSync, SyncError};
use crate::config::Config;
use crate::render;
use crate::session::Session;
use color_eyre::{eyre::eyre, Result};
use futures::{stream, StreamExt};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Tally of a season-wide sync
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
  pub fetched: usize,
  pub cached: usize,
  pub failed: Vec<(RosterKey, String)>,
}

/// Stored roster plus the reason a sync failed, if it did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterView {
  pub players: Vec<Player>,
  pub warning: Option<String>,
}

/// Main application state
pub struct App {
  /// Application configuration
  config: Config,

  /// League API client
  client: ApiClient,

  /// Roster cache over the local store
  rosters: RosterSync<ApiClient>,
}

impl App {
  pub fn new(config: Config) -> Result<Self> {
    let client = ApiClient::new(&config.api)?;
    let store = Arc::new(PlayerStore::open(config.database.as_deref())?);
    let rosters = RosterSync::new(client.clone(), store);

    Ok(Self {
      config,
      client,
      rosters,
    })
  }

  fn season(&self, season: Option<u64>) -> u64 {
    season.unwrap_or(self.config.season_id)
  }

  /// Fetch a season's schedule into a fresh session
  pub async fn load_session(&self, season: Option<u64>) -> Result<Session> {
    let season_id = self.season(season);
    let schedule = self
      .client
      .get_schedule(season_id)
      .await
      .map_err(|e| eyre!("Failed to load schedule for season {}: {}", season_id, e))?;

    info!(season = season_id, games = schedule.games.len(), "Schedule loaded");
    Ok(Session::new(season_id, schedule))
  }

  pub async fn show_schedule(&self, season: Option<u64>) -> Result<()> {
    let session = self.load_session(season).await?;
    print!("{}", render::schedule_table(session.games()));
    Ok(())
  }

  /// Ensure a roster is cached, then print whatever the store holds for it.
  pub async fn show_roster(&self, key: RosterKey) -> Result<()> {
    let view = roster_view(&self.rosters, key).await?;
    if let Some(warning) = &view.warning {
      eprintln!("{}", warning);
    }
    print!("{}", render::roster_table(&view.players));
    Ok(())
  }

  /// Resolve a team's roster through the season schedule
  pub async fn show_team(&self, season: Option<u64>, team_name: &str) -> Result<()> {
    let session = self.load_session(season).await?;
    let key = session.roster_key_for_team(team_name).ok_or_else(|| {
      eyre!(
        "No game with team ids for {:?} in season {}",
        team_name,
        session.season_id()
      )
    })?;

    println!("{} (roster {})", team_name.trim(), key);
    self.show_roster(key).await
  }

  /// Show one game of the schedule and its roster
  pub async fn show_game(&self, season: Option<u64>, index: usize) -> Result<()> {
    let mut session = self.load_session(season).await?;
    let game = session
      .select_game(index)
      .cloned()
      .ok_or_else(|| eyre!("No game #{} in season {}", index, session.season_id()))?;

    println!(
      "{} {}  {} vs {}",
      game.display_date(),
      game.play_time,
      game.home.name,
      game.guest.name
    );

    match game.roster_key() {
      Some(key) => self.show_roster(key).await,
      None => {
        warn!(game = index, "Game has no team ids, roster unavailable");
        println!("No roster available for this game.");
        Ok(())
      }
    }
  }

  /// Ensure the roster of every game in the season
  pub async fn sync_season(&self, season: Option<u64>) -> Result<()> {
    let session = self.load_session(season).await?;
    let keys = session.schedule().roster_keys();
    let report = sync_rosters(&self.rosters, keys, self.config.sync_concurrency).await?;

    println!(
      "{} fetched, {} cached, {} failed",
      report.fetched,
      report.cached,
      report.failed.len()
    );
    for (key, reason) in &report.failed {
      eprintln!("  {}: {}", key, reason);
    }
    Ok(())
  }
}

/// Ensure a roster, then read back what the store holds for it.
///
/// Network and parse failures become a warning next to the stored players;
/// storage failures are returned.
pub async fn roster_view<S: RosterSource>(
  rosters: &RosterSync<S>,
  key: RosterKey,
) -> Result<RosterView> {
  let warning = match rosters.ensure_roster(key).await {
    Ok(outcome) => {
      info!(
        roster = %key,
        players = outcome.players,
        source = ?outcome.source,
        "Roster ready"
      );
      None
    }
    Err(e @ SyncError::Storage(_)) => {
      error!(roster = %key, "Roster sync aborted: {}", e);
      return Err(e.into());
    }
    Err(e) => {
      warn!(roster = %key, "Roster sync failed: {}", e);
      Some(format!("Roster {} unavailable: {}", key, e))
    }
  };

  let players = rosters.roster(key)?;
  Ok(RosterView { players, warning })
}

/// Ensure every roster in `keys`, at most `concurrency` at a time.
///
/// All syncs run to completion; a storage failure in any of them aborts the
/// report after the others have finished.
pub async fn sync_rosters<S: RosterSource>(
  rosters: &RosterSync<S>,
  keys: Vec<RosterKey>,
  concurrency: usize,
) -> Result<SyncReport> {
  let results: Vec<(RosterKey, Result<_, SyncError>)> = stream::iter(keys)
    .map(|key| async move { (key, rosters.ensure_roster(key).await) })
    .buffer_unordered(concurrency.max(1))
    .collect()
    .await;

  let mut report = SyncReport::default();
  let mut storage_failure = None;
  for (key, result) in results {
    match result {
      Ok(outcome) if outcome.was_fetched() => report.fetched += 1,
      Ok(_) => report.cached += 1,
      Err(e @ SyncError::Storage(_)) => {
        error!(roster = %key, "Roster sync aborted: {}", e);
        storage_failure.get_or_insert(e);
      }
      Err(e) => {
        warn!(roster = %key, "Roster sync failed: {}", e);
        report.failed.push((key, e.to_string()));
      }
    }
  }

  if let Some(e) = storage_failure {
    error!(
      fetched = report.fetched,
      cached = report.cached,
      failed = report.failed.len(),
      "Season sync stopped on storage failure"
    );
    return Err(e.into());
  }

  report.failed.sort_by_key(|(key, _)| (key.home_id, key.guest_id));
  Ok(report)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::testing::{arthur_and_barbara, entry, FakeSource};

  const KEY: RosterKey = RosterKey {
    home_id: 234,
    guest_id: 151,
  };

  const REJECT_INSERTS: &str = "CREATE TRIGGER reject_all BEFORE INSERT ON players
     BEGIN SELECT RAISE(ABORT, 'disk full'); END;";

  fn rosters_with(source: FakeSource) -> (RosterSync<FakeSource>, Arc<PlayerStore>) {
    let store = Arc::new(PlayerStore::in_memory().unwrap());
    (RosterSync::new(source, Arc::clone(&store)), store)
  }

  fn names(view: &RosterView) -> Vec<&str> {
    view.players.iter().map(|p| p.name.as_str()).collect()
  }

  #[tokio::test]
  async fn test_roster_view_after_fetch() {
    let (rosters, _store) = rosters_with(FakeSource::serving(arthur_and_barbara()));

    let view = roster_view(&rosters, KEY).await.unwrap();

    assert_eq!(view.warning, None);
    assert_eq!(names(&view), vec!["Barbara", "Arthur"]);
  }

  #[tokio::test]
  async fn test_roster_view_network_failure_is_a_warning() {
    let (rosters, _store) = rosters_with(FakeSource::failing());

    let view = roster_view(&rosters, KEY).await.unwrap();

    assert!(view.players.is_empty());
    let warning = view.warning.expect("warning for failed fetch");
    assert!(warning.starts_with("Roster 234/151 unavailable: Failed to fetch roster"));
  }

  #[tokio::test]
  async fn test_roster_view_parse_failure_keeps_stored_players() {
    let other = RosterKey::new(12, 13);
    let (rosters, store) = rosters_with(FakeSource::serving(vec![entry("Craig", "N/A")]));
    store.save(other, &mut Player::new("Dana", 9)).unwrap();

    let view = roster_view(&rosters, KEY).await.unwrap();
    assert!(view.players.is_empty());
    assert!(view.warning.unwrap().contains("Rejected roster"));

    let view = roster_view(&rosters, other).await.unwrap();
    assert_eq!(view.warning, None);
    assert_eq!(names(&view), vec!["Dana"]);
  }

  #[tokio::test]
  async fn test_roster_view_storage_failure_is_an_error() {
    let (rosters, store) = rosters_with(FakeSource::serving(arthur_and_barbara()));
    store.execute_batch(REJECT_INSERTS).unwrap();

    assert!(roster_view(&rosters, KEY).await.is_err());
  }

  #[tokio::test]
  async fn test_sync_rosters_tallies_outcomes() {
    let cached = RosterKey::new(5, 6);
    let fetched = RosterKey::new(7, 8);
    let late_failure = RosterKey::new(30, 1);
    let early_failure = RosterKey::new(2, 40);

    let source = FakeSource::serving(arthur_and_barbara())
      .fail_for(late_failure)
      .fail_for(early_failure);
    let (rosters, store) = rosters_with(source);
    store.save(cached, &mut Player::new("Dana", 9)).unwrap();

    let report = sync_rosters(
      &rosters,
      vec![late_failure, cached, fetched, early_failure],
      2,
    )
    .await
    .unwrap();

    assert_eq!(report.fetched, 1);
    assert_eq!(report.cached, 1);
    let failed: Vec<RosterKey> = report.failed.iter().map(|(key, _)| *key).collect();
    assert_eq!(failed, vec![early_failure, late_failure]);
    assert!(report.failed[0].1.contains("unavailable"));
    assert_eq!(store.count_players(fetched).unwrap(), 2);
  }

  #[tokio::test]
  async fn test_sync_rosters_aborts_on_storage_failure() {
    let cached = RosterKey::new(5, 6);
    let (rosters, store) = rosters_with(FakeSource::serving(arthur_and_barbara()));
    store.save(cached, &mut Player::new("Dana", 9)).unwrap();
    store.execute_batch(REJECT_INSERTS).unwrap();

    let result = sync_rosters(&rosters, vec![cached, KEY], 1).await;

    assert!(result.is_err());
    assert_eq!(store.count_players(KEY).unwrap(), 0);
  }

  #[tokio::test]
  async fn test_sync_rosters_with_zero_concurrency_still_runs() {
    let (rosters, _store) = rosters_with(FakeSource::serving(arthur_and_barbara()));

    let report = sync_rosters(&rosters, vec![KEY], 0).await.unwrap();

    assert_eq!(report.fetched, 1);
    assert!(report.failed.is_empty());
  }
}
