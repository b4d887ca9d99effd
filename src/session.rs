use crate::api::types::{Game, RosterKey, Schedule};

/// Schedule state shared by the commands of one run.
#[derive(Debug, Clone)]
pub struct Session {
  season_id: u64,
  schedule: Schedule,
  selected: Option<usize>,
}

impl Session {
  pub fn new(season_id: u64, schedule: Schedule) -> Self {
    Self {
      season_id,
      schedule,
      selected: None,
    }
  }

  pub fn season_id(&self) -> u64 {
    self.season_id
  }

  pub fn games(&self) -> &[Game] {
    &self.schedule.games
  }

  pub fn schedule(&self) -> &Schedule {
    &self.schedule
  }

  /// Select a game by its position in the schedule. Returns the game, or
  /// `None` (and clears the selection) when out of range.
  pub fn select_game(&mut self, index: usize) -> Option<&Game> {
    self.selected = (index < self.schedule.games.len()).then_some(index);
    self.selected_game()
  }

  pub fn selected_game(&self) -> Option<&Game> {
    self.selected.and_then(|i| self.schedule.games.get(i))
  }

  /// Roster key of the first game featuring `team_name` whose teams both
  /// carry ids. Matching ignores case and surrounding whitespace.
  pub fn roster_key_for_team(&self, team_name: &str) -> Option<RosterKey> {
    self
      .schedule
      .games
      .iter()
      .filter(|game| game.involves(team_name))
      .find_map(Game::roster_key)
  }
}
