use chrono::{DateTime, Local, Utc};
use std::fmt;

/// Pair of team ids addressing one roster endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RosterKey {
  pub home_id: u64,
  pub guest_id: u64,
}

impl RosterKey {
  pub fn new(home_id: u64, guest_id: u64) -> Self {
    Self { home_id, guest_id }
  }
}

impl fmt::Display for RosterKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.home_id, self.guest_id)
  }
}

/// One roster entry. `id` is assigned by the store on first save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
  pub id: Option<i64>,
  pub name: String,
  pub jersey_no: i64,
}

impl Player {
  pub fn new(name: impl Into<String>, jersey_no: i64) -> Self {
    Self {
      id: None,
      name: name.into(),
      jersey_no,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
  pub id: Option<u64>,
  pub name: String,
}

/// A scheduled game
#[derive(Debug, Clone)]
pub struct Game {
  pub play_date: DateTime<Utc>,
  pub play_time: String,
  pub home: Team,
  pub guest: Team,
}

impl Game {
  /// Roster key for this pairing, if the payload carried both team ids.
  pub fn roster_key(&self) -> Option<RosterKey> {
    Some(RosterKey::new(self.home.id?, self.guest.id?))
  }

  /// Play date as shown in schedule listings (local time, YYYY/MM/DD)
  pub fn display_date(&self) -> String {
    self
      .play_date
      .with_timezone(&Local)
      .format("%Y/%m/%d")
      .to_string()
  }

  pub fn involves(&self, team_name: &str) -> bool {
    let wanted = team_name.trim().to_lowercase();
    self.home.name.to_lowercase() == wanted || self.guest.name.to_lowercase() == wanted
  }
}

/// All games of one season, ordered by play date then play time
#[derive(Debug, Clone, Default)]
pub struct Schedule {
  pub games: Vec<Game>,
}

impl Schedule {
  pub fn new(mut games: Vec<Game>) -> Self {
    games.sort_by(|a, b| {
      a.play_date
        .cmp(&b.play_date)
        .then_with(|| a.play_time.cmp(&b.play_time))
    });
    Self { games }
  }

  /// Distinct roster keys across the season, in schedule order.
  pub fn roster_keys(&self) -> Vec<RosterKey> {
    let mut keys: Vec<RosterKey> = Vec::new();
    for key in self.games.iter().filter_map(Game::roster_key) {
      if !keys.contains(&key) {
        keys.push(key);
      }
    }
    keys
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn game(day: u32, time: &str, home: (Option<u64>, &str), guest: (Option<u64>, &str)) -> Game {
    Game {
      play_date: Utc.with_ymd_and_hms(2017, 9, day, 0, 0, 0).unwrap(),
      play_time: time.to_string(),
      home: Team {
        id: home.0,
        name: home.1.to_string(),
      },
      guest: Team {
        id: guest.0,
        name: guest.1.to_string(),
      },
    }
  }

  #[test]
  fn test_roster_key_display() {
    assert_eq!(RosterKey::new(234, 151).to_string(), "234/151");
  }

  #[test]
  fn test_roster_key_requires_both_ids() {
    let g = game(2, "13:00", (Some(234), "Rangers"), (None, "Chickens"));
    assert_eq!(g.roster_key(), None);

    let g = game(2, "13:00", (Some(234), "Rangers"), (Some(151), "Chickens"));
    assert_eq!(g.roster_key(), Some(RosterKey::new(234, 151)));
  }

  #[test]
  fn test_schedule_sorts_by_date_then_time() {
    let schedule = Schedule::new(vec![
      game(9, "10:00", (Some(1), "A"), (Some(2), "B")),
      game(2, "15:00", (Some(3), "C"), (Some(4), "D")),
      game(2, "13:00", (Some(5), "E"), (Some(6), "F")),
    ]);

    let homes: Vec<&str> = schedule.games.iter().map(|g| g.home.name.as_str()).collect();
    assert_eq!(homes, vec!["E", "C", "A"]);
  }

  #[test]
  fn test_roster_keys_are_distinct() {
    let schedule = Schedule::new(vec![
      game(2, "13:00", (Some(1), "A"), (Some(2), "B")),
      game(9, "13:00", (Some(1), "A"), (Some(2), "B")),
      game(9, "15:00", (None, "C"), (Some(2), "B")),
      game(16, "13:00", (Some(2), "B"), (Some(1), "A")),
    ]);

    assert_eq!(
      schedule.roster_keys(),
      vec![RosterKey::new(1, 2), RosterKey::new(2, 1)]
    );
  }

  #[test]
  fn test_involves_is_case_insensitive() {
    let g = game(2, "13:00", (Some(1), "Power Rangers"), (Some(2), "Chickens"));
    assert!(g.involves("power rangers"));
    assert!(g.involves(" CHICKENS "));
    assert!(!g.involves("Bulls"));
  }
}
