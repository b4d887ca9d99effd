//! Serde-deserializable types matching the league API responses.
//!
//! These types are separate from domain types to allow clean deserialization
//! while keeping domain types focused on application needs.

use chrono::DateTime;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

use super::error::{ApiError, EntryError};
use super::types::{Game, Player, Schedule, Team};

// ============================================================================
// Schedule endpoint response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiTeam {
  pub id: Option<u64>,
  #[serde(default)]
  pub name: String,
}

impl From<ApiTeam> for Team {
  fn from(team: ApiTeam) -> Self {
    Team {
      id: team.id,
      name: team.name,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct ApiGame {
  /// Epoch milliseconds; the API sometimes sends it as a float
  #[serde(rename = "playDate")]
  pub play_date: f64,
  #[serde(rename = "playTime", default)]
  pub play_time: String,
  #[serde(rename = "teamHome")]
  pub team_home: ApiTeam,
  #[serde(rename = "teamGuest")]
  pub team_guest: ApiTeam,
}

impl ApiGame {
  pub fn into_game(self) -> Result<Game, ApiError> {
    let millis = self.play_date as i64;
    let play_date = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
      ApiError::InvalidResponse(format!("playDate out of range: {}", self.play_date))
    })?;

    Ok(Game {
      play_date,
      play_time: self.play_time,
      home: self.team_home.into(),
      guest: self.team_guest.into(),
    })
  }
}

/// Games grouped by day; keys are epoch-millisecond strings.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct ApiScheduleResponse {
  pub days: BTreeMap<String, Vec<ApiGame>>,
}

impl ApiScheduleResponse {
  pub fn into_schedule(self) -> Result<Schedule, ApiError> {
    let games = self
      .days
      .into_values()
      .flatten()
      .map(ApiGame::into_game)
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Schedule::new(games))
  }
}

// ============================================================================
// Roster endpoint response
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiRosterPerson {
  #[serde(default, deserialize_with = "string_or_default")]
  pub name: String,
}

/// One element of the roster array. `number` is a decimal string, though a
/// bare JSON number is accepted too. Nulls decode as empty values so that
/// `to_player` rejects the entry instead of the whole response failing to
/// decode.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRosterEntry {
  #[serde(default, deserialize_with = "person_or_default")]
  pub roster: ApiRosterPerson,
  #[serde(default, deserialize_with = "string_or_default")]
  pub number: String,
}

fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  let value = serde_json::Value::deserialize(deserializer)?;
  Ok(match value {
    serde_json::Value::String(s) => s,
    serde_json::Value::Number(n) => n.to_string(),
    serde_json::Value::Bool(b) => b.to_string(),
    serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
      String::new()
    }
  })
}

fn person_or_default<'de, D>(deserializer: D) -> Result<ApiRosterPerson, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<ApiRosterPerson>::deserialize(deserializer)?.unwrap_or_default())
}

impl ApiRosterEntry {
  pub fn to_player(&self) -> Result<Player, EntryError> {
    let name = self.roster.name.trim();
    if name.is_empty() {
      return Err(EntryError::MissingName {
        number: self.number.clone(),
      });
    }

    let jersey_no = self
      .number
      .trim()
      .parse::<i64>()
      .map_err(|source| EntryError::InvalidJerseyNumber {
        name: name.to_string(),
        value: self.number.clone(),
        source,
      })?;

    Ok(Player::new(name, jersey_no))
  }
}
