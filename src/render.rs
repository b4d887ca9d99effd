//! Plain-text tables for schedule and roster listings.

use unicode_width::UnicodeWidthStr;

use crate::api::types::{Game, Player};

/// Pad `s` to `width` terminal columns.
fn pad(s: &str, width: usize) -> String {
  format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
  cells
    .map(UnicodeWidthStr::width)
    .chain(std::iter::once(header.width()))
    .max()
    .unwrap_or(0)
}

/// One row per game: index, date, time, home, guest.
pub fn schedule_table(games: &[Game]) -> String {
  if games.is_empty() {
    return "No games scheduled.\n".to_string();
  }

  let dates: Vec<String> = games.iter().map(Game::display_date).collect();
  let home_w = column_width("HOME", games.iter().map(|g| g.home.name.as_str()));
  let time_w = column_width("TIME", games.iter().map(|g| g.play_time.as_str()));
  let idx_w = games.len().to_string().len().max(1);

  let mut out = format!(
    "{}  {}  {}  {}  GUEST\n",
    pad("#", idx_w),
    pad("DATE", 10),
    pad("TIME", time_w),
    pad("HOME", home_w)
  );
  for (i, (game, date)) in games.iter().zip(&dates).enumerate() {
    out.push_str(&format!(
      "{}  {}  {}  {}  {}\n",
      pad(&i.to_string(), idx_w),
      pad(date, 10),
      pad(&game.play_time, time_w),
      pad(&game.home.name, home_w),
      game.guest.name
    ));
  }
  out
}

/// One row per player: jersey number, name.
pub fn roster_table(players: &[Player]) -> String {
  if players.is_empty() {
    return "No players stored for this roster.\n".to_string();
  }

  let mut out = String::from("  NO  NAME\n");
  for player in players {
    out.push_str(&format!("{:>4}  {}\n", player.jersey_no, player.name));
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::types::Team;
  use chrono::{TimeZone, Utc};

  #[test]
  fn test_roster_table() {
    let players = vec![Player::new("Barbara", 4), Player::new("Arthur", 23)];
    assert_eq!(
      roster_table(&players),
      "  NO  NAME\n   4  Barbara\n  23  Arthur\n"
    );
  }

  #[test]
  fn test_empty_tables() {
    assert_eq!(roster_table(&[]), "No players stored for this roster.\n");
    assert_eq!(schedule_table(&[]), "No games scheduled.\n");
  }

  #[test]
  fn test_schedule_table_aligns_wide_names() {
    let game = Game {
      play_date: Utc.with_ymd_and_hms(2017, 9, 2, 12, 0, 0).unwrap(),
      play_time: "13:00".into(),
      home: Team {
        id: Some(151),
        name: "雞老師好胖".into(),
      },
      guest: Team {
        id: Some(234),
        name: "Power Rangers".into(),
      },
    };
    let table = schedule_table(&[game]);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("#  DATE        TIME   HOME        GUEST"));
    assert!(lines[1].ends_with("雞老師好胖  Power Rangers"));
  }

  #[test]
  fn test_pad_counts_wide_chars() {
    assert_eq!(pad("ab", 4), "ab  ");
    assert_eq!(pad("雞", 4), "雞  ");
    assert_eq!(pad("toolong", 3), "toolong");
  }

  #[test]
  fn test_pad_ignores_combining_marks_and_counts_emoji() {
    assert_eq!(pad("e\u{301}", 3), "e\u{301}  ");
    assert_eq!(pad("🏀", 3), "🏀 ");
    assert_eq!(pad("𠀀", 3), "𠀀 ");
  }
}
