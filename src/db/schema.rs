/// Name of the collation used for player names.
pub const NAME_COLLATION: &str = "LOCALIZED_NOCASE";

/// Roster table. `roster_key` is the "{home_id}/{guest_id}" pair the rows were
/// fetched for.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS players (
    id INTEGER PRIMARY KEY,
    roster_key TEXT NOT NULL,
    name TEXT NOT NULL COLLATE LOCALIZED_NOCASE,
    jerseyNo INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_players_roster
    ON players(roster_key, jerseyNo);
"#;
