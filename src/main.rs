mod api;
mod app;
mod cache;
mod config;
mod db;
mod render;
mod session;

use api::types::RosterKey;
use clap::{Parser, Subcommand};
use color_eyre::Result;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "hoops")]
#[command(about = "Basketball season schedules and team rosters, with an offline roster cache")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/hoops/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Season to use instead of the configured one
  #[arg(short, long)]
  season: Option<u64>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every game of the season
  Schedule,
  /// Show one game of the schedule and its roster
  Game {
    /// Position of the game in the schedule listing
    index: usize,
  },
  /// Show the roster for a home/guest team pairing
  Roster {
    #[arg(long)]
    home: u64,
    #[arg(long)]
    guest: u64,
  },
  /// Look a team up in the season schedule and show its roster
  Team {
    /// Team name as it appears in the schedule
    name: String,
  },
  /// Cache the roster of every game in the season
  Sync,
}

/// Log to a file so stdout stays free for tables.
/// Use RUST_LOG to control the level (e.g., RUST_LOG=debug).
fn init_tracing(config: &config::Config) -> Result<Option<WorkerGuard>> {
  let Some(path) = config.log_path() else {
    return Ok(None);
  };
  let (Some(dir), Some(file_name)) = (path.parent(), path.file_name()) else {
    return Ok(None);
  };
  std::fs::create_dir_all(dir)?;

  let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(writer).with_ansi(false))
    .with(filter)
    .init();

  Ok(Some(guard))
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let config = config::Config::load(args.config.as_deref())?;
  let _log_guard = init_tracing(&config)?;

  let app = app::App::new(config)?;
  match args.command {
    Command::Schedule => app.show_schedule(args.season).await?,
    Command::Game { index } => app.show_game(args.season, index).await?,
    Command::Roster { home, guest } => app.show_roster(RosterKey::new(home, guest)).await?,
    Command::Team { name } => app.show_team(args.season, &name).await?,
    Command::Sync => app.sync_season(args.season).await?,
  }

  Ok(())
}
