use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_BASE_URL: &str = "http://testap.playone-sports.com";
const DEFAULT_SEASON_ID: u64 = 4;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  /// Season listed by `schedule` and used for team lookups
  #[serde(default = "default_season_id")]
  pub season_id: u64,
  /// Roster database path (defaults to $XDG_DATA_HOME/hoops/roster.db)
  pub database: Option<PathBuf>,
  /// Log file path (defaults to $XDG_DATA_HOME/hoops/hoops.log)
  pub log_file: Option<PathBuf>,
  /// How many rosters `sync` fetches at once
  #[serde(default = "default_sync_concurrency")]
  pub sync_concurrency: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  #[serde(default = "default_base_url")]
  pub base_url: String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api: ApiConfig::default(),
      season_id: default_season_id(),
      database: None,
      log_file: None,
      sync_concurrency: default_sync_concurrency(),
    }
  }
}

fn default_base_url() -> String {
  DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
  30
}

fn default_season_id() -> u64 {
  DEFAULT_SEASON_ID
}

fn default_sync_concurrency() -> usize {
  4
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./hoops.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/hoops/config.yaml
  ///
  /// Falls back to defaults when no file exists. `HOOPS_BASE_URL` overrides
  /// the API base URL either way.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Config::default(),
    };

    Ok(config.with_env_overrides(std::env::var("HOOPS_BASE_URL").ok()))
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("hoops.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("hoops").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    let config: Config = serde_yaml::from_str(contents)?;
    if config.sync_concurrency == 0 {
      return Err(eyre!("sync_concurrency must be at least 1"));
    }
    Ok(config)
  }

  fn with_env_overrides(self, base_url: Option<String>) -> Self {
    match base_url.filter(|u| !u.trim().is_empty()) {
      Some(base_url) => Config {
        api: ApiConfig {
          base_url,
          ..self.api
        },
        ..self
      },
      None => self,
    }
  }

  /// Application data directory ($XDG_DATA_HOME/hoops)
  pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .map(|p| p.join("hoops"))
  }

  pub fn log_path(&self) -> Option<PathBuf> {
    self
      .log_file
      .clone()
      .or_else(|| Self::data_dir().map(|d| d.join("hoops.log")))
  }
}
