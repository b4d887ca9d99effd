use std::future::Future;
use std::time::Duration;

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::cache::RosterSource;
use crate::config::ApiConfig;

use super::api_types::{ApiRosterEntry, ApiScheduleResponse};
use super::error::ApiError;
use super::types::{RosterKey, Schedule};

/// League API client.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  base_url: Url,
}

impl ApiClient {
  pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
    let base_url = parse_base_url(&config.base_url)?;
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;

    Ok(Self { client, base_url })
  }

  fn schedule_url(&self, season_id: u64) -> Result<Url, ApiError> {
    Ok(
      self
        .base_url
        .join(&format!("rest/game/listbyseason/{}", season_id))?,
    )
  }

  fn roster_url(&self, key: RosterKey) -> Result<Url, ApiError> {
    Ok(self.base_url.join(&format!(
      "rest/game/listrosters/{}/{}",
      key.home_id, key.guest_id
    ))?)
  }

  /// Get every game of a season
  pub async fn get_schedule(&self, season_id: u64) -> Result<Schedule, ApiError> {
    let url = self.schedule_url(season_id)?;
    let response: ApiScheduleResponse = self.get_json(url).await?;
    response.into_schedule()
  }

  /// Get the raw roster entries for a home/guest pairing
  pub async fn get_roster(&self, key: RosterKey) -> Result<Vec<ApiRosterEntry>, ApiError> {
    let url = self.roster_url(key)?;
    self.get_json(url).await
  }

  async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
    debug!("GET {}", url);

    let response = self
      .client
      .get(url)
      .header(header::ACCEPT, "application/json, text/html")
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
      return Err(ApiError::from_status(status, &body));
    }

    Ok(serde_json::from_str(&body)?)
  }
}

impl RosterSource for ApiClient {
  fn fetch_roster(
    &self,
    key: RosterKey,
  ) -> impl Future<Output = Result<Vec<ApiRosterEntry>, ApiError>> + Send {
    self.get_roster(key)
  }
}

/// Base URLs are joined with relative endpoint paths, so they must end in '/'.
fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
  let trimmed = raw.trim();
  if trimmed.ends_with('/') {
    Ok(Url::parse(trimmed)?)
  } else {
    Ok(Url::parse(&format!("{}/", trimmed))?)
  }
}
