use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
  #[error("Network error: {0}")]
  Network(#[from] reqwest::Error),

  #[error("Resource not found: {0}")]
  NotFound(String),

  #[error("Server error: {0}")]
  ServerError(String),

  #[error("Invalid response: {0}")]
  InvalidResponse(String),

  #[error("Failed to decode response: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("Invalid API URL: {0}")]
  InvalidUrl(#[from] url::ParseError),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
  fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
      return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
      end -= 1;
    }
    format!(
      "{}... (truncated, {} total bytes)",
      &body[..end],
      body.len()
    )
  }

  pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
    let truncated = Self::truncate_body(body);
    match status.as_u16() {
      404 => ApiError::NotFound(truncated),
      500..=599 => ApiError::ServerError(truncated),
      _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
    }
  }
}

/// A roster entry that cannot become a player.
#[derive(Error, Debug)]
pub enum EntryError {
  #[error("Invalid jersey number {value:?} for {name}")]
  InvalidJerseyNumber {
    name: String,
    value: String,
    #[source]
    source: ParseIntError,
  },

  #[error("Roster entry with jersey number {number:?} has no name")]
  MissingName { number: String },
}
