//! Runtime configuration, deserialised from `sang.toml` and `SANG_*`
//! environment variables.

use serde::Deserialize;
use sang_core::{
  attendee::DEFAULT_ATTENDEES_PER_PAGE,
  connection::DEFAULT_CONNECTIONS_PER_PAGE,
  discovery::DEFAULT_EVENTS_PER_PAGE,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  /// Returned by `GET /api/ping`.
  pub ping_message: String,
  pub pagination:   PaginationConfig,
  /// User id the demo server acts as.
  pub current_user: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:         "127.0.0.1".to_string(),
      port:         8080,
      ping_message: "ping".to_string(),
      pagination:   PaginationConfig::default(),
      current_user: "user_current".to_string(),
    }
  }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
  pub events_per_page:      usize,
  pub attendees_per_page:   usize,
  pub connections_per_page: usize,
}

impl Default for PaginationConfig {
  fn default() -> Self {
    Self {
      events_per_page:      DEFAULT_EVENTS_PER_PAGE,
      attendees_per_page:   DEFAULT_ATTENDEES_PER_PAGE,
      connections_per_page: DEFAULT_CONNECTIONS_PER_PAGE,
    }
  }
}
