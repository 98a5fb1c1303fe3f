//! Error types for `sang-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown connection category: {0:?}")]
  UnknownCategory(String),

  #[error("connection not found: {0}")]
  ConnectionNotFound(String),

  #[error("event not found: {0}")]
  EventNotFound(u32),

  #[error("cannot {action} from the {step} step")]
  InvalidStep {
    action: &'static str,
    step:   crate::registration::RegistrationStep,
  },

  #[error("registration backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
