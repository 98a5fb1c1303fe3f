//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  Forbidden(String),

  #[error(transparent)]
  Core(#[from] sang_core::Error),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    use sang_core::Error as E;

    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
      ApiError::Core(E::ConnectionNotFound(_) | E::EventNotFound(_)) => {
        StatusCode::NOT_FOUND
      }
      ApiError::Core(E::UnknownCategory(_) | E::InvalidStep { .. }) => {
        StatusCode::BAD_REQUEST
      }
      ApiError::Core(E::Backend(_) | E::Serialization(_)) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
