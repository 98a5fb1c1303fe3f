//! Handlers for `/notifications` endpoints.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use sang_core::notification::Notification;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct InboxResponse {
  pub unread_count:  usize,
  /// Newest first.
  pub notifications: Vec<Notification>,
}

/// `GET /notifications`
pub async fn list(State(state): State<AppState>) -> Json<InboxResponse> {
  let store = state.notifications.read().await;
  Json(InboxResponse {
    unread_count:  store.unread_count(),
    notifications: store.list().into_iter().cloned().collect(),
  })
}

/// `POST /notifications/{id}/read` — unknown ids are a no-op.
pub async fn mark_read(
  State(state): State<AppState>,
  Path(id): Path<String>,
) -> StatusCode {
  state.notifications.write().await.mark_read(&id);
  StatusCode::NO_CONTENT
}

/// `POST /notifications/read-all`
pub async fn mark_all_read(State(state): State<AppState>) -> StatusCode {
  state.notifications.write().await.mark_all_read();
  StatusCode::NO_CONTENT
}
