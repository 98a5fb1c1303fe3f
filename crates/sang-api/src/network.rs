//! Handlers for `/connections` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/connections` | `?search=&category=&sort=&page=` |
//! | `GET`    | `/connections/{id}` | Profile view; 404 if not found |
//! | `PUT`    | `/connections/{id}/category` | Body: `{"category":"mentor"}` |
//! | `DELETE` | `/connections/{id}` | 204 |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
};
use sang_core::{
  connection::{ConnectionQuery, ConnectionSort, ConnectionView},
  pagination::Page,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
  pub search:   String,
  pub category: Option<String>,
  pub sort:     ConnectionSort,
  pub page:     Option<usize>,
}

/// `GET /connections`
pub async fn list(
  State(state): State<AppState>,
  Query(params): Query<ListParams>,
) -> Json<Page<ConnectionView>> {
  let query = ConnectionQuery {
    search:    params.search,
    category:  params.category.filter(|c| !c.is_empty() && c != "all"),
    sort:      params.sort,
    page:      params.page.unwrap_or(1),
    page_size: state.config.pagination.connections_per_page,
  };
  let book = state.connections.read().await;
  Json(book.browse(&query).map(ConnectionView::from))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /connections/{id}`
pub async fn get_one(
  State(state): State<AppState>,
  Path(id): Path<String>,
) -> Result<Json<ConnectionView>, ApiError> {
  let book = state.connections.read().await;
  let connection = book
    .get(&id)
    .ok_or_else(|| ApiError::NotFound(format!("connection {id} not found")))?;
  Ok(Json(ConnectionView::from(connection)))
}

// ─── Recategorise ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CategoryBody {
  pub category: String,
}

/// `PUT /connections/{id}/category`
pub async fn change_category(
  State(state): State<AppState>,
  Path(id): Path<String>,
  Json(body): Json<CategoryBody>,
) -> Result<Json<ConnectionView>, ApiError> {
  let mut book = state.connections.write().await;
  let connection = book.change_category(&id, &body.category)?;
  Ok(Json(ConnectionView::from(connection)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /connections/{id}`
pub async fn delete_one(
  State(state): State<AppState>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  state.connections.write().await.remove(&id)?;
  Ok(StatusCode::NO_CONTENT)
}
