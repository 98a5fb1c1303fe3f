//! Handlers for `/events` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/events` | Discovery pipeline, see [`ListParams`] |
//! | `GET`  | `/events/{id}` | 404 if not found |
//! | `GET`  | `/events/{id}/attendees` | `?search=&page=` |
//! | `GET`  | `/categories` | Event categories, then connection categories |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use sang_core::{
  attendee::{AttendeeCard, search_attendees},
  category::{CATEGORIES, ConnectionCategory},
  discovery::{
    DateRange,
    DiscoveryFilters,
    DiscoveryQuery,
    EventSort,
    RegistrationFilter,
    SortDirection,
    SortOption,
    discover,
  },
  event::{CategoryFilter, EVENT_CATEGORIES, Event},
  pagination::{Page, PageMarker, visible_pages},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
  pub search:       String,
  /// Category name; `All` or absent disables the filter.
  pub category:     String,
  pub registration: RegistrationFilter,
  pub date_range:   DateRange,
  /// Exact locations separated by `|`, since locations contain commas.
  pub cities:       String,
  pub sort:         SortOption,
  pub direction:    SortDirection,
  pub page:         Option<usize>,
  pub page_size:    Option<usize>,
}

impl ListParams {
  fn into_query(self, default_page_size: usize) -> DiscoveryQuery {
    let cities = self
      .cities
      .split('|')
      .map(str::trim)
      .filter(|c| !c.is_empty())
      .map(str::to_owned)
      .collect();
    DiscoveryQuery {
      category:  CategoryFilter::from(self.category.as_str()),
      filters:   DiscoveryFilters {
        registration: self.registration,
        date_range: self.date_range,
        cities,
      },
      sort:      EventSort { option: self.sort, direction: self.direction },
      page:      self.page.unwrap_or(1),
      page_size: self.page_size.unwrap_or(default_page_size),
      search:    self.search,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
  pub featured:    Vec<Event>,
  pub regular:     Vec<Event>,
  pub page:        usize,
  pub page_size:   usize,
  pub total_items: usize,
  pub total_pages: usize,
  /// Page selector, with ellipses.
  pub pages:       Vec<PageMarker>,
}

/// `GET /events`
pub async fn list(
  State(state): State<AppState>,
  Query(params): Query<ListParams>,
) -> Json<DiscoveryResponse> {
  let query = params.into_query(state.config.pagination.events_per_page);
  let result = discover(&state.catalog, &query);
  let page = &result.page;
  Json(DiscoveryResponse {
    pages:       visible_pages(page.page, page.total_pages),
    page:        page.page,
    page_size:   page.page_size,
    total_items: page.total_items,
    total_pages: page.total_pages,
    featured:    result.featured.iter().map(|e| (*e).clone()).collect(),
    regular:     result.regular.iter().map(|e| (*e).clone()).collect(),
  })
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /events/{id}`
pub async fn get_one(
  State(state): State<AppState>,
  Path(id): Path<u32>,
) -> Result<Json<Event>, ApiError> {
  let event = state
    .event(id)
    .ok_or_else(|| ApiError::NotFound(format!("event {id} not found")))?;
  Ok(Json(event.clone()))
}

// ─── Attendees ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AttendeeParams {
  pub search: String,
  pub page:   Option<usize>,
}

/// `GET /events/{id}/attendees` — an unknown event is a 404; a known event
/// without attendees is an empty page.
pub async fn attendees(
  State(state): State<AppState>,
  Path(id): Path<u32>,
  Query(params): Query<AttendeeParams>,
) -> Result<Json<Page<AttendeeCard>>, ApiError> {
  if state.event(id).is_none() {
    return Err(ApiError::NotFound(format!("event {id} not found")));
  }
  let list = state.attendees.get(&id).map(Vec::as_slice).unwrap_or_default();
  let page = search_attendees(
    list,
    &params.search,
    params.page.unwrap_or(1),
    state.config.pagination.attendees_per_page,
  );
  Ok(Json(page.map(AttendeeCard::from)))
}

// ─── Categories ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
  pub events:      &'static [&'static str],
  pub connections: &'static [ConnectionCategory],
}

/// `GET /categories`
pub async fn categories() -> Json<CategoriesResponse> {
  Json(CategoriesResponse {
    events:      &EVENT_CATEGORIES,
    connections: &CATEGORIES,
  })
}
