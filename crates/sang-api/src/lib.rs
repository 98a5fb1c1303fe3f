//! JSON API for Sang.
//!
//! Exposes an axum [`Router`] over the `sang-core` pipelines and in-memory
//! state seeded from [`seed::Seed`]. Auth, TLS, and persistence are out of
//! scope.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", sang_api::api_router(state))
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod network;
pub mod notifications;
pub mod organizations;
pub mod registrations;
pub mod seed;

use std::{collections::HashMap, sync::Arc};

use axum::{
  Json,
  Router,
  extract::State,
  routing::{get, post, put},
};
use sang_core::{
  attendee::Attendee,
  connection::ConnectionBook,
  event::Event,
  notification::NotificationStore,
};
use serde_json::{Value, json};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

pub use crate::config::ServerConfig;
pub use error::ApiError;
use registrations::InMemoryRegistrations;
use seed::{OrganizationData, Seed};

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
  pub catalog:       Arc<Vec<Event>>,
  pub attendees:     Arc<HashMap<u32, Vec<Attendee>>>,
  pub connections:   Arc<RwLock<ConnectionBook>>,
  pub notifications: Arc<RwLock<NotificationStore>>,
  pub registrations: Arc<InMemoryRegistrations>,
  pub organizations: Arc<OrganizationData>,
  pub config:        Arc<ServerConfig>,
}

impl AppState {
  pub fn new(seed: Seed, config: ServerConfig) -> Self {
    Self {
      catalog:       Arc::new(seed.events),
      attendees:     Arc::new(seed.attendees),
      connections:   Arc::new(RwLock::new(ConnectionBook::new(seed.connections))),
      notifications: Arc::new(RwLock::new(NotificationStore::new(
        seed.notifications,
      ))),
      registrations: Arc::new(InMemoryRegistrations::new(seed.registrations)),
      organizations: Arc::new(seed.organizations),
      config:        Arc::new(config),
    }
  }

  pub fn event(&self, id: u32) -> Option<&Event> {
    self.catalog.iter().find(|e| e.id == id)
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router. Nest it under `/api`.
pub fn api_router(state: AppState) -> Router<()> {
  Router::new()
    .route("/ping", get(ping))
    .route("/demo", get(demo))
    // Events
    .route("/events", get(events::list))
    .route("/events/{id}", get(events::get_one))
    .route("/events/{id}/attendees", get(events::attendees))
    .route("/events/{id}/register", post(registrations::register))
    .route("/events/{id}/registration", get(registrations::get_one))
    .route("/registrations", get(registrations::list))
    .route("/categories", get(events::categories))
    // Network
    .route("/connections", get(network::list))
    .route(
      "/connections/{id}",
      get(network::get_one).delete(network::delete_one),
    )
    .route("/connections/{id}/category", put(network::change_category))
    // Notifications
    .route("/notifications", get(notifications::list))
    .route("/notifications/read-all", post(notifications::mark_all_read))
    .route("/notifications/{id}/read", post(notifications::mark_read))
    // Organizations
    .route("/organizations", get(organizations::list))
    .route("/organizations/{id}/requests", get(organizations::requests))
    .route("/invitations", get(organizations::invitations))
    .with_state(state)
}

/// The full application: the API under `/api`, with request tracing.
pub fn app(state: AppState) -> Router {
  Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}

async fn ping(State(state): State<AppState>) -> Json<Value> {
  Json(json!({ "message": state.config.ping_message }))
}

async fn demo() -> Json<Value> { Json(json!({ "message": "Hello from Sang API" })) }

#[cfg(test)]
mod tests {
  use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
  };
  use tower::ServiceExt as _;

  use super::*;

  fn state() -> AppState {
    AppState::new(Seed::demo().unwrap(), ServerConfig {
      ping_message: "pong".to_string(),
      ..Default::default()
    })
  }

  async fn send(
    state: AppState,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app(state).oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
  }

  fn ids(events: &Value) -> Vec<u64> {
    events
      .as_array()
      .unwrap()
      .iter()
      .map(|e| e["id"].as_u64().unwrap())
      .collect()
  }

  // ── Misc ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn ping_uses_configured_message() {
    let (status, body) = send(state(), "GET", "/api/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "pong");
  }

  #[tokio::test]
  async fn categories_lists_both_registries() {
    let (_, body) = send(state(), "GET", "/api/categories", None).await;
    assert_eq!(body["events"].as_array().unwrap().len(), 5);
    assert_eq!(body["connections"][4]["id"], "stranger");
  }

  // ── Events ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn featured_split_follows_pagination() {
    let (status, body) = send(state(), "GET", "/api/events", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_items"], 10);
    assert_eq!(body["total_pages"], 2);
    // Name order puts both featured events on the second page.
    assert!(body["featured"].as_array().unwrap().is_empty());
    assert_eq!(ids(&body["regular"]), [5, 7, 9, 2, 8, 3]);

    let (_, body) = send(state(), "GET", "/api/events?page=2", None).await;
    assert_eq!(ids(&body["featured"]), [4, 1]);
    assert_eq!(ids(&body["regular"]), [10, 6]);
  }

  #[tokio::test]
  async fn filters_and_sort_from_query() {
    let (_, body) = send(
      state(),
      "GET",
      "/api/events?category=Business&registration=open&sort=attendees&direction=desc",
      None,
    )
    .await;
    assert_eq!(body["total_items"], 1);
    assert_eq!(ids(&body["regular"]), [8]);

    let (_, body) = send(
      state(),
      "GET",
      "/api/events?cities=New%20York,%20NY%7CChicago,%20IL&sort=date",
      None,
    )
    .await;
    assert_eq!(ids(&body["regular"]), [2, 3, 10]);
  }

  #[tokio::test]
  async fn out_of_range_page_is_clamped() {
    let (_, body) = send(state(), "GET", "/api/events?page=99", None).await;
    assert_eq!(body["page"], 2);
    assert_eq!(body["featured"].as_array().unwrap().len(), 2);
    assert_eq!(body["regular"].as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn unknown_event_is_404() {
    let (status, body) = send(state(), "GET", "/api/events/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "event 42 not found");

    let (status, _) = send(state(), "GET", "/api/events/42/attendees", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) =
      send(state(), "GET", "/api/connections/zzz", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "connection zzz not found");
  }

  #[tokio::test]
  async fn attendees_are_paged_and_gated() {
    let (_, body) = send(state(), "GET", "/api/events/1/attendees", None).await;
    assert_eq!(body["total_items"], 10);
    assert_eq!(body["items"].as_array().unwrap().len(), 8);
    // Marcus shares linkedin and twitter but not phone.
    let marcus = &body["items"][1];
    assert_eq!(marcus["name"], "Marcus Johnson");
    assert_eq!(marcus["contact"][1]["disclosure"]["state"], "withheld");

    let (_, body) =
      send(state(), "GET", "/api/events/2/attendees?search=x", None).await;
    assert_eq!(body["total_items"], 0);
  }

  #[tokio::test]
  async fn attendee_search_skips_withheld_role() {
    // Tom Nguyen withholds "DevOps Engineer" but shares "ByteWorks".
    let (_, body) =
      send(state(), "GET", "/api/events/1/attendees?search=devops", None).await;
    assert_eq!(body["total_items"], 0);

    let (_, body) =
      send(state(), "GET", "/api/events/1/attendees?search=byteworks", None)
        .await;
    assert_eq!(body["total_items"], 1);
    assert_eq!(body["items"][0]["name"], "Tom Nguyen");
  }

  // ── Registration ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn register_for_approval_event_is_pending() {
    let state = state();
    let (status, body) = send(
      state.clone(),
      "POST",
      "/api/events/9/register",
      Some(json!({ "email": false, "phone": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["event_id"], 9);

    let (status, body) =
      send(state, "GET", "/api/events/9/registration", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "pending");
  }

  #[tokio::test]
  async fn existing_registration_is_served() {
    let (_, body) = send(state(), "GET", "/api/events/4/registration", None).await;
    assert_eq!(body["id"], "reg_3");
    assert_eq!(body["status"], "approved");

    let (status, _) = send(state(), "GET", "/api/events/3/registration", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Connections ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn connection_profile_renders_shared_fields() {
    let (status, body) =
      send(state(), "GET", "/api/connections/conn_1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["badge"]["label"], "Professional");
    let fields = body["fields"].as_array().unwrap();
    assert_eq!(fields[0]["key"], "email");
    assert_eq!(fields[0]["display"]["kind"], "mailto");
    assert!(fields.iter().all(|f| f["key"] != "name"));
  }

  #[tokio::test]
  async fn recategorise_and_delete() {
    let state = state();
    let (status, body) = send(
      state.clone(),
      "PUT",
      "/api/connections/conn_3/category",
      Some(json!({ "category": "stranger" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["badge"]["label"], "Stranger");
    // Values shared under the old category stay visible.
    assert!(body["fields"].as_array().unwrap().len() > 1);

    let (status, _) = send(
      state.clone(),
      "PUT",
      "/api/connections/conn_3/category",
      Some(json!({ "category": "nemesis" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
      send(state.clone(), "DELETE", "/api/connections/conn_3", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(state, "GET", "/api/connections/conn_3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn connections_filter_by_category() {
    let (_, body) =
      send(state(), "GET", "/api/connections?category=investor", None).await;
    assert_eq!(body["total_items"], 1);
    assert_eq!(body["items"][0]["id"], "conn_2");
  }

  // ── Notifications ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn notifications_read_state() {
    let state = state();
    let (_, body) = send(state.clone(), "GET", "/api/notifications", None).await;
    assert_eq!(body["unread_count"], 4);
    assert_eq!(body["notifications"][0]["id"], "notif_1");

    let (status, _) =
      send(state.clone(), "POST", "/api/notifications/notif_2/read", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) =
      send(state.clone(), "POST", "/api/notifications/missing/read", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = send(state.clone(), "GET", "/api/notifications", None).await;
    assert_eq!(body["unread_count"], 3);

    send(state.clone(), "POST", "/api/notifications/read-all", None).await;
    let (_, body) = send(state, "GET", "/api/notifications", None).await;
    assert_eq!(body["unread_count"], 0);
  }

  // ── Organizations ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn organizations_for_current_user() {
    let (_, body) = send(state(), "GET", "/api/organizations", None).await;
    assert_eq!(body[0]["id"], "org_1");
    assert_eq!(body[0]["role"], "admin");

    let (_, body) =
      send(state(), "GET", "/api/organizations?user_id=user_999", None).await;
    assert!(body.as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn role_requests_need_a_manager() {
    let (status, body) =
      send(state(), "GET", "/api/organizations/org_1/requests", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let outsider = AppState::new(Seed::demo().unwrap(), ServerConfig {
      current_user: "user_456".to_string(),
      ..Default::default()
    });
    let (status, _) =
      send(outsider, "GET", "/api/organizations/org_1/requests", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) =
      send(state(), "GET", "/api/invitations?user_id=user_101", None).await;
    assert_eq!(body[0]["id"], "req_2");
  }
}
