//! Handlers for event registration, plus the in-memory backend they use.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/events/{id}/register` | Body: `ShareableDetails`; 201 |
//! | `GET`  | `/events/{id}/registration` | 404 if not registered |
//! | `GET`  | `/registrations` | The current user's registrations |

use std::convert::Infallible;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use sang_core::registration::{
  RegistrationBackend,
  RegistrationFlow,
  RegistrationRequest,
  RegistrationStatus,
  ShareableDetails,
  UserRegistration,
  registration_for,
};
use tokio::sync::RwLock;

use crate::{AppState, error::ApiError};

// ─── Backend ─────────────────────────────────────────────────────────────────

/// Registrations held in process memory. A new registration for an event
/// replaces any earlier one for the same event.
#[derive(Debug, Default)]
pub struct InMemoryRegistrations {
  records: RwLock<Vec<UserRegistration>>,
}

impl InMemoryRegistrations {
  pub fn new(records: Vec<UserRegistration>) -> Self {
    Self { records: RwLock::new(records) }
  }

  pub async fn all(&self) -> Vec<UserRegistration> {
    self.records.read().await.clone()
  }

  pub async fn for_event(&self, event_id: u32) -> Option<UserRegistration> {
    registration_for(&self.records.read().await, event_id).cloned()
  }
}

impl RegistrationBackend for InMemoryRegistrations {
  type Error = Infallible;

  async fn submit(
    &self,
    request: RegistrationRequest,
  ) -> Result<UserRegistration, Infallible> {
    let today = Utc::now().date_naive();
    let status = RegistrationStatus::initial_for(request.registration_type);
    let record = UserRegistration {
      id: format!("reg_{}", uuid::Uuid::new_v4().simple()),
      event_id: request.event_id,
      status,
      registration_date: today,
      approval_date: (status == RegistrationStatus::Registered).then_some(today),
      notes: None,
    };

    let mut records = self.records.write().await;
    records.retain(|r| r.event_id != request.event_id);
    records.push(record.clone());
    Ok(record)
  }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// `POST /events/{id}/register` — body: the details to share.
///
/// Drives a [`RegistrationFlow`] through the details step and submits it.
pub async fn register(
  State(state): State<AppState>,
  Path(event_id): Path<u32>,
  Json(details): Json<ShareableDetails>,
) -> Result<impl IntoResponse, ApiError> {
  let event = state
    .event(event_id)
    .ok_or_else(|| ApiError::NotFound(format!("event {event_id} not found")))?;

  let mut flow = RegistrationFlow::new(event.id, event.registration_type);
  flow.details = details;
  flow.proceed()?;
  let registration = flow.submit(state.registrations.as_ref(), Utc::now()).await?;

  Ok((StatusCode::CREATED, Json(registration)))
}

/// `GET /events/{id}/registration`
pub async fn get_one(
  State(state): State<AppState>,
  Path(event_id): Path<u32>,
) -> Result<Json<UserRegistration>, ApiError> {
  state
    .registrations
    .for_event(event_id)
    .await
    .map(Json)
    .ok_or_else(|| {
      ApiError::NotFound(format!("no registration for event {event_id}"))
    })
}

/// `GET /registrations`
pub async fn list(State(state): State<AppState>) -> Json<Vec<UserRegistration>> {
  Json(state.registrations.all().await)
}

#[cfg(test)]
mod tests {
  use sang_core::event::RegistrationType;

  use super::*;

  #[tokio::test]
  async fn open_events_register_instantly() {
    let backend = InMemoryRegistrations::default();
    let reg = backend
      .submit(RegistrationRequest {
        event_id:          3,
        registration_type: RegistrationType::Open,
        shared:            ShareableDetails::default(),
      })
      .await
      .unwrap();
    assert_eq!(reg.status, RegistrationStatus::Registered);
    assert_eq!(reg.approval_date, Some(reg.registration_date));
    assert!(reg.id.starts_with("reg_"));
  }

  #[tokio::test]
  async fn resubmitting_replaces_the_earlier_record() {
    let backend = InMemoryRegistrations::default();
    for kind in [RegistrationType::ApprovalRequired, RegistrationType::Open] {
      backend
        .submit(RegistrationRequest {
          event_id:          2,
          registration_type: kind,
          shared:            ShareableDetails::default(),
        })
        .await
        .unwrap();
    }
    let all = backend.all().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, RegistrationStatus::Registered);
  }
}
