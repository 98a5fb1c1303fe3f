//! Handlers for `/organizations` endpoints.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use sang_core::organization::{
  OrgRole,
  Organization,
  RoleRequest,
  is_manager,
  pending_role_requests,
  user_invitations,
  user_organizations,
  user_role,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserParams {
  /// Defaults to the configured current user.
  pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Membership {
  #[serde(flatten)]
  pub organization: Organization,
  pub role:         Option<OrgRole>,
}

/// `GET /organizations[?user_id=]`
pub async fn list(
  State(state): State<AppState>,
  Query(params): Query<UserParams>,
) -> Json<Vec<Membership>> {
  let user_id = params.user_id.unwrap_or_else(|| state.config.current_user.clone());
  let orgs = &state.organizations.organizations;
  let memberships = user_organizations(orgs, &user_id)
    .into_iter()
    .map(|o| Membership {
      organization: o.clone(),
      role:         user_role(orgs, &user_id, &o.id),
    })
    .collect();
  Json(memberships)
}

/// `GET /organizations/{id}/requests` — managers and admins only.
pub async fn requests(
  State(state): State<AppState>,
  Path(org_id): Path<String>,
) -> Result<Json<Vec<RoleRequest>>, ApiError> {
  let data = &state.organizations;
  if !data.organizations.iter().any(|o| o.id == org_id) {
    return Err(ApiError::NotFound(format!("organization {org_id} not found")));
  }
  if !is_manager(&data.organizations, &state.config.current_user, &org_id) {
    return Err(ApiError::Forbidden(format!(
      "{} cannot review requests for {org_id}",
      state.config.current_user
    )));
  }
  let pending = pending_role_requests(&data.role_requests, &org_id);
  Ok(Json(pending.into_iter().cloned().collect()))
}

/// `GET /invitations[?user_id=]`
pub async fn invitations(
  State(state): State<AppState>,
  Query(params): Query<UserParams>,
) -> Json<Vec<RoleRequest>> {
  let user_id = params.user_id.unwrap_or_else(|| state.config.current_user.clone());
  let invites = user_invitations(&state.organizations.role_requests, &user_id);
  Json(invites.into_iter().cloned().collect())
}
