//! Organizations, their members, and role requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrgRole {
  Admin,
  Manager,
  Coordinator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationMember {
  pub user_id:   String,
  pub role:      OrgRole,
  pub joined_at: DateTime<Utc>,
  #[serde(default)]
  pub name:      Option<String>,
  #[serde(default)]
  pub email:     Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
  pub id:             String,
  pub name:           String,
  pub official_email: String,
  pub description:    String,
  pub contact:        String,
  /// User id of the founding admin.
  pub created_by:     String,
  pub members:        Vec<OrganizationMember>,
  pub created_at:     DateTime<Utc>,
}

impl Organization {
  pub fn member(&self, user_id: &str) -> Option<&OrganizationMember> {
    self.members.iter().find(|m| m.user_id == user_id)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RequestStatus {
  Pending,
  Approved,
  Rejected,
}

/// A request to join an organization in some role, either asked for by the
/// user or extended as an invitation by an admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRequest {
  pub id:                String,
  pub user_id:           String,
  pub organization_id:   String,
  pub requested_role:    OrgRole,
  pub status:            RequestStatus,
  #[serde(default)]
  pub invited_by_admin:  Option<String>,
  #[serde(default)]
  pub requested_by_user: Option<String>,
  #[serde(default)]
  pub approved_by_admin: Option<String>,
  #[serde(default)]
  pub approved_at:       Option<DateTime<Utc>>,
  pub created_at:        DateTime<Utc>,
  #[serde(default)]
  pub user_name:         Option<String>,
  #[serde(default)]
  pub organization_name: Option<String>,
  #[serde(default)]
  pub inviter_name:      Option<String>,
}

pub fn user_organizations<'a>(
  orgs: &'a [Organization],
  user_id: &str,
) -> Vec<&'a Organization> {
  orgs.iter().filter(|o| o.member(user_id).is_some()).collect()
}

pub fn user_role(
  orgs: &[Organization],
  user_id: &str,
  org_id: &str,
) -> Option<OrgRole> {
  orgs
    .iter()
    .find(|o| o.id == org_id)
    .and_then(|o| o.member(user_id))
    .map(|m| m.role)
}

pub fn is_admin(orgs: &[Organization], user_id: &str, org_id: &str) -> bool {
  user_role(orgs, user_id, org_id) == Some(OrgRole::Admin)
}

/// Admins count as managers.
pub fn is_manager(orgs: &[Organization], user_id: &str, org_id: &str) -> bool {
  matches!(
    user_role(orgs, user_id, org_id),
    Some(OrgRole::Admin | OrgRole::Manager)
  )
}

pub fn pending_role_requests<'a>(
  requests: &'a [RoleRequest],
  org_id: &str,
) -> Vec<&'a RoleRequest> {
  requests
    .iter()
    .filter(|r| r.organization_id == org_id && r.status == RequestStatus::Pending)
    .collect()
}

/// Pending requests addressed to `user_id` that an admin sent.
pub fn user_invitations<'a>(
  requests: &'a [RoleRequest],
  user_id: &str,
) -> Vec<&'a RoleRequest> {
  requests
    .iter()
    .filter(|r| {
      r.user_id == user_id
        && r.invited_by_admin.is_some()
        && r.status == RequestStatus::Pending
    })
    .collect()
}
