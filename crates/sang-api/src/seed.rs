//! Demo data compiled into the binary.

use std::collections::HashMap;

use sang_core::{
  attendee::Attendee,
  connection::Connection,
  event::Event,
  notification::Notification,
  organization::{Organization, RoleRequest},
  registration::UserRegistration,
};
use serde::Deserialize;

const EVENTS: &str = include_str!("../data/events.json");
const ATTENDEES: &str = include_str!("../data/attendees.json");
const CONNECTIONS: &str = include_str!("../data/connections.json");
const NOTIFICATIONS: &str = include_str!("../data/notifications.json");
const REGISTRATIONS: &str = include_str!("../data/registrations.json");
const ORGANIZATIONS: &str = include_str!("../data/organizations.json");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationData {
  pub organizations: Vec<Organization>,
  pub role_requests: Vec<RoleRequest>,
}

/// Everything the server starts with.
#[derive(Debug, Clone, Default)]
pub struct Seed {
  pub events:        Vec<Event>,
  /// Attendee lists keyed by event id.
  pub attendees:     HashMap<u32, Vec<Attendee>>,
  pub connections:   Vec<Connection>,
  pub notifications: Vec<Notification>,
  pub registrations: Vec<UserRegistration>,
  pub organizations: OrganizationData,
}

impl Seed {
  pub fn demo() -> Result<Self, serde_json::Error> {
    let seed = Self {
      events:        serde_json::from_str(EVENTS)?,
      attendees:     serde_json::from_str(ATTENDEES)?,
      connections:   serde_json::from_str(CONNECTIONS)?,
      notifications: serde_json::from_str(NOTIFICATIONS)?,
      registrations: serde_json::from_str(REGISTRATIONS)?,
      organizations: serde_json::from_str(ORGANIZATIONS)?,
    };
    tracing::debug!(
      events = seed.events.len(),
      connections = seed.connections.len(),
      notifications = seed.notifications.len(),
      "loaded demo data"
    );
    Ok(seed)
  }
}
