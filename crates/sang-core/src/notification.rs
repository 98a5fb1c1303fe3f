//! In-memory notification inbox.
//!
//! Notifications are produced elsewhere; this store only orders them and
//! tracks read state. Read state only ever moves from unread to read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
  Event,
  Connection,
  Organization,
  RoleRequest,
  System,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  Low,
  Medium,
  High,
}

/// Ids of the records a notification refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationMetadata {
  pub event_id:        Option<String>,
  pub organization_id: Option<String>,
  pub user_id:         Option<String>,
  pub request_id:      Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
  pub id:         String,
  #[serde(rename = "type")]
  pub kind:       NotificationKind,
  pub title:      String,
  pub message:    String,
  pub timestamp:  DateTime<Utc>,
  pub read:       bool,
  #[serde(default)]
  pub action_url: Option<String>,
  pub priority:   Priority,
  #[serde(default)]
  pub metadata:   Option<NotificationMetadata>,
}

/// Caller-owned notification state.
#[derive(Debug, Clone, Default)]
pub struct NotificationStore {
  items: Vec<Notification>,
}

impl NotificationStore {
  pub fn new(items: Vec<Notification>) -> Self { Self { items } }

  /// All notifications, newest first. Re-sorted on every call; equal
  /// timestamps keep insertion order.
  pub fn list(&self) -> Vec<&Notification> {
    let mut out: Vec<&Notification> = self.items.iter().collect();
    out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    out
  }

  /// Unread notifications, newest first.
  pub fn unread(&self) -> Vec<&Notification> {
    self.list().into_iter().filter(|n| !n.read).collect()
  }

  pub fn unread_count(&self) -> usize {
    self.items.iter().filter(|n| !n.read).count()
  }

  pub fn get(&self, id: &str) -> Option<&Notification> {
    self.items.iter().find(|n| n.id == id)
  }

  /// Mark one notification read. Unknown ids are ignored; returns whether a
  /// notification matched.
  pub fn mark_read(&mut self, id: &str) -> bool {
    match self.items.iter_mut().find(|n| n.id == id) {
      Some(n) => {
        n.read = true;
        true
      }
      None => {
        tracing::debug!(id, "mark_read: no such notification");
        false
      }
    }
  }

  pub fn mark_all_read(&mut self) {
    for n in &mut self.items {
      n.read = true;
    }
  }

  pub fn insert(&mut self, notification: Notification) {
    self.items.push(notification);
  }

  pub fn len(&self) -> usize { self.items.len() }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }
}
