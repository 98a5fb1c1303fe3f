//! Event catalog entries.
//!
//! The catalog is supplied by the host and is immutable for a session.
//! Registering for an event never mutates the event record itself.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ─── Registration type ───────────────────────────────────────────────────────

/// How a registration for an event is accepted.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RegistrationType {
  /// Accepted immediately.
  Open,
  /// Held as pending until an organizer accepts or rejects it.
  ApprovalRequired,
}

// ─── Categories ──────────────────────────────────────────────────────────────

/// Sentinel category name that disables the category filter.
pub const ALL_CATEGORIES: &str = "All";

/// The fixed set of event categories offered by the catalog.
pub const EVENT_CATEGORIES: [&str; 5] =
  ["Business", "Technology", "Music", "Sports", "Art"];

/// The category selector of the discovery view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
  #[default]
  All,
  Only(String),
}

impl CategoryFilter {
  pub fn matches(&self, category: &str) -> bool {
    match self {
      Self::All => true,
      Self::Only(c) => c == category,
    }
  }
}

impl From<&str> for CategoryFilter {
  fn from(s: &str) -> Self {
    if s.is_empty() || s == ALL_CATEGORIES {
      Self::All
    } else {
      Self::Only(s.to_owned())
    }
  }
}

// ─── Sub-types ───────────────────────────────────────────────────────────────

/// A session attached to a larger event. Purely descriptive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubEvent {
  pub id:                String,
  pub title:             String,
  pub description:       String,
  pub time:              String,
  pub date:              String,
  pub max_attendees:     u32,
  pub current_attendees: Option<u32>,
  pub registration_type: RegistrationType,
  pub event_manager:     Option<String>,
  pub event_coordinator: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventOrganizer {
  pub name:     String,
  pub avatar:   String,
  pub email:    String,
  pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleItem {
  pub time:     String,
  pub activity: String,
}

// ─── Event ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
  pub id:                u32,
  pub title:             String,
  #[serde(default)]
  pub description:       Option<String>,
  /// Free text, usually "City, ST". Absent locations never match a filter.
  #[serde(default)]
  pub location:          Option<String>,
  #[serde(default)]
  pub venue:             Option<String>,
  /// Display string, e.g. "Dec 15, 2024".
  pub date:              String,
  pub time:              String,
  pub image:             String,
  pub attendees:         u32,
  /// 0.0 – 5.0
  pub rating:            f32,
  pub registration_type: RegistrationType,
  pub category:          String,
  #[serde(default)]
  pub featured:          bool,
  #[serde(default)]
  pub sub_events:        Vec<SubEvent>,
  #[serde(default)]
  pub tags:              Vec<String>,
  #[serde(default)]
  pub organizer:         Option<EventOrganizer>,
  #[serde(default)]
  pub highlights:        Vec<String>,
  #[serde(default)]
  pub schedule:          Vec<ScheduleItem>,
}

impl Event {
  /// A flagship event with at least one attached sub-event.
  pub fn is_mega_event(&self) -> bool { !self.sub_events.is_empty() }

  /// Best-effort parse of the display date. `None` if it isn't in the
  /// catalog's `"Mon D, YYYY"` form.
  pub fn parsed_date(&self) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(self.date.trim(), "%b %d, %Y").ok()
  }
}
