//! Event attendees and the details each one chose to share.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::pagination::{Page, filter_paginate};

pub const DEFAULT_ATTENDEES_PER_PAGE: usize = 8;

/// Per-attendee sharing flags, set at registration time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedDetails {
  pub email:    bool,
  pub phone:    bool,
  pub linkedin: bool,
  pub twitter:  bool,
  pub company:  bool,
  pub role:     bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendee {
  pub id:             String,
  pub name:           String,
  pub email:          String,
  #[serde(default)]
  pub phone:          Option<String>,
  #[serde(default)]
  pub linkedin:       Option<String>,
  #[serde(default)]
  pub twitter:        Option<String>,
  #[serde(default)]
  pub company:        Option<String>,
  #[serde(default)]
  pub role:           Option<String>,
  #[serde(default)]
  pub bio:            Option<String>,
  pub avatar:         String,
  pub joined_date:    NaiveDate,
  pub shared_details: SharedDetails,
}

/// The contact fields gated by [`SharedDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendeeField {
  Email,
  Phone,
  Linkedin,
  Twitter,
  Company,
  Role,
}

/// Outcome of asking for one attendee field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Disclosure<T> {
  Shared(T),
  /// The attendee chose not to share this field.
  Withheld,
  /// The flag says shared, but there is no value on record.
  Unavailable,
}

impl<T> Disclosure<T> {
  pub fn shared(self) -> Option<T> {
    match self {
      Self::Shared(v) => Some(v),
      _ => None,
    }
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Disclosure<U> {
    match self {
      Self::Shared(v) => Disclosure::Shared(f(v)),
      Self::Withheld => Disclosure::Withheld,
      Self::Unavailable => Disclosure::Unavailable,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactEntry {
  pub field:      AttendeeField,
  pub disclosure: Disclosure<String>,
}

/// An attendee as other attendees see them. Only shared values are carried.
#[derive(Debug, Clone, Serialize)]
pub struct AttendeeCard {
  pub id:          String,
  pub name:        String,
  pub avatar:      String,
  pub joined_date: NaiveDate,
  pub bio:         Option<String>,
  pub contact:     Vec<ContactEntry>,
}

impl From<&Attendee> for AttendeeCard {
  fn from(a: &Attendee) -> Self {
    let contact = a
      .contact_card()
      .into_iter()
      .map(|(field, d)| ContactEntry { field, disclosure: d.map(str::to_owned) })
      .collect();
    Self {
      id: a.id.clone(),
      name: a.name.clone(),
      avatar: a.avatar.clone(),
      joined_date: a.joined_date,
      bio: a.bio.clone(),
      contact,
    }
  }
}

impl Attendee {
  pub fn disclosure(&self, field: AttendeeField) -> Disclosure<&str> {
    let (flag, value) = match field {
      AttendeeField::Email => (self.shared_details.email, Some(self.email.as_str())),
      AttendeeField::Phone => (self.shared_details.phone, self.phone.as_deref()),
      AttendeeField::Linkedin => {
        (self.shared_details.linkedin, self.linkedin.as_deref())
      }
      AttendeeField::Twitter => {
        (self.shared_details.twitter, self.twitter.as_deref())
      }
      AttendeeField::Company => {
        (self.shared_details.company, self.company.as_deref())
      }
      AttendeeField::Role => (self.shared_details.role, self.role.as_deref()),
    };
    match (flag, value.filter(|v| !v.is_empty())) {
      (false, _) => Disclosure::Withheld,
      (true, Some(v)) => Disclosure::Shared(v),
      (true, None) => Disclosure::Unavailable,
    }
  }

  /// Every gated field with its disclosure state, in display order.
  pub fn contact_card(&self) -> Vec<(AttendeeField, Disclosure<&str>)> {
    AttendeeField::iter().map(|f| (f, self.disclosure(f))).collect()
  }
}

/// Case-insensitive match on name and on company and role when shared.
pub fn matches_attendee(attendee: &Attendee, query: &str) -> bool {
  let needle = query.to_lowercase();
  let hit = |field| {
    attendee
      .disclosure(field)
      .shared()
      .is_some_and(|v| v.to_lowercase().contains(&needle))
  };
  attendee.name.to_lowercase().contains(&needle)
    || hit(AttendeeField::Company)
    || hit(AttendeeField::Role)
}

/// Search then paginate an event's attendee list. No sort is applied.
pub fn search_attendees<'a>(
  attendees: &'a [Attendee],
  query: &str,
  page: usize,
  page_size: usize,
) -> Page<&'a Attendee> {
  filter_paginate(attendees, |a| matches_attendee(a, query), page, page_size)
}
