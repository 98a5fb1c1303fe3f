//! Connection categories and their disclosure templates.
//!
//! A category's [`FieldVisibility`] is the *default* suggestion of what to
//! share with that kind of relationship. It is consulted when composing a new
//! share and never when displaying one that already exists; see
//! [`crate::connection`].

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

// ─── Field keys ──────────────────────────────────────────────────────────────

/// The eleven profile attributes a connection can disclose, in canonical
/// display order.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldKey {
  Name,
  Email,
  Phone,
  Company,
  Role,
  Linkedin,
  Twitter,
  Instagram,
  Website,
  Bio,
  Location,
}

impl FieldKey {
  /// Social and web profile links, rendered as generic external links.
  pub fn is_link(self) -> bool {
    matches!(
      self,
      Self::Linkedin | Self::Twitter | Self::Instagram | Self::Website
    )
  }

  /// Human-readable label for profile views.
  pub fn label(self) -> &'static str {
    match self {
      Self::Name => "Name",
      Self::Email => "Email",
      Self::Phone => "Phone",
      Self::Company => "Company",
      Self::Role => "Role",
      Self::Linkedin => "LinkedIn",
      Self::Twitter => "Twitter",
      Self::Instagram => "Instagram",
      Self::Website => "Website",
      Self::Bio => "Bio",
      Self::Location => "Location",
    }
  }
}

// ─── Visibility map ──────────────────────────────────────────────────────────

/// One flag per [`FieldKey`]. Every key is always defined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVisibility {
  pub name:      bool,
  pub email:     bool,
  pub phone:     bool,
  pub company:   bool,
  pub role:      bool,
  pub linkedin:  bool,
  pub twitter:   bool,
  pub instagram: bool,
  pub website:   bool,
  pub bio:       bool,
  pub location:  bool,
}

impl FieldVisibility {
  pub fn allows(&self, key: FieldKey) -> bool {
    match key {
      FieldKey::Name => self.name,
      FieldKey::Email => self.email,
      FieldKey::Phone => self.phone,
      FieldKey::Company => self.company,
      FieldKey::Role => self.role,
      FieldKey::Linkedin => self.linkedin,
      FieldKey::Twitter => self.twitter,
      FieldKey::Instagram => self.instagram,
      FieldKey::Website => self.website,
      FieldKey::Bio => self.bio,
      FieldKey::Location => self.location,
    }
  }

  /// The allowed keys, in canonical order.
  pub fn shareable(&self) -> Vec<FieldKey> {
    FieldKey::iter().filter(|k| self.allows(*k)).collect()
  }
}

// ─── Category ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionCategory {
  pub id:              &'static str,
  pub name:            &'static str,
  pub description:     &'static str,
  pub icon:            &'static str,
  pub color:           &'static str,
  pub fields_to_share: FieldVisibility,
}

/// Builds a visibility map from the flags in canonical key order.
const fn vis(flags: [bool; 11]) -> FieldVisibility {
  let [
    name,
    email,
    phone,
    company,
    role,
    linkedin,
    twitter,
    instagram,
    website,
    bio,
    location,
  ] = flags;
  FieldVisibility {
    name,
    email,
    phone,
    company,
    role,
    linkedin,
    twitter,
    instagram,
    website,
    bio,
    location,
  }
}

const T: bool = true;
const F: bool = false;

/// The closed registry of relationship categories.
pub static CATEGORIES: [ConnectionCategory; 8] = [
  ConnectionCategory {
    id:              "friend",
    name:            "Friend",
    description:     "Close personal connection",
    icon:            "👥",
    color:           "bg-blue-500",
    fields_to_share: vis([T, T, T, F, F, F, T, T, F, T, T]),
  },
  ConnectionCategory {
    id:              "professional",
    name:            "Professional",
    description:     "Business or work connection",
    icon:            "💼",
    color:           "bg-gray-600",
    fields_to_share: vis([T, T, F, T, T, T, F, F, T, T, F]),
  },
  ConnectionCategory {
    id:              "investor",
    name:            "Investor",
    description:     "Investment or funding contact",
    icon:            "💰",
    color:           "bg-green-600",
    fields_to_share: vis([T, T, T, T, T, T, F, F, T, T, F]),
  },
  ConnectionCategory {
    id:              "mentor",
    name:            "Mentor",
    description:     "Guidance and mentorship",
    icon:            "🎓",
    color:           "bg-purple-600",
    fields_to_share: vis([T, T, F, T, T, T, T, F, T, T, F]),
  },
  ConnectionCategory {
    id:              "stranger",
    name:            "Stranger",
    description:     "New acquaintance",
    icon:            "🤝",
    color:           "bg-orange-500",
    fields_to_share: vis([T, F, F, F, F, F, F, F, F, F, F]),
  },
  ConnectionCategory {
    id:              "relative",
    name:            "Relative",
    description:     "Family member",
    icon:            "👨‍👩‍👧‍👦",
    color:           "bg-pink-500",
    fields_to_share: vis([T, T, T, F, F, F, T, T, F, F, T]),
  },
  ConnectionCategory {
    id:              "random",
    name:            "Random",
    description:     "Casual connection",
    icon:            "🎲",
    color:           "bg-indigo-500",
    fields_to_share: vis([T, F, F, F, F, F, T, T, F, F, F]),
  },
  ConnectionCategory {
    id:              "client",
    name:            "Client",
    description:     "Business client or customer",
    icon:            "🏢",
    color:           "bg-teal-600",
    fields_to_share: vis([T, T, T, T, T, T, F, F, T, F, F]),
  },
];

pub fn category_by_id(id: &str) -> Option<&'static ConnectionCategory> {
  CATEGORIES.iter().find(|c| c.id == id)
}

// ─── Badge ───────────────────────────────────────────────────────────────────

/// What a list row shows for a connection's category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryBadge {
  pub label: &'static str,
  pub icon:  Option<&'static str>,
  pub color: Option<&'static str>,
}

/// Badge for a stored category id. Ids outside the registry get an empty
/// badge instead of an error.
pub fn badge(id: &str) -> CategoryBadge {
  match category_by_id(id) {
    Some(c) => CategoryBadge {
      label: c.name,
      icon:  Some(c.icon),
      color: Some(c.color),
    },
    None => {
      tracing::warn!(category = id, "unknown connection category");
      CategoryBadge::default()
    }
  }
}
