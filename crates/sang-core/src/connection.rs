//! Connections made by scanning, and what each one has disclosed.
//!
//! A connection's [`SharedFields`] is its *disclosure record*: the values the
//! other party actually handed over. It is independent of the category's
//! template. Reassigning a category leaves the record alone, and display is
//! driven by the record only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoEnumIterator};

use crate::{
  Error,
  Result,
  category::{CategoryBadge, ConnectionCategory, FieldKey, badge, category_by_id},
  pagination::{Page, paginate},
};

// ─── Disclosure record ───────────────────────────────────────────────────────

/// One optional value per [`FieldKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedFields {
  pub name:      Option<String>,
  pub email:     Option<String>,
  pub phone:     Option<String>,
  pub company:   Option<String>,
  pub role:      Option<String>,
  pub linkedin:  Option<String>,
  pub twitter:   Option<String>,
  pub instagram: Option<String>,
  pub website:   Option<String>,
  pub bio:       Option<String>,
  pub location:  Option<String>,
}

impl SharedFields {
  fn slot(&self, key: FieldKey) -> &Option<String> {
    match key {
      FieldKey::Name => &self.name,
      FieldKey::Email => &self.email,
      FieldKey::Phone => &self.phone,
      FieldKey::Company => &self.company,
      FieldKey::Role => &self.role,
      FieldKey::Linkedin => &self.linkedin,
      FieldKey::Twitter => &self.twitter,
      FieldKey::Instagram => &self.instagram,
      FieldKey::Website => &self.website,
      FieldKey::Bio => &self.bio,
      FieldKey::Location => &self.location,
    }
  }

  fn slot_mut(&mut self, key: FieldKey) -> &mut Option<String> {
    match key {
      FieldKey::Name => &mut self.name,
      FieldKey::Email => &mut self.email,
      FieldKey::Phone => &mut self.phone,
      FieldKey::Company => &mut self.company,
      FieldKey::Role => &mut self.role,
      FieldKey::Linkedin => &mut self.linkedin,
      FieldKey::Twitter => &mut self.twitter,
      FieldKey::Instagram => &mut self.instagram,
      FieldKey::Website => &mut self.website,
      FieldKey::Bio => &mut self.bio,
      FieldKey::Location => &mut self.location,
    }
  }

  /// The value for `key`, if present and non-empty.
  pub fn get(&self, key: FieldKey) -> Option<&str> {
    self.slot(key).as_deref().filter(|v| !v.is_empty())
  }

  pub fn set(&mut self, key: FieldKey, value: Option<String>) {
    *self.slot_mut(key) = value;
  }
}

// ─── Connection ──────────────────────────────────────────────────────────────

/// The event a connection was made at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContext {
  pub id:   u32,
  pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
  pub id:              String,
  pub name:            String,
  /// Category id. Normally one of [`crate::category::CATEGORIES`], but stored
  /// data may reference an id the registry no longer has.
  pub category:        String,
  pub avatar:          String,
  pub connection_date: NaiveDate,
  #[serde(default)]
  pub event:           Option<EventContext>,
  #[serde(default)]
  pub scan_location:   Option<String>,
  #[serde(default)]
  pub fields_shared:   SharedFields,
}

impl Connection {
  /// Move this connection to `category_id`. `fields_shared` is untouched, so
  /// values shared under the old category stay visible.
  pub fn change_category(&mut self, category_id: &str) -> Result<()> {
    let category = category_by_id(category_id)
      .ok_or_else(|| Error::UnknownCategory(category_id.to_owned()))?;
    self.category = category.id.to_owned();
    Ok(())
  }

  pub fn badge(&self) -> CategoryBadge { badge(&self.category) }
}

// ─── Visible fields ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleField<'a> {
  pub key:   FieldKey,
  pub value: &'a str,
}

/// The shared fields to list on a profile, in canonical order.
///
/// Every non-empty value in the disclosure record is listed regardless of the
/// category template. `name` is skipped; it is rendered as the heading.
pub fn resolve_visible_fields(connection: &Connection) -> Vec<VisibleField<'_>> {
  FieldKey::iter()
    .filter(|k| *k != FieldKey::Name)
    .filter_map(|key| {
      connection
        .fields_shared
        .get(key)
        .map(|value| VisibleField { key, value })
    })
    .collect()
}

/// How a shared value is presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldDisplay {
  Mailto { href: String, label: String },
  Tel { href: String, label: String },
  External { href: String, label: String },
  Text { value: String },
}

pub const EXTERNAL_LINK_LABEL: &str = "View Profile";

pub fn format_field_value(key: FieldKey, value: &str) -> FieldDisplay {
  match key {
    FieldKey::Email => FieldDisplay::Mailto {
      href:  format!("mailto:{value}"),
      label: value.to_owned(),
    },
    FieldKey::Phone => FieldDisplay::Tel {
      href:  format!("tel:{value}"),
      label: value.to_owned(),
    },
    k if k.is_link() => FieldDisplay::External {
      href:  value.to_owned(),
      label: EXTERNAL_LINK_LABEL.to_owned(),
    },
    _ => FieldDisplay::Text { value: value.to_owned() },
  }
}

// ─── Profile view ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RenderedField {
  pub key:     FieldKey,
  pub label:   &'static str,
  pub display: FieldDisplay,
}

/// A connection as shown on its profile screen.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionView {
  pub id:              String,
  pub name:            String,
  pub avatar:          String,
  pub badge:           CategoryBadge,
  pub connection_date: NaiveDate,
  pub event:           Option<EventContext>,
  pub scan_location:   Option<String>,
  pub fields:          Vec<RenderedField>,
}

impl From<&Connection> for ConnectionView {
  fn from(c: &Connection) -> Self {
    let fields = resolve_visible_fields(c)
      .into_iter()
      .map(|f| RenderedField {
        key:     f.key,
        label:   f.key.label(),
        display: format_field_value(f.key, f.value),
      })
      .collect();
    Self {
      id: c.id.clone(),
      name: c.name.clone(),
      avatar: c.avatar.clone(),
      badge: c.badge(),
      connection_date: c.connection_date,
      event: c.event.clone(),
      scan_location: c.scan_location.clone(),
      fields,
    }
  }
}

// ─── Composing a share ───────────────────────────────────────────────────────

/// The local user's full profile, the value source for new shares.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
  pub name:      String,
  pub email:     String,
  pub phone:     Option<String>,
  pub company:   Option<String>,
  pub role:      Option<String>,
  pub linkedin:  Option<String>,
  pub twitter:   Option<String>,
  pub instagram: Option<String>,
  pub website:   Option<String>,
  pub bio:       Option<String>,
  pub location:  Option<String>,
}

impl UserProfile {
  fn value(&self, key: FieldKey) -> Option<&str> {
    match key {
      FieldKey::Name => Some(self.name.as_str()),
      FieldKey::Email => Some(self.email.as_str()),
      FieldKey::Phone => self.phone.as_deref(),
      FieldKey::Company => self.company.as_deref(),
      FieldKey::Role => self.role.as_deref(),
      FieldKey::Linkedin => self.linkedin.as_deref(),
      FieldKey::Twitter => self.twitter.as_deref(),
      FieldKey::Instagram => self.instagram.as_deref(),
      FieldKey::Website => self.website.as_deref(),
      FieldKey::Bio => self.bio.as_deref(),
      FieldKey::Location => self.location.as_deref(),
    }
  }
}

/// Build a fresh disclosure record for a new connection in `category`: every
/// field the template allows and the profile has a value for.
pub fn compose_share(
  profile: &UserProfile,
  category: &ConnectionCategory,
) -> SharedFields {
  let mut shared = SharedFields::default();
  for key in category.fields_to_share.shareable() {
    let value = profile.value(key).filter(|v| !v.is_empty());
    shared.set(key, value.map(str::to_owned));
  }
  shared
}

// ─── Browsing ────────────────────────────────────────────────────────────────

pub const DEFAULT_CONNECTIONS_PER_PAGE: usize = 12;

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConnectionSort {
  #[default]
  Name,
  Date,
  Category,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionQuery {
  pub search:    String,
  /// Restrict to one category id.
  pub category:  Option<String>,
  pub sort:      ConnectionSort,
  pub page:      usize,
  pub page_size: usize,
}

impl Default for ConnectionQuery {
  fn default() -> Self {
    Self {
      search:    String::new(),
      category:  None,
      sort:      ConnectionSort::default(),
      page:      1,
      page_size: DEFAULT_CONNECTIONS_PER_PAGE,
    }
  }
}

/// Case-insensitive match on name and the shared company and role.
pub fn matches_connection(connection: &Connection, query: &str) -> bool {
  let needle = query.to_lowercase();
  let hit = |v: Option<&str>| v.is_some_and(|v| v.to_lowercase().contains(&needle));
  connection.name.to_lowercase().contains(&needle)
    || hit(connection.fields_shared.get(FieldKey::Company))
    || hit(connection.fields_shared.get(FieldKey::Role))
}

/// Search, filter, sort (ascending only) and paginate a connection list.
pub fn browse_connections<'a>(
  connections: &'a [Connection],
  query: &ConnectionQuery,
) -> Page<&'a Connection> {
  let mut matched: Vec<&Connection> = connections
    .iter()
    .filter(|c| matches_connection(c, &query.search))
    .filter(|c| query.category.as_deref().is_none_or(|id| c.category == id))
    .collect();

  match query.sort {
    ConnectionSort::Name => matched.sort_by(|a, b| a.name.cmp(&b.name)),
    ConnectionSort::Date => {
      matched.sort_by(|a, b| a.connection_date.cmp(&b.connection_date))
    }
    ConnectionSort::Category => {
      matched.sort_by(|a, b| a.category.cmp(&b.category))
    }
  }

  paginate(matched, query.page, query.page_size)
}

// ─── Connection book ─────────────────────────────────────────────────────────

/// The user's connections. Owned by the host; every mutation goes through
/// here.
#[derive(Debug, Clone, Default)]
pub struct ConnectionBook {
  connections: Vec<Connection>,
}

impl ConnectionBook {
  pub fn new(connections: Vec<Connection>) -> Self { Self { connections } }

  pub fn all(&self) -> &[Connection] { &self.connections }

  pub fn get(&self, id: &str) -> Option<&Connection> {
    self.connections.iter().find(|c| c.id == id)
  }

  pub fn by_category<'a>(
    &'a self,
    category_id: &'a str,
  ) -> impl Iterator<Item = &'a Connection> + 'a {
    self.connections.iter().filter(move |c| c.category == category_id)
  }

  pub fn browse(&self, query: &ConnectionQuery) -> Page<&Connection> {
    browse_connections(&self.connections, query)
  }

  pub fn add(&mut self, connection: Connection) {
    tracing::info!(id = %connection.id, "connection added");
    self.connections.push(connection);
  }

  pub fn change_category(
    &mut self,
    id: &str,
    category_id: &str,
  ) -> Result<&Connection> {
    let connection = self
      .connections
      .iter_mut()
      .find(|c| c.id == id)
      .ok_or_else(|| Error::ConnectionNotFound(id.to_owned()))?;
    connection.change_category(category_id)?;
    tracing::info!(id, category = category_id, "connection category changed");
    Ok(connection)
  }

  pub fn remove(&mut self, id: &str) -> Result<Connection> {
    let pos = self
      .connections
      .iter()
      .position(|c| c.id == id)
      .ok_or_else(|| Error::ConnectionNotFound(id.to_owned()))?;
    tracing::info!(id, "connection removed");
    Ok(self.connections.remove(pos))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn connection(id: &str, name: &str, category: &str, date: (i32, u32, u32)) -> Connection {
    Connection {
      id:              id.into(),
      name:            name.into(),
      category:        category.into(),
      avatar:          String::new(),
      connection_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
      event:           None,
      scan_location:   None,
      fields_shared:   SharedFields { name: Some(name.into()), ..Default::default() },
    }
  }

  fn sarah() -> Connection {
    let mut c = connection("conn_1", "Sarah Johnson", "professional", (2024, 12, 14));
    c.event = Some(EventContext { id: 1, name: "Tech Innovation Summit 2024".into() });
    c.fields_shared = SharedFields {
      name: Some("Sarah Johnson".into()),
      email: Some("sarah.johnson@techcorp.com".into()),
      company: Some("TechCorp".into()),
      role: Some("Senior Developer".into()),
      linkedin: Some("https://linkedin.com/in/sarahjohnson".into()),
      website: Some("https://sarahj.dev".into()),
      bio: Some("Full-stack developer passionate about AI".into()),
      ..Default::default()
    };
    c
  }

  fn book() -> ConnectionBook {
    let mut marcus = connection("conn_2", "Marcus Chen", "investor", (2024, 12, 13));
    marcus.fields_shared.company = Some("Venture Capital Partners".into());
    marcus.fields_shared.role = Some("Investment Partner".into());
    let emily = connection("conn_3", "Emily Rodriguez", "friend", (2024, 12, 12));
    ConnectionBook::new(vec![sarah(), marcus, emily])
  }

  #[test]
  fn visible_fields_follow_canonical_order_without_name() {
    let c = sarah();
    let keys: Vec<FieldKey> = resolve_visible_fields(&c).iter().map(|f| f.key).collect();
    assert_eq!(
      keys,
      vec![
        FieldKey::Email,
        FieldKey::Company,
        FieldKey::Role,
        FieldKey::Linkedin,
        FieldKey::Website,
        FieldKey::Bio,
      ]
    );
  }

  #[test]
  fn visible_fields_only_come_from_the_record() {
    for c in book().all() {
      for field in resolve_visible_fields(c) {
        assert_ne!(field.key, FieldKey::Name);
        assert_eq!(c.fields_shared.get(field.key), Some(field.value));
      }
    }
  }

  #[test]
  fn empty_values_are_not_visible() {
    let mut c = sarah();
    c.fields_shared.phone = Some(String::new());
    assert!(resolve_visible_fields(&c).iter().all(|f| f.key != FieldKey::Phone));
  }

  #[test]
  fn reassigning_to_stranger_keeps_shared_email() {
    let mut c = sarah();
    c.change_category("stranger").unwrap();
    assert_eq!(c.category, "stranger");
    let view = ConnectionView::from(&c);
    assert!(view.fields.iter().any(|f| f.key == FieldKey::Email));
    assert_eq!(view.badge.label, "Stranger");
  }

  #[test]
  fn unknown_category_is_rejected_and_state_kept() {
    let mut c = sarah();
    let err = c.change_category("nemesis").unwrap_err();
    assert!(matches!(err, Error::UnknownCategory(ref id) if id == "nemesis"));
    assert_eq!(c.category, "professional");
  }

  #[test]
  fn stored_unknown_category_degrades_to_empty_badge() {
    let mut c = sarah();
    c.category = "legacy".into();
    let view = ConnectionView::from(&c);
    assert_eq!(view.badge, CategoryBadge::default());
    assert_eq!(view.fields.len(), 6);
  }

  #[test]
  fn field_formatting() {
    assert_eq!(
      format_field_value(FieldKey::Email, "a@b.co"),
      FieldDisplay::Mailto { href: "mailto:a@b.co".into(), label: "a@b.co".into() }
    );
    assert_eq!(
      format_field_value(FieldKey::Phone, "+1 555"),
      FieldDisplay::Tel { href: "tel:+1 555".into(), label: "+1 555".into() }
    );
    for key in [FieldKey::Linkedin, FieldKey::Twitter, FieldKey::Instagram, FieldKey::Website] {
      assert_eq!(
        format_field_value(key, "https://x.example"),
        FieldDisplay::External {
          href:  "https://x.example".into(),
          label: EXTERNAL_LINK_LABEL.into(),
        }
      );
    }
    assert_eq!(
      format_field_value(FieldKey::Bio, "hi"),
      FieldDisplay::Text { value: "hi".into() }
    );
  }

  #[test]
  fn compose_share_follows_template() {
    let profile = UserProfile {
      name: "Sam".into(),
      email: "sam@example.com".into(),
      phone: Some("+1 (555) 000-0000".into()),
      company: Some("Acme".into()),
      twitter: Some("https://twitter.com/sam".into()),
      location: Some("Austin, TX".into()),
      ..Default::default()
    };
    let friend = category_by_id("friend").unwrap();
    let shared = compose_share(&profile, friend);
    assert_eq!(shared.get(FieldKey::Phone), Some("+1 (555) 000-0000"));
    assert_eq!(shared.get(FieldKey::Location), Some("Austin, TX"));
    // Friends don't get company even though the profile has one.
    assert_eq!(shared.get(FieldKey::Company), None);
    // Allowed but missing on the profile.
    assert_eq!(shared.get(FieldKey::Bio), None);

    let stranger = category_by_id("stranger").unwrap();
    let shared = compose_share(&profile, stranger);
    assert_eq!(shared, SharedFields { name: Some("Sam".into()), ..Default::default() });
  }

  #[test]
  fn browse_searches_name_company_and_role() {
    let book = book();
    let search = |s: &str| ConnectionQuery {
      search: s.into(),
      ..Default::default()
    };
    let by_role = book.browse(&search("investment"));
    assert_eq!(by_role.items.len(), 1);
    assert_eq!(by_role.items[0].id, "conn_2");

    let by_company = book.browse(&search("techcorp"));
    assert_eq!(by_company.items[0].id, "conn_1");
  }

  #[test]
  fn browse_sorts_ascending() {
    let book = book();
    let ids = |sort| -> Vec<String> {
      book
        .browse(&ConnectionQuery { sort, ..Default::default() })
        .items
        .iter()
        .map(|c| c.id.clone())
        .collect()
    };
    assert_eq!(ids(ConnectionSort::Name), ["conn_3", "conn_2", "conn_1"]);
    assert_eq!(ids(ConnectionSort::Date), ["conn_3", "conn_2", "conn_1"]);
    assert_eq!(ids(ConnectionSort::Category), ["conn_3", "conn_2", "conn_1"]);
  }

  #[test]
  fn browse_filters_by_category() {
    let book = book();
    let page = book.browse(&ConnectionQuery {
      category: Some("friend".into()),
      ..Default::default()
    });
    assert_eq!(page.total_items, 1);
    assert_eq!(book.by_category("investor").count(), 1);
  }

  #[test]
  fn book_mutations() {
    let mut book = book();
    let moved = book.change_category("conn_3", "relative").unwrap();
    assert_eq!(moved.category, "relative");

    assert!(matches!(
      book.change_category("conn_404", "friend"),
      Err(Error::ConnectionNotFound(_))
    ));

    let removed = book.remove("conn_1").unwrap();
    assert_eq!(removed.name, "Sarah Johnson");
    assert!(book.get("conn_1").is_none());
    assert!(matches!(book.remove("conn_1"), Err(Error::ConnectionNotFound(_))));

    book.add(connection("conn_4", "David Kim", "mentor", (2024, 12, 15)));
    assert_eq!(book.get("conn_4").map(|c| c.name.as_str()), Some("David Kim"));
    assert_eq!(book.by_category("mentor").count(), 1);
  }
}
