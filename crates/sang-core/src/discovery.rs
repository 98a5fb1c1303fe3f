//! The event discovery pipeline.
//!
//! `catalog → search → category → registration → city → sort → paginate →
//! featured/regular split`. Every stage is a pure function of its inputs; the
//! host re-runs [`discover`] whenever any input changes.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
  event::{CategoryFilter, Event, RegistrationType},
  pagination::{Page, paginate},
};

/// Cities offered as one-click filters.
pub const POPULAR_CITIES: [&str; 9] = [
  "San Francisco, CA",
  "New York, NY",
  "Los Angeles, CA",
  "Chicago, IL",
  "Austin, TX",
  "Seattle, WA",
  "Miami, FL",
  "Boston, MA",
  "Portland, OR",
];

// ─── Filters ─────────────────────────────────────────────────────────────────

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
pub enum RegistrationFilter {
  #[default]
  All,
  Open,
  ApprovalRequired,
}

impl RegistrationFilter {
  pub fn matches(self, kind: RegistrationType) -> bool {
    match self {
      Self::All => true,
      Self::Open => kind == RegistrationType::Open,
      Self::ApprovalRequired => kind == RegistrationType::ApprovalRequired,
    }
  }
}

/// Date window selector. Accepted and carried through, but no window is
/// applied to the list yet: every value behaves like `All`.
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
pub enum DateRange {
  #[default]
  All,
  Today,
  Week,
  Month,
}

/// The structured part of the filter panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryFilters {
  #[serde(default)]
  pub registration: RegistrationFilter,
  #[serde(default)]
  pub date_range:   DateRange,
  /// Exact `location` strings; empty means any city.
  #[serde(default)]
  pub cities:       Vec<String>,
}

impl DiscoveryFilters {
  /// Whether any filter differs from its "show everything" value.
  pub fn has_active(&self) -> bool {
    self.registration != RegistrationFilter::All
      || self.date_range != DateRange::All
      || !self.cities.is_empty()
  }

  pub fn clear(&mut self) { *self = Self::default(); }

  /// Add `city` if absent, remove it if present.
  pub fn toggle_city(&mut self, city: &str) {
    if let Some(pos) = self.cities.iter().position(|c| c == city) {
      self.cities.remove(pos);
    } else {
      self.cities.push(city.to_owned());
    }
  }
}

// ─── Sort ────────────────────────────────────────────────────────────────────

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
pub enum SortOption {
  #[default]
  Name,
  Date,
  /// Two buckets: open registration before approval-required.
  Price,
  Location,
  Attendees,
  Rating,
}

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
pub enum SortDirection {
  #[default]
  Asc,
  Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSort {
  pub option:    SortOption,
  pub direction: SortDirection,
}

impl EventSort {
  /// Apply a click on `option` in the sort menu: clicking the active option
  /// while ascending flips to descending, anything else sorts ascending.
  pub fn select(self, option: SortOption) -> Self {
    let direction =
      if self.option == option && self.direction == SortDirection::Asc {
        SortDirection::Desc
      } else {
        SortDirection::Asc
      };
    Self { option, direction }
  }

  /// Compare two events under this sort. Equal keys compare `Equal` in both
  /// directions so a stable sort keeps catalog order for ties.
  pub fn compare(&self, a: &Event, b: &Event) -> Ordering {
    let ord = match self.option {
      SortOption::Name => a.title.cmp(&b.title),
      SortOption::Date => a.parsed_date().cmp(&b.parsed_date()),
      SortOption::Price => a.registration_type.cmp(&b.registration_type),
      SortOption::Location => a.location.cmp(&b.location),
      SortOption::Attendees => a.attendees.cmp(&b.attendees),
      SortOption::Rating => a.rating.total_cmp(&b.rating),
    };
    match self.direction {
      SortDirection::Asc => ord,
      SortDirection::Desc => ord.reverse(),
    }
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

pub const DEFAULT_EVENTS_PER_PAGE: usize = 6;

/// Everything the discovery view feeds into the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryQuery {
  pub search:    String,
  pub category:  CategoryFilter,
  pub filters:   DiscoveryFilters,
  pub sort:      EventSort,
  pub page:      usize,
  pub page_size: usize,
}

impl Default for DiscoveryQuery {
  fn default() -> Self {
    Self {
      search:    String::new(),
      category:  CategoryFilter::All,
      filters:   DiscoveryFilters::default(),
      sort:      EventSort::default(),
      page:      1,
      page_size: DEFAULT_EVENTS_PER_PAGE,
    }
  }
}

// ─── Stages ──────────────────────────────────────────────────────────────────

/// Case-insensitive substring match over title, location and category.
/// An empty query matches everything.
pub fn matches_search(event: &Event, query: &str) -> bool {
  if query.is_empty() {
    return true;
  }
  let needle = query.to_lowercase();
  event.title.to_lowercase().contains(&needle)
    || event
      .location
      .as_deref()
      .is_some_and(|l| l.to_lowercase().contains(&needle))
    || event.category.to_lowercase().contains(&needle)
}

/// City filter: `location` must equal one of `cities` exactly.
pub fn matches_cities(event: &Event, cities: &[String]) -> bool {
  cities.is_empty()
    || event
      .location
      .as_deref()
      .is_some_and(|l| cities.iter().any(|c| c == l))
}

/// Run the filter stages, preserving catalog order.
pub fn filter_events<'a>(
  events: &'a [Event],
  query: &DiscoveryQuery,
) -> Vec<&'a Event> {
  events
    .iter()
    .filter(|e| matches_search(e, &query.search))
    .filter(|e| query.category.matches(&e.category))
    .filter(|e| query.filters.registration.matches(e.registration_type))
    .filter(|e| matches_cities(e, &query.filters.cities))
    .collect()
}

/// Stable sort by `sort`.
pub fn sort_events(events: &mut [&Event], sort: EventSort) {
  events.sort_by(|a, b| sort.compare(a, b));
}

// ─── Result ──────────────────────────────────────────────────────────────────

/// One rendered page of the discovery view.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryPage<'a> {
  pub page:     Page<&'a Event>,
  /// Featured events that landed on this page. Other pages' featured events
  /// are not pulled forward.
  pub featured: Vec<&'a Event>,
  pub regular:  Vec<&'a Event>,
}

impl DiscoveryPage<'_> {
  pub fn total_matches(&self) -> usize { self.page.total_items }

  pub fn total_pages(&self) -> usize { self.page.total_pages }

  pub fn is_empty(&self) -> bool { self.page.items.is_empty() }
}

/// Run the full pipeline over `events`.
pub fn discover<'a>(
  events: &'a [Event],
  query: &DiscoveryQuery,
) -> DiscoveryPage<'a> {
  let mut matched = filter_events(events, query);
  sort_events(&mut matched, query.sort);

  let page = paginate(matched, query.page, query.page_size);
  let (featured, regular): (Vec<_>, Vec<_>) =
    page.items.iter().copied().partition(|e| e.featured);

  tracing::debug!(
    search = %query.search,
    matches = page.total_items,
    page = page.page,
    total_pages = page.total_pages,
    "discovery pipeline ran"
  );

  DiscoveryPage { page, featured, regular }
}
