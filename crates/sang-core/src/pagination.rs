//! Page slicing shared by the event, attendee and connection lists.
//!
//! Requested pages are clamped into range, never rejected.

use serde::Serialize;

// ─── Page ────────────────────────────────────────────────────────────────────

/// One page of a filtered list plus the counts needed to render a pager.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
  pub items:       Vec<T>,
  /// The page actually served, after clamping (1-based).
  pub page:        usize,
  pub page_size:   usize,
  pub total_items: usize,
  /// `0` when the filtered list is empty.
  pub total_pages: usize,
}

impl<T> Page<T> {
  /// The 1-based `(first, last)` item numbers shown on this page, as in
  /// "Showing 7 to 12 of 20". `None` for an empty list.
  pub fn showing(&self) -> Option<(usize, usize)> {
    if self.items.is_empty() {
      return None;
    }
    let first = (self.page - 1) * self.page_size + 1;
    Some((first, first + self.items.len() - 1))
  }

  pub fn has_previous(&self) -> bool { self.page > 1 }

  pub fn has_next(&self) -> bool { self.page < self.total_pages }

  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      items:       self.items.into_iter().map(f).collect(),
      page:        self.page,
      page_size:   self.page_size,
      total_items: self.total_items,
      total_pages: self.total_pages,
    }
  }
}

/// Number of pages needed for `total` items. A zero page size counts as one.
pub fn total_pages(total: usize, page_size: usize) -> usize {
  total.div_ceil(page_size.max(1))
}

/// Slice `items` into the requested page.
///
/// `page` is clamped into `[1, max(1, total_pages)]`, so an out-of-range
/// cursor serves the nearest valid page.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
  let page_size = page_size.max(1);
  let total_items = items.len();
  let total_pages = total_pages(total_items, page_size);
  let page = page.clamp(1, total_pages.max(1));

  let items = items
    .into_iter()
    .skip((page - 1) * page_size)
    .take(page_size)
    .collect();

  Page { items, page, page_size, total_items, total_pages }
}

/// Filter `list` with `predicate`, then paginate the survivors.
pub fn filter_paginate<'a, T>(
  list: &'a [T],
  predicate: impl Fn(&T) -> bool,
  page: usize,
  page_size: usize,
) -> Page<&'a T> {
  let matched = list.iter().filter(|item| predicate(item)).collect();
  paginate(matched, page, page_size)
}

// ─── Pager window ────────────────────────────────────────────────────────────

/// A slot in the numbered pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageMarker {
  Number(usize),
  Ellipsis,
}

const MAX_VISIBLE_PAGES: usize = 5;

/// The numbered pager window around `current`.
///
/// Up to five pages are listed outright; beyond that the first and last pages
/// stay pinned and the gap is collapsed into [`PageMarker::Ellipsis`].
pub fn visible_pages(current: usize, total: usize) -> Vec<PageMarker> {
  use PageMarker::{Ellipsis, Number};

  if total <= MAX_VISIBLE_PAGES {
    return (1..=total).map(Number).collect();
  }

  let mut pages = Vec::with_capacity(7);
  if current <= 3 {
    pages.extend((1..=4).map(Number));
    pages.push(Ellipsis);
    pages.push(Number(total));
  } else if current >= total - 2 {
    pages.push(Number(1));
    pages.push(Ellipsis);
    pages.extend((total - 3..=total).map(Number));
  } else {
    pages.push(Number(1));
    pages.push(Ellipsis);
    pages.extend((current - 1..=current + 1).map(Number));
    pages.push(Ellipsis);
    pages.push(Number(total));
  }
  pages
}
