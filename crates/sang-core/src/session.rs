//! Session bootstrap from a key-value store.
//!
//! The store is read once at startup. Nothing here authenticates anyone; the
//! flag and user record are trusted as written.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Result;

pub const AUTHENTICATED_KEY: &str = "sang_authenticated";
pub const USER_KEY: &str = "sang_user";

/// Minimal string store, e.g. browser local storage or a config file.
pub trait KeyValueStore {
  fn get(&self, key: &str) -> Option<String>;
  fn set(&mut self, key: &str, value: String);
  fn remove(&mut self, key: &str);
}

impl KeyValueStore for HashMap<String, String> {
  fn get(&self, key: &str) -> Option<String> { HashMap::get(self, key).cloned() }

  fn set(&mut self, key: &str, value: String) {
    self.insert(key.to_owned(), value);
  }

  fn remove(&mut self, key: &str) { HashMap::remove(self, key); }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
  pub name:  String,
  pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
  pub authenticated: bool,
  pub user:          Option<SessionUser>,
}

impl Session {
  /// Read the session. Authenticated iff the flag is exactly `"true"`. A
  /// user record that fails to parse is logged and treated as absent.
  pub fn load(store: &impl KeyValueStore) -> Self {
    let authenticated =
      store.get(AUTHENTICATED_KEY).is_some_and(|v| v == "true");
    if !authenticated {
      return Self::default();
    }

    let user = store.get(USER_KEY).and_then(|raw| {
      serde_json::from_str::<SessionUser>(&raw)
        .inspect_err(|e| tracing::warn!(error = %e, "ignoring malformed session user"))
        .ok()
    });
    Self { authenticated, user }
  }

  /// Persist a signed-in user.
  pub fn login(store: &mut impl KeyValueStore, user: SessionUser) -> Result<Self> {
    store.set(USER_KEY, serde_json::to_string(&user)?);
    store.set(AUTHENTICATED_KEY, "true".to_owned());
    tracing::info!(email = %user.email, "session started");
    Ok(Self { authenticated: true, user: Some(user) })
  }

  /// Clear both keys and reset to signed-out.
  pub fn logout(&mut self, store: &mut impl KeyValueStore) {
    store.remove(AUTHENTICATED_KEY);
    store.remove(USER_KEY);
    *self = Self::default();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn store(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
  }

  #[test]
  fn empty_store_is_signed_out() {
    assert_eq!(Session::load(&HashMap::new()), Session::default());
  }

  #[test]
  fn flag_must_be_exactly_true() {
    let s = store(&[(AUTHENTICATED_KEY, "yes")]);
    assert!(!Session::load(&s).authenticated);
  }

  #[test]
  fn loads_user_record() {
    let s = store(&[
      (AUTHENTICATED_KEY, "true"),
      (USER_KEY, r#"{"name":"John Doe","email":"john.doe@email.com"}"#),
    ]);
    let session = Session::load(&s);
    assert!(session.authenticated);
    assert_eq!(session.user.unwrap().name, "John Doe");
  }

  #[test]
  fn malformed_user_is_absent_but_still_authenticated() {
    let s = store(&[(AUTHENTICATED_KEY, "true"), (USER_KEY, "{not json")]);
    let session = Session::load(&s);
    assert!(session.authenticated);
    assert!(session.user.is_none());
  }

  #[test]
  fn login_then_logout_round_trips_the_store() {
    let mut s = HashMap::new();
    let user = SessionUser { name: "Ada".into(), email: "ada@example.com".into() };
    let mut session = Session::login(&mut s, user.clone()).unwrap();
    assert_eq!(Session::load(&s), session);

    session.logout(&mut s);
    assert!(s.is_empty());
    assert_eq!(session, Session::default());
  }
}
