//! Core types and list pipelines for the Sang event-discovery app.
//!
//! Everything here is a pure function of explicit inputs or a caller-owned
//! state object. HTTP hosting lives in `sang-api`; this crate has no runtime
//! dependencies beyond serialisation and logging.

// Backends implement the registration trait with native `async fn`.
#![allow(async_fn_in_trait)]

pub mod attendee;
pub mod category;
pub mod connection;
pub mod discovery;
pub mod error;
pub mod event;
pub mod notification;
pub mod organization;
pub mod pagination;
pub mod registration;
pub mod session;

pub use error::{Error, Result};
