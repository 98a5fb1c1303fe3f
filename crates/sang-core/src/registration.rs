//! Event registration: the privacy step, submission, and the user's
//! registration records.
//!
//! The flow is `privacy → details → confirmation`. Submitting calls the
//! backend exactly once; a failure leaves the flow where it was so the host
//! can surface the error. There is no retry and no rollback.

use std::future::Future;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::{Error, Result, event::RegistrationType};

// ─── Shareable details ───────────────────────────────────────────────────────

/// A field the registrant may expose to organizers and attendees.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShareableField {
  Email,
  Phone,
  Linkedin,
  Twitter,
  Company,
  Role,
  Bio,
}

impl ShareableField {
  /// Required fields are always shared and cannot be toggled.
  pub fn is_required(self) -> bool { self == Self::Email }

  pub fn label(self) -> &'static str {
    match self {
      Self::Email => "Email Address",
      Self::Phone => "Phone Number",
      Self::Linkedin => "LinkedIn Profile",
      Self::Twitter => "Twitter Profile",
      Self::Company => "Company Name",
      Self::Role => "Job Title/Role",
      Self::Bio => "Bio/About",
    }
  }

  pub fn description(self) -> &'static str {
    match self {
      Self::Email => "Let attendees contact you directly",
      Self::Phone => "Share for urgent event updates",
      Self::Linkedin => "Connect professionally with attendees",
      Self::Twitter => "Share your social presence",
      Self::Company => "Help others know where you work",
      Self::Role => "Share your professional role",
      Self::Bio => "Tell others about yourself",
    }
  }
}

/// Which details to share for one registration. Email is locked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareableDetails {
  #[serde(skip_deserializing, default = "locked")]
  email:    bool,
  #[serde(default)]
  phone:    bool,
  #[serde(default)]
  linkedin: bool,
  #[serde(default)]
  twitter:  bool,
  #[serde(default)]
  company:  bool,
  #[serde(default)]
  role:     bool,
  #[serde(default)]
  bio:      bool,
}

fn locked() -> bool { true }

impl Default for ShareableDetails {
  /// Email plus the usual networking fields: LinkedIn, company, role.
  fn default() -> Self {
    Self {
      email:    true,
      phone:    false,
      linkedin: true,
      twitter:  false,
      company:  true,
      role:     true,
      bio:      false,
    }
  }
}

impl ShareableDetails {
  fn flag_mut(&mut self, field: ShareableField) -> &mut bool {
    match field {
      ShareableField::Email => &mut self.email,
      ShareableField::Phone => &mut self.phone,
      ShareableField::Linkedin => &mut self.linkedin,
      ShareableField::Twitter => &mut self.twitter,
      ShareableField::Company => &mut self.company,
      ShareableField::Role => &mut self.role,
      ShareableField::Bio => &mut self.bio,
    }
  }

  pub fn is_shared(&self, field: ShareableField) -> bool {
    match field {
      ShareableField::Email => self.email,
      ShareableField::Phone => self.phone,
      ShareableField::Linkedin => self.linkedin,
      ShareableField::Twitter => self.twitter,
      ShareableField::Company => self.company,
      ShareableField::Role => self.role,
      ShareableField::Bio => self.bio,
    }
  }

  /// Flip `field`. Required fields are left as they are.
  pub fn toggle(&mut self, field: ShareableField) {
    if field.is_required() {
      return;
    }
    let flag = self.flag_mut(field);
    *flag = !*flag;
  }

  /// Set `field` explicitly. Required fields stay on.
  pub fn set(&mut self, field: ShareableField, shared: bool) {
    if !field.is_required() {
      *self.flag_mut(field) = shared;
    }
  }

  /// Shared fields in display order.
  pub fn shared_fields(&self) -> Vec<ShareableField> {
    ShareableField::iter().filter(|f| self.is_shared(*f)).collect()
  }
}

// ─── Registration records ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RegistrationStatus {
  Registered,
  Pending,
  Approved,
  Rejected,
}

impl RegistrationStatus {
  /// Status right after submitting: open events register immediately,
  /// approval-required ones wait.
  pub fn initial_for(kind: RegistrationType) -> Self {
    match kind {
      RegistrationType::Open => Self::Registered,
      RegistrationType::ApprovalRequired => Self::Pending,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistration {
  pub id:                String,
  pub event_id:          u32,
  pub status:            RegistrationStatus,
  pub registration_date: NaiveDate,
  #[serde(default)]
  pub approval_date:     Option<NaiveDate>,
  #[serde(default)]
  pub notes:             Option<String>,
}

/// The user's registration for `event_id`, if any.
pub fn registration_for(
  registrations: &[UserRegistration],
  event_id: u32,
) -> Option<&UserRegistration> {
  registrations.iter().find(|r| r.event_id == event_id)
}

// ─── Backend seam ────────────────────────────────────────────────────────────

/// What gets sent when the user confirms a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
  pub event_id:          u32,
  pub registration_type: RegistrationType,
  pub shared:            ShareableDetails,
}

/// The service that accepts registrations.
pub trait RegistrationBackend: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn submit(
    &self,
    request: RegistrationRequest,
  ) -> impl Future<Output = Result<UserRegistration, Self::Error>> + Send + '_;
}

// ─── Flow ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RegistrationStep {
  Privacy,
  Details,
  Confirmation,
}

/// How long the confirmation stays up before the flow resets.
pub const AUTO_DISMISS: TimeDelta = TimeDelta::seconds(3);

/// Local state of the registration dialog for one event.
#[derive(Debug, Clone)]
pub struct RegistrationFlow {
  pub event_id:          u32,
  pub registration_type: RegistrationType,
  pub details:           ShareableDetails,
  step:                  RegistrationStep,
  confirmed_at:          Option<DateTime<Utc>>,
}

impl RegistrationFlow {
  pub fn new(event_id: u32, registration_type: RegistrationType) -> Self {
    Self {
      event_id,
      registration_type,
      details: ShareableDetails::default(),
      step: RegistrationStep::Privacy,
      confirmed_at: None,
    }
  }

  pub fn step(&self) -> RegistrationStep { self.step }

  /// Privacy choices made; move on to the details step.
  pub fn proceed(&mut self) -> Result<()> {
    self.expect_step(RegistrationStep::Privacy, "proceed")?;
    self.step = RegistrationStep::Details;
    Ok(())
  }

  /// Go back from details to the privacy step.
  pub fn back(&mut self) -> Result<()> {
    self.expect_step(RegistrationStep::Details, "go back")?;
    self.step = RegistrationStep::Privacy;
    Ok(())
  }

  /// Send the registration. On success the flow shows the confirmation from
  /// `now`; on failure the step is left unchanged and the error returned.
  pub async fn submit<B: RegistrationBackend>(
    &mut self,
    backend: &B,
    now: DateTime<Utc>,
  ) -> Result<UserRegistration> {
    self.expect_step(RegistrationStep::Details, "submit")?;
    let request = RegistrationRequest {
      event_id:          self.event_id,
      registration_type: self.registration_type,
      shared:            self.details,
    };

    let registration = backend.submit(request).await.map_err(|e| {
      tracing::warn!(event_id = self.event_id, error = %e, "registration failed");
      Error::Backend(Box::new(e))
    })?;

    tracing::info!(
      event_id = self.event_id,
      status = %registration.status,
      "registration submitted"
    );
    self.step = RegistrationStep::Confirmation;
    self.confirmed_at = Some(now);
    Ok(registration)
  }

  /// Advance the clock. Once the confirmation has been up for
  /// [`AUTO_DISMISS`], the flow returns to the privacy step and this
  /// returns `true`. The chosen details are kept.
  pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
    match self.confirmed_at {
      Some(at) if now - at >= AUTO_DISMISS => {
        self.step = RegistrationStep::Privacy;
        self.confirmed_at = None;
        true
      }
      _ => false,
    }
  }

  fn expect_step(
    &self,
    expected: RegistrationStep,
    action: &'static str,
  ) -> Result<()> {
    if self.step == expected {
      Ok(())
    } else {
      Err(Error::InvalidStep { action, step: self.step })
    }
  }
}
