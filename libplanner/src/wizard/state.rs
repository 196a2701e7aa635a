//! Create-trip wizard state
//!
//! All transitions happen through the reducer (see `reducer.rs`).

use crate::calendar::{DateRange, MarkingMap};
use crate::error::ValidationError;
use crate::navigation::{ModalTarget, Prompt};
use crate::types::NewTrip;
use crate::validation::{is_valid_email, normalize_email};

/// Which part of the draft is editable and what the primary button does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WizardStep {
    /// Destination and dates
    #[default]
    TripDetails,
    /// Guest e-mails
    AddEmail,
}

/// The trip being composed. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripDraft {
    pub destination: String,
    pub date_range: DateRange,
    pub(crate) guest_emails: Vec<String>,
}

impl TripDraft {
    /// Guests in the order they were added
    pub fn guest_emails(&self) -> &[String] {
        &self.guest_emails
    }

    /// Add a guest e-mail (already lowercased at input) to the end of the list
    pub fn add_email(&mut self, candidate: &str) -> Result<(), ValidationError> {
        let email = normalize_email(candidate);

        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }

        if self.guest_emails.contains(&email) {
            return Err(ValidationError::DuplicateEmail);
        }

        self.guest_emails.push(email);
        Ok(())
    }

    /// Remove every entry equal to `target`; absent values are ignored
    pub fn remove_email(&mut self, target: &str) {
        self.guest_emails.retain(|email| email != target);
    }

    /// Request payload, once destination and both dates are set
    pub fn to_new_trip(&self) -> Option<NewTrip> {
        let destination = self.destination.trim();
        if destination.is_empty() {
            return None;
        }

        Some(NewTrip {
            destination: destination.to_string(),
            starts_at: self.date_range.starts_at()?,
            ends_at: self.date_range.ends_at()?,
            emails_to_invite: self.guest_emails.clone(),
        })
    }
}

/// Root state of the create-trip flow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub step: WizardStep,

    /// Visible overlay (calendar or guest list)
    pub modal: ModalTarget,

    pub draft: TripDraft,

    /// Guest e-mail field, lowercased as typed
    pub email_input: String,

    /// Create request in flight
    pub is_creating: bool,

    /// Id of the trip created by the last successful submission
    pub created_trip_id: Option<String>,

    pub prompt: Option<Prompt>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destination and dates are editable only in the first step
    pub fn details_editable(&self) -> bool {
        self.step == WizardStep::TripDetails && !self.is_creating
    }

    /// The primary button can be pressed
    pub fn can_submit(&self) -> bool {
        !self.is_creating
    }

    /// Label of the primary button
    pub fn primary_label(&self) -> &'static str {
        match self.step {
            WizardStep::TripDetails => "Continue",
            WizardStep::AddEmail => "Confirm trip",
        }
    }

    /// Text for the "When?" field
    pub fn when_text(&self) -> String {
        self.draft.date_range.summary()
    }

    /// Guest counter shown on the "Who's coming?" field
    pub fn guests_text(&self) -> String {
        match self.draft.guest_emails.len() {
            0 => String::new(),
            1 => "1 person invited".to_string(),
            n => format!("{} people invited", n),
        }
    }

    pub fn markings(&self, color: &str) -> MarkingMap {
        crate::calendar::render_markings(&self.draft.date_range, color)
    }
}
