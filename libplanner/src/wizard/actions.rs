//! Actions of the create-trip wizard
//!
//! Actions describe what happened; the reducer decides what it means for
//! the current state.

use crate::types::DayPoint;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    // === Trip details ===
    /// Destination field edited
    DestinationChanged(String),

    /// Open the date picker
    OpenCalendar,

    /// A day was tapped on the date picker
    DayTapped(DayPoint),

    /// Close whichever overlay is open
    CloseModal,

    // === Guests ===
    /// Open the guest list
    OpenGuests,

    /// Guest e-mail field edited
    EmailInputChanged(String),

    /// Add the typed e-mail to the guest list
    AddEmail,

    /// Remove an e-mail from the guest list
    RemoveEmail(String),

    // === Step transitions ===
    /// Primary button pressed
    Continue,

    /// "Change place/date" pressed while adding guests
    Back,

    /// "No" answered to the create confirmation
    CancelCreate,

    // === Create request lifecycle ===
    CreateStarted,

    CreateSucceeded { trip_id: String },

    CreateFailed { error: String },

    /// Show a failure that happened outside the reducer (e.g. local save)
    ShowError(String),

    DismissPrompt,

    /// Discard everything and start over at the first step
    Reset,
}

impl WizardAction {
    /// Actions refused while a create request is in flight
    pub fn blocked_while_creating(&self) -> bool {
        matches!(
            self,
            WizardAction::DestinationChanged(_)
                | WizardAction::OpenCalendar
                | WizardAction::DayTapped(_)
                | WizardAction::AddEmail
                | WizardAction::RemoveEmail(_)
                | WizardAction::Continue
                | WizardAction::Back
                | WizardAction::CreateStarted
                | WizardAction::Reset
        )
    }
}
