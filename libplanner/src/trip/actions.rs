//! Actions of the trip screen

use super::state::TripTab;
use crate::error::ValidationError;
use crate::types::{ActivityDay, DayPoint, Link, Participant, Trip};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripViewAction {
    SelectTab(TripTab),

    // === Update dialog ===
    OpenUpdate,
    DestinationChanged(String),
    /// Open the date picker from the update dialog
    OpenCalendar,
    DayTapped(DayPoint),
    /// Accept the picked dates and return to the update dialog
    ConfirmDates,
    CloseModal,

    // === Removal ===
    RequestRemove,
    CancelRemove,

    // === Attendance ===
    GuestNameChanged(String),
    GuestEmailChanged(String),

    // === Remote results ===
    LoadStarted,
    TripLoaded(Trip),
    LoadFailed(String),

    UpdateStarted,
    UpdateSucceeded(Trip),
    UpdateFailed(String),

    ConfirmStarted,
    ConfirmSucceeded,
    ConfirmFailed(String),

    ActivitiesLoaded(Vec<ActivityDay>),
    LinksLoaded(Vec<Link>),
    ParticipantsLoaded(Vec<Participant>),

    // === Prompts ===
    Reject(ValidationError),
    ShowError(String),
    ShowNotice(String),
    DismissPrompt,
}

impl TripViewAction {
    /// Actions refused while the trip update is in flight
    pub fn blocked_while_updating(&self) -> bool {
        matches!(
            self,
            TripViewAction::DestinationChanged(_)
                | TripViewAction::OpenCalendar
                | TripViewAction::DayTapped(_)
                | TripViewAction::ConfirmDates
                | TripViewAction::RequestRemove
                | TripViewAction::UpdateStarted
        )
    }

    /// Actions refused while the attendance confirmation is in flight
    pub fn blocked_while_confirming(&self) -> bool {
        matches!(
            self,
            TripViewAction::GuestNameChanged(_)
                | TripViewAction::GuestEmailChanged(_)
                | TripViewAction::ConfirmStarted
        )
    }
}
