//! Trip screen state

use crate::calendar::{DateRange, MarkingMap};
use crate::navigation::{ModalTarget, Prompt};
use crate::types::{ActivityDay, Link, Participant, Trip};

/// Bottom tab of the trip screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TripTab {
    #[default]
    Activities,
    Details,
}

/// Fields of the "update trip" dialog, separate from any creation draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    pub destination: String,
    pub date_range: DateRange,
}

/// Fields of the attendance confirmation dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceDraft {
    pub name: String,
    pub email: String,
}

/// Root state of the trip screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripViewState {
    pub trip_id: String,

    /// Set when the screen was opened from an invite link
    pub participant_id: Option<String>,

    /// Last fetched trip; `None` until loaded
    pub trip: Option<Trip>,

    pub tab: TripTab,
    pub modal: ModalTarget,
    pub edit: EditDraft,
    pub attendance: AttendanceDraft,

    pub activities: Vec<ActivityDay>,
    pub links: Vec<Link>,
    pub participants: Vec<Participant>,

    pub is_loading: bool,
    pub is_updating: bool,
    pub is_confirming: bool,

    pub prompt: Option<Prompt>,
}

impl TripViewState {
    pub fn new(trip_id: &str, participant_id: Option<String>) -> Self {
        Self {
            trip_id: trip_id.to_string(),
            participant_id,
            ..Default::default()
        }
    }

    /// Trip summary for the header; empty while loading
    pub fn headline(&self) -> String {
        self.trip.as_ref().map(Trip::headline).unwrap_or_default()
    }

    /// Text for the "When?" field of the update dialog
    pub fn when_text(&self) -> String {
        self.edit.date_range.summary()
    }

    pub fn markings(&self, color: &str) -> MarkingMap {
        crate::calendar::render_markings(&self.edit.date_range, color)
    }

    /// The update dialog's primary button can be pressed
    pub fn can_update(&self) -> bool {
        !self.is_updating
    }

    pub fn can_confirm_attendance(&self) -> bool {
        self.participant_id.is_some() && !self.is_confirming
    }

    /// Invite message shown in the attendance dialog
    pub fn invitation_text(&self) -> String {
        match &self.trip {
            Some(trip) => format!(
                "You have been invited to a trip to {} from {} to {} {}.",
                trip.destination,
                trip.starts_at.format("%-d"),
                trip.ends_at.format("%-d"),
                trip.ends_at.format("%B"),
            ),
            None => String::new(),
        }
    }
}
