//! Navigation outcomes, overlays, and blocking prompts shared by the flows

use crate::error::ValidationError;

/// Where the app should go after a controller operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The create-trip wizard (entry point)
    Wizard,
    /// The trip screen; `participant` is set when opened from an invite link
    Trip {
        id: String,
        participant: Option<String>,
    },
}

impl Route {
    /// Parse a shared trip link such as
    /// `https://planner.app/trip/abc123?participant=p1` or
    /// `planner://trip/abc123`.
    pub fn from_link(link: &str) -> Option<Route> {
        let parsed = url::Url::parse(link.trim()).ok()?;

        // For custom schemes the first segment ends up as the host
        let mut segments: Vec<String> = Vec::new();
        if !matches!(parsed.scheme(), "http" | "https") {
            if let Some(host) = parsed.host_str() {
                segments.push(host.to_string());
            }
        }
        segments.extend(
            parsed
                .path_segments()
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );

        let position = segments.iter().position(|s| s == "trip")?;
        let id = segments.get(position + 1)?.clone();

        let participant = parsed
            .query_pairs()
            .find(|(key, _)| key == "participant")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty());

        Some(Route::Trip { id, participant })
    }
}

/// The overlay currently shown. Only one can be visible at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalTarget {
    #[default]
    None,
    Calendar,
    GuestList,
    ConfirmAttendance,
    UpdateTrip,
}

/// A blocking alert waiting for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Yes/no before creating the trip
    ConfirmCreateTrip,
    /// Yes/no before removing the trip from this device
    ConfirmRemoveTrip,
    /// Input refused by a local rule
    Rejected(ValidationError),
    /// A remote call or local save failed
    Failed(String),
    /// Informational message after a successful operation
    Notice(String),
}

impl Prompt {
    pub fn message(&self) -> String {
        match self {
            Prompt::ConfirmCreateTrip => "Confirm the trip details?".to_string(),
            Prompt::ConfirmRemoveTrip => {
                "Are you sure you want to remove the trip from this device?".to_string()
            }
            Prompt::Rejected(error) => error.to_string(),
            Prompt::Failed(message) | Prompt::Notice(message) => message.clone(),
        }
    }

    /// Whether the prompt asks a yes/no question
    pub fn is_confirmation(&self) -> bool {
        matches!(self, Prompt::ConfirmCreateTrip | Prompt::ConfirmRemoveTrip)
    }
}
