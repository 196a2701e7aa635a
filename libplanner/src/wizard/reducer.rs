//! Pure reducer for the create-trip wizard
//!
//! `(WizardState, WizardAction) -> WizardState`, with no I/O. Network
//! requests and the device store are driven by [`super::TripWizard`], which
//! reports their outcome back as actions.

use super::actions::WizardAction;
use super::state::{TripDraft, WizardState, WizardStep};
use crate::calendar;
use crate::navigation::{ModalTarget, Prompt};
use crate::validation::validate_trip_details;

/// Apply `action` to `state`.
///
/// A rejected input leaves everything but `prompt` untouched. A previous
/// rejection is dismissed by the next action.
pub fn reduce(state: WizardState, action: WizardAction) -> WizardState {
    let state = dismiss_rejection(state);

    if state.is_creating && action.blocked_while_creating() {
        return state;
    }

    match action {
        // === Trip details ===
        WizardAction::DestinationChanged(destination) if state.details_editable() => WizardState {
            draft: TripDraft {
                destination,
                ..state.draft
            },
            ..state
        },

        WizardAction::OpenCalendar if state.details_editable() => WizardState {
            modal: ModalTarget::Calendar,
            ..state
        },

        WizardAction::DayTapped(day) if state.modal == ModalTarget::Calendar => {
            let date_range = calendar::select(state.draft.date_range, day);
            WizardState {
                draft: TripDraft {
                    date_range,
                    ..state.draft
                },
                ..state
            }
        }

        WizardAction::CloseModal => WizardState {
            modal: ModalTarget::None,
            ..state
        },

        // === Guests ===
        WizardAction::OpenGuests if state.step == WizardStep::AddEmail => WizardState {
            modal: ModalTarget::GuestList,
            ..state
        },

        WizardAction::EmailInputChanged(input) if state.step == WizardStep::AddEmail => {
            WizardState {
                email_input: input.to_lowercase(),
                ..state
            }
        }

        WizardAction::AddEmail if state.step == WizardStep::AddEmail => {
            let mut draft = state.draft.clone();
            match draft.add_email(&state.email_input) {
                Ok(()) => WizardState {
                    draft,
                    email_input: String::new(),
                    ..state
                },
                Err(error) => WizardState {
                    prompt: Some(Prompt::Rejected(error)),
                    ..state
                },
            }
        }

        WizardAction::RemoveEmail(target) if state.step == WizardStep::AddEmail => {
            let mut draft = state.draft.clone();
            draft.remove_email(&target);
            WizardState { draft, ..state }
        }

        // === Step transitions ===
        WizardAction::Continue => match state.step {
            WizardStep::TripDetails => {
                match validate_trip_details(&state.draft.destination, &state.draft.date_range) {
                    Ok(()) => WizardState {
                        step: WizardStep::AddEmail,
                        modal: ModalTarget::None,
                        ..state
                    },
                    Err(error) => WizardState {
                        prompt: Some(Prompt::Rejected(error)),
                        ..state
                    },
                }
            }
            WizardStep::AddEmail => WizardState {
                modal: ModalTarget::None,
                prompt: Some(Prompt::ConfirmCreateTrip),
                ..state
            },
        },

        WizardAction::Back if state.step == WizardStep::AddEmail => WizardState {
            step: WizardStep::TripDetails,
            modal: ModalTarget::None,
            ..state
        },

        WizardAction::CancelCreate if state.prompt == Some(Prompt::ConfirmCreateTrip) => {
            WizardState {
                prompt: None,
                ..state
            }
        }

        // === Create request lifecycle ===
        WizardAction::CreateStarted => WizardState {
            is_creating: true,
            prompt: None,
            ..state
        },

        // The draft is discarded once the trip exists remotely
        WizardAction::CreateSucceeded { trip_id } => WizardState {
            created_trip_id: Some(trip_id),
            ..WizardState::new()
        },

        WizardAction::CreateFailed { error } => WizardState {
            is_creating: false,
            prompt: Some(Prompt::Failed(error)),
            ..state
        },

        WizardAction::ShowError(error) => WizardState {
            prompt: Some(Prompt::Failed(error)),
            ..state
        },

        WizardAction::DismissPrompt => WizardState {
            prompt: None,
            ..state
        },

        WizardAction::Reset => WizardState::new(),

        // Action not valid in the current step
        _ => state,
    }
}

fn dismiss_rejection(state: WizardState) -> WizardState {
    if matches!(state.prompt, Some(Prompt::Rejected(_))) {
        WizardState {
            prompt: None,
            ..state
        }
    } else {
        state
    }
}
