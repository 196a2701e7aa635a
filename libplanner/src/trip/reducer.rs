//! Pure reducer for the trip screen

use super::actions::TripViewAction;
use super::state::{AttendanceDraft, EditDraft, TripViewState};
use crate::calendar;
use crate::navigation::{ModalTarget, Prompt};

/// Apply `action` to `state`. No I/O.
pub fn reduce(state: TripViewState, action: TripViewAction) -> TripViewState {
    let state = dismiss_rejection(state);

    if state.is_updating && action.blocked_while_updating() {
        return state;
    }
    if state.is_confirming && action.blocked_while_confirming() {
        return state;
    }

    match action {
        TripViewAction::SelectTab(tab) => TripViewState { tab, ..state },

        // === Update dialog ===
        TripViewAction::OpenUpdate if state.modal == ModalTarget::None => TripViewState {
            modal: ModalTarget::UpdateTrip,
            ..state
        },

        TripViewAction::DestinationChanged(destination)
            if state.modal == ModalTarget::UpdateTrip =>
        {
            TripViewState {
                edit: EditDraft {
                    destination,
                    ..state.edit
                },
                ..state
            }
        }

        TripViewAction::OpenCalendar if state.modal == ModalTarget::UpdateTrip => TripViewState {
            modal: ModalTarget::Calendar,
            ..state
        },

        TripViewAction::DayTapped(day) if state.modal == ModalTarget::Calendar => {
            let date_range = calendar::select(state.edit.date_range, day);
            TripViewState {
                edit: EditDraft {
                    date_range,
                    ..state.edit
                },
                ..state
            }
        }

        TripViewAction::ConfirmDates if state.modal == ModalTarget::Calendar => TripViewState {
            modal: ModalTarget::UpdateTrip,
            ..state
        },

        // The attendance dialog can only be left by confirming
        TripViewAction::CloseModal if state.modal != ModalTarget::ConfirmAttendance => {
            TripViewState {
                modal: ModalTarget::None,
                ..state
            }
        }

        // === Removal ===
        TripViewAction::RequestRemove if state.modal == ModalTarget::UpdateTrip => TripViewState {
            prompt: Some(Prompt::ConfirmRemoveTrip),
            ..state
        },

        TripViewAction::CancelRemove if state.prompt == Some(Prompt::ConfirmRemoveTrip) => {
            TripViewState {
                prompt: None,
                ..state
            }
        }

        // === Attendance ===
        TripViewAction::GuestNameChanged(name) if state.modal == ModalTarget::ConfirmAttendance => {
            TripViewState {
                attendance: AttendanceDraft {
                    name,
                    ..state.attendance
                },
                ..state
            }
        }

        TripViewAction::GuestEmailChanged(email)
            if state.modal == ModalTarget::ConfirmAttendance =>
        {
            TripViewState {
                attendance: AttendanceDraft {
                    email: email.to_lowercase(),
                    ..state.attendance
                },
                ..state
            }
        }

        // === Remote results ===
        TripViewAction::LoadStarted => TripViewState {
            is_loading: true,
            ..state
        },

        TripViewAction::TripLoaded(trip) => {
            let modal = if state.participant_id.is_some() {
                ModalTarget::ConfirmAttendance
            } else {
                state.modal
            };
            TripViewState {
                edit: EditDraft {
                    destination: trip.destination.clone(),
                    ..state.edit
                },
                trip: Some(trip),
                modal,
                is_loading: false,
                ..state
            }
        }

        TripViewAction::LoadFailed(error) => TripViewState {
            is_loading: false,
            prompt: Some(Prompt::Failed(error)),
            ..state
        },

        TripViewAction::UpdateStarted => TripViewState {
            is_updating: true,
            ..state
        },

        TripViewAction::UpdateSucceeded(trip) => TripViewState {
            edit: EditDraft {
                destination: trip.destination.clone(),
                ..state.edit
            },
            trip: Some(trip),
            modal: ModalTarget::None,
            is_updating: false,
            prompt: Some(Prompt::Notice("Trip updated successfully".to_string())),
            ..state
        },

        TripViewAction::UpdateFailed(error) => TripViewState {
            is_updating: false,
            prompt: Some(Prompt::Failed(error)),
            ..state
        },

        TripViewAction::ConfirmStarted => TripViewState {
            is_confirming: true,
            ..state
        },

        TripViewAction::ConfirmSucceeded => TripViewState {
            participant_id: None,
            attendance: AttendanceDraft::default(),
            modal: ModalTarget::None,
            is_confirming: false,
            prompt: Some(Prompt::Notice("Attendance confirmed".to_string())),
            ..state
        },

        TripViewAction::ConfirmFailed(error) => TripViewState {
            is_confirming: false,
            prompt: Some(Prompt::Failed(error)),
            ..state
        },

        TripViewAction::ActivitiesLoaded(activities) => TripViewState { activities, ..state },

        TripViewAction::LinksLoaded(links) => TripViewState { links, ..state },

        TripViewAction::ParticipantsLoaded(participants) => TripViewState {
            participants,
            ..state
        },

        // === Prompts ===
        TripViewAction::Reject(error) => TripViewState {
            prompt: Some(Prompt::Rejected(error)),
            ..state
        },

        TripViewAction::ShowError(error) => TripViewState {
            prompt: Some(Prompt::Failed(error)),
            ..state
        },

        TripViewAction::ShowNotice(message) => TripViewState {
            prompt: Some(Prompt::Notice(message)),
            ..state
        },

        TripViewAction::DismissPrompt => TripViewState {
            prompt: None,
            ..state
        },

        // Not valid for the visible overlay
        _ => state,
    }
}

fn dismiss_rejection(state: TripViewState) -> TripViewState {
    if matches!(state.prompt, Some(Prompt::Rejected(_))) {
        TripViewState {
            prompt: None,
            ..state
        }
    } else {
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::state::TripTab;
    use crate::types::{DayPoint, Trip};
    use chrono::{TimeZone, Utc};

    fn day(s: &str) -> DayPoint {
        s.parse().unwrap()
    }

    fn trip() -> Trip {
        Trip {
            id: "abc123".to_string(),
            destination: "Lisbon".to_string(),
            starts_at: Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap(),
            is_confirmed: true,
        }
    }

    fn apply(state: TripViewState, actions: Vec<TripViewAction>) -> TripViewState {
        actions.into_iter().fold(state, reduce)
    }

    fn loaded() -> TripViewState {
        apply(
            TripViewState::new("abc123", None),
            vec![TripViewAction::LoadStarted, TripViewAction::TripLoaded(trip())],
        )
    }

    #[test]
    fn test_trip_loaded_prefills_destination_only() {
        let state = loaded();
        assert!(!state.is_loading);
        assert_eq!(state.edit.destination, "Lisbon");
        assert!(state.edit.date_range.is_empty());
        assert_eq!(state.modal, ModalTarget::None);
    }

    #[test]
    fn test_invite_link_opens_attendance_dialog() {
        let state = apply(
            TripViewState::new("abc123", Some("p1".to_string())),
            vec![TripViewAction::TripLoaded(trip())],
        );
        assert_eq!(state.modal, ModalTarget::ConfirmAttendance);

        let state = reduce(state, TripViewAction::CloseModal);
        assert_eq!(state.modal, ModalTarget::ConfirmAttendance);
    }

    #[test]
    fn test_select_tab() {
        let state = reduce(loaded(), TripViewAction::SelectTab(TripTab::Details));
        assert_eq!(state.tab, TripTab::Details);
    }

    #[test]
    fn test_date_reselection_uses_same_tie_break() {
        let state = apply(
            loaded(),
            vec![
                TripViewAction::OpenUpdate,
                TripViewAction::OpenCalendar,
                TripViewAction::DayTapped(day("2024-04-20")),
                TripViewAction::DayTapped(day("2024-04-12")),
                TripViewAction::ConfirmDates,
            ],
        );
        assert_eq!(state.modal, ModalTarget::UpdateTrip);
        assert_eq!(
            state.edit.date_range.bounds(),
            Some((day("2024-04-12"), day("2024-04-20")))
        );
        assert_eq!(state.when_text(), "12 to 20 of April");
    }

    #[test]
    fn test_calendar_only_from_update_dialog() {
        let state = reduce(loaded(), TripViewAction::OpenCalendar);
        assert_eq!(state.modal, ModalTarget::None);
    }

    #[test]
    fn test_one_modal_at_a_time() {
        let state = apply(
            loaded(),
            vec![TripViewAction::OpenUpdate, TripViewAction::OpenCalendar],
        );
        assert_eq!(state.modal, ModalTarget::Calendar);

        // Opening the update dialog from the calendar is not a valid move
        let state = reduce(state, TripViewAction::OpenUpdate);
        assert_eq!(state.modal, ModalTarget::Calendar);
    }

    #[test]
    fn test_remove_cancel_changes_nothing() {
        let opened = reduce(loaded(), TripViewAction::OpenUpdate);
        let state = apply(
            opened.clone(),
            vec![TripViewAction::RequestRemove, TripViewAction::CancelRemove],
        );
        assert_eq!(state, opened);
    }

    #[test]
    fn test_updating_blocks_edits() {
        let state = apply(
            loaded(),
            vec![TripViewAction::OpenUpdate, TripViewAction::UpdateStarted],
        );
        let after = reduce(
            state.clone(),
            TripViewAction::DestinationChanged("Porto".to_string()),
        );
        assert_eq!(after, state);
    }

    #[test]
    fn test_update_succeeded_closes_dialog() {
        let mut updated = trip();
        updated.destination = "Porto".to_string();

        let state = apply(
            loaded(),
            vec![
                TripViewAction::OpenUpdate,
                TripViewAction::UpdateStarted,
                TripViewAction::UpdateSucceeded(updated),
            ],
        );
        assert_eq!(state.modal, ModalTarget::None);
        assert!(!state.is_updating);
        assert_eq!(state.headline(), "Porto from 05 to 10 Mar.");
        assert!(matches!(state.prompt, Some(Prompt::Notice(_))));
    }

    #[test]
    fn test_guest_fields_are_distinct() {
        let state = apply(
            TripViewState::new("abc123", Some("p1".to_string())),
            vec![
                TripViewAction::TripLoaded(trip()),
                TripViewAction::GuestNameChanged("Ana Souza".to_string()),
                TripViewAction::GuestEmailChanged("Ana@Example.com".to_string()),
            ],
        );
        assert_eq!(state.attendance.name, "Ana Souza");
        assert_eq!(state.attendance.email, "ana@example.com");
    }

    #[test]
    fn test_confirm_succeeded_clears_invite() {
        let state = apply(
            TripViewState::new("abc123", Some("p1".to_string())),
            vec![
                TripViewAction::TripLoaded(trip()),
                TripViewAction::ConfirmStarted,
                TripViewAction::ConfirmSucceeded,
            ],
        );
        assert_eq!(state.modal, ModalTarget::None);
        assert!(state.participant_id.is_none());
        assert!(!state.is_confirming);
    }
}
