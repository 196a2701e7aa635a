//! Trip screen: view, update, remove and attendance
//!
//! Same split as the wizard: [`TripViewAction`]s are applied to a
//! [`TripViewState`] by the pure [`reduce`] function, and [`TripView`]
//! performs the remote calls and the active trip store access around it.

pub mod actions;
pub mod reducer;
pub mod state;

pub use actions::TripViewAction;
pub use reducer::reduce;
pub use state::{AttendanceDraft, EditDraft, TripTab, TripViewState};

use crate::error::{PlannerError, Result, ValidationError};
use crate::in_flight::InFlight;
use crate::navigation::{Prompt, Route};
use crate::remote::TripClient;
use crate::storage::ActiveTripStore;
use crate::types::{AttendanceConfirmation, DayPoint, NewActivity, NewLink, Trip, TripUpdate};
use crate::validation;

/// Controller of the trip screen
pub struct TripView<C, S> {
    client: C,
    store: S,
    state: TripViewState,
}

impl<C: TripClient, S: ActiveTripStore> TripView<C, S> {
    pub fn new(client: C, store: S) -> Self {
        Self {
            client,
            store,
            state: TripViewState::default(),
        }
    }

    pub fn state(&self) -> &TripViewState {
        &self.state
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply a user action.
    ///
    /// Returns `Busy` when the action is not allowed while a request is in
    /// flight, and the validation error when the action was rejected.
    pub fn dispatch(&mut self, action: TripViewAction) -> Result<()> {
        if (self.state.is_updating && action.blocked_while_updating())
            || (self.state.is_confirming && action.blocked_while_confirming())
        {
            return Err(PlannerError::Busy);
        }

        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);

        match &self.state.prompt {
            Some(Prompt::Rejected(error)) => {
                tracing::debug!("Trip input rejected: {}", error);
                Err((*error).into())
            }
            _ => Ok(()),
        }
    }

    /// Show the trip `trip_id`.
    ///
    /// `participant` is the invited guest when the screen was reached from
    /// an invite link; the attendance dialog opens once the trip is loaded.
    pub async fn open(&mut self, trip_id: &str, participant: Option<String>) -> Result<()> {
        self.state = TripViewState::new(trip_id, participant);
        self.dispatch(TripViewAction::LoadStarted)?;

        match self.client.get_trip(trip_id).await {
            Ok(trip) => {
                tracing::debug!("Loaded trip {} ({})", trip.id, trip.destination);
                self.dispatch(TripViewAction::TripLoaded(trip))
            }
            Err(e) => {
                tracing::warn!("Failed to load trip {}: {}", trip_id, e);
                self.dispatch(TripViewAction::LoadFailed(e.to_string()))?;
                Err(e)
            }
        }
    }

    /// Open the screen a [`Route::Trip`] points to. Other routes are ignored.
    pub async fn open_route(&mut self, route: &Route) -> Result<()> {
        match route {
            Route::Trip { id, participant } => self.open(id, participant.clone()).await,
            Route::Wizard => Ok(()),
        }
    }

    /// Save the update dialog: destination and the newly picked dates
    pub async fn update(&mut self) -> Result<()> {
        if self.state.is_updating {
            return Err(PlannerError::Busy);
        }

        let edit = &self.state.edit;
        if let Err(e) = validation::check_trip_complete(&edit.destination, &edit.date_range) {
            self.dispatch(TripViewAction::Reject(e))?;
            return Err(e.into());
        }
        let (Some(starts_at), Some(ends_at)) = (edit.date_range.starts_at(), edit.date_range.ends_at())
        else {
            return Err(ValidationError::IncompleteTripDetails.into());
        };

        let update = TripUpdate {
            id: self.state.trip_id.clone(),
            destination: edit.destination.trim().to_string(),
            starts_at,
            ends_at,
        };

        self.dispatch(TripViewAction::UpdateStarted)?;

        let outcome = {
            let _in_flight = InFlight::raise(&mut self.state.is_updating);
            match self.client.update_trip(&update).await {
                Ok(()) => Ok(self.client.get_trip(&update.id).await),
                Err(e) => Err(e),
            }
        };

        let reloaded = match outcome {
            Ok(reloaded) => reloaded,
            Err(e) => {
                tracing::warn!("Failed to update trip {}: {}", update.id, e);
                self.dispatch(TripViewAction::UpdateFailed(e.to_string()))?;
                return Err(e);
            }
        };
        tracing::info!("Updated trip {} to {}", update.id, update.destination);

        let trip = match reloaded {
            Ok(trip) => trip,
            Err(e) => {
                tracing::warn!("Trip {} updated but reload failed: {}", update.id, e);
                Trip {
                    id: update.id.clone(),
                    destination: update.destination.clone(),
                    starts_at: update.starts_at,
                    ends_at: update.ends_at,
                    is_confirmed: self.state.trip.as_ref().is_some_and(|t| t.is_confirmed),
                }
            }
        };

        self.dispatch(TripViewAction::UpdateSucceeded(trip))
    }

    /// "Yes" answered to the remove confirmation.
    ///
    /// Forgets the trip on this device; the remote trip is left alone.
    /// Without a pending confirmation nothing happens and the trip route is
    /// returned.
    pub fn confirm_remove(&mut self) -> Result<Route> {
        if self.state.prompt != Some(Prompt::ConfirmRemoveTrip) {
            tracing::debug!("No pending remove confirmation, ignoring");
            return Ok(Route::Trip {
                id: self.state.trip_id.clone(),
                participant: self.state.participant_id.clone(),
            });
        }

        if let Err(e) = self.store.remove() {
            tracing::warn!("Could not remove active trip {}: {}", self.state.trip_id, e);
            self.dispatch(TripViewAction::ShowError(format!(
                "Could not remove the trip from this device: {}",
                e
            )))?;
            return Err(e.into());
        }

        tracing::info!("Removed trip {} from this device", self.state.trip_id);
        self.state = TripViewState::default();
        Ok(Route::Wizard)
    }

    /// Confirm the invited guest's attendance with the dialog's name and e-mail
    pub async fn confirm_attendance(&mut self) -> Result<()> {
        if self.state.is_confirming {
            return Err(PlannerError::Busy);
        }

        let Some(participant_id) = self.state.participant_id.clone() else {
            tracing::debug!("No invited participant on this screen, ignoring");
            return Ok(());
        };

        let attendance = &self.state.attendance;
        if let Err(e) = validation::validate_attendance(&attendance.name, &attendance.email) {
            self.dispatch(TripViewAction::Reject(e))?;
            return Err(e.into());
        }

        let confirmation = AttendanceConfirmation {
            name: attendance.name.trim().to_string(),
            email: validation::normalize_email(&attendance.email),
        };

        self.dispatch(TripViewAction::ConfirmStarted)?;

        let outcome = {
            let _in_flight = InFlight::raise(&mut self.state.is_confirming);
            self.client
                .confirm_participant(&participant_id, &confirmation)
                .await
        };

        if let Err(e) = outcome {
            tracing::warn!("Failed to confirm participant {}: {}", participant_id, e);
            self.dispatch(TripViewAction::ConfirmFailed(e.to_string()))?;
            return Err(e);
        }
        tracing::info!(
            "Participant {} confirmed for trip {}",
            participant_id,
            self.state.trip_id
        );

        self.dispatch(TripViewAction::ConfirmSucceeded)?;

        if let Err(e) = self.store.save(&self.state.trip_id) {
            tracing::warn!("Attendance confirmed but trip not saved on this device: {}", e);
            self.dispatch(TripViewAction::ShowError(format!(
                "Attendance confirmed but the trip could not be saved on this device: {}",
                e
            )))?;
            return Err(e.into());
        }

        Ok(())
    }

    pub async fn load_activities(&mut self) -> Result<()> {
        match self.client.list_activities(&self.state.trip_id).await {
            Ok(days) => self.dispatch(TripViewAction::ActivitiesLoaded(days)),
            Err(e) => self.report_failure("activities", e),
        }
    }

    /// Schedule an activity at `hour` o'clock on `day`, then reload the list
    pub async fn add_activity(
        &mut self,
        title: &str,
        day: Option<DayPoint>,
        hour: Option<u32>,
    ) -> Result<()> {
        let trip = self.current_trip().await?;

        if let Err(e) = validation::validate_activity(title, day, hour, &trip) {
            self.dispatch(TripViewAction::Reject(e))?;
            return Err(e.into());
        }
        let (Some(day), Some(hour)) = (day, hour) else {
            return Err(ValidationError::IncompleteActivity.into());
        };

        let activity = NewActivity {
            title: title.trim().to_string(),
            occurs_at: day.start_of_day() + chrono::Duration::hours(i64::from(hour)),
        };

        if let Err(e) = self.client.create_activity(&trip.id, &activity).await {
            tracing::warn!("Failed to create activity on trip {}: {}", trip.id, e);
            self.dispatch(TripViewAction::ShowError(e.to_string()))?;
            return Err(e);
        }
        tracing::info!("Added activity '{}' on {}", activity.title, day);

        self.dispatch(TripViewAction::ShowNotice("Activity added".to_string()))?;
        self.load_activities().await
    }

    pub async fn load_links(&mut self) -> Result<()> {
        match self.client.list_links(&self.state.trip_id).await {
            Ok(links) => self.dispatch(TripViewAction::LinksLoaded(links)),
            Err(e) => self.report_failure("links", e),
        }
    }

    /// Share a link with the participants, then reload the list
    pub async fn add_link(&mut self, title: &str, url: &str) -> Result<()> {
        if let Err(e) = validation::validate_link(title, url) {
            self.dispatch(TripViewAction::Reject(e))?;
            return Err(e.into());
        }

        let link = NewLink {
            title: title.trim().to_string(),
            url: url.trim().to_string(),
        };

        if let Err(e) = self.client.create_link(&self.state.trip_id, &link).await {
            tracing::warn!("Failed to create link on trip {}: {}", self.state.trip_id, e);
            self.dispatch(TripViewAction::ShowError(e.to_string()))?;
            return Err(e);
        }

        self.dispatch(TripViewAction::ShowNotice("Link added".to_string()))?;
        self.load_links().await
    }

    pub async fn load_participants(&mut self) -> Result<()> {
        match self.client.list_participants(&self.state.trip_id).await {
            Ok(participants) => self.dispatch(TripViewAction::ParticipantsLoaded(participants)),
            Err(e) => self.report_failure("participants", e),
        }
    }

    /// The loaded trip, fetched first when the screen has none yet
    async fn current_trip(&mut self) -> Result<Trip> {
        if let Some(trip) = &self.state.trip {
            return Ok(trip.clone());
        }

        let trip = self.client.get_trip(&self.state.trip_id).await?;
        self.dispatch(TripViewAction::TripLoaded(trip.clone()))?;
        Ok(trip)
    }

    fn report_failure(&mut self, what: &str, error: PlannerError) -> Result<()> {
        tracing::warn!(
            "Failed to load {} of trip {}: {}",
            what,
            self.state.trip_id,
            error
        );
        self.dispatch(TripViewAction::ShowError(error.to_string()))?;
        Err(error)
    }
}
