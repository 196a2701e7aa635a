//! Create-trip wizard and resume-on-launch
//!
//! - Actions: what can happen
//! - State: what is true right now
//! - Reducer: pure function (State, Action) -> State
//!
//! [`TripWizard`] owns the state and performs the side effects the reducer
//! cannot: the create request, the active trip save, and the launch check.
//!
//! # Example
//!
//! ```no_run
//! use libplanner::remote::mock::MockTripClient;
//! use libplanner::storage::MemoryTripStore;
//! use libplanner::wizard::{TripWizard, WizardAction};
//! use libplanner::Route;
//!
//! # async fn example() -> libplanner::Result<()> {
//! let mut wizard = TripWizard::new(MockTripClient::new(), MemoryTripStore::new());
//!
//! if let Route::Wizard = wizard.launch().await {
//!     wizard.dispatch(WizardAction::DestinationChanged("Lisbon".to_string()))?;
//!     wizard.dispatch(WizardAction::OpenCalendar)?;
//!     wizard.dispatch(WizardAction::DayTapped("2024-03-05".parse()?))?;
//!     wizard.dispatch(WizardAction::DayTapped("2024-03-10".parse()?))?;
//!     wizard.dispatch(WizardAction::CloseModal)?;
//!     wizard.dispatch(WizardAction::Continue)?;
//!     wizard.dispatch(WizardAction::Continue)?;
//!     let route = wizard.confirm_create().await?;
//!     println!("{:?}", route);
//! }
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod reducer;
pub mod state;

pub use actions::WizardAction;
pub use reducer::reduce;
pub use state::{TripDraft, WizardState, WizardStep};

use crate::error::{PlannerError, Result, ValidationError};
use crate::in_flight::InFlight;
use crate::navigation::{Prompt, Route};
use crate::remote::TripClient;
use crate::storage::ActiveTripStore;

/// Controller of the entry screen: creates trips and resumes the active one
pub struct TripWizard<C, S> {
    client: C,
    store: S,
    state: WizardState,
}

impl<C: TripClient, S: ActiveTripStore> TripWizard<C, S> {
    pub fn new(client: C, store: S) -> Self {
        Self {
            client,
            store,
            state: WizardState::new(),
        }
    }

    pub fn state(&self) -> &WizardState {
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
    /// Returns the validation error when the action was rejected by a local
    /// rule (the same error is shown as the state's prompt), and `Busy` when
    /// the action is not allowed while a create request is in flight.
    pub fn dispatch(&mut self, action: WizardAction) -> Result<()> {
        if self.state.is_creating && action.blocked_while_creating() {
            return Err(PlannerError::Busy);
        }

        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);

        match &self.state.prompt {
            Some(Prompt::Rejected(error)) => {
                tracing::debug!("Wizard input rejected: {}", error);
                Err((*error).into())
            }
            _ => Ok(()),
        }
    }

    /// Decide the first screen on app start.
    ///
    /// With no stored trip, or when the stored trip cannot be fetched, the
    /// wizard starts over at the trip details step. The stored id is never
    /// removed here, so a transient failure does not lose the association.
    pub async fn launch(&mut self) -> Route {
        let stored = match self.store.get() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Could not read active trip, starting the wizard: {}", e);
                None
            }
        };

        let Some(trip_id) = stored else {
            self.state = WizardState::new();
            return Route::Wizard;
        };

        match self.client.get_trip(&trip_id).await {
            Ok(trip) => {
                tracing::info!("Resuming trip {} ({})", trip.id, trip.destination);
                Route::Trip {
                    id: trip_id,
                    participant: None,
                }
            }
            Err(e) => {
                if e.is_not_found() {
                    tracing::info!("Active trip {} no longer exists remotely", trip_id);
                } else {
                    tracing::warn!("Could not fetch active trip {}: {}", trip_id, e);
                }
                self.state = WizardState::new();
                Route::Wizard
            }
        }
    }

    /// "Yes" answered to the create confirmation.
    ///
    /// Creates the trip remotely, then stores its id on the device. On a
    /// remote failure, or when the returned future is dropped before the
    /// request settles, the wizard stays at the guest step and the store is
    /// untouched. A failed local save is reported but the remote trip is
    /// kept; its id remains available as `created_trip_id`.
    pub async fn confirm_create(&mut self) -> Result<Route> {
        if self.state.is_creating {
            return Err(PlannerError::Busy);
        }

        if self.state.prompt != Some(Prompt::ConfirmCreateTrip) {
            tracing::debug!("No pending trip confirmation, ignoring");
            return Ok(Route::Wizard);
        }

        let new_trip = self
            .state
            .draft
            .to_new_trip()
            .ok_or(ValidationError::IncompleteTripDetails)?;

        self.dispatch(WizardAction::CreateStarted)?;

        let outcome = {
            let _in_flight = InFlight::raise(&mut self.state.is_creating);
            self.client.create_trip(&new_trip).await
        };

        let trip_id = match outcome {
            Ok(trip_id) => trip_id,
            Err(e) => {
                tracing::warn!("Failed to create trip to {}: {}", new_trip.destination, e);
                self.dispatch(WizardAction::CreateFailed {
                    error: e.to_string(),
                })?;
                return Err(e);
            }
        };

        self.dispatch(WizardAction::CreateSucceeded {
            trip_id: trip_id.clone(),
        })?;
        tracing::info!(
            "Created trip {} to {} with {} guests",
            trip_id,
            new_trip.destination,
            new_trip.emails_to_invite.len()
        );

        if let Err(e) = self.store.save(&trip_id) {
            tracing::warn!("Trip {} created but not saved on this device: {}", trip_id, e);
            self.dispatch(WizardAction::ShowError(format!(
                "The trip was created but could not be saved on this device: {}",
                e
            )))?;
            return Err(e.into());
        }

        Ok(Route::Trip {
            id: trip_id,
            participant: None,
        })
    }
}
