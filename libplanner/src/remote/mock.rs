//! In-memory trip API for testing
//!
//! `MockTripClient` keeps trips, activities, links and participants in
//! memory and can be told to fail or delay individual operations. Clones
//! share the same backing state, so a test can keep a handle for
//! verification after handing a clone to a controller.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::error::{RemoteError, Result};
use crate::remote::TripClient;
use crate::types::{
    Activity, ActivityDay, AttendanceConfirmation, Link, NewActivity, NewLink, NewTrip,
    Participant, Trip, TripUpdate,
};

/// Operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    CreateTrip,
    GetTrip,
    UpdateTrip,
    ListActivities,
    CreateActivity,
    ListLinks,
    CreateLink,
    ListParticipants,
    ConfirmParticipant,
}

#[derive(Debug, Default)]
struct MockState {
    trips: HashMap<String, Trip>,
    activities: HashMap<String, Vec<Activity>>,
    links: HashMap<String, Vec<Link>>,
    participants: HashMap<String, Vec<Participant>>,
    failures: HashMap<MockOperation, String>,
    delay: Duration,
    calls: HashMap<MockOperation, usize>,
    created: Vec<NewTrip>,
    updates: Vec<TripUpdate>,
    confirmations: Vec<(String, AttendanceConfirmation)>,
}

/// Mock trip API
#[derive(Debug, Clone, Default)]
pub struct MockTripClient {
    state: Arc<Mutex<MockState>>,
}

impl MockTripClient {
    /// An empty API that accepts every request
    pub fn new() -> Self {
        Self::default()
    }

    /// An API that already knows `trip`
    pub fn with_trip(trip: Trip) -> Self {
        let client = Self::new();
        client.insert_trip(trip);
        client
    }

    pub fn insert_trip(&self, trip: Trip) {
        self.state.lock().unwrap().trips.insert(trip.id.clone(), trip);
    }

    pub fn insert_participant(&self, trip_id: &str, participant: Participant) {
        self.state
            .lock()
            .unwrap()
            .participants
            .entry(trip_id.to_string())
            .or_default()
            .push(participant);
    }

    /// Make `operation` fail with a network error carrying `message`
    pub fn fail(&self, operation: MockOperation, message: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(operation, message.to_string());
    }

    /// Make `operation` succeed again
    pub fn recover(&self, operation: MockOperation) {
        self.state.lock().unwrap().failures.remove(&operation);
    }

    /// Delay every operation (simulates network latency)
    pub fn set_delay(&self, delay: Duration) {
        self.state.lock().unwrap().delay = delay;
    }

    /// Number of times `operation` was called, failed calls included
    pub fn call_count(&self, operation: MockOperation) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(&operation)
            .copied()
            .unwrap_or(0)
    }

    /// Every create request received, in order
    pub fn created_trips(&self) -> Vec<NewTrip> {
        self.state.lock().unwrap().created.clone()
    }

    /// Every update request received, in order
    pub fn updates(&self) -> Vec<TripUpdate> {
        self.state.lock().unwrap().updates.clone()
    }

    /// Every attendance confirmation received, as (participant id, details)
    pub fn confirmations(&self) -> Vec<(String, AttendanceConfirmation)> {
        self.state.lock().unwrap().confirmations.clone()
    }

    pub fn trip(&self, trip_id: &str) -> Option<Trip> {
        self.state.lock().unwrap().trips.get(trip_id).cloned()
    }

    /// Record the call, apply the delay, and return the configured failure
    async fn begin(&self, operation: MockOperation) -> Result<()> {
        let (delay, failure) = {
            let mut state = self.state.lock().unwrap();
            *state.calls.entry(operation).or_insert(0) += 1;
            (state.delay, state.failures.get(&operation).cloned())
        };

        if !delay.is_zero() {
            sleep(delay).await;
        }

        match failure {
            Some(message) => Err(RemoteError::Network(message).into()),
            None => Ok(()),
        }
    }

    fn require_trip(state: &MockState, trip_id: &str) -> Result<()> {
        if state.trips.contains_key(trip_id) {
            Ok(())
        } else {
            Err(RemoteError::NotFound(format!("trip {}", trip_id)).into())
        }
    }
}

#[async_trait]
impl TripClient for MockTripClient {
    async fn create_trip(&self, trip: &NewTrip) -> Result<String> {
        self.begin(MockOperation::CreateTrip).await?;

        let id = uuid::Uuid::new_v4().to_string();
        let mut state = self.state.lock().unwrap();
        state.created.push(trip.clone());
        state.trips.insert(
            id.clone(),
            Trip {
                id: id.clone(),
                destination: trip.destination.clone(),
                starts_at: trip.starts_at,
                ends_at: trip.ends_at,
                is_confirmed: false,
            },
        );
        let guests = trip
            .emails_to_invite
            .iter()
            .map(|email| Participant {
                id: uuid::Uuid::new_v4().to_string(),
                name: None,
                email: email.clone(),
                is_confirmed: false,
            })
            .collect();
        state.participants.insert(id.clone(), guests);

        Ok(id)
    }

    async fn get_trip(&self, trip_id: &str) -> Result<Trip> {
        self.begin(MockOperation::GetTrip).await?;

        let state = self.state.lock().unwrap();
        state
            .trips
            .get(trip_id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(format!("trip {}", trip_id)).into())
    }

    async fn update_trip(&self, update: &TripUpdate) -> Result<()> {
        self.begin(MockOperation::UpdateTrip).await?;

        let mut state = self.state.lock().unwrap();
        Self::require_trip(&state, &update.id)?;
        state.updates.push(update.clone());
        if let Some(trip) = state.trips.get_mut(&update.id) {
            trip.destination = update.destination.clone();
            trip.starts_at = update.starts_at;
            trip.ends_at = update.ends_at;
        }
        Ok(())
    }

    async fn list_activities(&self, trip_id: &str) -> Result<Vec<ActivityDay>> {
        self.begin(MockOperation::ListActivities).await?;

        let state = self.state.lock().unwrap();
        Self::require_trip(&state, trip_id)?;

        let mut days: BTreeMap<chrono::NaiveDate, Vec<Activity>> = BTreeMap::new();
        for activity in state.activities.get(trip_id).into_iter().flatten() {
            days.entry(activity.occurs_at.date_naive())
                .or_default()
                .push(activity.clone());
        }

        Ok(days
            .into_iter()
            .map(|(date, mut activities)| {
                activities.sort_by_key(|a| a.occurs_at);
                ActivityDay {
                    date: date.and_time(chrono::NaiveTime::MIN).and_utc(),
                    activities,
                }
            })
            .collect())
    }

    async fn create_activity(&self, trip_id: &str, activity: &NewActivity) -> Result<String> {
        self.begin(MockOperation::CreateActivity).await?;

        let mut state = self.state.lock().unwrap();
        Self::require_trip(&state, trip_id)?;
        let id = uuid::Uuid::new_v4().to_string();
        state
            .activities
            .entry(trip_id.to_string())
            .or_default()
            .push(Activity {
                id: id.clone(),
                title: activity.title.clone(),
                occurs_at: activity.occurs_at,
            });
        Ok(id)
    }

    async fn list_links(&self, trip_id: &str) -> Result<Vec<Link>> {
        self.begin(MockOperation::ListLinks).await?;

        let state = self.state.lock().unwrap();
        Self::require_trip(&state, trip_id)?;
        Ok(state.links.get(trip_id).cloned().unwrap_or_default())
    }

    async fn create_link(&self, trip_id: &str, link: &NewLink) -> Result<String> {
        self.begin(MockOperation::CreateLink).await?;

        let mut state = self.state.lock().unwrap();
        Self::require_trip(&state, trip_id)?;
        let id = uuid::Uuid::new_v4().to_string();
        state.links.entry(trip_id.to_string()).or_default().push(Link {
            id: id.clone(),
            title: link.title.clone(),
            url: link.url.clone(),
        });
        Ok(id)
    }

    async fn list_participants(&self, trip_id: &str) -> Result<Vec<Participant>> {
        self.begin(MockOperation::ListParticipants).await?;

        let state = self.state.lock().unwrap();
        Self::require_trip(&state, trip_id)?;
        Ok(state.participants.get(trip_id).cloned().unwrap_or_default())
    }

    async fn confirm_participant(
        &self,
        participant_id: &str,
        confirmation: &AttendanceConfirmation,
    ) -> Result<()> {
        self.begin(MockOperation::ConfirmParticipant).await?;

        let mut state = self.state.lock().unwrap();
        let participant = state
            .participants
            .values_mut()
            .flatten()
            .find(|p| p.id == participant_id)
            .ok_or_else(|| RemoteError::NotFound(format!("participant {}", participant_id)))?;

        participant.name = Some(confirmation.name.clone());
        participant.email = confirmation.email.clone();
        participant.is_confirmed = true;

        state
            .confirmations
            .push((participant_id.to_string(), confirmation.clone()));
        Ok(())
    }
}
