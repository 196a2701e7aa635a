//! Remote trip API
//!
//! The trip, activity, link and participant resources live on a remote
//! service. Controllers talk to it only through the [`TripClient`] trait so
//! the transport can be swapped for [`mock::MockTripClient`] in tests.
//!
//! # Examples
//!
//! ```no_run
//! use libplanner::remote::{TripClient, http::HttpTripClient};
//! use libplanner::Config;
//!
//! # async fn example() -> libplanner::Result<()> {
//! let config = Config::load_or_default()?;
//! let client = HttpTripClient::new(&config.api)?;
//!
//! let trip = client.get_trip("abc123").await?;
//! println!("{}", trip.headline());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    ActivityDay, AttendanceConfirmation, Link, NewActivity, NewLink, NewTrip, Participant, Trip,
    TripUpdate,
};

pub mod http;

// Available outside tests so embedding applications can drive the flows offline
pub mod mock;

/// Operations of the remote trip API
///
/// Transport failures are reported as `RemoteError::Network`; a missing
/// trip as `RemoteError::NotFound`.
#[async_trait]
pub trait TripClient: Send + Sync {
    /// Create a trip and invite guests; returns the new trip id
    async fn create_trip(&self, trip: &NewTrip) -> Result<String>;

    /// Fetch a trip by id
    async fn get_trip(&self, trip_id: &str) -> Result<Trip>;

    /// Change destination and dates of an existing trip
    async fn update_trip(&self, update: &TripUpdate) -> Result<()>;

    /// Activities of a trip, grouped by day
    async fn list_activities(&self, trip_id: &str) -> Result<Vec<ActivityDay>>;

    /// Schedule an activity; returns the new activity id
    async fn create_activity(&self, trip_id: &str, activity: &NewActivity) -> Result<String>;

    async fn list_links(&self, trip_id: &str) -> Result<Vec<Link>>;

    /// Share a link; returns the new link id
    async fn create_link(&self, trip_id: &str, link: &NewLink) -> Result<String>;

    async fn list_participants(&self, trip_id: &str) -> Result<Vec<Participant>>;

    /// Confirm a guest's attendance with their name and e-mail
    async fn confirm_participant(
        &self,
        participant_id: &str,
        confirmation: &AttendanceConfirmation,
    ) -> Result<()>;
}

#[async_trait]
impl<T: TripClient + ?Sized> TripClient for std::sync::Arc<T> {
    async fn create_trip(&self, trip: &NewTrip) -> Result<String> {
        (**self).create_trip(trip).await
    }

    async fn get_trip(&self, trip_id: &str) -> Result<Trip> {
        (**self).get_trip(trip_id).await
    }

    async fn update_trip(&self, update: &TripUpdate) -> Result<()> {
        (**self).update_trip(update).await
    }

    async fn list_activities(&self, trip_id: &str) -> Result<Vec<ActivityDay>> {
        (**self).list_activities(trip_id).await
    }

    async fn create_activity(&self, trip_id: &str, activity: &NewActivity) -> Result<String> {
        (**self).create_activity(trip_id, activity).await
    }

    async fn list_links(&self, trip_id: &str) -> Result<Vec<Link>> {
        (**self).list_links(trip_id).await
    }

    async fn create_link(&self, trip_id: &str, link: &NewLink) -> Result<String> {
        (**self).create_link(trip_id, link).await
    }

    async fn list_participants(&self, trip_id: &str) -> Result<Vec<Participant>> {
        (**self).list_participants(trip_id).await
    }

    async fn confirm_participant(
        &self,
        participant_id: &str,
        confirmation: &AttendanceConfirmation,
    ) -> Result<()> {
        (**self).confirm_participant(participant_id, confirmation).await
    }
}
