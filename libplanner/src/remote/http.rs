//! HTTP implementation of the trip API

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::{ConfigError, RemoteError, Result};
use crate::remote::TripClient;
use crate::types::{
    ActivityDay, AttendanceConfirmation, Link, NewActivity, NewLink, NewTrip, Participant, Trip,
    TripUpdate,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTripResponse {
    trip_id: String,
}

#[derive(Debug, Deserialize)]
struct TripResponse {
    trip: Trip,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateActivityResponse {
    activity_id: String,
}

#[derive(Debug, Deserialize)]
struct ActivitiesResponse {
    activities: Vec<ActivityDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateLinkResponse {
    link_id: String,
}

#[derive(Debug, Deserialize)]
struct LinksResponse {
    links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
struct ParticipantsResponse {
    participants: Vec<Participant>,
}

/// Map a transport failure to a network error, keeping the operation name
fn map_transport_error(error: reqwest::Error, context: &str) -> RemoteError {
    RemoteError::Network(format!("{} failed: {}", context, error))
}

/// Trip API client over HTTP/JSON
///
/// No request timeout is applied; a failed request leaves the caller free
/// to retry.
#[derive(Debug, Clone)]
pub struct HttpTripClient {
    client: Client,
    base_url: String,
}

impl HttpTripClient {
    /// Create a client for the API at `config.base_url`
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ConfigError::MissingField("api.base_url".to_string()).into());
        }

        let client = Client::builder()
            .build()
            .map_err(|e| RemoteError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and check its status; 404 becomes `NotFound(resource)`
    async fn send(
        &self,
        request: RequestBuilder,
        context: &str,
        resource: &str,
    ) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| map_transport_error(e, context))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound(resource.to_string()).into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("{} returned {}: {}", context, status, body);
            return Err(RemoteError::Network(format!("{} failed with status {}", context, status)).into());
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
        resource: &str,
    ) -> Result<T> {
        let response = self.send(request, context, resource).await?;
        let body = response
            .json::<T>()
            .await
            .map_err(|e| map_transport_error(e, context))?;
        Ok(body)
    }
}

#[async_trait]
impl TripClient for HttpTripClient {
    async fn create_trip(&self, trip: &NewTrip) -> Result<String> {
        let request = self.client.post(self.url("/trips")).json(trip);
        let body: CreateTripResponse = self.send_json(request, "create trip", "trips").await?;
        tracing::debug!("Created trip {}", body.trip_id);
        Ok(body.trip_id)
    }

    async fn get_trip(&self, trip_id: &str) -> Result<Trip> {
        let request = self.client.get(self.url(&format!("/trips/{}", trip_id)));
        let body: TripResponse = self
            .send_json(request, "get trip", &format!("trip {}", trip_id))
            .await?;
        Ok(body.trip)
    }

    async fn update_trip(&self, update: &TripUpdate) -> Result<()> {
        let request = self
            .client
            .put(self.url(&format!("/trips/{}", update.id)))
            .json(update);
        self.send(request, "update trip", &format!("trip {}", update.id))
            .await?;
        Ok(())
    }

    async fn list_activities(&self, trip_id: &str) -> Result<Vec<ActivityDay>> {
        let request = self
            .client
            .get(self.url(&format!("/trips/{}/activities", trip_id)));
        let body: ActivitiesResponse = self
            .send_json(request, "list activities", &format!("trip {}", trip_id))
            .await?;
        Ok(body.activities)
    }

    async fn create_activity(&self, trip_id: &str, activity: &NewActivity) -> Result<String> {
        let request = self
            .client
            .post(self.url(&format!("/trips/{}/activities", trip_id)))
            .json(activity);
        let body: CreateActivityResponse = self
            .send_json(request, "create activity", &format!("trip {}", trip_id))
            .await?;
        Ok(body.activity_id)
    }

    async fn list_links(&self, trip_id: &str) -> Result<Vec<Link>> {
        let request = self.client.get(self.url(&format!("/trips/{}/links", trip_id)));
        let body: LinksResponse = self
            .send_json(request, "list links", &format!("trip {}", trip_id))
            .await?;
        Ok(body.links)
    }

    async fn create_link(&self, trip_id: &str, link: &NewLink) -> Result<String> {
        let request = self
            .client
            .post(self.url(&format!("/trips/{}/links", trip_id)))
            .json(link);
        let body: CreateLinkResponse = self
            .send_json(request, "create link", &format!("trip {}", trip_id))
            .await?;
        Ok(body.link_id)
    }

    async fn list_participants(&self, trip_id: &str) -> Result<Vec<Participant>> {
        let request = self
            .client
            .get(self.url(&format!("/trips/{}/participants", trip_id)));
        let body: ParticipantsResponse = self
            .send_json(request, "list participants", &format!("trip {}", trip_id))
            .await?;
        Ok(body.participants)
    }

    async fn confirm_participant(
        &self,
        participant_id: &str,
        confirmation: &AttendanceConfirmation,
    ) -> Result<()> {
        let request = self
            .client
            .patch(self.url(&format!("/participants/{}/confirm", participant_id)))
            .json(confirmation);
        self.send(
            request,
            "confirm participant",
            &format!("participant {}", participant_id),
        )
        .await?;
        Ok(())
    }
}
