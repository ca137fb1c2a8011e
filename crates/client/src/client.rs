//! HTTP client for the Opus API.
//!
//! Every request carries the `X-API-Key` header and a JSON content type.
//! Non-success responses become [`ClientError::Api`].

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ClientError;
use crate::models::{
    AssignmentUpdate, AssignmentsBody, ClassAssignment, ClassWeight, DataEnvelope,
    DeleteAssignmentsBody, DeleteResult, ErrorBody, Health, PlaybackProfile, Style, StyleTrack,
    UpsertResult, WeightUpdate, WeightsBody,
};

/// Header carrying the internal API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Message used when an error response carries none.
pub const FALLBACK_ERROR_MESSAGE: &str = "API request failed";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin, e.g. `https://opus.example.com`.
    pub base_url: String,
    pub api_key: String,
    /// Total per-request timeout.
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct OpusApiClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl OpusApiClient {
    /// Build a client.
    ///
    /// # Errors
    /// Fails when the base URL does not parse or cannot carry a path, or
    /// when the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: config.base_url,
                reason: "URL cannot carry a path".into(),
            });
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    // -----------------------------------------------------------------------
    // Styles and tracks
    // -----------------------------------------------------------------------

    pub async fn get_styles(&self) -> Result<Vec<Style>, ClientError> {
        let url = self.endpoint(&["v1", "styles"]);
        self.fetch_data(self.request(Method::GET, url)).await
    }

    pub async fn get_style_tracks(&self, style_id: &str) -> Result<Vec<StyleTrack>, ClientError> {
        let url = self.endpoint(&["v1", "styles", style_id, "tracks"]);
        self.fetch_data(self.request(Method::GET, url)).await
    }

    // -----------------------------------------------------------------------
    // Assignments
    // -----------------------------------------------------------------------

    pub async fn get_style_assignments(
        &self,
        style_id: &str,
    ) -> Result<Vec<ClassAssignment>, ClientError> {
        let url = self.endpoint(&["v1", "styles", style_id, "assignments"]);
        self.fetch_data(self.request(Method::GET, url)).await
    }

    pub async fn update_style_assignments(
        &self,
        style_id: &str,
        assignments: &[AssignmentUpdate],
    ) -> Result<UpsertResult, ClientError> {
        let url = self.endpoint(&["v1", "styles", style_id, "assignments"]);
        let builder = self
            .request(Method::PUT, url)
            .json(&AssignmentsBody { assignments });
        self.execute(builder).await
    }

    /// Return the given tracks of a style to "uncategorized".
    pub async fn delete_style_assignments(
        &self,
        style_id: &str,
        song_ids: &[String],
    ) -> Result<DeleteResult, ClientError> {
        let url = self.endpoint(&["v1", "styles", style_id, "assignments"]);
        let builder = self
            .request(Method::DELETE, url)
            .json(&DeleteAssignmentsBody { song_ids });
        self.execute(builder).await
    }

    // -----------------------------------------------------------------------
    // Weights
    // -----------------------------------------------------------------------

    pub async fn get_style_weights(&self, style_id: &str) -> Result<Vec<ClassWeight>, ClientError> {
        let url = self.endpoint(&["v1", "styles", style_id, "weights"]);
        self.fetch_data(self.request(Method::GET, url)).await
    }

    pub async fn update_style_weights(
        &self,
        style_id: &str,
        weights: &[WeightUpdate],
    ) -> Result<UpsertResult, ClientError> {
        let url = self.endpoint(&["v1", "styles", style_id, "weights"]);
        let builder = self.request(Method::PUT, url).json(&WeightsBody { weights });
        self.execute(builder).await
    }

    // -----------------------------------------------------------------------
    // Profile and health
    // -----------------------------------------------------------------------

    pub async fn get_playback_profile(
        &self,
        style_id: &str,
        include_track_ids: bool,
    ) -> Result<PlaybackProfile, ClientError> {
        let mut url = self.endpoint(&["v1", "styles", style_id, "playback-profile"]);
        if include_track_ids {
            url.query_pairs_mut().append_pair("include_track_ids", "1");
        }
        self.fetch_data(self.request(Method::GET, url)).await
    }

    pub async fn health(&self) -> Result<Health, ClientError> {
        let url = self.endpoint(&["health"]);
        self.execute(self.request(Method::GET, url)).await
    }

    // -----------------------------------------------------------------------
    // Plumbing
    // -----------------------------------------------------------------------

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects URLs that cannot be a base, so this always applies.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
    }

    async fn fetch_data<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        let envelope: DataEnvelope<T> = self.execute(builder).await?;
        Ok(envelope.data)
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "Opus API response");

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_default();

        Err(ClientError::Api {
            status: detail.status.unwrap_or(status.as_u16()),
            message: detail
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string()),
        })
    }
}
