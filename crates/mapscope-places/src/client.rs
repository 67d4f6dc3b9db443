//! HTTP client for the place-search nearby API.
//!
//! Wraps `reqwest` with API key management, typed response deserialization,
//! and envelope-status handling: `"OK"` returns the ranked entity list and
//! any other status surfaces as [`PlacesError::ApiStatus`], which callers
//! treat as a per-point soft failure.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::types::{NearbySearchResponse, Place};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/";
const NEARBY_SEARCH_PATH: &str = "maps/api/place/nearbysearch/json";

/// Client for the place-search REST API.
///
/// Manages the HTTP client, API key, and base URL. Use [`PlacesClient::new`]
/// for production or [`PlacesClient::with_base_url`] to point at a mock
/// server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("mapscope/0.1 (geo-visibility-analysis)")
            .build()?;

        // Ensure exactly one trailing slash so Url::join appends the nearby
        // search path instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: normalised.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Searches for establishments near `(lat, lng)` within `radius_m`
    /// metres, filtered by `keyword`. Returns entities in API rank order.
    ///
    /// Any envelope status other than `"OK"` (including `ZERO_RESULTS`) is
    /// surfaced as [`PlacesError::ApiStatus`]; the campaign treats that as
    /// a skipped point, never as an analyzable empty result.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::ApiStatus`] for any non-OK envelope status.
    /// - [`PlacesError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn nearby_search(
        &self,
        lat: f64,
        lng: f64,
        radius_m: u32,
        keyword: &str,
    ) -> Result<Vec<Place>, PlacesError> {
        let url = self.build_url(lat, lng, radius_m, keyword)?;
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let envelope: NearbySearchResponse =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: format!("nearbysearch(keyword={keyword})"),
                source: e,
            })?;

        match envelope.status.as_str() {
            "OK" => Ok(envelope.results),
            status => Err(PlacesError::ApiStatus {
                status: status.to_owned(),
                message: envelope.error_message,
            }),
        }
    }

    /// Builds the nearby-search URL with properly percent-encoded query
    /// parameters via [`Url::query_pairs_mut`].
    fn build_url(
        &self,
        lat: f64,
        lng: f64,
        radius_m: u32,
        keyword: &str,
    ) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(NEARBY_SEARCH_PATH)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("location", &format!("{lat},{lng}"));
            pairs.append_pair("radius", &radius_m.to_string());
            pairs.append_pair("keyword", keyword);
            pairs.append_pair("type", "establishment");
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }
}
