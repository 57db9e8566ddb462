//! USGS GeoJSON feed client.
//!
//! Provides async HTTP access to a single earthquake feed.
//! Uses reqwest with rustls for TLS. One attempt per call: no retry.

use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::FeedConfig;
use crate::errors::QuakeMapError;
use crate::models::{Feature, FeatureCollection};

/// User agent string for feed requests.
const USER_AGENT: &str = concat!("quakemap/", env!("CARGO_PKG_VERSION"));

/// Client for one GeoJSON feed.
pub struct FeedClient {
    client: Client,
    url: String,
}

impl FeedClient {
    /// Create a client for the configured feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &FeedConfig) -> Result<Self, QuakeMapError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: config.url.clone(),
        })
    }

    /// The feed URL this client requests.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the feed and return its validated features.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not a success,
    /// the body is not JSON, the `features` array is missing, or a feature
    /// is structurally invalid.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_features(&self) -> Result<Vec<Feature>, QuakeMapError> {
        debug!("fetching feed from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        // Check status before parsing
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuakeMapError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let features = parse_feed(&body)?;

        debug!("fetched {} events", features.len());
        Ok(features)
    }
}

/// Parse and validate a feed body obtained by any means.
///
/// # Errors
///
/// See [`FeedClient::fetch_features`].
pub fn parse_feed(body: &str) -> Result<Vec<Feature>, QuakeMapError> {
    FeatureCollection::from_json(body)?.into_features(body)
}
