//! The fetch → map → compose pipeline.
//!
//! One attempt per run. Composition only happens after a successful fetch,
//! so a failed run never produces a map.

use chrono::Local;
use tracing::{info, warn};

use crate::client::{FeedClient, parse_feed};
use crate::compose::{MapDocument, compose};
use crate::config::{AppConfig, MapConfig};
use crate::errors::QuakeMapError;
use crate::layer::build_overlay;
use crate::models::Feature;

/// Fetch the configured feed and compose the map.
///
/// # Errors
///
/// Returns the fetch error unchanged; nothing is composed in that case.
pub async fn start(config: &AppConfig) -> Result<MapDocument, QuakeMapError> {
    let client = FeedClient::new(&config.feed)?;
    let features = client.fetch_features().await?;
    info!("fetched {} earthquakes from {}", features.len(), client.url());
    Ok(render(&config.map, &features))
}

/// Compose the map from a feed body already on hand (e.g. a saved file).
///
/// # Errors
///
/// Returns a parse or validation error; nothing is composed in that case.
pub fn start_from_body(config: &AppConfig, body: &str) -> Result<MapDocument, QuakeMapError> {
    let features = parse_feed(body)?;
    info!("loaded {} earthquakes", features.len());
    Ok(render(&config.map, &features))
}

fn render(map: &MapConfig, features: &[Feature]) -> MapDocument {
    let overlay = build_overlay(features, &Local);
    if overlay.is_empty() {
        warn!("feed contained no earthquakes; the map will only show base layers");
    }
    let document = compose(map, overlay);
    info!(markers = document.marker_count(), "map composed");
    document
}
