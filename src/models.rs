//! Data models for the USGS GeoJSON summary feed.
//!
//! The feed is deserialized into loose "wire" structs first, then validated
//! into [`Feature`] records so that a broken event is reported at the fetch
//! boundary instead of surfacing later while the map is rendered.

use chrono::{DateTime, TimeZone};
use serde::Deserialize;

use crate::errors::QuakeMapError;

/// Longest payload excerpt carried in a [`QuakeMapError::MissingFeatures`].
const PAYLOAD_PREVIEW_CHARS: usize = 200;

/// Top-level GeoJSON response from the feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    /// Earthquake events; absent or `null` when the payload is malformed
    #[serde(default)]
    pub features: Option<Vec<WireFeature>>,
}

impl FeatureCollection {
    /// Parse a raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`QuakeMapError::Parse`] if the body is not a JSON object.
    pub fn from_json(body: &str) -> Result<Self, QuakeMapError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Validate every feature and return them in feed order.
    ///
    /// `raw` is the original body, used only to describe a payload that has
    /// no `features` array.
    ///
    /// # Errors
    ///
    /// Returns [`QuakeMapError::MissingFeatures`] when the array is absent and
    /// [`QuakeMapError::InvalidFeature`] for the first unusable feature.
    pub fn into_features(self, raw: &str) -> Result<Vec<Feature>, QuakeMapError> {
        let Some(features) = self.features else {
            return Err(QuakeMapError::MissingFeatures {
                payload: preview(raw),
            });
        };

        features
            .into_iter()
            .enumerate()
            .map(|(index, wire)| wire.validate(index))
            .collect()
    }
}

fn preview(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.chars().count() <= PAYLOAD_PREVIEW_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(PAYLOAD_PREVIEW_CHARS).collect();
    format!("{cut}...")
}

/// A feature exactly as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct WireFeature {
    pub properties: Option<WireProperties>,
    pub geometry: Option<WireGeometry>,
}

/// Event properties used by the map. Other USGS fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WireProperties {
    /// Human-readable place description
    pub place: Option<String>,

    /// Magnitude value
    pub mag: Option<f64>,

    /// Event time (ms since epoch)
    pub time: Option<i64>,
}

/// Geographic geometry for an event.
#[derive(Debug, Clone, Deserialize)]
pub struct WireGeometry {
    /// Coordinates: [longitude, latitude, depth_km]
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl WireFeature {
    fn validate(self, index: usize) -> Result<Feature, QuakeMapError> {
        let invalid = |reason: String| QuakeMapError::InvalidFeature { index, reason };

        let properties = self
            .properties
            .ok_or_else(|| invalid("missing properties".into()))?;
        let geometry = self
            .geometry
            .ok_or_else(|| invalid("missing geometry".into()))?;
        let time = properties
            .time
            .ok_or_else(|| invalid("missing time".into()))?;

        let &[longitude, latitude, depth_km] = geometry.coordinates.as_slice() else {
            return Err(invalid(format!(
                "expected 3 coordinates, got {}",
                geometry.coordinates.len()
            )));
        };

        Ok(Feature {
            place: properties.place,
            mag: properties.mag,
            time,
            coordinates: Coordinates {
                longitude,
                latitude,
                depth_km,
            },
        })
    }
}

/// Position of an event: longitude, latitude and depth below the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
    /// Depth in kilometers (positive down, may be negative)
    pub depth_km: f64,
}

/// A single validated earthquake event.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub place: Option<String>,
    pub mag: Option<f64>,
    /// Event time (ms since epoch)
    pub time: i64,
    pub coordinates: Coordinates,
}

impl Feature {
    /// Event time in the given zone, `None` if out of chrono's range.
    #[must_use]
    pub fn time_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        tz.timestamp_millis_opt(self.time).single()
    }

    /// Get depth in kilometers (positive down).
    #[must_use]
    pub fn depth_km(&self) -> f64 {
        self.coordinates.depth_km
    }
}
