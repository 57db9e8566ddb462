//! Feature-to-layer mapping.
//!
//! Turns validated features into circle markers with popups, collected into
//! a single overlay. Pure and synchronous: no I/O, no filtering, feed order
//! is preserved.

use chrono::TimeZone;
use serde::Serialize;

use crate::html::escape_html;
use crate::models::Feature;
use crate::style::{MarkerStroke, marker_color, marker_size};

/// Display name of the earthquake overlay in the layer control.
pub const OVERLAY_NAME: &str = "Earthquakes";

/// A circle marker bound to one earthquake.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// `[latitude, longitude]`, the order Leaflet expects
    pub lat_lng: [f64; 2],
    pub radius: f64,
    pub fill_color: &'static str,
    pub popup: String,
}

/// Overlay holding every marker of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthquakeOverlay {
    pub name: &'static str,
    pub stroke: MarkerStroke,
    pub markers: Vec<Marker>,
}

impl EarthquakeOverlay {
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Build the overlay, one marker per feature in input order.
///
/// `tz` is the zone used for popup timestamps; the binary passes
/// [`chrono::Local`].
pub fn build_overlay<Tz>(features: &[Feature], tz: &Tz) -> EarthquakeOverlay
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let markers = features.iter().map(|f| build_marker(f, tz)).collect();

    EarthquakeOverlay {
        name: OVERLAY_NAME,
        stroke: MarkerStroke::default(),
        markers,
    }
}

fn build_marker<Tz>(feature: &Feature, tz: &Tz) -> Marker
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let c = feature.coordinates;
    Marker {
        lat_lng: [c.latitude, c.longitude],
        radius: marker_size(feature.mag.unwrap_or(0.0)),
        fill_color: marker_color(c.depth_km),
        popup: popup_html(feature, tz),
    }
}

/// Popup body: place heading, magnitude and depth, then the event time.
pub fn popup_html<Tz>(feature: &Feature, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let place = feature.place.as_deref().unwrap_or("Unknown location");
    let mag = feature
        .mag
        .map_or_else(|| "unknown".to_string(), |m| m.to_string());
    let depth = feature.depth_km();
    let time = format_event_time(feature, tz);

    format!(
        "<h3>{place}</h3><hr><p>Magnitude: {mag}<br>Depth: {depth}</p><p>{time}</p>",
        place = escape_html(place),
        time = escape_html(&time),
    )
}

/// Browser-style long date, e.g. `Thu Oct 09 2025 08:53:20 GMT+0000`.
fn format_event_time<Tz>(feature: &Feature, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    feature
        .time_in(tz)
        .map(|t| t.format("%a %b %d %Y %H:%M:%S GMT%z").to_string())
        .unwrap_or_else(|| "Invalid Date".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use chrono::{FixedOffset, Utc};

    fn feature(place: Option<&str>, mag: Option<f64>, depth_km: f64) -> Feature {
        Feature {
            place: place.map(str::to_string),
            mag,
            time: 1_760_000_000_000,
            coordinates: Coordinates {
                longitude: -116.78,
                latitude: 33.49,
                depth_km,
            },
        }
    }

    #[test]
    fn test_one_marker_per_feature_in_order() {
        let features: Vec<Feature> = (0..7)
            .map(|i| feature(Some(format!("quake {i}").as_str()), Some(f64::from(i)), 10.0))
            .collect();

        let overlay = build_overlay(&features, &Utc);
        assert_eq!(overlay.len(), 7);
        assert_eq!(overlay.name, "Earthquakes");
        for (i, marker) in overlay.markers.iter().enumerate() {
            assert!(marker.popup.contains(&format!("<h3>quake {i}</h3>")));
        }
    }

    #[test]
    fn test_empty_feed_gives_empty_overlay() {
        let overlay = build_overlay(&[], &Utc);
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_marker_fields() {
        let overlay = build_overlay(&[feature(Some("x"), Some(4.7), 55.0)], &Utc);
        let marker = &overlay.markers[0];
        assert_eq!(marker.lat_lng, [33.49, -116.78]);
        assert!((marker.radius - 23.5).abs() < 1e-9);
        assert_eq!(marker.fill_color, "#FFFF00");
    }

    #[test]
    fn test_null_magnitude_gives_zero_radius() {
        let overlay = build_overlay(&[feature(None, None, 1.0)], &Utc);
        assert!(overlay.markers[0].radius.abs() < f64::EPSILON);
        assert!(overlay.markers[0].popup.contains("Magnitude: unknown"));
        assert!(overlay.markers[0].popup.contains("<h3>Unknown location</h3>"));
    }

    #[test]
    fn test_popup_text() {
        let popup = popup_html(&feature(Some("10 km NE of Aguanga, CA"), Some(1.5), 4.2), &Utc);
        assert_eq!(
            popup,
            "<h3>10 km NE of Aguanga, CA</h3><hr><p>Magnitude: 1.5<br>Depth: 4.2</p>\
             <p>Thu Oct 09 2025 08:53:20 GMT+0000</p>"
        );
    }

    #[test]
    fn test_popup_uses_given_zone() {
        let pdt = FixedOffset::west_opt(7 * 3600).expect("valid offset");
        let popup = popup_html(&feature(Some("x"), Some(1.0), -0.42), &pdt);
        assert!(popup.contains("Magnitude: 1<br>Depth: -0.42"));
        assert!(popup.ends_with("<p>Thu Oct 09 2025 01:53:20 GMT-0700</p>"));
    }

    #[test]
    fn test_popup_escapes_place() {
        let popup = popup_html(&feature(Some("<b>\"A&B\"</b>"), Some(2.0), 1.0), &Utc);
        assert!(popup.starts_with("<h3>&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;</h3>"));
    }
}
