//! Map composition.
//!
//! Assembles base layers, the earthquake overlay, the depth legend and the
//! layer control into a [`MapDocument`], and renders that document as a
//! self-contained Leaflet page. Tile fetching, panning and popups are left
//! to Leaflet in the browser.

use serde::Serialize;

use crate::config::{ControlPosition, LatLng, MapConfig, TileSource};
use crate::html::escape_html;
use crate::layer::EarthquakeOverlay;
use crate::style::{DEPTH_BOUNDARIES, marker_color};

const LEGEND_TITLE: &str = "Earthquake Depth";

/// One legend row: a color swatch and its depth range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub from: i32,
    /// Inclusive upper bound; `None` for the open-ended deepest bucket
    pub to: Option<i32>,
    pub color: &'static str,
}

impl LegendEntry {
    /// Plain-text range, e.g. `30–49` or `90+`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.to {
            Some(to) => format!("{}\u{2013}{to}", self.from),
            None => format!("{}+", self.from),
        }
    }
}

/// Depth legend control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub title: &'static str,
    pub position: ControlPosition,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Legend for the depth buckets, colored by [`marker_color`].
    #[must_use]
    pub fn depth(position: ControlPosition) -> Self {
        let entries = DEPTH_BOUNDARIES
            .iter()
            .enumerate()
            .map(|(i, &from)| LegendEntry {
                from,
                to: DEPTH_BOUNDARIES.get(i + 1).map(|next| next - 1),
                color: marker_color(f64::from(from + 1)),
            })
            .collect();

        Self {
            title: LEGEND_TITLE,
            position,
            entries,
        }
    }

    /// Inner HTML of the legend box.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = format!("<h4>{}</h4>", escape_html(self.title));
        for entry in &self.entries {
            html.push_str(&format!(
                "<i style=\"background:{}\"></i> {}",
                entry.color, entry.from
            ));
            match entry.to {
                Some(to) => html.push_str(&format!("&ndash;{to}<br>")),
                None => html.push('+'),
            }
        }
        html
    }
}

/// Base-layer / overlay switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerControl {
    pub position: ControlPosition,
    pub collapsed: bool,
    pub base_layers: Vec<String>,
    pub overlays: Vec<String>,
}

/// Everything needed to draw the map, independent of the output format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDocument {
    pub container_id: String,
    pub center: LatLng,
    pub zoom: u8,
    /// The first entry is active on load
    pub base_layers: Vec<TileSource>,
    /// Shown on load
    pub overlay: EarthquakeOverlay,
    pub legend: Legend,
    pub layer_control: LayerControl,
}

/// Compose the map from its configuration and the earthquake overlay.
#[must_use]
pub fn compose(config: &MapConfig, overlay: EarthquakeOverlay) -> MapDocument {
    let layer_control = LayerControl {
        position: config.layer_control_position,
        collapsed: false,
        base_layers: config.base_layers.iter().map(|l| l.name.clone()).collect(),
        overlays: vec![overlay.name.to_string()],
    };

    MapDocument {
        container_id: config.container_id.clone(),
        center: config.center,
        zoom: config.zoom,
        base_layers: config.base_layers.clone(),
        overlay,
        legend: Legend::depth(config.legend_position),
        layer_control,
    }
}

/// Payload embedded in the page for the bootstrap script.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageData<'a> {
    #[serde(flatten)]
    document: &'a MapDocument,
    legend_html: String,
}

impl MapDocument {
    /// Number of earthquake markers on the map.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.overlay.len()
    }

    /// Render a standalone HTML page.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized.
    pub fn render_html(&self) -> Result<String, serde_json::Error> {
        let data = PageData {
            document: self,
            legend_html: self.legend.to_html(),
        };
        // Keep `</script>` inside popups from closing the data block
        let json = serde_json::to_string(&data)?.replace("</", "<\\/");

        Ok(PAGE_TEMPLATE
            .replace("{{container_id}}", &escape_html(&self.container_id))
            .replace("{{map_data}}", &json))
    }
}

// ============================================================================
// HTML Template (embedded for single-binary deployment)
// ============================================================================

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Earthquakes, Past Week</title>

    <!-- Leaflet -->
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>

    <style>
        html, body { height: 100%; margin: 0; padding: 0; }
        #{{container_id}} { height: 100%; width: 100%; }
        .info.legend {
            padding: 6px 8px;
            font: 14px/16px Arial, Helvetica, sans-serif;
            background: rgba(255, 255, 255, 0.9);
            box-shadow: 0 0 15px rgba(0, 0, 0, 0.2);
            border-radius: 5px;
            line-height: 18px;
            color: #555;
        }
        .info.legend h4 { margin: 0 0 5px; color: #777; }
        .info.legend i {
            width: 18px;
            height: 18px;
            float: left;
            margin-right: 8px;
            opacity: 0.8;
        }
    </style>
</head>
<body>
    <div id="{{container_id}}"></div>

    <script type="application/json" id="map-data">{{map_data}}</script>
    <script>
    (function () {
        var doc = JSON.parse(document.getElementById('map-data').textContent);

        var baseMaps = {};
        var baseOrder = [];
        doc.baseLayers.forEach(function (source) {
            baseMaps[source.name] = L.tileLayer(source.url, { attribution: source.attribution });
            baseOrder.push(baseMaps[source.name]);
        });

        var overlay = doc.overlay;
        var earthquakes = L.layerGroup(overlay.markers.map(function (m) {
            var options = Object.assign({ radius: m.radius, fillColor: m.fillColor }, overlay.stroke);
            return L.circleMarker(m.latLng, options).bindPopup(m.popup);
        }));

        var overlayMaps = {};
        overlayMaps[overlay.name] = earthquakes;

        var map = L.map(doc.containerId, {
            center: [doc.center.lat, doc.center.lng],
            zoom: doc.zoom,
            layers: baseOrder.slice(0, 1).concat([earthquakes])
        });

        var legend = L.control({ position: doc.legend.position });
        legend.onAdd = function () {
            var div = L.DomUtil.create('div', 'info legend');
            div.innerHTML = doc.legendHtml;
            return div;
        };
        legend.addTo(map);

        L.control.layers(baseMaps, overlayMaps, {
            position: doc.layerControl.position,
            collapsed: doc.layerControl.collapsed
        }).addTo(map);
    })();
    </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::build_overlay;
    use crate::models::{Coordinates, Feature};
    use chrono::Utc;

    fn sample_overlay(n: usize) -> EarthquakeOverlay {
        let features: Vec<Feature> = (0..n)
            .map(|i| Feature {
                place: Some(format!("place {i}")),
                mag: Some(2.0),
                time: 1_760_000_000_000,
                coordinates: Coordinates {
                    longitude: -120.0,
                    latitude: 35.0,
                    depth_km: 12.0,
                },
            })
            .collect();
        build_overlay(&features, &Utc)
    }

    #[test]
    fn test_legend_has_five_labelled_entries() {
        let legend = Legend::depth(ControlPosition::BottomRight);
        let labels: Vec<String> = legend.entries.iter().map(LegendEntry::label).collect();
        assert_eq!(labels, ["0–29", "30–49", "50–69", "70–89", "90+"]);
    }

    #[test]
    fn test_legend_colors_match_markers() {
        let legend = Legend::depth(ControlPosition::BottomRight);
        let colors: Vec<&str> = legend.entries.iter().map(|e| e.color).collect();
        assert_eq!(colors, ["#00FF00", "#7FFF00", "#FFFF00", "#FFA500", "#FF4500"]);
    }

    #[test]
    fn test_legend_html() {
        let html = Legend::depth(ControlPosition::BottomRight).to_html();
        assert!(html.starts_with("<h4>Earthquake Depth</h4>"));
        assert!(html.contains("<i style=\"background:#00FF00\"></i> 0&ndash;29<br>"));
        assert!(html.ends_with("<i style=\"background:#FF4500\"></i> 90+"));
        assert_eq!(html.matches("<i style=").count(), 5);
    }

    #[test]
    fn test_compose_defaults() {
        let doc = compose(&MapConfig::default(), sample_overlay(3));
        assert_eq!(doc.container_id, "map");
        assert_eq!(doc.zoom, 5);
        assert_eq!(doc.marker_count(), 3);
        assert_eq!(doc.legend.position, ControlPosition::BottomRight);
        assert!(!doc.layer_control.collapsed);
        assert_eq!(doc.layer_control.base_layers, ["Street Map", "Topographic Map"]);
        assert_eq!(doc.layer_control.overlays, ["Earthquakes"]);
    }

    #[test]
    fn test_render_html_page() {
        let doc = compose(&MapConfig::default(), sample_overlay(2));
        let html = doc.render_html().expect("render");

        assert!(html.contains("<div id=\"map\"></div>"));
        assert!(html.contains("leaflet@1.9.4/dist/leaflet.js"));
        assert!(html.contains("tile.openstreetmap.org"));
        assert!(html.contains("tile.opentopomap.org"));
        assert!(html.contains("\"containerId\":\"map\""));
        assert!(html.contains("\"collapsed\":false"));
        assert!(html.contains("\"position\":\"bottomright\""));
        assert!(html.contains("\"fillOpacity\":0.8"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_render_html_escapes_closing_tags_in_data() {
        let doc = compose(&MapConfig::default(), sample_overlay(1));
        let html = doc.render_html().expect("render");
        let start = html.find("id=\"map-data\">").expect("data block");
        let end = html[start..].find("</script>").expect("end of data block") + start;
        let data = &html[start + "id=\"map-data\">".len()..end];

        assert!(data.contains("<\\/h3>"));
        let value: serde_json::Value = serde_json::from_str(data).expect("embedded JSON parses");
        assert_eq!(value["overlay"]["markers"].as_array().map(Vec::len), Some(1));
        assert!(value["legendHtml"].as_str().is_some());
    }
}
