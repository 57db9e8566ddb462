//! Run configuration.
//!
//! Everything the pipeline needs is carried in an explicit [`AppConfig`]
//! handed to [`crate::app::start`]. The defaults reproduce the classic
//! "past week, centered on the US" earthquake map.

use std::time::Duration;

use serde::Serialize;

/// USGS base URL for earthquake feeds.
const USGS_BASE_URL: &str = "https://earthquake.usgs.gov";

/// Map centre: geographic middle of the contiguous United States.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 37.09,
    lng: -95.71,
};

pub const DEFAULT_ZOOM: u8 = 5;

/// DOM id of the element the map is mounted into.
pub const DEFAULT_CONTAINER_ID: &str = "map";

/// Available summary feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedType {
    AllHour,
    AllDay,
    #[default]
    AllWeek,
    AllMonth,
    Mag1Week,
    Mag25Day,
    Mag25Week,
    Mag45Day,
    Mag45Week,
    SignificantWeek,
    SignificantMonth,
}

impl FeedType {
    /// Get the URL path segment for this feed type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllHour => "all_hour",
            Self::AllDay => "all_day",
            Self::AllWeek => "all_week",
            Self::AllMonth => "all_month",
            Self::Mag1Week => "1.0_week",
            Self::Mag25Day => "2.5_day",
            Self::Mag25Week => "2.5_week",
            Self::Mag45Day => "4.5_day",
            Self::Mag45Week => "4.5_week",
            Self::SignificantWeek => "significant_week",
            Self::SignificantMonth => "significant_month",
        }
    }

    /// Full GeoJSON URL of this feed.
    #[must_use]
    pub fn url(self) -> String {
        format!(
            "{USGS_BASE_URL}/earthquakes/feed/v1.0/summary/{}.geojson",
            self.as_str()
        )
    }
}

impl std::str::FromStr for FeedType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all_hour" => Ok(Self::AllHour),
            "all_day" => Ok(Self::AllDay),
            "all_week" => Ok(Self::AllWeek),
            "all_month" => Ok(Self::AllMonth),
            "1.0_week" => Ok(Self::Mag1Week),
            "2.5_day" => Ok(Self::Mag25Day),
            "2.5_week" => Ok(Self::Mag25Week),
            "4.5_day" => Ok(Self::Mag45Day),
            "4.5_week" => Ok(Self::Mag45Week),
            "significant_week" => Ok(Self::SignificantWeek),
            "significant_month" => Ok(Self::SignificantMonth),
            _ => Err(format!("unknown feed type: {s}")),
        }
    }
}

/// A geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Screen corner a map control is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl std::str::FromStr for ControlPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "topleft" => Ok(Self::TopLeft),
            "topright" => Ok(Self::TopRight),
            "bottomleft" => Ok(Self::BottomLeft),
            "bottomright" => Ok(Self::BottomRight),
            _ => Err(format!(
                "unknown position: {s} (expected: topleft, topright, bottomleft, bottomright)"
            )),
        }
    }
}

/// A raster tile source selectable as a base layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileSource {
    /// Name shown in the layer control
    pub name: String,
    /// Leaflet URL template (`{s}`, `{z}`, `{x}`, `{y}`)
    pub url: String,
    /// Attribution HTML required by the tile provider
    pub attribution: String,
}

impl TileSource {
    #[must_use]
    pub fn street() -> Self {
        Self {
            name: "Street Map".into(),
            url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".into(),
        }
    }

    #[must_use]
    pub fn topographic() -> Self {
        Self {
            name: "Topographic Map".into(),
            url: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png".into(),
            attribution: "Map data: &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, \
                <a href=\"http://viewfinderpanoramas.org\">SRTM</a> | Map style: &copy; \
                <a href=\"https://opentopomap.org\">OpenTopoMap</a> \
                (<a href=\"https://creativecommons.org/licenses/by-sa/3.0/\">CC-BY-SA</a>)"
                .into(),
        }
    }
}

/// Where and how the feed is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub url: String,
    /// `None` waits for the server indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: FeedType::default().url(),
            timeout: None,
        }
    }
}

/// Initial map view and controls.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub container_id: String,
    pub center: LatLng,
    pub zoom: u8,
    /// Mutually exclusive base layers; the first is shown on load
    pub base_layers: Vec<TileSource>,
    pub legend_position: ControlPosition,
    pub layer_control_position: ControlPosition,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.into(),
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            base_layers: vec![TileSource::street(), TileSource::topographic()],
            legend_position: ControlPosition::BottomRight,
            layer_control_position: ControlPosition::TopRight,
        }
    }
}

/// Complete configuration of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub map: MapConfig,
}
