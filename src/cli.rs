//! Command-line interface definitions.
//!
//! Uses clap derive API for argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::{AppConfig, ControlPosition, FeedConfig, FeedType, LatLng, MapConfig};
use crate::output::Format;

/// Render the live USGS earthquake feed as an interactive map.
#[derive(Parser, Debug)]
#[command(name = "quakemap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    pub quiet: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the feed once and write the map page
    Render(RenderArgs),

    /// Fetch the feed once and serve the map page over HTTP
    Serve(ServeArgs),
}

/// Feed and map options shared by every command.
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Summary feed to fetch
    #[arg(long, default_value = "all_week", value_parser = parse_feed_type)]
    pub feed: FeedType,

    /// Fetch this URL instead of a USGS summary feed
    #[arg(long, conflicts_with = "feed")]
    pub feed_url: Option<String>,

    /// Give up on the request after this many seconds (default: wait forever)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Initial map centre: lat,lng
    #[arg(long, default_value = "37.09,-95.71", allow_hyphen_values = true, value_parser = parse_lat_lng)]
    pub center: LatLng,

    /// Initial zoom level
    #[arg(long, default_value = "5")]
    pub zoom: u8,

    /// Corner for the depth legend
    #[arg(long, default_value = "bottomright", value_parser = parse_position)]
    pub legend_position: ControlPosition,

    /// Corner for the layer switcher
    #[arg(long, default_value = "topright", value_parser = parse_position)]
    pub layers_position: ControlPosition,
}

impl MapArgs {
    /// Build the run configuration these options describe.
    #[must_use]
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            feed: FeedConfig {
                url: self.feed_url.clone().unwrap_or_else(|| self.feed.url()),
                timeout: self.timeout.map(Duration::from_secs),
            },
            map: MapConfig {
                center: self.center,
                zoom: self.zoom,
                legend_position: self.legend_position,
                layer_control_position: self.layers_position,
                ..MapConfig::default()
            },
        }
    }
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// Read a saved GeoJSON feed instead of fetching
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', default_value = "html", value_parser = parse_format)]
    pub format: Format,
}

/// Arguments for the `serve` command.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// Port to listen on
    #[arg(long, short = 'p', default_value = "8080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

/// Parse a feed type from string.
fn parse_feed_type(s: &str) -> Result<FeedType, String> {
    s.parse()
}

/// Parse an output format from string.
fn parse_format(s: &str) -> Result<Format, String> {
    s.parse()
}

/// Parse a control corner from string.
fn parse_position(s: &str) -> Result<ControlPosition, String> {
    s.parse()
}

/// Parse a `lat,lng` pair.
fn parse_lat_lng(s: &str) -> Result<LatLng, String> {
    let parts: Vec<&str> = s.split(',').collect();
    let &[lat, lng] = parts.as_slice() else {
        return Err(format!("center requires 2 values (lat,lng), got {}", parts.len()));
    };

    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude: {e}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude: {e}"))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {lat} out of range [-90, 90]"));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(format!("longitude {lng} out of range [-180, 180]"));
    }

    Ok(LatLng { lat, lng })
}
