//! Error types for quakemap.
//!
//! Uses `thiserror` for library-style error definitions. Every variant is
//! terminal for a run: nothing is retried.

use thiserror::Error;

/// Errors that can occur while fetching, mapping or writing the map.
#[derive(Error, Debug)]
pub enum QuakeMapError {
    /// HTTP request failed (connect, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Feed returned an error status
    #[error("feed error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Payload parsed but carries no `features` array
    #[error("GeoJSON data does not contain features array: {payload}")]
    MissingFeatures { payload: String },

    /// A single feature is structurally unusable
    #[error("Invalid feature at index {index}: {reason}")]
    InvalidFeature { index: usize, reason: String },

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
