//! Output writers for the composed map.
//!
//! Supports a standalone HTML page (default) and the JSON map document.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::compose::MapDocument;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Self-contained Leaflet page (default)
    #[default]
    Html,
    /// Pretty-printed map document
    Json,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown format: {s} (expected: html, json)")),
        }
    }
}

/// Write the map in the specified format.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_document<W: Write>(writer: &mut W, document: &MapDocument, format: Format) -> io::Result<()> {
    let rendered = match format {
        Format::Html => document.render_html(),
        Format::Json => serde_json::to_string_pretty(document),
    }
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    writeln!(writer, "{rendered}")?;
    writer.flush()
}

/// Write the map to `path`, or to stdout when `path` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or writing fails.
pub fn write_to(path: Option<&Path>, document: &MapDocument, format: Format) -> io::Result<()> {
    match path {
        Some(path) => {
            let mut file = BufWriter::new(File::create(path)?);
            write_document(&mut file, document, format)
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_document(&mut handle, document, format)
        }
    }
}
