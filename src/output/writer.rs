//! Writing result payloads to disk

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

use super::ResultPayload;
use crate::errors::{FetchError, Result};

/// Output path used when the caller gives none
pub const DEFAULT_OUTPUT_FILE: &str = "output.json";

/// Two-space indentation
const INDENT: &[u8] = b"  ";

/// Format a payload as indented JSON with non-ASCII characters kept literal
pub fn format_payload(payload: &ResultPayload) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    payload.serialize(&mut serializer)?;
    buf.push(b'\n');

    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write a payload to `path`, replacing any existing file
///
/// Returns the length of the written text in characters.
///
/// The payload is formatted before the file is touched, so a formatting
/// failure leaves an existing file unchanged.
pub fn write_payload(payload: &ResultPayload, path: &Path) -> Result<usize> {
    let persistence_failure = |source: std::io::Error| FetchError::PersistenceFailure {
        path: path.to_path_buf(),
        source,
    };

    let text = format_payload(payload).map_err(|e| persistence_failure(e.into()))?;
    fs::write(path, text.as_bytes()).map_err(persistence_failure)?;

    Ok(text.chars().count())
}
