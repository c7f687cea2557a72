//! JSON serialization for framelabel session files.
//!
//! A session file holds the label list and the annotation payload of one
//! job. The CLI reads sessions, runs collection operations on them and
//! writes the exported result back in the same format.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::payload::Session;
use crate::error::FramelabelError;

/// Reads a session from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_session_json(path: &Path) -> Result<Session, FramelabelError> {
    let file = File::open(path).map_err(FramelabelError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| FramelabelError::SessionJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a session to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_session_json(path: &Path, session: &Session) -> Result<(), FramelabelError> {
    let file = File::create(path).map_err(FramelabelError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, session).map_err(|source| {
        FramelabelError::SessionJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads a session from a JSON string.
pub fn from_json_str(json: &str) -> Result<Session, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads a session from raw bytes.
///
/// Useful for fuzzing without requiring UTF-8 upfront.
pub fn from_json_slice(bytes: &[u8]) -> Result<Session, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes a session to a pretty-printed JSON string.
pub fn to_json_string(session: &Session) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(session)
}
