//! JSON file handling shared by both applet documents.
//!
//! Reads are tolerant: a missing file and a malformed file both produce the
//! default value, the difference is reported through [`FileState`]. Writes
//! go through a temp file in the target directory followed by a rename, so
//! the applet never observes a half-written document.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Error type for JSON file operations.
#[derive(Debug, Error)]
pub enum JsonFileError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// How a document was obtained on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileState {
    /// File did not exist; default value used.
    Missing,
    /// File existed but could not be read or parsed; default value used.
    Malformed(String),
    /// File parsed successfully.
    Loaded,
}

impl FileState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, FileState::Loaded)
    }
}

impl std::fmt::Display for FileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileState::Missing => write!(f, "missing"),
            FileState::Malformed(reason) => write!(f, "malformed ({})", reason),
            FileState::Loaded => write!(f, "ok"),
        }
    }
}

/// Read and parse a JSON file. `Ok(None)` when the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, JsonFileError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(JsonFileError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| JsonFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Read a JSON file, falling back to `T::default()` on absence or damage.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> (T, FileState) {
    match read_json(path) {
        Ok(Some(value)) => (value, FileState::Loaded),
        Ok(None) => {
            tracing::debug!(path = %path.display(), "File not found, using empty state");
            (T::default(), FileState::Missing)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable file");
            (T::default(), FileState::Malformed(error_reason(&e)))
        }
    }
}

fn error_reason(e: &JsonFileError) -> String {
    match e {
        JsonFileError::Read { source, .. } | JsonFileError::Write { source, .. } => {
            source.to_string()
        }
        JsonFileError::Parse { source, .. } | JsonFileError::Serialize { source, .. } => {
            source.to_string()
        }
    }
}

/// Serialize with 4-space indentation, matching the files the applet ships with.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Write a JSON document atomically: temp file in the same directory, then rename.
///
/// Creates the parent directory when needed.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), JsonFileError> {
    let write_err = |source: std::io::Error| JsonFileError::Write {
        path: path.to_path_buf(),
        source,
    };

    let bytes = to_pretty_json(value).map_err(|source| JsonFileError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
    tmp.write_all(&bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote JSON file");
    Ok(())
}
