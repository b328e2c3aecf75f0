//! Loading training logs into memory.
//!
//! Logs are read in one go and decoded permissively: invalid UTF-8 byte
//! sequences are dropped rather than aborting the run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading a log file.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Log file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read log file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A training log held in memory.
#[derive(Debug, Clone)]
pub struct LogText {
    path: PathBuf,
    text: String,
}

impl LogText {
    /// Wrap already-loaded text.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Absolute path the log was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Resolve a path against the working directory without touching the
/// filesystem, so it also works for files that do not exist.
pub fn resolve(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Read a log file fully into memory.
///
/// A missing file is reported with its absolute path before any parsing
/// happens.
pub fn read_log(path: &Path) -> Result<LogText, InputError> {
    let resolved = resolve(path);

    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => InputError::NotFound {
            path: resolved.clone(),
        },
        _ => InputError::Read {
            path: resolved.clone(),
            source,
        },
    })?;

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!(
                path = %resolved.display(),
                "log contains invalid UTF-8, dropping undecodable bytes"
            );
            decode_dropping_invalid(err.as_bytes())
        }
    };

    tracing::debug!(path = %resolved.display(), bytes = text.len(), "loaded log");
    Ok(LogText::new(resolved, text))
}

/// Decode UTF-8, skipping invalid byte sequences entirely.
///
/// A line made only of invalid bytes becomes blank, and digits around an
/// invalid byte join up (`1\xff2` reads as `12`).
pub fn decode_dropping_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Split text into lines, treating `\n`, `\r\n` and a lone `\r` as line
/// terminators. A trailing terminator does not produce an empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}
