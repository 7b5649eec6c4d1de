//! Clipboard output for finished captures.
//!
//! A capture is published as the absolute file path (plain text), a file URL
//! so Finder-aware apps paste the file itself, and optionally the PNG bytes.

mod macos;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use self::macos::write;

pub const PLAIN_TEXT_TYPE: &str = "public.utf8-plain-text";
pub const FILE_URL_TYPE: &str = "public.file-url";
pub const PNG_TYPE: &str = "public.png";

/// Errors from writing to the pasteboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Pasteboard is unavailable")]
    Unavailable,

    #[error("Pasteboard rejected {0}")]
    Rejected(&'static str),

    #[error("Failed to read screenshot: {0}")]
    Read(#[from] std::io::Error),
}

/// One pasteboard representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Representation<'a> {
    Text { uti: &'static str, value: String },
    Data { uti: &'static str, bytes: &'a [u8] },
}

/// What gets copied after a capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardPayload {
    pub path: PathBuf,
    pub image: Option<Vec<u8>>,
}

impl ClipboardPayload {
    /// Builds the payload for a written screenshot, reading the PNG bytes
    /// when `copy_image` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the image must be read and cannot be.
    pub fn from_capture(path: &Path, copy_image: bool) -> Result<Self, ClipboardError> {
        let image = if copy_image { Some(fs::read(path)?) } else { None };
        Ok(Self { path: path.to_path_buf(), image })
    }

    /// Pasteboard representations in the order they are declared.
    #[must_use]
    pub fn representations(&self) -> Vec<Representation<'_>> {
        let path = self.path.to_string_lossy().into_owned();
        let mut reps = vec![
            Representation::Text { uti: FILE_URL_TYPE, value: file_url(&path) },
            Representation::Text { uti: PLAIN_TEXT_TYPE, value: path },
        ];

        if let Some(bytes) = &self.image {
            reps.push(Representation::Data { uti: PNG_TYPE, bytes });
        }

        reps
    }
}

/// Builds a `file://` URL for an absolute path, percent-encoding each path
/// segment.
#[must_use]
pub fn file_url(path: &str) -> String {
    let encoded: Vec<_> = path.split('/').map(urlencoding::encode).collect();
    format!("file://{}", encoded.join("/"))
}
