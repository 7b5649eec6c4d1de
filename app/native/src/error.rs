//! Error types for Snapclip.
//!
//! This module provides the unified error type used throughout the application.
//! It implements the necessary traits to be returned from Tauri commands.

use serde::Serialize;
use thiserror::Error;

use crate::capture::CaptureError;
use crate::clipboard::ClipboardError;
use crate::config::ConfigError;

/// Errors that can occur during application execution.
///
/// This enum implements `Serialize` so it can be returned from Tauri commands,
/// giving the overlay page structured error information.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum SnapclipError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// Screen capture failed or was cancelled.
    #[error("Capture error: {0}")]
    CaptureError(String),
    /// Writing to the pasteboard failed.
    #[error("Clipboard error: {0}")]
    ClipboardError(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Overlay window operation failed.
    #[error("Overlay error: {0}")]
    OverlayError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<std::io::Error> for SnapclipError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for SnapclipError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<CaptureError> for SnapclipError {
    fn from(err: CaptureError) -> Self { Self::CaptureError(err.to_string()) }
}

impl From<ClipboardError> for SnapclipError {
    fn from(err: ClipboardError) -> Self { Self::ClipboardError(err.to_string()) }
}

impl From<ConfigError> for SnapclipError {
    fn from(err: ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<tauri::Error> for SnapclipError {
    fn from(err: tauri::Error) -> Self { Self::OverlayError(err.to_string()) }
}

impl From<String> for SnapclipError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for SnapclipError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_arguments_display() {
        let err = SnapclipError::InvalidArguments("unknown preference 'foo'".to_string());
        assert_eq!(err.to_string(), "unknown preference 'foo'");
    }

    #[test]
    fn test_capture_error_display() {
        let err = SnapclipError::CaptureError("screencapture exited with status 1".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Capture error"));
        assert!(msg.contains("status 1"));
    }

    #[test]
    fn test_clipboard_error_display() {
        let err = SnapclipError::ClipboardError("pasteboard rejected data".to_string());
        assert!(err.to_string().starts_with("Clipboard error"));
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err: SnapclipError = io_err.into();
        assert!(matches!(err, SnapclipError::IoError(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_capture_error_conversion_keeps_message() {
        let err: SnapclipError = CaptureError::Cancelled.into();
        assert!(matches!(err, SnapclipError::CaptureError(_)));
        assert!(err.to_string().contains("cancelled"));
    }

    #[test]
    fn test_from_str() {
        let err: SnapclipError = "boom".into();
        assert!(matches!(err, SnapclipError::CommandError(_)));
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_error_serializes_with_kind() {
        let err = SnapclipError::OverlayError("overlay already open".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"kind\":\"OverlayError\""));
        assert!(json.contains("overlay already open"));
    }
}
