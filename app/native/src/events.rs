//! Event names emitted through Tauri.
//!
//! All events follow the pattern `snapclip://<module>/<event-name>`.

/// Capture lifecycle events.
pub mod capture {
    /// Emitted after a screenshot was written and copied.
    ///
    /// Payload: `String` - absolute path of the PNG.
    pub const COMPLETED: &str = "snapclip://capture/completed";

    /// Emitted when a capture failed.
    ///
    /// Payload: `String` - the error message.
    pub const FAILED: &str = "snapclip://capture/failed";
}

/// Picker overlay events.
pub mod overlay {
    /// Emitted when the highlighted window changes.
    ///
    /// Payload: `Option<Rect>` in overlay-local points.
    pub const HIGHLIGHT_CHANGED: &str = "snapclip://overlay/highlight-changed";
}
