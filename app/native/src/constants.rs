//! Application-wide constants.

/// Bundle identifier, also used to namespace cache and support directories.
pub const APP_BUNDLE_ID: &str = "dev.snapclip.app";

/// Lowercase name used for config directories, thread names and log prefixes.
pub const APP_NAME: &str = "snapclip";

/// Human-readable product name shown in menus.
pub const APP_DISPLAY_NAME: &str = "Snapclip";

/// Label of the picker overlay webview window.
pub const OVERLAY_WINDOW_LABEL: &str = "overlay";

/// Page served to the picker overlay.
pub const OVERLAY_PAGE: &str = "overlay.html";

/// Absolute path of the macOS screenshot utility.
pub const SCREENCAPTURE_BIN: &str = "/usr/sbin/screencapture";
