//! Configuration template generation.
//!
//! Generates a commented configuration template with all available options.

use std::fs;
use std::path::Path;

/// Generates a configuration template with all options commented out.
#[must_use]
pub fn generate_config_template() -> String {
    r#"// Snapclip Configuration File
// ============================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.
// Uncomment and modify the options you want to configure.
// Run `snapclip schema` for the full JSON Schema.

{
  // ============================================================================
  // Global Keyboard Shortcuts
  // ============================================================================
  // Modifiers: Command (Cmd), Control (Ctrl), Option (Alt/Opt), Shift.
  // Use an empty string to disable a shortcut.
  // "hotkeys": {
  //   // Pick a window and capture it
  //   "window": "Option+Shift+W",
  //
  //   // Capture the main display
  //   "screen": "Option+Shift+S",
  //
  //   // Drag a region and capture it
  //   "region": "Option+Shift+R"
  // },

  // ============================================================================
  // Capture
  // ============================================================================
  // "capture": {
  //   // "screencapture" runs /usr/sbin/screencapture,
  //   // "native" captures in-process (needs Screen Recording permission)
  //   "backend": "screencapture",
  //
  //   // Where screenshots are written. Empty uses
  //   // ~/Library/Caches/dev.snapclip.app/screenshots
  //   "outputDir": "",
  //
  //   // File names look like "Screenshot 2026-01-31 at 09.41.07.png"
  //   "filenamePrefix": "Screenshot",
  //
  //   // Milliseconds to wait after the picker closes before capturing
  //   "delayMs": 150,
  //
  //   // Keep at most this many screenshots (0 = keep everything). Only files
  //   // named with filenamePrefix are ever deleted
  //   "maxFiles": 100
  // },

  // ============================================================================
  // Window / Region Picker
  // ============================================================================
  // "picker": {
  //   // Ignore windows smaller than this many points
  //   "minWindowSize": 40,
  //
  //   // Region drags smaller than this cancel the capture
  //   "minRegionSize": 4,
  //
  //   // Applications whose windows are never highlighted
  //   "excludeOwners": ["Dock", "Window Server", "Control Center", "Notification Center"]
  // },

  // ============================================================================
  // Menu Toggles
  // ============================================================================
  // Initial values only; changes made from the menu bar are remembered.
  // "defaults": {
  //   "copyImage": false,
  //   "includeShadow": true,
  //   "playSound": false
  // }
}
"#
    .to_string()
}

/// Creates a configuration file with the template at the specified path.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}
