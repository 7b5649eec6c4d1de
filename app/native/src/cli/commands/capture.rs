//! `snapclip capture`.

use colored::Colorize;

use crate::capture::{CaptureMode, CaptureSettings, CaptureTarget, run_capture};
use crate::config::CaptureBackendKind;
use crate::error::SnapclipError;

/// Applies the command-line flags to `settings`.
fn cli_settings(mut settings: CaptureSettings, native: bool, no_clipboard: bool) -> CaptureSettings {
    if native {
        settings.backend = CaptureBackendKind::Native;
    }
    settings.copy_to_clipboard = !no_clipboard;
    settings
}

/// Takes one screenshot and prints its path.
///
/// # Errors
///
/// Returns an error if the capture or the clipboard write fails.
pub fn execute(mode: CaptureMode, native: bool, no_clipboard: bool) -> Result<(), SnapclipError> {
    let settings = cli_settings(CaptureSettings::current(), native, no_clipboard);
    let target = CaptureTarget::headless(mode);

    match run_capture(&target, &settings)? {
        Some(outcome) => {
            println!("{}", outcome.path.display());
            if outcome.copied_to_clipboard {
                let what = if outcome.copied_image { "Path and image" } else { "Path" };
                eprintln!("{} {what} copied to the clipboard", "✓".green());
            }
            Ok(())
        }
        None => Err(SnapclipError::CaptureError("capture cancelled".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::config::SnapclipConfig;
    use crate::preferences::Preferences;

    fn defaults() -> CaptureSettings {
        CaptureSettings::new(
            &SnapclipConfig::default(),
            Preferences::default(),
            PathBuf::from("/tmp/snapclip-shots"),
        )
    }

    #[test]
    fn test_native_flag_overrides_backend() {
        assert_eq!(defaults().backend, CaptureBackendKind::Screencapture);
        assert_eq!(cli_settings(defaults(), true, false).backend, CaptureBackendKind::Native);
    }

    #[test]
    fn test_no_clipboard_flag() {
        assert!(!cli_settings(defaults(), false, true).copy_to_clipboard);
        assert!(cli_settings(defaults(), false, false).copy_to_clipboard);
    }

    #[test]
    fn test_flags_keep_output_settings() {
        let settings = cli_settings(defaults(), true, true);
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/snapclip-shots"));
        assert_eq!(settings.prefix, "Screenshot");
    }
}
