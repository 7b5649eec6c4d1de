//! Screenshot capture.
//!
//! A capture resolves a fresh output path, asks a [`CaptureBackend`] to write
//! the PNG, prunes old screenshots and finally puts the result on the
//! clipboard.
//!
//! - [`backend`] - Backend trait and the `screencapture` implementation
//! - [`native`] - In-process backend built on `xcap`
//! - [`output`] - File naming and output directory housekeeping
//! - [`region`] - Pure image cropping

pub mod backend;
pub mod native;
pub mod output;
pub mod region;

use std::fmt;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Emitter};
use thiserror::Error;

pub use self::backend::{CaptureBackend, ScreencaptureCli, screencapture_args};
pub use self::native::NativeCapture;
pub use self::region::CropError;
use crate::clipboard::{self, ClipboardPayload};
use crate::config::{self, CaptureBackendKind, SnapclipConfig};
use crate::error::SnapclipError;
use crate::events;
use crate::geometry::Rect;
use crate::overlay::{self, PickMode};
use crate::platform::spawn_named_thread;
use crate::preferences::{self, Preferences};

/// Path of the most recent successful capture in this process.
static LAST_CAPTURE: Mutex<Option<PathBuf>> = Mutex::new(None);

// ============================================================================
// Types
// ============================================================================

/// What the user asked to capture.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// A single window.
    Window,
    /// The main display.
    Screen,
    /// A dragged rectangle.
    Region,
}

impl CaptureMode {
    pub const ALL: [Self; 3] = [Self::Window, Self::Screen, Self::Region];

    /// Menu label for this mode.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Window => "Capture Window",
            Self::Screen => "Capture Screen",
            Self::Region => "Capture Region",
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Window => "window",
            Self::Screen => "screen",
            Self::Region => "region",
        })
    }
}

/// A resolved capture target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureTarget {
    /// A window by its CoreGraphics window number.
    Window(u32),
    /// The main display.
    Screen,
    /// A rectangle in global points.
    Region(Rect),
    /// Let `screencapture` pick the window interactively.
    InteractiveWindow,
    /// Let `screencapture` pick the region interactively.
    InteractiveRegion,
}

impl CaptureTarget {
    /// Target used by the CLI, where there is no overlay.
    #[must_use]
    pub const fn headless(mode: CaptureMode) -> Self {
        match mode {
            CaptureMode::Window => Self::InteractiveWindow,
            CaptureMode::Screen => Self::Screen,
            CaptureMode::Region => Self::InteractiveRegion,
        }
    }
}

/// Flags passed to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    pub include_shadow: bool,
    pub play_sound: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            include_shadow: true,
            play_sound: false,
        }
    }
}

/// Errors raised while taking a screenshot.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Window list is unavailable")]
    WindowListUnavailable,

    #[error("Capture cancelled")]
    Cancelled,

    #[error("screencapture exited with status {}: {stderr}", status.map_or_else(|| "unknown".to_string(), |s| s.to_string()))]
    CommandFailed { status: Option<i32>, stderr: String },

    #[error("Invalid capture region {0:?}")]
    InvalidRegion(Rect),

    #[error("No monitor available")]
    NoMonitor,

    #[error("Unsupported capture: {0}")]
    Unsupported(&'static str),

    #[error("Native capture failed: {0}")]
    Native(String),

    #[error(transparent)]
    Crop(#[from] CropError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A finished capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOutcome {
    pub path: PathBuf,
    pub copied_to_clipboard: bool,
    pub copied_image: bool,
}

/// Everything a capture needs besides the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSettings {
    pub backend: CaptureBackendKind,
    pub options: CaptureOptions,
    pub output_dir: PathBuf,
    pub prefix: String,
    pub max_files: usize,
    pub copy_to_clipboard: bool,
    pub copy_image: bool,
}

impl CaptureSettings {
    /// Combines the configuration file with the current preference flags.
    #[must_use]
    pub fn new(config: &SnapclipConfig, prefs: Preferences, output_dir: PathBuf) -> Self {
        Self {
            backend: config.capture.backend,
            options: CaptureOptions {
                include_shadow: prefs.include_shadow,
                play_sound: prefs.play_sound,
            },
            output_dir,
            prefix: config.capture.prefix().to_string(),
            max_files: config.capture.max_files,
            copy_to_clipboard: true,
            copy_image: prefs.copy_image,
        }
    }

    /// Settings for the running process.
    #[must_use]
    pub fn current() -> Self {
        Self::new(config::get_config(), preferences::current(), config::output_dir())
    }
}

/// Returns the backend implementation for `kind`.
#[must_use]
pub fn backend_for(kind: CaptureBackendKind) -> Box<dyn CaptureBackend> {
    match kind {
        CaptureBackendKind::Screencapture => Box::new(ScreencaptureCli),
        CaptureBackendKind::Native => Box::new(NativeCapture),
    }
}

/// Returns the most recent screenshot taken by this process, if it still exists.
#[must_use]
pub fn last_capture() -> Option<PathBuf> {
    LAST_CAPTURE.lock().clone().filter(|path| path.exists())
}

// ============================================================================
// Capture flow
// ============================================================================

/// Takes a screenshot of `target` using `backend`.
///
/// Returns `Ok(None)` when the user cancelled an interactive picker.
///
/// # Errors
///
/// Returns an error if the capture or the clipboard write failed.
pub fn run_capture_with(
    backend: &dyn CaptureBackend,
    target: &CaptureTarget,
    settings: &CaptureSettings,
) -> Result<Option<CaptureOutcome>, SnapclipError> {
    let path = output::next_output_path(&settings.output_dir, &settings.prefix)?;

    tracing::debug!(backend = backend.name(), ?target, path = %path.display(), "starting capture");

    match backend.capture(target, settings.options, &path) {
        Ok(()) => {}
        Err(CaptureError::Cancelled) => {
            tracing::warn!(?target, "capture cancelled");
            return Ok(None);
        }
        Err(err) => {
            tracing::error!(?target, backend = backend.name(), error = %err, "capture failed");
            return Err(err.into());
        }
    }

    match output::prune(&settings.output_dir, &settings.prefix, settings.max_files, Some(&path)) {
        Ok(0) => {}
        Ok(removed) => tracing::debug!(removed, "pruned old screenshots"),
        Err(err) => tracing::warn!(error = %err, "failed to prune screenshots"),
    }

    let mut outcome = CaptureOutcome {
        path: path.clone(),
        copied_to_clipboard: false,
        copied_image: false,
    };

    if settings.copy_to_clipboard {
        let payload = ClipboardPayload::from_capture(&path, settings.copy_image)?;
        outcome.copied_image = payload.image.is_some();
        clipboard::write(&payload)?;
        outcome.copied_to_clipboard = true;
    }

    *LAST_CAPTURE.lock() = Some(path.clone());
    tracing::info!(path = %path.display(), image = outcome.copied_image, "screenshot captured");

    Ok(Some(outcome))
}

/// Takes a screenshot of `target` with the configured backend.
///
/// # Errors
///
/// See [`run_capture_with`].
pub fn run_capture(
    target: &CaptureTarget,
    settings: &CaptureSettings,
) -> Result<Option<CaptureOutcome>, SnapclipError> {
    run_capture_with(backend_for(settings.backend).as_ref(), target, settings)
}

/// Captures `target` on a worker thread after the configured delay and
/// reports the result through app events.
pub fn capture_in_background(app: AppHandle, target: CaptureTarget) {
    spawn_named_thread("capture", move || {
        let settings = CaptureSettings::current();
        std::thread::sleep(config::get_config().capture.delay());

        match run_capture(&target, &settings) {
            Ok(Some(outcome)) => {
                let path = outcome.path.to_string_lossy().into_owned();
                if let Err(err) = app.emit(events::capture::COMPLETED, path) {
                    tracing::warn!(error = %err, "failed to emit capture completed event");
                }
            }
            Ok(None) => {}
            Err(err) => {
                if let Err(emit_err) = app.emit(events::capture::FAILED, err.to_string()) {
                    tracing::warn!(error = %emit_err, "failed to emit capture failed event");
                }
            }
        }
    });
}

/// Starts a capture from a hotkey or the tray menu.
///
/// Window and region captures open the picker overlay; screen captures run
/// immediately.
pub fn start(app: &AppHandle, mode: CaptureMode) {
    tracing::debug!(%mode, "capture requested");

    match mode {
        CaptureMode::Window => overlay::open(app, PickMode::Window),
        CaptureMode::Region => overlay::open(app, PickMode::Region),
        CaptureMode::Screen => capture_in_background(app.clone(), CaptureTarget::Screen),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Writes a tiny file instead of taking a screenshot.
    struct FakeBackend {
        result: fn() -> Result<(), CaptureError>,
        calls: AtomicUsize,
    }

    impl FakeBackend {
        fn new(result: fn() -> Result<(), CaptureError>) -> Self {
            Self { result, calls: AtomicUsize::new(0) }
        }
    }

    impl CaptureBackend for FakeBackend {
        fn capture(
            &self,
            _target: &CaptureTarget,
            _options: CaptureOptions,
            output: &Path,
        ) -> Result<(), CaptureError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()?;
            std::fs::write(output, b"\x89PNG")?;
            Ok(())
        }

        fn name(&self) -> &'static str { "fake" }
    }

    fn settings(dir: &Path, max_files: usize) -> CaptureSettings {
        CaptureSettings {
            backend: CaptureBackendKind::Screencapture,
            options: CaptureOptions::default(),
            output_dir: dir.to_path_buf(),
            prefix: "Test".to_string(),
            max_files,
            copy_to_clipboard: false,
            copy_image: false,
        }
    }

    #[test]
    fn test_mode_display_and_label() {
        assert_eq!(CaptureMode::Window.to_string(), "window");
        assert_eq!(CaptureMode::Region.label(), "Capture Region");
        assert_eq!(CaptureMode::ALL.len(), 3);
    }

    #[test]
    fn test_mode_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&CaptureMode::Screen).unwrap(), "\"screen\"");
        let mode: CaptureMode = serde_json::from_str("\"region\"").unwrap();
        assert_eq!(mode, CaptureMode::Region);
    }

    #[test]
    fn test_headless_targets() {
        assert_eq!(CaptureTarget::headless(CaptureMode::Window), CaptureTarget::InteractiveWindow);
        assert_eq!(CaptureTarget::headless(CaptureMode::Screen), CaptureTarget::Screen);
        assert_eq!(CaptureTarget::headless(CaptureMode::Region), CaptureTarget::InteractiveRegion);
    }

    #[test]
    fn test_settings_follow_preferences() {
        let config = SnapclipConfig::default();
        let prefs = Preferences { copy_image: true, include_shadow: false, play_sound: true };
        let settings = CaptureSettings::new(&config, prefs, PathBuf::from("/tmp/shots"));

        assert!(settings.copy_image);
        assert!(!settings.options.include_shadow);
        assert!(settings.options.play_sound);
        assert_eq!(settings.prefix, "Screenshot");
        assert_eq!(settings.max_files, 100);
    }

    #[test]
    fn test_cancelled_message() {
        assert!(CaptureError::Cancelled.to_string().contains("cancelled"));
    }

    #[test]
    fn test_command_failed_message() {
        let err = CaptureError::CommandFailed { status: Some(1), stderr: "nope".to_string() };
        assert_eq!(err.to_string(), "screencapture exited with status 1: nope");
    }

    #[test]
    fn test_run_capture_writes_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FakeBackend::new(|| Ok(()));

        let outcome = run_capture_with(&backend, &CaptureTarget::Screen, &settings(dir.path(), 0))
            .unwrap()
            .unwrap();

        assert!(outcome.path.exists());
        assert_eq!(outcome.path.parent(), Some(dir.path()));
        assert!(!outcome.copied_to_clipboard);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_run_capture_cancel_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FakeBackend::new(|| Err(CaptureError::Cancelled));

        let outcome =
            run_capture_with(&backend, &CaptureTarget::InteractiveRegion, &settings(dir.path(), 0))
                .unwrap();
        assert!(outcome.is_none());
        assert!(output::list_screenshots(dir.path(), "Test").unwrap().is_empty());
    }

    #[test]
    fn test_run_capture_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FakeBackend::new(|| {
            Err(CaptureError::CommandFailed { status: Some(1), stderr: String::new() })
        });

        let result = run_capture_with(&backend, &CaptureTarget::Screen, &settings(dir.path(), 0));
        assert!(matches!(result, Err(SnapclipError::CaptureError(_))));
    }

    #[test]
    fn test_run_capture_prunes_old_files() {
        let dir = tempfile::tempdir().unwrap();
        for second in 1..=3 {
            let name = format!("Test 2026-01-31 at 09.41.0{second}.png");
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let holiday = dir.path().join("holiday.png");
        std::fs::write(&holiday, b"").unwrap();
        let backend = FakeBackend::new(|| Ok(()));

        let outcome = run_capture_with(&backend, &CaptureTarget::Screen, &settings(dir.path(), 2))
            .unwrap()
            .unwrap();

        let remaining = output::list_screenshots(dir.path(), "Test").unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(outcome.path.exists());
        assert!(holiday.exists());
    }

    #[test]
    fn test_run_capture_keeps_new_file_when_others_look_newer() {
        let dir = tempfile::tempdir().unwrap();
        let future = dir.path().join("Test 2030-01-01 at 00.00.00.png");
        std::fs::write(&future, b"").unwrap();
        std::fs::File::options()
            .write(true)
            .open(&future)
            .unwrap()
            .set_modified(std::time::SystemTime::now() + std::time::Duration::from_secs(3600))
            .unwrap();
        let backend = FakeBackend::new(|| Ok(()));

        let outcome = run_capture_with(&backend, &CaptureTarget::Screen, &settings(dir.path(), 1))
            .unwrap()
            .unwrap();

        assert!(outcome.path.exists());
        assert!(!future.exists());
    }
}
