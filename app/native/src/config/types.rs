//! Configuration types for Snapclip.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capture::CaptureMode;
use crate::constants::APP_NAME;
use crate::platform::{expand_and_resolve, get_cache_subdir};

/// Configuration file names checked inside each config directory, in order.
const CONFIG_FILE_NAMES: [&str; 2] = ["config.jsonc", "config.json"];

/// Legacy dotfiles checked in the home directory.
const LEGACY_CONFIG_FILE_NAMES: [&str; 2] = [".snapclip.jsonc", ".snapclip.json"];

/// Cache subdirectory used when `capture.outputDir` is empty.
pub const DEFAULT_SCREENSHOTS_SUBDIR: &str = "screenshots";

// ============================================================================
// Hotkeys
// ============================================================================

/// Global keyboard shortcuts that start each capture mode.
///
/// Modifier names are normalized: `Ctrl` becomes `Control`, `Cmd`/`Super`/`Meta`
/// become `Command` and `Alt`/`Opt` become `Option`. An empty string disables
/// the shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct HotkeysConfig {
    /// Pick a window and capture it.
    /// Default: "Option+Shift+W"
    pub window: String,

    /// Capture the main display.
    /// Default: "Option+Shift+S"
    pub screen: String,

    /// Drag a region and capture it.
    /// Default: "Option+Shift+R"
    pub region: String,
}

impl Default for HotkeysConfig {
    fn default() -> Self {
        Self {
            window: "Option+Shift+W".to_string(),
            screen: "Option+Shift+S".to_string(),
            region: "Option+Shift+R".to_string(),
        }
    }
}

impl HotkeysConfig {
    /// Returns the shortcut string configured for a mode, if enabled.
    #[must_use]
    pub fn for_mode(&self, mode: CaptureMode) -> Option<&str> {
        let shortcut = match mode {
            CaptureMode::Window => &self.window,
            CaptureMode::Screen => &self.screen,
            CaptureMode::Region => &self.region,
        };
        let trimmed = shortcut.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Returns every enabled `(mode, shortcut)` pair.
    #[must_use]
    pub fn bindings(&self) -> Vec<(CaptureMode, &str)> {
        CaptureMode::ALL
            .into_iter()
            .filter_map(|mode| self.for_mode(mode).map(|shortcut| (mode, shortcut)))
            .collect()
    }
}

// ============================================================================
// Capture
// ============================================================================

/// Which implementation takes the screenshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CaptureBackendKind {
    /// Spawn `/usr/sbin/screencapture`. This is the default.
    #[default]
    Screencapture,
    /// Capture in-process through the native screen-capture API.
    Native,
}

/// Where and how screenshots are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CaptureConfig {
    /// Capture implementation: "screencapture" or "native".
    pub backend: CaptureBackendKind,

    /// Directory for screenshots. `~` is expanded and relative paths are
    /// resolved against the config file's directory.
    /// Default: "" (`~/Library/Caches/dev.snapclip.app/screenshots`)
    pub output_dir: String,

    /// File name prefix.
    /// Default: "Screenshot"
    pub filename_prefix: String,

    /// Milliseconds to wait after the overlay closes before capturing.
    /// Default: 150
    pub delay_ms: u64,

    /// Keep at most this many screenshots in the output directory; older
    /// ones are deleted after each capture. Only files named with
    /// `filename_prefix` count. 0 keeps everything.
    /// Default: 100
    pub max_files: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            backend: CaptureBackendKind::default(),
            output_dir: String::new(),
            filename_prefix: "Screenshot".to_string(),
            delay_ms: 150,
            max_files: 100,
        }
    }
}

impl CaptureConfig {
    #[must_use]
    pub const fn delay(&self) -> Duration { Duration::from_millis(self.delay_ms) }

    /// Resolves `output_dir` to an absolute directory.
    ///
    /// `config_dir` is the directory of the loaded config file, used for
    /// relative paths.
    #[must_use]
    pub fn resolved_output_dir(&self, config_dir: Option<&Path>) -> PathBuf {
        if self.output_dir.trim().is_empty() {
            return get_cache_subdir(DEFAULT_SCREENSHOTS_SUBDIR);
        }

        let base = config_dir
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();
        expand_and_resolve(&self.output_dir, &base)
    }

    /// Returns the prefix, falling back to the default when blank.
    #[must_use]
    pub fn prefix(&self) -> &str {
        let trimmed = self.filename_prefix.trim();
        if trimmed.is_empty() { "Screenshot" } else { trimmed }
    }
}

// ============================================================================
// Picker
// ============================================================================

/// Window and region picker tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerConfig {
    /// Windows narrower or shorter than this (in points) are never highlighted.
    /// Default: 40
    pub min_window_size: f64,

    /// Region drags smaller than this (in points, either side) cancel the capture.
    /// Default: 4
    pub min_region_size: f64,

    /// Owning application names that are never highlighted.
    pub exclude_owners: Vec<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            min_window_size: 40.0,
            min_region_size: 4.0,
            exclude_owners: vec![
                "Dock".to_string(),
                "Window Server".to_string(),
                "Control Center".to_string(),
                "Notification Center".to_string(),
            ],
        }
    }
}

impl PickerConfig {
    /// Case-insensitive check against `exclude_owners`.
    #[must_use]
    pub fn is_excluded_owner(&self, owner: &str) -> bool {
        self.exclude_owners.iter().any(|excluded| excluded.eq_ignore_ascii_case(owner))
    }
}

// ============================================================================
// Preference defaults
// ============================================================================

/// Initial values of the menu toggles, used until the user changes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PreferenceDefaults {
    /// Put the PNG data on the clipboard next to the file path.
    /// Default: false
    pub copy_image: bool,

    /// Keep the drop shadow when capturing a window.
    /// Default: true
    pub include_shadow: bool,

    /// Play the camera shutter sound.
    /// Default: false
    pub play_sound: bool,
}

impl Default for PreferenceDefaults {
    fn default() -> Self {
        Self {
            copy_image: false,
            include_shadow: true,
            play_sound: false,
        }
    }
}

// ============================================================================
// Root
// ============================================================================

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapclipConfig {
    /// Global keyboard shortcuts.
    pub hotkeys: HotkeysConfig,

    /// Output location and capture backend.
    pub capture: CaptureConfig,

    /// Window/region picker behaviour.
    pub picker: PickerConfig,

    /// Initial values of the menu toggles.
    pub defaults: PreferenceDefaults,
}

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file exists in any searched location.
    #[error("No configuration file found")]
    NotFound,
    /// The file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSONC for this schema.
    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Returns the configuration file search paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/snapclip/config.{jsonc,json}` if the variable is set
/// 2. `~/.config/snapclip/config.{jsonc,json}`
/// 3. `~/Library/Application Support/snapclip/config.{jsonc,json}`
/// 4. `~/.snapclip.jsonc` or `~/.snapclip.json` (legacy)
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    let push_dir = |dir: PathBuf, paths: &mut Vec<PathBuf>| {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    };

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        push_dir(PathBuf::from(xdg_config).join(APP_NAME), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        push_dir(home.join(".config").join(APP_NAME), &mut paths);
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_dir(config_dir.join(APP_NAME), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        for filename in LEGACY_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists, or the
/// read/parse error of the first file found.
pub fn load_config() -> Result<(SnapclipConfig, PathBuf), ConfigError> {
    config_paths()
        .into_iter()
        .find(|path| path.exists())
        .map_or(Err(ConfigError::NotFound), load_config_from_path)
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist,
/// `ConfigError::Io` if it cannot be read and `ConfigError::Parse` if it is
/// not valid.
pub fn load_config_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<(SnapclipConfig, PathBuf), ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }

    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    let config: SnapclipConfig = serde_json::from_reader(reader)?;
    Ok((config, path.to_path_buf()))
}
