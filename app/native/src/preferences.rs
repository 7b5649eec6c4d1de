//! User preference flags toggled from the menu bar.
//!
//! Stored as JSON in the application-support directory. The configuration
//! file's `defaults` section seeds the flags until the file exists.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config::{self, PreferenceDefaults};
use crate::platform::get_support_dir;

const PREFERENCES_FILE_NAME: &str = "preferences.json";

static STORE: OnceLock<PreferencesStore> = OnceLock::new();

/// Flags persisted between launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub copy_image: bool,
    pub include_shadow: bool,
    pub play_sound: bool,
}

impl Default for Preferences {
    fn default() -> Self { PreferenceDefaults::default().into() }
}

impl From<PreferenceDefaults> for Preferences {
    fn from(defaults: PreferenceDefaults) -> Self {
        Self {
            copy_image: defaults.copy_image,
            include_shadow: defaults.include_shadow,
            play_sound: defaults.play_sound,
        }
    }
}

/// One preference flag, addressable from the CLI and the tray menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum PreferenceFlag {
    CopyImage,
    IncludeShadow,
    PlaySound,
}

impl PreferenceFlag {
    pub const ALL: [Self; 3] = [Self::CopyImage, Self::IncludeShadow, Self::PlaySound];

    /// Kebab-case name used on the command line and in menu ids.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CopyImage => "copy-image",
            Self::IncludeShadow => "include-shadow",
            Self::PlaySound => "play-sound",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CopyImage => "Copy Image Data",
            Self::IncludeShadow => "Include Window Shadow",
            Self::PlaySound => "Play Capture Sound",
        }
    }

    /// Parses a flag from its kebab-case name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }

    #[must_use]
    pub const fn get(self, prefs: &Preferences) -> bool {
        match self {
            Self::CopyImage => prefs.copy_image,
            Self::IncludeShadow => prefs.include_shadow,
            Self::PlaySound => prefs.play_sound,
        }
    }

    pub const fn set(self, prefs: &mut Preferences, value: bool) {
        match self {
            Self::CopyImage => prefs.copy_image = value,
            Self::IncludeShadow => prefs.include_shadow = value,
            Self::PlaySound => prefs.play_sound = value,
        }
    }
}

/// Preferences backed by a JSON file.
#[derive(Debug)]
pub struct PreferencesStore {
    path: PathBuf,
    prefs: RwLock<Preferences>,
}

impl PreferencesStore {
    /// Loads preferences from `path`, falling back to `defaults` when the
    /// file is missing or invalid.
    #[must_use]
    pub fn load(path: PathBuf, defaults: Preferences) -> Self {
        let prefs = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "invalid preferences file, using defaults");
                defaults
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => defaults,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read preferences, using defaults");
                defaults
            }
        };

        Self { path, prefs: RwLock::new(prefs) }
    }

    #[must_use]
    pub fn path(&self) -> &Path { &self.path }

    #[must_use]
    pub fn get(&self) -> Preferences { *self.prefs.read() }

    /// Sets `flag` and persists. Write failures are logged; the in-memory
    /// value changes regardless.
    pub fn set(&self, flag: PreferenceFlag, value: bool) -> Preferences {
        self.update(flag, |_| value)
    }

    /// Flips `flag` and returns its new value.
    pub fn toggle(&self, flag: PreferenceFlag) -> bool {
        let updated = self.update(flag, |current| !current);
        flag.get(&updated)
    }

    /// Applies `f` to the current value of `flag` and persists the result.
    ///
    /// The write lock is held until the file is saved, so concurrent updates
    /// are written in the order they were applied.
    fn update(&self, flag: PreferenceFlag, f: impl FnOnce(bool) -> bool) -> Preferences {
        let mut prefs = self.prefs.write();
        let value = f(flag.get(&prefs));
        flag.set(&mut prefs, value);

        if let Err(err) = save_atomic(&self.path, &prefs) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to save preferences");
        } else {
            tracing::debug!(flag = flag.name(), value, "preference updated");
        }

        *prefs
    }
}

/// Writes `prefs` to a sibling temp file and renames it over `path`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written or renamed.
pub fn save_atomic(path: &Path, prefs: &Preferences) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(prefs)?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)
}

/// Default location of the preferences file.
#[must_use]
pub fn preferences_path() -> PathBuf { get_support_dir().join(PREFERENCES_FILE_NAME) }

/// Returns the process-wide store, loading it on first use.
pub fn store() -> &'static PreferencesStore {
    STORE.get_or_init(|| {
        PreferencesStore::load(preferences_path(), config::get_config().defaults.into())
    })
}

/// Current preference values.
#[must_use]
pub fn current() -> Preferences { store().get() }
