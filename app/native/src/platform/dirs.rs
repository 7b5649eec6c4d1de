//! Application directories.
//!
//! Screenshots default to `~/Library/Caches/{APP_BUNDLE_ID}/screenshots` so
//! they survive reboots but are clearly disposable. Preferences live under
//! `~/Library/Application Support/snapclip/`.

use std::path::PathBuf;

use crate::constants::{APP_BUNDLE_ID, APP_NAME};

/// Returns a cache subdirectory for the given component.
///
/// Falls back to `/tmp/{APP_BUNDLE_ID}/{subdir}` if the cache directory is
/// unavailable.
#[must_use]
pub fn get_cache_subdir(subdir: &str) -> PathBuf {
    ::dirs::cache_dir().map_or_else(
        || PathBuf::from(format!("/tmp/{APP_BUNDLE_ID}/{subdir}")),
        |cache| cache.join(APP_BUNDLE_ID).join(subdir),
    )
}

/// Returns the application-support directory used for persisted state.
#[must_use]
pub fn get_support_dir() -> PathBuf {
    ::dirs::config_dir().map_or_else(
        || PathBuf::from(format!("/tmp/{APP_BUNDLE_ID}/support")),
        |config| config.join(APP_NAME),
    )
}
