//! Path utilities for shell-like path expansion.
//!
//! Used for the `capture.outputDir` setting, which may be written as
//! `~/Desktop/shots` or relative to the configuration file.

use std::path::{Path, PathBuf};

/// Expands a leading tilde to the user's home directory.
///
/// Absolute and relative paths are returned unchanged; an empty or
/// whitespace-only input yields an empty path.
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return PathBuf::new();
    }

    let expanded = shellexpand::tilde(path);
    PathBuf::from(expanded.as_ref())
}

/// Expands a tilde and resolves relative paths against `base_dir`.
///
/// ```ignore
/// use std::path::Path;
/// use snapclip_lib::platform::path::expand_and_resolve;
///
/// let base = Path::new("/Users/me/.config/snapclip");
/// assert_eq!(
///     expand_and_resolve("shots", base).to_string_lossy(),
///     "/Users/me/.config/snapclip/shots"
/// );
/// ```
#[must_use]
pub fn expand_and_resolve(path: &str, base_dir: &Path) -> PathBuf {
    let expanded = expand(path);

    if expanded.as_os_str().is_empty() || expanded.is_absolute() {
        return expanded;
    }

    base_dir.join(expanded)
}
