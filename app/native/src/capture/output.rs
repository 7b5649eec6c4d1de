//! Screenshot file naming and output directory housekeeping.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

const PNG_EXTENSION: &str = "png";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d at %H.%M.%S";

/// A screenshot found in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotFile {
    pub path: PathBuf,
    pub size: u64,
    pub modified: SystemTime,
}

/// Formats the file name for a screenshot taken at `taken_at`.
///
/// `Screenshot 2026-01-31 at 09.41.07.png`
#[must_use]
pub fn screenshot_file_name<Tz: TimeZone>(prefix: &str, taken_at: &DateTime<Tz>) -> String
where Tz::Offset: std::fmt::Display {
    format!("{prefix} {}.{PNG_EXTENSION}", taken_at.format(TIMESTAMP_FORMAT))
}

/// Returns a path in `dir` that does not exist yet.
///
/// Collisions get ` (2)`, ` (3)` and so on appended to the stem.
#[must_use]
pub fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let stem = file_name.strip_suffix(&format!(".{PNG_EXTENSION}")).unwrap_or(file_name);

    (2u32..)
        .map(|n| dir.join(format!("{stem} ({n}).{PNG_EXTENSION}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Creates `dir` if needed and returns a fresh screenshot path for now.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn next_output_path(dir: &Path, prefix: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    Ok(unique_path(dir, &screenshot_file_name(prefix, &Local::now())))
}

/// Whether `file_name` is one [`screenshot_file_name`] produced for `prefix`,
/// with or without a collision suffix.
///
/// Housekeeping only ever touches these files, so pointing the output
/// directory at a shared folder leaves the user's own images alone.
#[must_use]
pub fn is_screenshot_name(prefix: &str, file_name: &str) -> bool {
    let Some(rest) = file_name.strip_prefix(prefix).and_then(|rest| rest.strip_prefix(' ')) else {
        return false;
    };
    let Some(stem) = rest.strip_suffix(&*format!(".{PNG_EXTENSION}")) else {
        return false;
    };

    let stamp = match stem.strip_suffix(')').and_then(|s| s.rsplit_once(" (")) {
        Some((stamp, n)) if !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) => stamp,
        _ => stem,
    };

    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok()
}

/// Lists the screenshots named for `prefix` directly inside `dir`, oldest
/// first.
///
/// A missing directory yields an empty list.
///
/// # Errors
///
/// Returns an error if the directory exists but cannot be read.
pub fn list_screenshots(dir: &Path, prefix: &str) -> io::Result<Vec<ScreenshotFile>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };

    let mut files: Vec<ScreenshotFile> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_file()))
        .filter(|entry| entry.file_name().to_str().is_some_and(|name| is_screenshot_name(prefix, name)))
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            Some(ScreenshotFile {
                path: entry.path(),
                size: metadata.len(),
                modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            })
        })
        .collect();

    files.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.path.cmp(&b.path)));
    Ok(files)
}

/// Deletes the oldest screenshots in `dir` so that at most `max_files`
/// remain.
///
/// `keep` is never deleted, whatever its modification time; it still counts
/// towards the limit. `max_files == 0` keeps everything. Returns the number
/// of files removed.
///
/// # Errors
///
/// Returns an error if the directory cannot be read. Individual delete
/// failures are logged and skipped.
pub fn prune(
    dir: &Path,
    prefix: &str,
    max_files: usize,
    keep: Option<&Path>,
) -> io::Result<usize> {
    if max_files == 0 {
        return Ok(0);
    }

    let files = list_screenshots(dir, prefix)?;
    let excess = files.len().saturating_sub(max_files);

    Ok(files
        .iter()
        .filter(|file| keep != Some(file.path.as_path()))
        .take(excess)
        .filter(|file| remove_logged(&file.path))
        .count())
}

/// Deletes every screenshot named for `prefix` in `dir`. Returns the number
/// of files removed.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn clear(dir: &Path, prefix: &str) -> io::Result<usize> {
    Ok(list_screenshots(dir, prefix)?.iter().filter(|file| remove_logged(&file.path)).count())
}

fn remove_logged(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed screenshot");
            true
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to remove screenshot");
            false
        }
    }
}
