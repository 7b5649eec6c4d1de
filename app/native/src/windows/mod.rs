//! On-screen window list used by the picker.
//!
//! [`list_on_screen_windows`] returns raw entries from CoreGraphics,
//! [`filter_candidates`] narrows them down to the windows worth highlighting.

mod ffi;

use serde::Serialize;

pub use self::ffi::{activate_app, cursor_location, frontmost_app_pid, list_on_screen_windows};
use crate::capture::CaptureError;
use crate::config::PickerConfig;
use crate::geometry::Rect;

/// One entry of the on-screen window list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowInfo {
    /// CoreGraphics window number.
    pub id: u32,
    /// Owning process.
    pub pid: i32,
    pub owner_name: String,
    /// Window title. Empty unless the app granted Screen Recording access.
    pub title: String,
    /// Frame in global points.
    pub bounds: Rect,
    /// Window level; normal application windows are 0.
    pub layer: i32,
    /// Stacking position, 0 is frontmost.
    pub z_index: usize,
    /// Window opacity (0.0 - 1.0).
    pub alpha: f64,
}

/// Keeps the windows the picker may highlight, sorted front to back.
///
/// Drops windows that are not on the normal layer, belong to `own_pid`, are
/// owned by an excluded application, are fully transparent, or are smaller
/// than `min_window_size` in either dimension.
#[must_use]
pub fn filter_candidates(
    windows: Vec<WindowInfo>,
    own_pid: i32,
    picker: &PickerConfig,
) -> Vec<WindowInfo> {
    let mut candidates: Vec<WindowInfo> = windows
        .into_iter()
        .filter(|w| w.layer == 0)
        .filter(|w| w.pid != own_pid)
        .filter(|w| !picker.is_excluded_owner(&w.owner_name))
        .filter(|w| w.alpha > 0.0)
        .filter(|w| {
            w.bounds.width >= picker.min_window_size && w.bounds.height >= picker.min_window_size
        })
        .collect();

    candidates.sort_by_key(|w| w.z_index);
    candidates
}

/// Lists the windows the picker may highlight.
///
/// # Errors
///
/// Returns [`CaptureError::WindowListUnavailable`] if CoreGraphics returns no
/// list.
pub fn list_candidates(picker: &PickerConfig) -> Result<Vec<WindowInfo>, CaptureError> {
    let own_pid = i32::try_from(std::process::id()).unwrap_or(-1);
    Ok(filter_candidates(list_on_screen_windows()?, own_pid, picker))
}
