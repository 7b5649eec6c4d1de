//! Tauri commands invoked by the overlay page.
//!
//! Coordinates are overlay-local points (`clientX`/`clientY`).

use tauri::{AppHandle, Emitter, State};

use super::{DragPhase, DragUpdate, OverlayState, close};
use crate::capture::{CaptureTarget, capture_in_background};
use crate::error::SnapclipError;
use crate::geometry::{Point, Rect};
use crate::picker::HighlightChange;
use crate::windows::{self, WindowInfo};
use crate::{config, events};

fn no_overlay() -> SnapclipError { SnapclipError::OverlayError("no overlay is open".to_string()) }

/// Moves the window highlight. Returns the highlight in local points.
///
/// # Errors
///
/// Returns an error if no overlay is open.
#[tauri::command]
#[allow(clippy::needless_pass_by_value)]
pub fn overlay_hover(
    app: AppHandle,
    state: State<'_, OverlayState>,
    x: f64,
    y: f64,
) -> Result<Option<Rect>, SnapclipError> {
    let (change, rect) =
        state.with_session(|session| session.hover(Point::new(x, y))).ok_or_else(no_overlay)?;

    if let HighlightChange::Changed(window) = change {
        tracing::trace!(window = ?window.as_ref().map(|w| w.id), "highlight changed");
        if let Err(err) = app.emit(events::overlay::HIGHLIGHT_CHANGED, rect) {
            tracing::debug!(error = %err, "failed to emit highlight change");
        }
    }

    Ok(rect)
}

/// Feeds a region drag event. Returns the selection in local points while
/// dragging; the `end` phase closes the overlay and starts the capture.
///
/// # Errors
///
/// Returns an error if no overlay is open.
#[tauri::command]
#[allow(clippy::needless_pass_by_value)]
pub fn overlay_drag(
    app: AppHandle,
    state: State<'_, OverlayState>,
    phase: DragPhase,
    x: f64,
    y: f64,
) -> Result<Option<Rect>, SnapclipError> {
    let update =
        state.with_session(|session| session.drag(phase, Point::new(x, y))).ok_or_else(no_overlay)?;

    match update {
        DragUpdate::Selection(rect) => Ok(Some(rect)),
        DragUpdate::Ignored => Ok(None),
        DragUpdate::Finished(region) => {
            close(&app, true);
            match region {
                Some(region) => capture_in_background(app, CaptureTarget::Region(region)),
                None => tracing::info!("region too small, capture cancelled"),
            }
            Ok(None)
        }
    }
}

/// Reloads the window list and picks again at `local`.
///
/// Windows opened or moved since the overlay appeared become pickable.
fn reselect_with_fresh_windows(state: &OverlayState, local: Point) -> Option<WindowInfo> {
    let fresh = match windows::list_candidates(&config::get_config().picker) {
        Ok(fresh) => fresh,
        Err(err) => {
            tracing::debug!(error = %err, "window list unavailable, keeping the old one");
            return None;
        }
    };

    state
        .with_session(|session| {
            session.refresh_windows(fresh);
            session.click(local)
        })
        .flatten()
}

/// Captures the window under the cursor.
///
/// Clicking where there is no window reloads the window list once; if there
/// is still nothing there the overlay stays open.
///
/// # Errors
///
/// Returns an error if no overlay is open.
#[tauri::command]
#[allow(clippy::needless_pass_by_value)]
pub fn overlay_click(
    app: AppHandle,
    state: State<'_, OverlayState>,
    x: f64,
    y: f64,
) -> Result<(), SnapclipError> {
    let local = Point::new(x, y);
    let selected = state.with_session(|session| session.click(local)).ok_or_else(no_overlay)?;

    let Some(window) = selected.or_else(|| reselect_with_fresh_windows(&state, local)) else {
        tracing::debug!(x, y, "no window under cursor");
        return Ok(());
    };

    tracing::debug!(id = window.id, owner = %window.owner_name, "window selected");
    close(&app, true);
    capture_in_background(app, CaptureTarget::Window(window.id));
    Ok(())
}

/// Closes the overlay without capturing and restores focus.
#[tauri::command]
#[allow(clippy::needless_pass_by_value)]
pub fn overlay_cancel(app: AppHandle) {
    if close(&app, true).is_some() {
        tracing::info!("capture cancelled");
    }
}
