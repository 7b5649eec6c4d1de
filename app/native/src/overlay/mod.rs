//! Picker overlay window.
//!
//! A transparent, borderless, always-on-top webview covering the monitor
//! under the cursor. The page forwards pointer events to the commands in
//! [`commands`]; all hit-testing happens here against a [`WindowPicker`].
//!
//! At most one overlay is open at a time.

pub mod commands;

use std::fmt;

use parking_lot::Mutex;
use serde::Deserialize;
use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};

use crate::config;
use crate::constants::{OVERLAY_PAGE, OVERLAY_WINDOW_LABEL};
use crate::geometry::{Point, Rect};
use crate::picker::{HighlightChange, RegionDrag, WindowPicker};
use crate::windows::{self, WindowInfo};

/// What the overlay lets the user pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickMode {
    Window,
    Region,
}

impl fmt::Display for PickMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Window => "window",
            Self::Region => "region",
        })
    }
}

/// Phase of a region drag reported by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragPhase {
    Start,
    Move,
    End,
}

/// Result of feeding a drag event into the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// Current selection in overlay-local points.
    Selection(Rect),
    /// The drag ended; `None` means it was too small and cancels.
    Finished(Option<Rect>),
    /// Event did not apply (wrong mode, or no drag in progress).
    Ignored,
}

/// State of the open overlay.
#[derive(Debug)]
pub struct OverlaySession {
    pub mode: PickMode,
    /// App that was frontmost before the overlay opened.
    pub previous_app: Option<i32>,
    /// Frame of the covered monitor in global points.
    pub monitor: Rect,
    pub picker: WindowPicker,
    pub drag: Option<RegionDrag>,
    pub min_region_size: f64,
}

impl OverlaySession {
    #[must_use]
    pub fn new(mode: PickMode, monitor: Rect, windows: Vec<WindowInfo>) -> Self {
        Self {
            mode,
            previous_app: None,
            monitor,
            picker: WindowPicker::new(windows),
            drag: None,
            min_region_size: config::PickerConfig::default().min_region_size,
        }
    }

    /// Converts overlay-local coordinates to global points.
    #[must_use]
    pub fn to_global(&self, local: Point) -> Point { local.offset(self.monitor.x, self.monitor.y) }

    /// Converts a global rectangle to overlay-local coordinates.
    #[must_use]
    pub fn to_local(&self, rect: Rect) -> Rect { rect.offset_by(-self.monitor.x, -self.monitor.y) }

    /// Updates the highlight for a cursor at `local`.
    ///
    /// Returns the change and the highlight rectangle in local points.
    pub fn hover(&mut self, local: Point) -> (HighlightChange, Option<Rect>) {
        if self.mode != PickMode::Window {
            return (HighlightChange::Unchanged, None);
        }

        let change = self.picker.update_cursor(self.to_global(local));
        let rect = self.picker.highlighted().map(|w| self.to_local(w.bounds));
        (change, rect)
    }

    /// Picks the window under `local`. `None` when nothing is there.
    pub fn click(&mut self, local: Point) -> Option<WindowInfo> {
        if self.mode != PickMode::Window {
            return None;
        }
        self.picker.select(self.to_global(local))
    }

    /// Replaces the window list, keeping the highlight if its window survived.
    pub fn refresh_windows(&mut self, windows: Vec<WindowInfo>) { self.picker.refresh(windows); }

    /// Feeds a drag event at `local`.
    pub fn drag(&mut self, phase: DragPhase, local: Point) -> DragUpdate {
        if self.mode != PickMode::Region {
            return DragUpdate::Ignored;
        }

        let point = self.to_global(local);
        match phase {
            DragPhase::Start => {
                let drag = RegionDrag::start(point);
                self.drag = Some(drag);
                DragUpdate::Selection(self.to_local(drag.rect()))
            }
            DragPhase::Move => match self.drag.as_mut() {
                Some(drag) => {
                    drag.update(point);
                    let rect = drag.rect();
                    DragUpdate::Selection(self.to_local(rect))
                }
                None => DragUpdate::Ignored,
            },
            DragPhase::End => match self.drag.take() {
                Some(drag) => DragUpdate::Finished(drag.finish(point, self.min_region_size)),
                None => DragUpdate::Ignored,
            },
        }
    }
}

/// Managed Tauri state holding the open overlay, if any.
#[derive(Debug, Default)]
pub struct OverlayState {
    session: Mutex<Option<OverlaySession>>,
}

impl OverlayState {
    #[must_use]
    pub fn is_open(&self) -> bool { self.session.lock().is_some() }

    /// Runs `f` against the open session.
    pub fn with_session<T>(&self, f: impl FnOnce(&mut OverlaySession) -> T) -> Option<T> {
        self.session.lock().as_mut().map(f)
    }

    /// Stores `session` unless one is already open. Returns `false` if it was.
    pub fn begin(&self, session: OverlaySession) -> bool {
        let mut guard = self.session.lock();
        if guard.is_some() {
            return false;
        }
        *guard = Some(session);
        true
    }

    pub fn take(&self) -> Option<OverlaySession> { self.session.lock().take() }
}

/// Returns the monitor frame containing `point`, or the first one.
#[must_use]
pub fn monitor_containing(monitors: &[Rect], point: Point) -> Option<Rect> {
    monitors.iter().find(|m| m.contains_point(point)).or_else(|| monitors.first()).copied()
}

/// Page URL for `mode`.
#[must_use]
pub fn overlay_url(mode: PickMode) -> String { format!("{OVERLAY_PAGE}?mode={mode}") }

/// Monitor frames in global points.
fn monitor_frames(app: &AppHandle) -> Vec<Rect> {
    let monitors = match app.available_monitors() {
        Ok(monitors) => monitors,
        Err(err) => {
            tracing::warn!(error = %err, "failed to list monitors");
            return Vec::new();
        }
    };

    monitors
        .iter()
        .map(|m| {
            let scale = m.scale_factor();
            let position = m.position().to_logical::<f64>(scale);
            let size = m.size().to_logical::<f64>(scale);
            Rect::new(position.x, position.y, size.width, size.height)
        })
        .collect()
}

/// Opens the picker overlay on the monitor under the cursor.
///
/// Ignored when an overlay is already open. In window mode a window list
/// that cannot be read leaves the overlay without highlights.
pub fn open(app: &AppHandle, mode: PickMode) {
    let state = app.state::<OverlayState>();
    if state.is_open() {
        tracing::debug!(%mode, "overlay already open, ignoring");
        return;
    }

    let cursor = windows::cursor_location().unwrap_or_default();
    let Some(monitor) = monitor_containing(&monitor_frames(app), cursor) else {
        tracing::warn!("no monitor available for the overlay");
        return;
    };

    let picker_config = &config::get_config().picker;
    let candidates = match mode {
        PickMode::Window => windows::list_candidates(picker_config).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "window list unavailable, picker shows no highlight");
            Vec::new()
        }),
        PickMode::Region => Vec::new(),
    };

    let mut session = OverlaySession::new(mode, monitor, candidates);
    session.previous_app = windows::frontmost_app_pid();
    session.min_region_size = picker_config.min_region_size;

    tracing::debug!(
        %mode,
        ?monitor,
        windows = session.picker.windows().len(),
        previous_app = ?session.previous_app,
        "opening overlay"
    );

    if !state.begin(session) {
        return;
    }

    let result = WebviewWindowBuilder::new(
        app,
        OVERLAY_WINDOW_LABEL,
        WebviewUrl::App(overlay_url(mode).into()),
    )
    .title("")
    .position(monitor.x, monitor.y)
    .inner_size(monitor.width, monitor.height)
    .decorations(false)
    .transparent(true)
    .shadow(false)
    .always_on_top(true)
    .skip_taskbar(true)
    .resizable(false)
    .visible_on_all_workspaces(true)
    .focused(true)
    .build();

    match result {
        Ok(window) => {
            if let Err(err) = window.set_focus() {
                tracing::debug!(error = %err, "failed to focus overlay");
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to create overlay window");
            state.take();
        }
    }
}

/// Closes the overlay and returns its session.
///
/// With `restore_focus`, the app that was frontmost before the overlay
/// opened is activated again.
pub fn close(app: &AppHandle, restore_focus: bool) -> Option<OverlaySession> {
    let session = app.state::<OverlayState>().take();

    if let Some(window) = app.get_webview_window(OVERLAY_WINDOW_LABEL)
        && let Err(err) = window.destroy()
    {
        tracing::warn!(error = %err, "failed to destroy overlay window");
    }

    if restore_focus
        && let Some(pid) = session.as_ref().and_then(|s| s.previous_app)
        && !windows::activate_app(pid)
    {
        tracing::debug!(pid, "previous app could not be activated");
    }

    session
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(id: u32, bounds: Rect, z_index: usize) -> WindowInfo {
        WindowInfo {
            id,
            pid: 1,
            owner_name: "Safari".to_string(),
            title: String::new(),
            bounds,
            layer: 0,
            z_index,
            alpha: 1.0,
        }
    }

    /// Secondary monitor to the left of the main display.
    fn left_monitor() -> Rect { Rect::new(-1440.0, 0.0, 1440.0, 900.0) }

    #[test]
    fn refreshed_windows_become_clickable() {
        let mut session = OverlaySession::new(PickMode::Window, left_monitor(), Vec::new());
        assert!(session.click(Point::new(100.0, 100.0)).is_none());

        session.refresh_windows(vec![window(8, Rect::new(-1400.0, 50.0, 300.0, 300.0), 0)]);
        assert_eq!(session.click(Point::new(100.0, 100.0)).map(|w| w.id), Some(8));
    }

    #[test]
    fn overlay_url_carries_mode() {
        assert_eq!(overlay_url(PickMode::Window), "overlay.html?mode=window");
        assert_eq!(overlay_url(PickMode::Region), "overlay.html?mode=region");
    }

    #[test]
    fn monitor_containing_picks_cursor_monitor() {
        let main = Rect::new(0.0, 0.0, 1728.0, 1117.0);
        let monitors = [main, left_monitor()];
        assert_eq!(monitor_containing(&monitors, Point::new(-10.0, 50.0)), Some(left_monitor()));
        assert_eq!(monitor_containing(&monitors, Point::new(10.0, 50.0)), Some(main));
        assert_eq!(monitor_containing(&monitors, Point::new(9999.0, 0.0)), Some(main));
        assert_eq!(monitor_containing(&[], Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn hover_converts_between_local_and_global() {
        let mut session = OverlaySession::new(
            PickMode::Window,
            left_monitor(),
            vec![window(7, Rect::new(-1400.0, 100.0, 500.0, 400.0), 0)],
        );

        let (change, rect) = session.hover(Point::new(50.0, 150.0));
        assert!(matches!(change, HighlightChange::Changed(Some(ref w)) if w.id == 7));
        assert_eq!(rect, Some(Rect::new(40.0, 100.0, 500.0, 400.0)));

        let (change, rect) = session.hover(Point::new(1000.0, 800.0));
        assert_eq!(change, HighlightChange::Changed(None));
        assert_eq!(rect, None);
    }

    #[test]
    fn click_selects_window_in_window_mode_only() {
        let windows = vec![window(7, Rect::new(0.0, 0.0, 500.0, 400.0), 0)];
        let mut session = OverlaySession::new(PickMode::Window, Rect::new(0.0, 0.0, 1000.0, 800.0), windows.clone());
        assert_eq!(session.click(Point::new(10.0, 10.0)).map(|w| w.id), Some(7));

        let mut region = OverlaySession::new(PickMode::Region, Rect::new(0.0, 0.0, 1000.0, 800.0), windows);
        assert!(region.click(Point::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn drag_produces_global_region() {
        let mut session = OverlaySession::new(PickMode::Region, left_monitor(), Vec::new());

        assert_eq!(
            session.drag(DragPhase::Start, Point::new(100.0, 100.0)),
            DragUpdate::Selection(Rect::new(100.0, 100.0, 0.0, 0.0))
        );
        assert_eq!(
            session.drag(DragPhase::Move, Point::new(50.0, 300.0)),
            DragUpdate::Selection(Rect::new(50.0, 100.0, 50.0, 200.0))
        );
        assert_eq!(
            session.drag(DragPhase::End, Point::new(40.0, 300.0)),
            DragUpdate::Finished(Some(Rect::new(-1400.0, 100.0, 60.0, 200.0)))
        );
        assert!(session.drag.is_none());
    }

    #[test]
    fn tiny_drag_cancels() {
        let mut session = OverlaySession::new(PickMode::Region, left_monitor(), Vec::new());
        session.drag(DragPhase::Start, Point::new(100.0, 100.0));
        assert_eq!(session.drag(DragPhase::End, Point::new(102.0, 300.0)), DragUpdate::Finished(None));
    }

    #[test]
    fn drag_without_start_is_ignored() {
        let mut session = OverlaySession::new(PickMode::Region, left_monitor(), Vec::new());
        assert_eq!(session.drag(DragPhase::Move, Point::new(1.0, 1.0)), DragUpdate::Ignored);
        assert_eq!(session.drag(DragPhase::End, Point::new(1.0, 1.0)), DragUpdate::Ignored);

        let mut window_mode = OverlaySession::new(PickMode::Window, left_monitor(), Vec::new());
        assert_eq!(window_mode.drag(DragPhase::Start, Point::new(1.0, 1.0)), DragUpdate::Ignored);
    }

    #[test]
    fn state_allows_one_session() {
        let state = OverlayState::default();
        assert!(state.begin(OverlaySession::new(PickMode::Window, left_monitor(), Vec::new())));
        assert!(!state.begin(OverlaySession::new(PickMode::Region, left_monitor(), Vec::new())));
        assert!(state.is_open());
        assert_eq!(state.take().map(|s| s.mode), Some(PickMode::Window));
        assert!(!state.is_open());
    }

    #[test]
    fn drag_phase_deserializes_lowercase() {
        let phase: DragPhase = serde_json::from_str("\"move\"").unwrap();
        assert_eq!(phase, DragPhase::Move);
    }
}
