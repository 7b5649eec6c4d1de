//! Window picker and region selection through the public API.

use snapclip_lib::config::PickerConfig;
use snapclip_lib::geometry::{Point, Rect};
use snapclip_lib::overlay::{DragPhase, DragUpdate, OverlaySession, PickMode};
use snapclip_lib::picker::{HighlightChange, RegionDrag, WindowPicker};
use snapclip_lib::windows::{WindowInfo, filter_candidates};

const OWN_PID: i32 = 4242;

fn window(id: u32, pid: i32, owner: &str, bounds: Rect) -> WindowInfo {
    WindowInfo {
        id,
        pid,
        owner_name: owner.to_string(),
        title: format!("{owner} window"),
        bounds,
        layer: 0,
        z_index: 0,
        alpha: 1.0,
    }
}

/// A desktop as CoreGraphics would report it, front to back.
fn desktop() -> Vec<WindowInfo> {
    let mut windows = vec![
        window(1, OWN_PID, "snapclip", Rect::new(0.0, 0.0, 1728.0, 1117.0)),
        window(2, 10, "Dock", Rect::new(0.0, 1040.0, 1728.0, 77.0)),
        window(3, 11, "Terminal", Rect::new(100.0, 100.0, 800.0, 500.0)),
        window(4, 12, "Safari", Rect::new(300.0, 200.0, 1200.0, 800.0)),
        window(5, 13, "Finder", Rect::new(1650.0, 30.0, 20.0, 20.0)),
    ];
    for (z_index, w) in windows.iter_mut().enumerate() {
        w.z_index = z_index;
    }
    windows.push({
        let mut status = window(6, 14, "Control Centre", Rect::new(1500.0, 0.0, 200.0, 24.0));
        status.layer = 25;
        status
    });
    windows
}

fn candidates() -> Vec<WindowInfo> { filter_candidates(desktop(), OWN_PID, &PickerConfig::default()) }

#[test]
fn candidates_exclude_own_dock_tiny_and_non_normal_windows() {
    let ids: Vec<u32> = candidates().iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![3, 4]);
}

#[test]
fn frontmost_window_wins_in_overlap() {
    let picker = WindowPicker::new(candidates());
    // Inside both Terminal and Safari; Terminal is in front.
    assert_eq!(picker.hit_test(Point::new(500.0, 300.0)).map(|w| w.id), Some(3));
    // Only Safari.
    assert_eq!(picker.hit_test(Point::new(1400.0, 900.0)).map(|w| w.id), Some(4));
    // Desktop.
    assert!(picker.hit_test(Point::new(20.0, 20.0)).is_none());
}

#[test]
fn moving_the_cursor_emits_each_change_once() {
    let mut picker = WindowPicker::new(candidates());
    let path = [
        Point::new(20.0, 20.0),
        Point::new(150.0, 150.0),
        Point::new(160.0, 160.0),
        Point::new(1000.0, 700.0),
        Point::new(20.0, 20.0),
    ];

    let changes: Vec<Option<u32>> = path
        .into_iter()
        .filter_map(|p| match picker.update_cursor(p) {
            HighlightChange::Unchanged => None,
            HighlightChange::Changed(w) => Some(w.map(|w| w.id)),
        })
        .collect();

    assert_eq!(changes, vec![Some(3), Some(4), None]);
}

#[test]
fn region_drag_in_any_direction() {
    let mut drag = RegionDrag::start(Point::new(500.0, 400.0));
    drag.update(Point::new(450.0, 100.0));
    assert_eq!(drag.rect(), Rect::new(450.0, 100.0, 50.0, 300.0));
    assert_eq!(drag.finish(Point::new(200.0, 450.0), 4.0), Some(Rect::new(200.0, 400.0, 300.0, 50.0)));
}

#[test]
fn overlay_session_on_secondary_monitor() {
    let monitor = Rect::new(1728.0, -200.0, 1920.0, 1080.0);
    let external = window(9, 20, "Preview", Rect::new(1828.0, -100.0, 600.0, 400.0));
    let mut session = OverlaySession::new(PickMode::Window, monitor, vec![external]);

    let (_, rect) = session.hover(Point::new(150.0, 150.0));
    assert_eq!(rect, Some(Rect::new(100.0, 100.0, 600.0, 400.0)));

    let mut region = OverlaySession::new(PickMode::Region, monitor, Vec::new());
    region.drag(DragPhase::Start, Point::new(0.0, 0.0));
    assert_eq!(
        region.drag(DragPhase::End, Point::new(100.0, 50.0)),
        DragUpdate::Finished(Some(Rect::new(1728.0, -200.0, 100.0, 50.0)))
    );
}
