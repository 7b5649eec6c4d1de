//! Hit-testing for the window and region picker.
//!
//! Pure state machines driven by the overlay's mouse events. Nothing here
//! talks to the OS.

use crate::geometry::{Point, Rect};
use crate::windows::WindowInfo;

/// Result of moving the cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum HighlightChange {
    /// The same window (or none) is still highlighted.
    Unchanged,
    /// The highlight moved to another window, or was cleared.
    Changed(Option<WindowInfo>),
}

/// Tracks which window is under the cursor.
///
/// At most one window is highlighted at any time.
#[derive(Debug, Clone, Default)]
pub struct WindowPicker {
    windows: Vec<WindowInfo>,
    highlighted: Option<u32>,
}

impl WindowPicker {
    /// Creates a picker over `windows`, sorted front to back.
    #[must_use]
    pub fn new(mut windows: Vec<WindowInfo>) -> Self {
        windows.sort_by_key(|w| w.z_index);
        Self { windows, highlighted: None }
    }

    #[must_use]
    pub fn windows(&self) -> &[WindowInfo] { &self.windows }

    /// Returns the frontmost window containing `point`.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<&WindowInfo> {
        self.windows.iter().find(|w| w.bounds.contains_point(point))
    }

    /// Moves the highlight to the window under `point`.
    pub fn update_cursor(&mut self, point: Point) -> HighlightChange {
        let hit = self.hit_test(point).cloned();
        let hit_id = hit.as_ref().map(|w| w.id);

        if hit_id == self.highlighted {
            return HighlightChange::Unchanged;
        }

        self.highlighted = hit_id;
        HighlightChange::Changed(hit)
    }

    /// The highlighted window, if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<&WindowInfo> {
        let id = self.highlighted?;
        self.windows.iter().find(|w| w.id == id)
    }

    /// Picks the window under `point` and clears the highlight.
    pub fn select(&mut self, point: Point) -> Option<WindowInfo> {
        let selected = self.hit_test(point).cloned();
        self.highlighted = None;
        selected
    }

    /// Replaces the window list, keeping the highlight only if that window is
    /// still present.
    pub fn refresh(&mut self, mut windows: Vec<WindowInfo>) {
        windows.sort_by_key(|w| w.z_index);
        self.windows = windows;

        if let Some(id) = self.highlighted
            && !self.windows.iter().any(|w| w.id == id)
        {
            self.highlighted = None;
        }
    }
}

/// A mouse drag selecting a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionDrag {
    start: Point,
    current: Point,
}

impl RegionDrag {
    #[must_use]
    pub const fn start(point: Point) -> Self { Self { start: point, current: point } }

    pub const fn update(&mut self, point: Point) { self.current = point; }

    /// The normalized rectangle between the start point and the cursor.
    #[must_use]
    pub fn rect(&self) -> Rect { Rect::from_corners(self.start, self.current) }

    /// Ends the drag at `point`.
    ///
    /// Returns `None` (cancel) when either side is shorter than `min_size`.
    #[must_use]
    pub fn finish(mut self, point: Point, min_size: f64) -> Option<Rect> {
        self.update(point);
        let rect = self.rect();
        (rect.width >= min_size && rect.height >= min_size && rect.is_valid()).then_some(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(id: u32, bounds: Rect, z_index: usize) -> WindowInfo {
        WindowInfo {
            id,
            pid: 100 + i32::try_from(id).unwrap(),
            owner_name: format!("App {id}"),
            title: String::new(),
            bounds,
            layer: 0,
            z_index,
            alpha: 1.0,
        }
    }

    /// Window 1 in front, overlapping window 2 behind it.
    fn overlapping() -> WindowPicker {
        WindowPicker::new(vec![
            window(2, Rect::new(50.0, 50.0, 200.0, 200.0), 1),
            window(1, Rect::new(0.0, 0.0, 100.0, 100.0), 0),
        ])
    }

    #[test]
    fn hit_test_prefers_frontmost() {
        let picker = overlapping();
        assert_eq!(picker.hit_test(Point::new(75.0, 75.0)).map(|w| w.id), Some(1));
        assert_eq!(picker.hit_test(Point::new(150.0, 150.0)).map(|w| w.id), Some(2));
        assert!(picker.hit_test(Point::new(500.0, 500.0)).is_none());
    }

    #[test]
    fn new_sorts_by_z_index() {
        let ids: Vec<u32> = overlapping().windows().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn update_cursor_reports_changes_only() {
        let mut picker = overlapping();

        let first = picker.update_cursor(Point::new(10.0, 10.0));
        assert!(matches!(first, HighlightChange::Changed(Some(ref w)) if w.id == 1));

        assert_eq!(picker.update_cursor(Point::new(20.0, 20.0)), HighlightChange::Unchanged);

        let second = picker.update_cursor(Point::new(200.0, 200.0));
        assert!(matches!(second, HighlightChange::Changed(Some(ref w)) if w.id == 2));

        assert_eq!(picker.update_cursor(Point::new(900.0, 900.0)), HighlightChange::Changed(None));
        assert_eq!(picker.update_cursor(Point::new(901.0, 901.0)), HighlightChange::Unchanged);
        assert!(picker.highlighted().is_none());
    }

    #[test]
    fn at_most_one_window_is_highlighted() {
        let mut picker = overlapping();
        picker.update_cursor(Point::new(75.0, 75.0));
        assert_eq!(picker.highlighted().map(|w| w.id), Some(1));
        picker.update_cursor(Point::new(240.0, 240.0));
        assert_eq!(picker.highlighted().map(|w| w.id), Some(2));
    }

    #[test]
    fn shared_edge_belongs_to_one_window() {
        let mut picker = WindowPicker::new(vec![
            window(1, Rect::new(0.0, 0.0, 100.0, 100.0), 0),
            window(2, Rect::new(100.0, 0.0, 100.0, 100.0), 1),
        ]);
        assert_eq!(picker.hit_test(Point::new(100.0, 50.0)).map(|w| w.id), Some(2));
        picker.update_cursor(Point::new(99.9, 50.0));
        assert_eq!(picker.highlighted().map(|w| w.id), Some(1));
    }

    #[test]
    fn select_takes_window_and_clears_highlight() {
        let mut picker = overlapping();
        picker.update_cursor(Point::new(10.0, 10.0));

        let selected = picker.select(Point::new(200.0, 200.0));
        assert_eq!(selected.map(|w| w.id), Some(2));
        assert!(picker.highlighted().is_none());
        assert!(picker.select(Point::new(-5.0, -5.0)).is_none());
    }

    #[test]
    fn refresh_keeps_highlight_of_surviving_window() {
        let mut picker = overlapping();
        picker.update_cursor(Point::new(200.0, 200.0));

        picker.refresh(vec![window(2, Rect::new(60.0, 60.0, 200.0, 200.0), 0)]);
        assert_eq!(picker.highlighted().map(|w| w.id), Some(2));

        picker.refresh(vec![window(3, Rect::new(0.0, 0.0, 10.0, 10.0), 0)]);
        assert!(picker.highlighted().is_none());
    }

    #[test]
    fn empty_picker_never_highlights() {
        let mut picker = WindowPicker::new(Vec::new());
        assert_eq!(picker.update_cursor(Point::new(1.0, 1.0)), HighlightChange::Unchanged);
        assert!(picker.select(Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn region_drag_normalizes_direction() {
        let mut drag = RegionDrag::start(Point::new(300.0, 200.0));
        drag.update(Point::new(100.0, 50.0));
        assert_eq!(drag.rect(), Rect::new(100.0, 50.0, 200.0, 150.0));
    }

    #[test]
    fn region_drag_finish_respects_min_size() {
        let drag = RegionDrag::start(Point::new(10.0, 10.0));
        assert!(drag.finish(Point::new(12.0, 200.0), 4.0).is_none());
        assert_eq!(
            drag.finish(Point::new(14.0, 14.0), 4.0),
            Some(Rect::new(10.0, 10.0, 4.0, 4.0))
        );
    }

    #[test]
    fn region_click_without_drag_cancels() {
        let drag = RegionDrag::start(Point::new(10.0, 10.0));
        assert!(drag.finish(Point::new(10.0, 10.0), 0.0).is_none());
    }
}
