// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Handles grab-and-drag interaction state for panning the previewed image.

use crate::domain::{Point, Vector};

/// Pointer button reported with a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Manages grab-and-drag state
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Whether a drag operation is currently active
    pub is_dragging: bool,

    /// Pointer position at the last processed event
    pub last_position: Option<Point>,
}

impl DragState {
    /// Starts a drag operation. Only the primary button starts a drag.
    ///
    /// Returns true when the drag started.
    pub fn start(&mut self, button: PointerButton, position: Point) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        self.is_dragging = true;
        self.last_position = Some(position);
        true
    }

    /// Stops the drag operation
    pub fn stop(&mut self) {
        self.is_dragging = false;
        self.last_position = None;
    }

    /// Movement since the last processed position, which becomes
    /// `position`.
    pub fn delta(&mut self, position: Point) -> Option<Vector> {
        if !self.is_dragging {
            return None;
        }
        let last = self.last_position.replace(position)?;
        Some(position - last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_drag_state_is_not_dragging() {
        let state = DragState::default();
        assert!(!state.is_dragging);
        assert!(state.last_position.is_none());
    }

    #[test]
    fn only_primary_button_starts_drag() {
        let mut state = DragState::default();
        assert!(!state.start(PointerButton::Secondary, Point::new(1.0, 1.0)));
        assert!(!state.start(PointerButton::Middle, Point::new(1.0, 1.0)));
        assert!(!state.is_dragging);

        assert!(state.start(PointerButton::Primary, Point::new(100.0, 50.0)));
        assert!(state.is_dragging);
        assert_eq!(state.last_position, Some(Point::new(100.0, 50.0)));
    }

    #[test]
    fn stop_drag_clears_state() {
        let mut state = DragState::default();
        state.start(PointerButton::Primary, Point::new(100.0, 50.0));
        state.stop();

        assert!(!state.is_dragging);
        assert!(state.last_position.is_none());
    }

    #[test]
    fn delta_returns_none_when_not_dragging() {
        let mut state = DragState::default();
        assert!(state.delta(Point::new(100.0, 50.0)).is_none());
    }

    #[test]
    fn delta_is_incremental() {
        let mut state = DragState::default();
        state.start(PointerButton::Primary, Point::new(200.0, 150.0));

        assert_eq!(
            state.delta(Point::new(180.0, 130.0)),
            Some(Vector::new(-20.0, -20.0))
        );
        assert_eq!(
            state.delta(Point::new(185.0, 160.0)),
            Some(Vector::new(5.0, 30.0))
        );
    }
}
