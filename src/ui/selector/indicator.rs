// SPDX-License-Identifier: MPL-2.0
//! Progress ring geometry for the selector.
//!
//! Everything here is derived from the widget size and the displayed
//! percentage, so the drawing layer only has to stroke the values.

use std::f32::consts::PI;

use crate::config::{
    SelectorKind, BUTTON_OFFSET_RATIO, BUTTON_SIZE_RATIO, LABEL_FONT_RATIO, PROGRESS_MAX,
    RING_CIRCLE_INSET_RATIO, RING_RECT_CORNER_RATIO, RING_RECT_SIDE_RATIO, RING_STROKE_RATIO,
};

/// Outline traced by the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingShape {
    Circle {
        center: f32,
        radius: f32,
    },
    RoundedRect {
        inset: f32,
        side: f32,
        corner_radius: f32,
    },
}

/// Stroke of the ring at the current percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingStroke {
    pub shape: RingShape,
    pub width: f32,
    /// Length of the full outline.
    pub dash_array: f32,
    /// Undrawn part of the outline.
    pub dash_offset: f32,
}

/// What the selector draws over the image while an operation runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressIndicator {
    percent: f32,
    size: f32,
    kind: SelectorKind,
    show_ring: bool,
    blur_on_progress: bool,
    loading: bool,
    has_image: bool,
}

impl ProgressIndicator {
    #[must_use]
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn new(
        percent: f32,
        size: f32,
        kind: SelectorKind,
        show_ring: bool,
        blur_on_progress: bool,
        loading: bool,
        has_image: bool,
    ) -> Self {
        Self {
            percent: percent.clamp(0.0, PROGRESS_MAX),
            size,
            kind,
            show_ring,
            blur_on_progress,
            loading,
            has_image,
        }
    }

    #[must_use]
    pub fn percent(&self) -> f32 {
        self.percent
    }

    /// Whether the ring is drawn at all.
    #[must_use]
    pub fn shows_ring(&self) -> bool {
        self.show_ring && self.percent > 0.0 && self.percent < PROGRESS_MAX
    }

    /// Rounded percentage text, e.g. `42%`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}%", self.percent.round())
    }

    /// Whether the image is blurred and dimmed under the ring.
    #[must_use]
    pub fn shows_overlay(&self) -> bool {
        self.loading
            && ((self.blur_on_progress && self.has_image) || (!self.show_ring && !self.has_image))
    }

    #[must_use]
    pub fn stroke_width(&self) -> f32 {
        self.size * RING_STROKE_RATIO
    }

    #[must_use]
    pub fn shape(&self) -> RingShape {
        if self.kind.is_circle() {
            RingShape::Circle {
                center: self.size / 2.0,
                radius: self.size / 2.0 - self.size * RING_CIRCLE_INSET_RATIO,
            }
        } else {
            let side = self.size * RING_RECT_SIDE_RATIO;
            RingShape::RoundedRect {
                inset: (self.size - side) / 2.0,
                side,
                corner_radius: self.size * RING_RECT_CORNER_RATIO,
            }
        }
    }

    /// Stroke for the current percentage, `None` when the ring is hidden.
    #[must_use]
    pub fn ring(&self) -> Option<RingStroke> {
        if !self.shows_ring() {
            return None;
        }
        let shape = self.shape();
        let outline = match shape {
            RingShape::Circle { radius, .. } => 2.0 * PI * radius,
            // Corners are ignored, matching how dash offsets are laid out.
            RingShape::RoundedRect { side, .. } => 2.0 * (side * 2.0),
        };
        Some(RingStroke {
            shape,
            width: self.stroke_width(),
            dash_array: outline,
            dash_offset: (1.0 - self.percent / PROGRESS_MAX) * outline,
        })
    }

    /// Side of the edit and delete buttons.
    #[must_use]
    pub fn button_side(&self) -> f32 {
        self.size * BUTTON_SIZE_RATIO
    }

    /// Distance of the buttons from the widget's edge.
    #[must_use]
    pub fn button_offset(&self) -> f32 {
        self.size * BUTTON_OFFSET_RATIO
    }

    #[must_use]
    pub fn label_font_size(&self) -> f32 {
        self.button_side() * LABEL_FONT_RATIO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn indicator(percent: f32, kind: SelectorKind) -> ProgressIndicator {
        ProgressIndicator::new(percent, 180.0, kind, true, true, true, true)
    }

    #[test]
    fn ring_only_between_bounds() {
        assert!(indicator(0.0, SelectorKind::Profile).ring().is_none());
        assert!(indicator(100.0, SelectorKind::Profile).ring().is_none());
        assert!(indicator(0.5, SelectorKind::Profile).ring().is_some());
        assert!(indicator(99.5, SelectorKind::Profile).ring().is_some());

        let hidden = ProgressIndicator::new(40.0, 180.0, SelectorKind::Profile, false, true, true, true);
        assert!(hidden.ring().is_none());
    }

    #[test]
    fn circle_dash_matches_drawn_circumference() {
        let ring = indicator(25.0, SelectorKind::Profile).ring().expect("ring visible");
        let radius = 90.0 - 180.0 * 0.035;
        assert_eq!(
            ring.shape,
            RingShape::Circle {
                center: 90.0,
                radius
            }
        );
        assert_abs_diff_eq!(ring.dash_array, 2.0 * PI * radius, epsilon = 1e-3);
        assert_abs_diff_eq!(ring.dash_offset, 0.75 * 2.0 * PI * radius, epsilon = 1e-3);
        assert_abs_diff_eq!(ring.width, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn rounded_rect_geometry() {
        let ring = indicator(50.0, SelectorKind::Image).ring().expect("ring visible");
        match ring.shape {
            RingShape::RoundedRect {
                inset,
                side,
                corner_radius,
            } => {
                assert_abs_diff_eq!(inset, 5.4, epsilon = 1e-4);
                assert_abs_diff_eq!(side, 169.2, epsilon = 1e-3);
                assert_abs_diff_eq!(corner_radius, 16.2, epsilon = 1e-4);
            }
            RingShape::Circle { .. } => panic!("image selectors use a rounded square"),
        }
        assert_abs_diff_eq!(ring.dash_offset, 0.5 * 2.0 * 169.2 * 2.0, epsilon = 1e-2);
    }

    #[test]
    fn label_is_rounded_percentage() {
        assert_eq!(indicator(42.4, SelectorKind::Profile).label(), "42%");
        assert_eq!(indicator(42.5, SelectorKind::Profile).label(), "43%");
        assert_eq!(indicator(120.0, SelectorKind::Profile).label(), "100%");
    }

    #[test]
    fn overlay_rules() {
        let make = |show_ring, blur, loading, has_image| {
            ProgressIndicator::new(50.0, 180.0, SelectorKind::Profile, show_ring, blur, loading, has_image)
        };
        assert!(make(true, true, true, true).shows_overlay());
        assert!(!make(true, true, false, true).shows_overlay());
        assert!(!make(true, false, true, true).shows_overlay());
        assert!(!make(true, true, true, false).shows_overlay());
        assert!(make(false, false, true, false).shows_overlay());
    }

    #[test]
    fn buttons_scale_with_size() {
        let indicator = indicator(0.0, SelectorKind::Profile);
        assert_abs_diff_eq!(indicator.button_side(), 36.0, epsilon = 1e-4);
        assert_abs_diff_eq!(indicator.button_offset(), 10.8, epsilon = 1e-4);
        assert_abs_diff_eq!(indicator.label_font_size(), 18.0, epsilon = 1e-4);
    }

    #[test]
    fn label_font_follows_button_side() {
        for size in [60.0, 180.0, 400.0] {
            let indicator = ProgressIndicator::new(50.0, size, SelectorKind::Image, true, true, true, true);
            assert_abs_diff_eq!(
                indicator.label_font_size(),
                indicator.button_side() * LABEL_FONT_RATIO,
                epsilon = 1e-4
            );
        }
    }
}
