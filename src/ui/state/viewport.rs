// SPDX-License-Identifier: MPL-2.0
//! Viewport state management
//!
//! Holds the pan offset, scale and rotation of the previewed image inside
//! its container. The image is drawn centred in the container, then moved by
//! `translate`, scaled and rotated about its own centre:
//!
//! `screen = container_center + translate + rotate(image_offset × scale)`
//!
//! Every scale change goes through [`ViewportState::apply_scale`], so the
//! scale always stays inside the current [`ZoomBounds`].

use std::fmt;

use crate::config::{ACTUAL_SIZE_SCALE, BUTTON_ZOOM_STEP, FIT_PROXIMITY, WHEEL_ZOOM_STEP};
use crate::domain::{Point, Size, Vector};

use super::drag::{DragState, PointerButton};
use super::rotation::{RotationAngle, RotationDirection};
use super::slider::SliderTrack;
use super::zoom::{ZoomBounds, ZoomDirection};

/// The values a display layer needs to draw the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    pub translate: Vector,
    pub rotation: RotationAngle,
}

impl fmt::Display for ViewTransform {
    /// Formats the transform as a CSS `transform` value for an element
    /// positioned at the centre of its container.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate(-50%, -50%) translate({}px, {}px) scale({}) rotate({}deg)",
            self.translate.x,
            self.translate.y,
            self.scale,
            self.rotation.degrees()
        )
    }
}

/// Pointer affordance over the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Grab,
    Grabbing,
}

/// Manages the pan/zoom/rotate state of the preview
#[derive(Debug, Clone)]
pub struct ViewportState {
    scale: f32,
    translate: Vector,
    rotation: RotationAngle,
    bounds: ZoomBounds,
    container: Size,
    image: Size,
    drag: DragState,
}

impl Default for ViewportState {
    fn default() -> Self {
        let bounds = ZoomBounds::default();
        Self {
            scale: bounds.base(),
            translate: Vector::ZERO,
            rotation: RotationAngle::ZERO,
            bounds,
            container: Size::ZERO,
            image: Size::ZERO,
            drag: DragState::default(),
        }
    }
}

impl ViewportState {
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[must_use]
    pub fn translate(&self) -> Vector {
        self.translate
    }

    #[must_use]
    pub fn rotation(&self) -> RotationAngle {
        self.rotation
    }

    #[must_use]
    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    #[must_use]
    pub fn image_size(&self) -> Size {
        self.image
    }

    #[must_use]
    pub fn container_size(&self) -> Size {
        self.container
    }

    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        ViewTransform {
            scale: self.scale,
            translate: self.translate,
            rotation: self.rotation,
        }
    }

    /// Starts over for a new image whose size is not known yet.
    ///
    /// The container size is kept; it belongs to the stage, not the image.
    pub fn open(&mut self) {
        self.image = Size::ZERO;
        self.bounds = ZoomBounds::compute(self.image, self.container);
        self.scale = self.bounds.base();
        self.translate = Vector::ZERO;
        self.rotation = RotationAngle::ZERO;
        self.drag.stop();
    }

    /// Clears the view when the preview closes.
    pub fn close(&mut self) {
        self.open();
    }

    /// Records the natural size of the loaded image and resets the view to
    /// the base scale.
    pub fn set_image_size(&mut self, image: Size) {
        self.image = image;
        self.bounds = ZoomBounds::compute(self.image, self.container);
        self.reset_view();
    }

    /// Records a new container size.
    ///
    /// Returns true when the base scale changed, in which case the view is
    /// reset to it.
    pub fn set_container_size(&mut self, container: Size) -> bool {
        self.container = container;
        let bounds = ZoomBounds::compute(self.image, self.container);
        let base_changed = bounds.base() != self.bounds.base();
        self.bounds = bounds;
        if base_changed {
            self.reset_view();
        } else {
            self.scale = self.bounds.clamp(self.scale);
        }
        base_changed
    }

    /// Sets the scale to `requested`, clamped to the zoom bounds.
    ///
    /// With an `origin` (relative to the container's top-left corner), the
    /// image point under the origin keeps its on-screen position.
    pub fn apply_scale(&mut self, requested: f32, origin: Option<Point>) {
        let next = self.bounds.clamp(requested);
        if let Some(origin) = origin {
            let offset = origin - self.container.center();
            let ratio = next / self.scale;
            self.translate = self.translate * ratio + offset * (1.0 - ratio);
        }
        self.scale = next;
    }

    /// Zooms by one wheel notch anchored at `cursor`.
    ///
    /// Scrolling down zooms out; a zero delta is ignored.
    pub fn zoom_wheel(&mut self, delta_y: f32, cursor: Point) -> bool {
        let direction = if delta_y > 0.0 {
            ZoomDirection::Out
        } else if delta_y < 0.0 {
            ZoomDirection::In
        } else {
            return false;
        };
        self.apply_scale(self.scale * direction.factor(WHEEL_ZOOM_STEP), Some(cursor));
        true
    }

    /// Zooms by one button step about the current centre.
    pub fn zoom_step(&mut self, direction: ZoomDirection) {
        self.apply_scale(self.scale * direction.factor(BUTTON_ZOOM_STEP), None);
    }

    /// Back to the base scale with no pan. Rotation is kept.
    pub fn reset_view(&mut self) {
        self.translate = Vector::ZERO;
        self.apply_scale(self.bounds.base(), None);
    }

    /// Shows the image at one screen pixel per image pixel, or as close as
    /// the bounds allow.
    pub fn actual_size(&mut self) {
        self.translate = Vector::ZERO;
        self.apply_scale(ACTUAL_SIZE_SCALE, None);
    }

    /// Whether the view rests at the fitted scale.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        (self.scale - self.bounds.fit()).abs() < FIT_PROXIMITY
            || (self.scale - self.bounds.base()).abs() < FIT_PROXIMITY
    }

    /// Double-click behaviour: from the fitted view go to actual size,
    /// from anywhere else go back to the fitted view.
    pub fn toggle_fit_actual(&mut self) {
        if self.is_at_rest() {
            self.actual_size();
        } else {
            self.reset_view();
        }
    }

    pub fn rotate(&mut self, direction: RotationDirection) {
        self.rotation = self.rotation.rotate(direction);
    }

    /// Starts a pan gesture. Only the primary button pans.
    pub fn begin_pan(&mut self, button: PointerButton, position: Point) -> bool {
        self.drag.start(button, position)
    }

    /// Moves the image by the pointer movement since the last event.
    pub fn pan_to(&mut self, position: Point) -> bool {
        match self.drag.delta(position) {
            Some(delta) => {
                self.translate += delta;
                true
            }
            None => false,
        }
    }

    pub fn end_pan(&mut self) {
        self.drag.stop();
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.drag.is_dragging
    }

    #[must_use]
    pub fn cursor(&self) -> CursorHint {
        if self.scale <= self.bounds.fit() {
            CursorHint::Default
        } else if self.drag.is_dragging {
            CursorHint::Grabbing
        } else {
            CursorHint::Grab
        }
    }

    /// Screen position (relative to the container) of a point given as an
    /// offset from the image centre in image pixels.
    #[must_use]
    pub fn project(&self, image_offset: Vector) -> Point {
        self.container.center() + self.translate + self.rotation.apply(image_offset * self.scale)
    }

    /// Inverse of [`ViewportState::project`].
    #[must_use]
    pub fn unproject(&self, screen: Point) -> Vector {
        let local = screen - self.container.center() - self.translate;
        self.rotation.invert(local) * self.scale.recip()
    }

    /// Slider thumb ratio for the current scale, 0 at the top.
    #[must_use]
    pub fn slider_ratio(&self) -> f32 {
        self.bounds.slider_ratio(self.scale)
    }

    /// Sets the scale from a pointer position on the slider track.
    pub fn set_scale_from_slider(&mut self, track: SliderTrack, y: f32) -> bool {
        match track.ratio_at(y) {
            Some(ratio) => {
                self.set_scale_from_ratio(ratio);
                true
            }
            None => false,
        }
    }

    pub fn set_scale_from_ratio(&mut self, ratio: f32) {
        self.apply_scale(self.bounds.scale_at_ratio(ratio), None);
    }

    /// Zoom percentage, natural size and fit percentage, e.g.
    /// `"150% • 800×600 • Fit 75%"`.
    #[must_use]
    pub fn info_label(&self) -> String {
        format!(
            "{}% • {}×{} • Fit {}%",
            (self.scale * 100.0).round(),
            self.image.width,
            self.image.height,
            (self.bounds.fit() * 100.0).round()
        )
    }
}
