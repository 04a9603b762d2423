// SPDX-License-Identifier: MPL-2.0
//! Zoom range of the preview
//!
//! This module derives the scale bounds from the image and viewport sizes:
//! - Fit scale (whole image visible)
//! - Base scale (fit, floored to a minimum displayed size)
//! - Minimum and maximum scale, relative to the base
//! - Slider position mapping

use crate::config::{
    MAX_SCALE_FLOOR, MAX_SCALE_RATIO, MIN_DISPLAY_SIZE_PX, MIN_SCALE_FLOOR, MIN_SCALE_RATIO,
};
use crate::domain::Size;

/// Direction of a zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Multiplier applied to the current scale for a relative step.
    #[must_use]
    pub fn factor(self, step: f32) -> f32 {
        match self {
            ZoomDirection::In => 1.0 + step,
            ZoomDirection::Out => 1.0 - step,
        }
    }
}

/// Scale bounds for one image in one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    fit: f32,
    base: f32,
    min: f32,
    max: f32,
}

impl ZoomBounds {
    /// Computes the bounds for `image` displayed inside `viewport`.
    ///
    /// Unknown (empty) sizes fall back to a fit of 1.
    #[must_use]
    pub fn compute(image: Size, viewport: Size) -> Self {
        let fit = if image.is_empty() || viewport.is_empty() {
            1.0
        } else {
            (viewport.width / image.width).min(viewport.height / image.height)
        };

        let longest = image.longest_side();
        let enforced_min = if longest > 0.0 {
            MIN_DISPLAY_SIZE_PX / longest
        } else {
            1.0
        };
        let base = fit.max(enforced_min);

        Self {
            fit,
            base,
            min: MIN_SCALE_FLOOR.max(base * MIN_SCALE_RATIO),
            max: MAX_SCALE_FLOOR.max(base * MAX_SCALE_RATIO),
        }
    }

    /// Builds bounds from explicit limits. `min` and `max` are swapped if
    /// given in the wrong order.
    #[must_use]
    pub fn from_limits(base: f32, min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            fit: base,
            base,
            min,
            max,
        }
    }

    /// Scale at which the whole image fits the viewport.
    #[must_use]
    pub fn fit(&self) -> f32 {
        self.fit
    }

    /// Scale the view resets to.
    #[must_use]
    pub fn base(&self) -> f32 {
        self.base
    }

    #[must_use]
    pub fn min(&self) -> f32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Clamps `scale` into `[min, max]`. Non-finite input yields the
    /// clamped base scale.
    #[must_use]
    pub fn clamp(&self, scale: f32) -> f32 {
        if scale.is_finite() {
            scale.clamp(self.min, self.max)
        } else {
            self.base.clamp(self.min, self.max)
        }
    }

    /// Slider position of `scale`: 0 at the top (max), 1 at the bottom (min).
    #[must_use]
    pub fn slider_ratio(&self, scale: f32) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.max - self.clamp(scale)) / span).clamp(0.0, 1.0)
    }

    /// Scale at slider position `ratio`.
    #[must_use]
    pub fn scale_at_ratio(&self, ratio: f32) -> f32 {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        self.max - ratio * (self.max - self.min)
    }
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self::compute(Size::ZERO, Size::ZERO)
    }
}
