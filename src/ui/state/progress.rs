// SPDX-License-Identifier: MPL-2.0
//! Eased upload progress.
//!
//! Transfer samples set a target percentage; the displayed percentage moves
//! toward it by a fraction of the remaining distance on every animation
//! frame, never backwards and never past the target.

use crate::config::{
    PROGRESS_EASING_FACTOR, PROGRESS_MAX, PROGRESS_MIN_STEP, PROGRESS_SETTLE_THRESHOLD,
};

/// Displayed and target progress, both in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressState {
    displayed: f32,
    target: f32,
}

impl ProgressState {
    /// The percentage to render.
    #[must_use]
    pub fn displayed(&self) -> f32 {
        self.displayed
    }

    /// The percentage the animation is heading to.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Replaces the target. Only the latest target between two frames
    /// matters.
    pub fn set_target(&mut self, target: f32) {
        self.target = clamp_percent(target);
    }

    /// Whether the animation has nothing left to do.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.displayed >= PROGRESS_MAX || self.target - self.displayed < PROGRESS_SETTLE_THRESHOLD
    }

    /// Advances one animation frame.
    ///
    /// Returns true when another frame is needed.
    pub fn tick(&mut self) -> bool {
        if self.is_settled() {
            return false;
        }
        let remaining = self.target - self.displayed;
        let step = (remaining * PROGRESS_EASING_FACTOR).max(PROGRESS_MIN_STEP);
        self.displayed = (self.displayed + step).min(self.target).min(PROGRESS_MAX);
        !self.is_settled()
    }

    /// Back to `{0, 0}`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, PROGRESS_MAX)
    }
}
