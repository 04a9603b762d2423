// SPDX-License-Identifier: MPL-2.0
//! Vertical zoom slider
//!
//! The slider's track is measured by the host; the top of the track maps to
//! the maximum scale and the bottom to the minimum.

/// On-screen extent of the slider track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderTrack {
    pub top: f32,
    pub height: f32,
}

impl SliderTrack {
    #[must_use]
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    /// Position of `y` along the track, clamped to `0..=1`.
    ///
    /// Returns `None` for a track that has not been laid out.
    #[must_use]
    pub fn ratio_at(&self, y: f32) -> Option<f32> {
        if !(self.height > 0.0) || !y.is_finite() {
            return None;
        }
        Some(((y - self.top) / self.height).clamp(0.0, 1.0))
    }
}

/// Slider drag state.
#[derive(Debug, Clone, Default)]
pub struct SliderState {
    /// Whether the thumb is being dragged
    pub is_dragging: bool,

    /// Track measured at the last press
    pub track: Option<SliderTrack>,
}

impl SliderState {
    /// Starts a drag on `track` and returns the ratio under `y`.
    pub fn press(&mut self, track: SliderTrack, y: f32) -> Option<f32> {
        self.is_dragging = true;
        self.track = Some(track);
        track.ratio_at(y)
    }

    /// Ratio under `y` while dragging.
    #[must_use]
    pub fn drag_to(&self, y: f32) -> Option<f32> {
        if !self.is_dragging {
            return None;
        }
        self.track?.ratio_at(y)
    }

    pub fn release(&mut self) {
        self.is_dragging = false;
    }
}
