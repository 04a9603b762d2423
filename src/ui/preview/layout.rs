// SPDX-License-Identifier: MPL-2.0
//! Stage layout of the preview modal.
//!
//! The stage is the framed area the image is panned and zoomed in. Its size
//! follows the image's aspect within the window, with a minimum size for
//! tiny images and a maximum share of the window for large ones.

use crate::config::{
    COMPACT_BUTTON_PX, COMPACT_SLIDER_TRACK_PX, COMPACT_STAGE_WIDTH_PX, DEFAULT_STAGE_SIZE_PX,
    MIN_STAGE_PX, REGULAR_BUTTON_PX, REGULAR_SLIDER_TRACK_PX, STAGE_MAX_HEIGHT_RATIO,
    STAGE_MAX_WIDTH_RATIO, STAGE_WINDOW_RATIO,
};
use crate::domain::Size;

/// Sizes the host uses to lay out the preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageLayout {
    /// Outer size of the stage.
    pub stage: Size,
    /// Side of the square control buttons.
    pub button_side: f32,
    /// Height of the vertical zoom slider track.
    pub slider_track: f32,
    /// Narrow stages use smaller controls.
    pub compact: bool,
}

impl StageLayout {
    /// Lays out the stage for `image` in `window`.
    ///
    /// An unknown image gets a 600 × 600 stage; an unknown window applies no
    /// upper limit.
    #[must_use]
    pub fn compute(image: Size, window: Size) -> Self {
        let initial = initial_size(image, window);

        let (max_width, max_height) = if window.is_empty() {
            (f32::INFINITY, f32::INFINITY)
        } else {
            (
                window.width * STAGE_MAX_WIDTH_RATIO,
                window.height * STAGE_MAX_HEIGHT_RATIO,
            )
        };
        let stage = Size::new(
            initial.width.max(MIN_STAGE_PX).min(max_width),
            initial.height.max(MIN_STAGE_PX).min(max_height),
        );

        let compact = stage.width < COMPACT_STAGE_WIDTH_PX;
        Self {
            stage,
            button_side: if compact {
                COMPACT_BUTTON_PX
            } else {
                REGULAR_BUTTON_PX
            },
            slider_track: if compact {
                COMPACT_SLIDER_TRACK_PX
            } else {
                REGULAR_SLIDER_TRACK_PX
            },
            compact,
        }
    }
}

/// The image's size fitted into 80% of the window, never upscaled.
fn initial_size(image: Size, window: Size) -> Size {
    if image.is_empty() {
        return Size::new(DEFAULT_STAGE_SIZE_PX, DEFAULT_STAGE_SIZE_PX);
    }
    if window.is_empty() {
        return image;
    }
    let ratio = (window.width * STAGE_WINDOW_RATIO / image.width)
        .min(window.height * STAGE_WINDOW_RATIO / image.height)
        .min(1.0);
    Size::new(
        (image.width * ratio).floor(),
        (image.height * ratio).floor(),
    )
}
