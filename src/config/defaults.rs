// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for the numbers that
//! shape the selector's behavior. Constants are organized by category.
//!
//! # Categories
//!
//! - **Progress**: Easing of the displayed upload percentage
//! - **Upload timing**: Frame cadence and minimum durations
//! - **Zoom**: Preview scale bounds and input steps
//! - **Stage**: Preview modal layout
//! - **Widget**: Selector size and progress ring proportions

// ==========================================================================
// Progress Defaults
// ==========================================================================

/// Fraction of the remaining distance covered on each animation frame.
pub const PROGRESS_EASING_FACTOR: f32 = 0.15;

/// Smallest increment applied on an animation frame (in percent).
pub const PROGRESS_MIN_STEP: f32 = 0.5;

/// Remaining distance below which the animation stops (in percent).
pub const PROGRESS_SETTLE_THRESHOLD: f32 = 0.1;

/// Upper bound of any progress value.
pub const PROGRESS_MAX: f32 = 100.0;

/// The first transfer sample is never shown above this percentage.
pub const FIRST_SAMPLE_CAP_PERCENT: f32 = 5.0;

/// Fraction of the remaining distance added per sample when the transfer
/// size is unknown.
pub const UNKNOWN_TOTAL_CREEP: f32 = 0.05;

/// Progress never reaches this value from samples with an unknown size.
pub const UNKNOWN_TOTAL_CEILING: f32 = 99.0;

// ==========================================================================
// Upload Timing Defaults
// ==========================================================================

/// Interval between animation frames (~60 Hz).
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Pause between resetting the widget and starting the transfer.
pub const UPLOAD_START_DELAY_MS: u64 = 50;

/// An upload never completes faster than this, so the ring stays readable.
pub const MIN_UPLOAD_TIME_MS: u64 = 700;

/// Time given to the ring to animate to 100% after the transfer resolves.
pub const COMPLETION_SETTLE_MS: u64 = 300;

/// Default duration of a simulated upload in test mode.
pub const DEFAULT_TEST_UPLOAD_DELAY_MS: u64 = 1000;

/// Duration of a simulated delete in test mode.
pub const SIMULATED_DELETE_DELAY_MS: u64 = 300;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// The preview never shows the image's long side below this many pixels.
pub const MIN_DISPLAY_SIZE_PX: f32 = 220.0;

/// Absolute lower bound of the minimum scale.
pub const MIN_SCALE_FLOOR: f32 = 0.2;

/// Minimum scale relative to the base scale.
pub const MIN_SCALE_RATIO: f32 = 0.35;

/// Absolute lower bound of the maximum scale.
pub const MAX_SCALE_FLOOR: f32 = 8.0;

/// Maximum scale relative to the base scale.
pub const MAX_SCALE_RATIO: f32 = 6.0;

/// Relative scale change per wheel notch.
pub const WHEEL_ZOOM_STEP: f32 = 0.1;

/// Relative scale change per zoom button press.
pub const BUTTON_ZOOM_STEP: f32 = 0.15;

/// Distance from the fit scale under which a double click switches to
/// actual size.
pub const FIT_PROXIMITY: f32 = 0.01;

/// Scale at which one image pixel covers one logical pixel.
pub const ACTUAL_SIZE_SCALE: f32 = 1.0;

// ==========================================================================
// Stage Defaults
// ==========================================================================

/// Stage side used before the image dimensions are known.
pub const DEFAULT_STAGE_SIZE_PX: f32 = 600.0;

/// Share of the window the initial image size may occupy.
pub const STAGE_WINDOW_RATIO: f32 = 0.8;

/// Smallest stage side.
pub const MIN_STAGE_PX: f32 = 340.0;

/// Largest stage width relative to the window.
pub const STAGE_MAX_WIDTH_RATIO: f32 = 0.92;

/// Largest stage height relative to the window.
pub const STAGE_MAX_HEIGHT_RATIO: f32 = 0.82;

/// Stages narrower than this use compact controls.
pub const COMPACT_STAGE_WIDTH_PX: f32 = 420.0;

/// Control button side on compact / regular stages.
pub const COMPACT_BUTTON_PX: f32 = 34.0;
pub const REGULAR_BUTTON_PX: f32 = 40.0;

/// Zoom slider track height on compact / regular stages.
pub const COMPACT_SLIDER_TRACK_PX: f32 = 140.0;
pub const REGULAR_SLIDER_TRACK_PX: f32 = 160.0;

// ==========================================================================
// Widget Defaults
// ==========================================================================

/// Default selector side in pixels.
pub const DEFAULT_WIDGET_SIZE_PX: f32 = 180.0;

/// Minimum selector side in pixels.
pub const MIN_WIDGET_SIZE_PX: f32 = 32.0;

/// Maximum selector side in pixels.
pub const MAX_WIDGET_SIZE_PX: f32 = 1024.0;

/// Ring stroke width relative to the selector size.
pub const RING_STROKE_RATIO: f32 = 10.0 / 180.0;

/// Gap between the circular ring and the widget edge, relative to size.
pub const RING_CIRCLE_INSET_RATIO: f32 = 0.035;

/// Side of the rounded-square ring relative to size.
pub const RING_RECT_SIDE_RATIO: f32 = 0.94;

/// Corner radius of the rounded-square ring relative to size.
pub const RING_RECT_CORNER_RATIO: f32 = 0.09;

/// Side of the edit and delete buttons relative to size.
pub const BUTTON_SIZE_RATIO: f32 = 0.2;

/// Distance of the buttons from the widget corner relative to size.
pub const BUTTON_OFFSET_RATIO: f32 = 0.06;

/// Percentage label font size relative to the button side.
pub const LABEL_FONT_RATIO: f32 = 0.5;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Progress validation
    assert!(PROGRESS_EASING_FACTOR > 0.0);
    assert!(PROGRESS_EASING_FACTOR < 1.0);
    assert!(PROGRESS_MIN_STEP > PROGRESS_SETTLE_THRESHOLD);
    assert!(FIRST_SAMPLE_CAP_PERCENT < PROGRESS_MAX);
    assert!(UNKNOWN_TOTAL_CEILING < PROGRESS_MAX);

    // Timing validation
    assert!(FRAME_INTERVAL_MS > 0);
    assert!(MIN_UPLOAD_TIME_MS >= COMPLETION_SETTLE_MS);

    // Zoom validation
    assert!(MIN_SCALE_FLOOR > 0.0);
    assert!(MIN_SCALE_RATIO < 1.0);
    assert!(MAX_SCALE_RATIO > 1.0);
    assert!(MAX_SCALE_FLOOR > ACTUAL_SIZE_SCALE);
    assert!(MIN_SCALE_FLOOR < ACTUAL_SIZE_SCALE);

    // Stage validation
    assert!(COMPACT_STAGE_WIDTH_PX > MIN_STAGE_PX);
    assert!(STAGE_MAX_WIDTH_RATIO <= 1.0);
    assert!(STAGE_MAX_HEIGHT_RATIO <= 1.0);

    // Widget validation
    assert!(MIN_WIDGET_SIZE_PX > 0.0);
    assert!(DEFAULT_WIDGET_SIZE_PX >= MIN_WIDGET_SIZE_PX);
    assert!(DEFAULT_WIDGET_SIZE_PX <= MAX_WIDGET_SIZE_PX);
    assert!(RING_RECT_SIDE_RATIO < 1.0);
    assert!(BUTTON_SIZE_RATIO + BUTTON_OFFSET_RATIO < 0.5);
    assert!(LABEL_FONT_RATIO > 0.0 && LABEL_FONT_RATIO <= 1.0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_defaults_are_valid() {
        assert_eq!(PROGRESS_EASING_FACTOR, 0.15);
        assert_eq!(PROGRESS_MIN_STEP, 0.5);
        assert!(PROGRESS_SETTLE_THRESHOLD < PROGRESS_MIN_STEP);
    }

    #[test]
    fn zoom_floor_and_ceiling_bracket_actual_size() {
        assert!(MIN_SCALE_FLOOR < ACTUAL_SIZE_SCALE);
        assert!(MAX_SCALE_FLOOR > ACTUAL_SIZE_SCALE);
    }

    #[test]
    fn widget_size_defaults_are_valid() {
        assert_eq!(DEFAULT_WIDGET_SIZE_PX, 180.0);
        assert!(DEFAULT_WIDGET_SIZE_PX >= MIN_WIDGET_SIZE_PX);
        assert!(DEFAULT_WIDGET_SIZE_PX <= MAX_WIDGET_SIZE_PX);
    }

    #[test]
    fn label_font_is_half_the_button() {
        assert_eq!(LABEL_FONT_RATIO, 0.5);
    }
}
