// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! Framework-independent state behind the selector and its preview: eased
//! progress, frame requests and the pan/zoom/rotate viewport.

pub mod drag;
pub mod frame;
pub mod progress;
pub mod rotation;
pub mod slider;
pub mod viewport;
pub mod zoom;

// Re-export commonly used types for convenience
pub use drag::{DragState, PointerButton};
pub use frame::{FrameId, FrameRequest};
pub use progress::ProgressState;
pub use rotation::{RotationAngle, RotationDirection};
pub use slider::{SliderState, SliderTrack};
pub use viewport::{CursorHint, ViewTransform, ViewportState};
pub use zoom::{ZoomBounds, ZoomDirection};
