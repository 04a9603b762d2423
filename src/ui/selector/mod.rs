// SPDX-License-Identifier: MPL-2.0
//! Profile and image picture selector.

pub mod component;
pub mod indicator;

pub use component::{Effect, Message, State};
pub use indicator::{ProgressIndicator, RingShape, RingStroke};
