// SPDX-License-Identifier: MPL-2.0
//! Full-screen preview of the selected picture with pan, zoom and rotation.

pub mod component;
pub mod layout;

pub use component::{Effect, Message, PreviewStatus, State};
pub use layout::StageLayout;
