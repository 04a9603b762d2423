// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! exposes a `State` with a `handle(Message) -> Effect` entry point and
//! leaves drawing to the host.
//!
//! - [`selector`] - Picture selector with drop zone, buttons and progress ring
//! - [`preview`] - Modal preview with pan, zoom, rotation and fullscreen
//! - [`state`] - Reusable state management (zoom, viewport, drag, progress)

pub mod preview;
pub mod selector;
pub mod state;
