// SPDX-License-Identifier: MPL-2.0
//! `picture_selector` is the headless core of an image / profile picture
//! selector widget.
//!
//! It covers the upload lifecycle with an eased progress ring, deletion of the
//! previous picture, and a preview with pan, zoom and rotation. Rendering is
//! left to the host, which feeds input as messages and draws from the state.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod media;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
