// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value types with no framework dependencies.
//!
//! # Modules
//!
//! - [`geometry`]: [`Point`](geometry::Point), [`Vector`](geometry::Vector)
//!   and [`Size`](geometry::Size) in logical pixels

pub mod geometry;

pub use geometry::{Point, Size, Vector};
