// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.
//!
//! Scales, percentages and ring lengths are `f32` results of several
//! multiplications, so tests compare them with the `approx` macros instead of
//! `assert_eq!`.

pub use approx::assert_abs_diff_eq;
