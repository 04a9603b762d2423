// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`simulated`]: Local upload simulation for test mode (implements
//!   [`UploadTransport`])
//!
//! [`UploadTransport`]: crate::application::port::UploadTransport

pub mod simulated;

// Re-export main types for convenience
pub use simulated::SimulatedTransport;
