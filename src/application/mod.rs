// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain and configuration types
//! - Infrastructure layer implements application layer ports
//! - The upload driver and UI components use application layer ports

pub mod port;
