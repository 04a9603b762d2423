// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only crate types, keeping the upload session independent of
//! any concrete HTTP client.
//!
//! # Available Ports
//!
//! - [`transport`]: Upload and delete requests with progress and cancellation
//!
//! # Example
//!
//! ```ignore
//! use picture_selector::application::port::{new_token, progress_channel, UploadTransport};
//!
//! async fn send(transport: &impl UploadTransport, request: UploadRequest) {
//!     let (progress, _samples) = progress_channel();
//!     let _ = transport.upload(request, progress, new_token()).await;
//! }
//! ```

pub mod transport;

// Re-export main types for convenience
pub use transport::{
    cancel, is_cancelled, new_token, progress_channel, CancellationToken, DeleteRequest,
    FileUpload, Operation, ProgressReceiver, ProgressSender, TransferProgress,
    TransportResponse, UploadError, UploadRequest, UploadTransport, INVALID_FILE_MESSAGE,
};
