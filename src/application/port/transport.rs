// SPDX-License-Identifier: MPL-2.0
//! Upload transport port definition.
//!
//! This module defines the [`UploadTransport`] trait through which the
//! upload session sends files and delete requests. The concrete HTTP client
//! lives outside the crate; a simulated transport for test mode lives in
//! [`crate::infrastructure::simulated`].
//!
//! # Design Notes
//!
//! - Progress is reported through an unbounded tokio channel so the
//!   transport never waits on the animation
//! - Cancellation is cooperative through a shared [`CancellationToken`]
//! - Methods return futures that are `Send`, so the driver may run them on
//!   any tokio runtime

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::config::{DeleteMethod, UploadMethod};

/// Error text shown when a non-image file is chosen.
pub const INVALID_FILE_MESSAGE: &str = "Please select an image file";

// =============================================================================
// Cancellation
// =============================================================================

/// Cancellation token type for in-flight transfers.
pub type CancellationToken = Arc<AtomicBool>;

/// Creates a token that is not cancelled.
#[must_use]
pub fn new_token() -> CancellationToken {
    Arc::new(AtomicBool::new(false))
}

/// Checks if the cancellation token has been triggered.
#[inline]
#[must_use]
pub fn is_cancelled(token: &CancellationToken) -> bool {
    token.load(Ordering::SeqCst)
}

/// Triggers the cancellation token.
#[inline]
pub fn cancel(token: &CancellationToken) {
    token.store(true, Ordering::SeqCst);
}

// =============================================================================
// UploadError
// =============================================================================

/// Which operation an error belongs to, for user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Upload,
    Delete,
}

impl Operation {
    #[must_use]
    pub fn context(self) -> &'static str {
        match self {
            Operation::Upload => "uploading image",
            Operation::Delete => "deleting image",
        }
    }
}

/// Errors that can occur while uploading or deleting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// The chosen file is not an image.
    #[error("Invalid file type")]
    InvalidFileType,

    /// The operation was aborted by a newer one or by teardown.
    #[error("Upload canceled")]
    Cancelled,

    /// The file could not be read.
    #[error("Error reading file: {0}")]
    ReadFailed(String),

    /// The server answered with a non-success status.
    #[error("Request failed with status code {0}")]
    Status(u16),

    /// The request could not be sent or the response not received.
    #[error("{0}")]
    Transport(String),

    /// The response did not contain an image URL at the configured path.
    #[error("Failed to extract image URL from response")]
    MissingImageUrl,
}

impl UploadError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, UploadError::Cancelled)
    }

    /// Text for the widget's error line.
    #[must_use]
    pub fn user_message(&self, operation: Operation) -> String {
        match self {
            UploadError::InvalidFileType => INVALID_FILE_MESSAGE.to_string(),
            other => format!("Error {}: {other}", operation.context()),
        }
    }
}

// =============================================================================
// Requests and responses
// =============================================================================

/// A file chosen or dropped by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Whether the MIME type is an `image/*` type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// One progress sample from the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    pub loaded: u64,
    /// `None` when the transfer size is unknown.
    pub total: Option<u64>,
}

/// Sending half of the progress channel.
pub type ProgressSender = mpsc::UnboundedSender<TransferProgress>;

/// Receiving half of the progress channel.
pub type ProgressReceiver = mpsc::UnboundedReceiver<TransferProgress>;

/// Creates a progress channel.
#[must_use]
pub fn progress_channel() -> (ProgressSender, ProgressReceiver) {
    mpsc::unbounded_channel()
}

/// A multipart upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub url: String,
    pub method: UploadMethod,
    pub headers: BTreeMap<String, String>,
    /// Multipart field carrying the file.
    pub form_field: String,
    pub file: FileUpload,
}

/// A request to delete the current image.
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    /// `None` when no delete endpoint is configured; the server is not
    /// contacted.
    pub url: Option<String>,
    pub method: DeleteMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
    /// The image being deleted.
    pub image_url: String,
}

/// A server response.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

impl TransportResponse {
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// The response as `{ "status": .., "data": body }`, the document
    /// response paths are resolved against.
    #[must_use]
    pub fn envelope(&self) -> Value {
        json!({
            "status": self.status,
            "data": self.body,
        })
    }
}

// =============================================================================
// UploadTransport
// =============================================================================

/// Sends uploads and deletes.
///
/// Implementations should check `cancel` between chunks and return
/// [`UploadError::Cancelled`] once it is set.
pub trait UploadTransport: Send + Sync {
    /// Uploads `request.file`, reporting samples on `progress`.
    fn upload(
        &self,
        request: UploadRequest,
        progress: ProgressSender,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<TransportResponse, UploadError>> + Send;

    /// Deletes `request.image_url`.
    fn delete(
        &self,
        request: DeleteRequest,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<TransportResponse, UploadError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_decides_image_files() {
        assert!(FileUpload::new("a.png", "image/png", vec![1]).is_image());
        assert!(!FileUpload::new("a.pdf", "application/pdf", vec![1]).is_image());
        assert!(!FileUpload::new("a", "", Vec::new()).is_image());
    }

    #[test]
    fn user_messages_carry_operation_context() {
        assert_eq!(
            UploadError::Status(500).user_message(Operation::Upload),
            "Error uploading image: Request failed with status code 500"
        );
        assert_eq!(
            UploadError::Transport("connection reset".into()).user_message(Operation::Delete),
            "Error deleting image: connection reset"
        );
        assert_eq!(
            UploadError::InvalidFileType.user_message(Operation::Upload),
            INVALID_FILE_MESSAGE
        );
    }

    #[test]
    fn tokens_start_live_and_cancel_once() {
        let token = new_token();
        assert!(!is_cancelled(&token));
        let shared = Arc::clone(&token);
        cancel(&shared);
        assert!(is_cancelled(&token));
    }

    #[test]
    fn envelope_wraps_body_under_data() {
        let response = TransportResponse::new(201, json!({"url": "https://cdn.test/x.png"}));
        assert_eq!(
            response.envelope(),
            json!({"status": 201, "data": {"url": "https://cdn.test/x.png"}})
        );
    }
}
