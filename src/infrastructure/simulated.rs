// SPDX-License-Identifier: MPL-2.0
//! Simulated transport for test mode.
//!
//! Nothing leaves the process: the upload turns the file into a `data:` URL
//! and reports one percent of progress every `delay / 100`, the delete
//! waits briefly and succeeds.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};

use crate::application::port::{
    is_cancelled, CancellationToken, DeleteRequest, ProgressSender, TransferProgress,
    TransportResponse, UploadError, UploadRequest, UploadTransport,
};
use crate::config::{DEFAULT_TEST_UPLOAD_DELAY_MS, SIMULATED_DELETE_DELAY_MS};

/// Response path of the image URL in a simulated upload response.
pub const RESPONSE_PATH: &str = "data.url";

const STEPS: u64 = 100;

/// Transport that simulates uploads locally.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    upload_duration: Duration,
    delete_duration: Duration,
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TEST_UPLOAD_DELAY_MS))
    }
}

impl SimulatedTransport {
    #[must_use]
    pub fn new(upload_duration: Duration) -> Self {
        Self {
            upload_duration,
            delete_duration: Duration::from_millis(SIMULATED_DELETE_DELAY_MS),
        }
    }

    #[must_use]
    pub fn with_delete_duration(mut self, delete_duration: Duration) -> Self {
        self.delete_duration = delete_duration;
        self
    }
}

/// Encodes `bytes` as a `data:` URL.
#[must_use]
pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

impl UploadTransport for SimulatedTransport {
    async fn upload(
        &self,
        request: UploadRequest,
        progress: ProgressSender,
        cancel: CancellationToken,
    ) -> Result<TransportResponse, UploadError> {
        let url = data_url(&request.file.mime_type, &request.file.bytes);
        let step = self.upload_duration / STEPS as u32;

        for loaded in 1..=STEPS {
            tokio::time::sleep(step).await;
            if is_cancelled(&cancel) {
                return Err(UploadError::Cancelled);
            }
            // The receiver is gone once the driver stops listening.
            let _ = progress.send(TransferProgress {
                loaded,
                total: Some(STEPS),
            });
        }

        Ok(TransportResponse::new(200, json!({ "url": url })))
    }

    async fn delete(
        &self,
        _request: DeleteRequest,
        cancel: CancellationToken,
    ) -> Result<TransportResponse, UploadError> {
        tokio::time::sleep(self.delete_duration).await;
        if is_cancelled(&cancel) {
            return Err(UploadError::Cancelled);
        }
        Ok(TransportResponse::new(200, Value::Null))
    }
}
