// SPDX-License-Identifier: MPL-2.0
//! Async upload and delete driver.
//!
//! [`Uploader`] runs one operation at a time on the calling task. While the
//! transport works, a single `tokio::select!` loop forwards progress samples
//! to the [`UploadSession`] and ticks its animation frames on a fixed
//! interval, so the session is only ever touched from one place.

use std::time::Duration;

use serde_json::Value;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::application::port::{
    is_cancelled, progress_channel, CancellationToken, DeleteRequest, FileUpload, Operation,
    TransportResponse, UploadError, UploadRequest, UploadTransport,
};
use crate::config::{
    ApiConfig, COMPLETION_SETTLE_MS, FRAME_INTERVAL_MS, MIN_UPLOAD_TIME_MS,
    UPLOAD_START_DELAY_MS,
};

use super::response::{extract_image_url, redact_headers};
use super::session::UploadSession;

/// Receives the selector's lifecycle callbacks. Every method defaults to
/// doing nothing.
pub trait SelectorListener {
    /// The selected image changed. An empty `url` means the image was
    /// removed; `response` is the upload response body.
    fn on_change_image(&mut self, _url: &str, _response: Option<&Value>) {}

    fn on_upload_success(&mut self, _url: &str) {}

    fn on_upload_error(&mut self, _error: &UploadError) {}

    fn on_delete_start(&mut self) {}

    fn on_delete_success(&mut self) {}

    /// An animation frame moved the displayed percentage.
    fn on_progress(&mut self, _percent: f32) {}
}

impl SelectorListener for () {}

/// Durations of the upload sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTiming {
    /// Pause between resetting the widget and starting the transfer.
    pub start_delay: Duration,
    /// Shortest time from transfer start to completion.
    pub min_upload_time: Duration,
    /// Time the ring gets to reach 100% before the result is announced.
    pub completion_settle: Duration,
    /// Animation frame period. Must not be zero.
    pub frame_interval: Duration,
}

impl Default for UploadTiming {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_millis(UPLOAD_START_DELAY_MS),
            min_upload_time: Duration::from_millis(MIN_UPLOAD_TIME_MS),
            completion_settle: Duration::from_millis(COMPLETION_SETTLE_MS),
            frame_interval: Duration::from_millis(FRAME_INTERVAL_MS),
        }
    }
}

impl UploadTiming {
    /// No artificial waits, frames as fast as the runtime allows.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            start_delay: Duration::ZERO,
            min_upload_time: Duration::ZERO,
            completion_settle: Duration::ZERO,
            frame_interval: Duration::from_millis(1),
        }
    }
}

/// Runs uploads and deletes through a transport.
#[derive(Debug, Clone)]
pub struct Uploader<T> {
    transport: T,
    api: ApiConfig,
    response_path: String,
    timing: UploadTiming,
}

impl<T: UploadTransport> Uploader<T> {
    /// Creates an uploader reading the image URL at `api.response_path`.
    pub fn new(transport: T, api: ApiConfig) -> Self {
        let response_path = api.response_path.clone();
        Self {
            transport,
            api,
            response_path,
            timing: UploadTiming::default(),
        }
    }

    #[must_use]
    pub fn with_timing(mut self, timing: UploadTiming) -> Self {
        if timing.frame_interval.is_zero() {
            self.timing = UploadTiming {
                frame_interval: UploadTiming::immediate().frame_interval,
                ..timing
            };
        } else {
            self.timing = timing;
        }
        self
    }

    /// Reads the image URL at `path` instead of the configured one.
    #[must_use]
    pub fn with_response_path(mut self, path: impl Into<String>) -> Self {
        self.response_path = path.into();
        self
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Uploads `file`, replacing `current_image` on success.
    ///
    /// # Errors
    /// Returns the failure after the session's error line and the listener
    /// have been updated. Cancellations are returned but not reported.
    pub async fn upload<L: SelectorListener>(
        &self,
        session: &mut UploadSession,
        current_image: Option<&str>,
        file: FileUpload,
        listener: &mut L,
    ) -> Result<String, UploadError> {
        if let Err(err) = session.check_file(&file) {
            tracing::debug!(file_name = %file.name, mime_type = %file.mime_type, "upload:rejected");
            listener.on_upload_error(&err);
            return Err(err);
        }

        tracing::debug!(
            file_name = %file.name,
            file_type = %file.mime_type,
            file_size = file.len(),
            method = self.api.upload_method.as_str(),
            url = %self.api.upload_endpoint(),
            headers = ?redact_headers(&self.api.effective_upload_headers()),
            "upload:start"
        );

        let token = session.begin_upload();
        time::sleep(self.timing.start_delay).await;

        match self
            .run_upload(session, current_image, file, &token, listener)
            .await
        {
            Ok((url, body)) => {
                session.finish_upload();
                listener.on_change_image(&url, Some(&body));
                listener.on_upload_success(&url);
                tracing::debug!(image_url = %url, "upload:success");
                Ok(url)
            }
            Err(err) => {
                session.fail(&err, Operation::Upload);
                if !err.is_cancelled() {
                    listener.on_upload_error(&err);
                }
                tracing::debug!(error = %err, "upload:error");
                Err(err)
            }
        }
    }

    async fn run_upload<L: SelectorListener>(
        &self,
        session: &mut UploadSession,
        current_image: Option<&str>,
        file: FileUpload,
        token: &CancellationToken,
        listener: &mut L,
    ) -> Result<(String, Value), UploadError> {
        let started = Instant::now();
        let response = self.transfer(session, file, token, listener).await?;
        check_cancelled(token)?;

        self.animate_until(session, started + self.timing.min_upload_time, listener)
            .await;
        session.complete_transfer();
        self.animate_until(session, Instant::now() + self.timing.completion_settle, listener)
            .await;
        check_cancelled(token)?;

        tracing::debug!(
            status = response.status,
            response_path = %self.response_path,
            "upload:response"
        );
        let url = extract_image_url(&response, &self.response_path)?;

        if let Some(previous) = current_image.filter(|url| !url.is_empty()) {
            // A failed delete leaves its own error line but does not undo the upload.
            let _ = self.delete(session, previous, listener).await;
        }
        Ok((url, response.body))
    }

    /// Sends the file while animating the samples it reports.
    async fn transfer<L: SelectorListener>(
        &self,
        session: &mut UploadSession,
        file: FileUpload,
        token: &CancellationToken,
        listener: &mut L,
    ) -> Result<TransportResponse, UploadError> {
        let request = UploadRequest {
            url: self.api.upload_endpoint(),
            method: self.api.upload_method,
            headers: self.api.effective_upload_headers(),
            form_field: self.api.form_data_name.clone(),
            file,
        };
        let (progress, mut samples) = progress_channel();
        let transfer = self.transport.upload(request, progress, token.clone());
        tokio::pin!(transfer);

        let mut frames = frame_ticker(self.timing.frame_interval);
        let mut samples_open = true;

        let result = loop {
            tokio::select! {
                result = &mut transfer => break result,
                sample = samples.recv(), if samples_open => match sample {
                    Some(sample) => {
                        session.record_sample(sample);
                    }
                    None => samples_open = false,
                },
                _ = frames.tick(), if session.pending_frame().is_some() => {
                    run_frame(session, listener);
                }
            }
        };

        while let Ok(sample) = samples.try_recv() {
            session.record_sample(sample);
        }
        result
    }

    /// Keeps animating until `deadline`.
    async fn animate_until<L: SelectorListener>(
        &self,
        session: &mut UploadSession,
        deadline: Instant,
        listener: &mut L,
    ) {
        let sleep = time::sleep_until(deadline);
        tokio::pin!(sleep);
        let mut frames = frame_ticker(self.timing.frame_interval);

        loop {
            tokio::select! {
                () = &mut sleep => break,
                _ = frames.tick() => run_frame(session, listener),
            }
        }
    }

    /// Deletes `image_url`.
    ///
    /// # Errors
    /// Returns the failure after the session's error line has been set.
    pub async fn delete<L: SelectorListener>(
        &self,
        session: &mut UploadSession,
        image_url: &str,
        listener: &mut L,
    ) -> Result<(), UploadError> {
        if image_url.is_empty() {
            return Ok(());
        }

        let token = session.begin_delete();
        listener.on_delete_start();

        let request = DeleteRequest {
            url: self.api.delete_endpoint(),
            method: self.api.delete_method,
            headers: self.api.effective_delete_headers(),
            body: self.api.delete_body.render(image_url),
            image_url: image_url.to_string(),
        };
        tracing::debug!(
            url = ?request.url,
            method = request.method.as_str(),
            headers = ?redact_headers(&request.headers),
            body = %request.body,
            "delete:start"
        );

        let result = match self.transport.delete(request, token).await {
            Ok(response) => {
                tracing::debug!(status = response.status, "delete:response");
                listener.on_change_image("", None);
                listener.on_delete_success();
                tracing::debug!("delete:success");
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, "delete:error");
                Err(err)
            }
        };
        session.finish_delete(&result);
        result
    }
}

fn frame_ticker(period: Duration) -> time::Interval {
    let mut frames = time::interval(period);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    frames
}

fn run_frame<L: SelectorListener>(session: &mut UploadSession, listener: &mut L) {
    if let Some(id) = session.pending_frame() {
        if session.on_frame(id) {
            listener.on_progress(session.displayed_progress());
        }
    }
}

fn check_cancelled(token: &CancellationToken) -> Result<(), UploadError> {
    if is_cancelled(token) {
        Err(UploadError::Cancelled)
    } else {
        Ok(())
    }
}
