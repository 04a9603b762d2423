// SPDX-License-Identifier: MPL-2.0
//! Upload and delete lifecycle state of one selector.
//!
//! The session owns everything the widget shows about an operation: the
//! eased progress, the loading and deleting flags, and the error line. It
//! performs no I/O; [`super::driver::Uploader`] feeds it transport events and
//! frame ticks.

use crate::application::port::{
    cancel, new_token, CancellationToken, FileUpload, Operation, TransferProgress, UploadError,
};
use crate::config::{FIRST_SAMPLE_CAP_PERCENT, PROGRESS_MAX, UNKNOWN_TOTAL_CEILING, UNKNOWN_TOTAL_CREEP};
use crate::ui::state::{FrameId, FrameRequest, ProgressState};

/// Operation state of one selector.
#[derive(Debug)]
pub struct UploadSession {
    progress: ProgressState,
    frames: FrameRequest,
    loading: bool,
    deleting: bool,
    error: Option<String>,
    awaiting_first_sample: bool,
    token: Option<CancellationToken>,
    abort_enabled: bool,
}

impl Default for UploadSession {
    fn default() -> Self {
        Self::new(true)
    }
}

impl UploadSession {
    /// Creates a session. With `abort_enabled`, starting an operation
    /// cancels the previous one and dropping the session cancels the
    /// current one.
    #[must_use]
    pub fn new(abort_enabled: bool) -> Self {
        Self {
            progress: ProgressState::default(),
            frames: FrameRequest::default(),
            loading: false,
            deleting: false,
            error: None,
            awaiting_first_sample: true,
            token: None,
            abort_enabled,
        }
    }

    /// Rejects files that are not images, setting the error line.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidFileType`] for non-image files.
    pub fn check_file(&mut self, file: &FileUpload) -> Result<(), UploadError> {
        if file.is_image() {
            Ok(())
        } else {
            let err = UploadError::InvalidFileType;
            self.error = Some(err.user_message(Operation::Upload));
            Err(err)
        }
    }

    /// Starts an upload, aborting the previous operation.
    ///
    /// Returns the token the transport must honour.
    pub fn begin_upload(&mut self) -> CancellationToken {
        if self.abort_enabled {
            if let Some(previous) = self.token.take() {
                cancel(&previous);
            }
        }
        self.reset();
        self.loading = true;
        let token = new_token();
        self.token = Some(token.clone());
        token
    }

    /// Maps a transfer sample to a progress target.
    ///
    /// Returns the frame to animate toward it, if one is needed.
    pub fn record_sample(&mut self, sample: TransferProgress) -> Option<FrameId> {
        let mut percent = match sample.total {
            Some(total) if total > 0 => percent_of(sample.loaded, total),
            _ => {
                let shown = self.progress.displayed();
                (shown + (PROGRESS_MAX - shown) * UNKNOWN_TOTAL_CREEP)
                    .min(UNKNOWN_TOTAL_CEILING)
                    .round()
            }
        };

        if self.awaiting_first_sample && percent > FIRST_SAMPLE_CAP_PERCENT {
            percent = FIRST_SAMPLE_CAP_PERCENT;
            self.awaiting_first_sample = false;
        }

        if percent > self.progress.target() {
            self.progress.set_target(percent);
        }
        self.request_frame()
    }

    /// The transfer resolved: head for 100%.
    pub fn complete_transfer(&mut self) -> Option<FrameId> {
        self.progress.set_target(PROGRESS_MAX);
        self.request_frame()
    }

    fn request_frame(&mut self) -> Option<FrameId> {
        if self.progress.is_settled() {
            None
        } else {
            Some(self.frames.request())
        }
    }

    /// The frame to run next, if the animation is still moving.
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.frames.pending()
    }

    /// Runs the animation frame `id`.
    ///
    /// Returns false for stale frames. Another frame is requested while the
    /// displayed progress has not reached its target.
    pub fn on_frame(&mut self, id: FrameId) -> bool {
        if !self.frames.fire(id) {
            return false;
        }
        if self.progress.tick() {
            self.frames.request();
        }
        true
    }

    /// The upload succeeded.
    pub fn finish_upload(&mut self) {
        self.loading = false;
        self.progress.reset();
        self.frames.cancel();
        self.awaiting_first_sample = true;
    }

    /// The operation failed. Cancellations leave no error line.
    ///
    /// Returns the error line that was set.
    pub fn fail(&mut self, err: &UploadError, operation: Operation) -> Option<&str> {
        self.reset();
        if !err.is_cancelled() {
            self.error = Some(err.user_message(operation));
        }
        self.error.as_deref()
    }

    /// Starts deleting the current image.
    ///
    /// The delete shares the current operation's token, so a newer upload
    /// aborts it.
    pub fn begin_delete(&mut self) -> CancellationToken {
        self.deleting = true;
        self.error = None;
        self.token.get_or_insert_with(new_token).clone()
    }

    /// The delete finished.
    pub fn finish_delete(&mut self, result: &Result<(), UploadError>) {
        self.deleting = false;
        if let Err(err) = result {
            if !err.is_cancelled() {
                self.error = Some(err.user_message(Operation::Delete));
            }
        }
    }

    /// Clears progress, flags and the error line.
    pub fn reset(&mut self) {
        self.progress.reset();
        self.frames.cancel();
        self.awaiting_first_sample = true;
        self.loading = false;
        self.error = None;
    }

    /// Tears the session down: aborts the operation in flight and stops
    /// the animation.
    pub fn dispose(&mut self) {
        if self.abort_enabled {
            if let Some(token) = self.token.take() {
                cancel(&token);
            }
        }
        self.reset();
        self.deleting = false;
    }

    /// Percentage to render.
    #[must_use]
    pub fn displayed_progress(&self) -> f32 {
        self.progress.displayed()
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn percent_of(loaded: u64, total: u64) -> f32 {
    ((loaded as f64 / total as f64) * 100.0).round() as f32
}

impl Drop for UploadSession {
    fn drop(&mut self) {
        if self.abort_enabled {
            if let Some(token) = &self.token {
                cancel(token);
            }
        }
    }
}
