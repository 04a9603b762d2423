// SPDX-License-Identifier: MPL-2.0
//! Picture selector component encapsulating state and update logic.
//!
//! The selector owns the [`UploadSession`] and the embedded preview. Network
//! work is requested through [`Effect`]s; the host runs it with an
//! [`Uploader`](crate::media::upload::Uploader) against
//! [`State::session_mut`] and reports the outcome with
//! [`Message::ImageChanged`].
//!
//! Dropping an image while an upload runs asks for a new upload. The host
//! drops the running `Uploader::upload` future and starts the new one, whose
//! `begin_upload` cancels the old token.

use crate::application::port::FileUpload;
use crate::config::WidgetConfig;
use crate::media::upload::UploadSession;
use crate::ui::preview;

use super::indicator::ProgressIndicator;

/// Messages emitted by the selector.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The picture itself was clicked.
    ImagePressed,
    /// The current picture could not be displayed.
    ImageLoadFailed,
    DragOver,
    DragLeft,
    FilesDropped(Vec<FileUpload>),
    /// The file picker closed, with or without a choice.
    FileChosen(Option<FileUpload>),
    EditPressed,
    DeletePressed,
    /// The host set a new picture (`None` removes it).
    ImageChanged(Option<String>),
    Preview(preview::Message),
}

/// Effects produced by selector changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    OpenFilePicker,
    StartUpload(FileUpload),
    StartDelete(String),
    Preview(preview::Effect),
}

/// Selector component state.
#[derive(Debug)]
pub struct State {
    config: WidgetConfig,
    image_url: Option<String>,
    image_error: bool,
    drag_over: bool,
    session: UploadSession,
    preview: preview::State,
}

impl Default for State {
    fn default() -> Self {
        Self::new(WidgetConfig::default(), None)
    }
}

impl State {
    #[must_use]
    pub fn new(config: WidgetConfig, image_url: Option<String>) -> Self {
        let session = UploadSession::new(config.enable_abort_controller);
        Self {
            config,
            image_url: image_url.filter(|url| !url.is_empty()),
            image_error: false,
            drag_over: false,
            session,
            preview: preview::State::default(),
        }
    }

    /// Handle a selector message.
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            // A broken picture still opens; the preview closes itself when
            // the image fails to load there too.
            Message::ImagePressed => match self.image_url.clone() {
                Some(url) => Effect::Preview(self.preview.handle(preview::Message::Open(url))),
                None => Effect::None,
            },
            Message::ImageLoadFailed => {
                tracing::warn!(url = self.image_url.as_deref().unwrap_or_default(), "failed to display picture");
                self.image_error = true;
                Effect::None
            }
            Message::DragOver => {
                self.drag_over = !self.config.view_only;
                Effect::None
            }
            Message::DragLeft => {
                self.drag_over = false;
                Effect::None
            }
            Message::FilesDropped(files) => {
                self.drag_over = false;
                if self.config.view_only {
                    return Effect::None;
                }
                match files.into_iter().next() {
                    Some(file) if file.is_image() => {
                        self.image_error = false;
                        Effect::StartUpload(file)
                    }
                    _ => Effect::None,
                }
            }
            Message::FileChosen(file) => match file {
                Some(file) if self.buttons_enabled() => self.start_upload(file),
                _ => Effect::None,
            },
            Message::EditPressed => {
                if self.shows_edit_button() && self.buttons_enabled() {
                    Effect::OpenFilePicker
                } else {
                    Effect::None
                }
            }
            Message::DeletePressed => match self.image_url.clone() {
                Some(url) if self.shows_delete_button() && self.buttons_enabled() => {
                    Effect::StartDelete(url)
                }
                _ => Effect::None,
            },
            Message::ImageChanged(url) => {
                self.image_url = url.filter(|url| !url.is_empty());
                self.image_error = false;
                Effect::None
            }
            Message::Preview(msg) => Effect::Preview(self.preview.handle(msg)),
        }
    }

    /// Checks the picked file before asking the host to upload it.
    fn start_upload(&mut self, file: FileUpload) -> Effect {
        match self.session.check_file(&file) {
            Ok(()) => {
                self.image_error = false;
                Effect::StartUpload(file)
            }
            Err(_) => Effect::None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Whether the picture is shown (set and displayable).
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image_url.is_some() && !self.image_error
    }

    #[must_use]
    pub fn shows_placeholder(&self) -> bool {
        !self.has_image()
    }

    #[must_use]
    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    #[must_use]
    pub fn shows_edit_button(&self) -> bool {
        !self.config.view_only
    }

    #[must_use]
    pub fn shows_delete_button(&self) -> bool {
        !self.config.view_only && self.image_url.is_some()
    }

    /// Edit and delete are disabled while an upload runs.
    #[must_use]
    pub fn buttons_enabled(&self) -> bool {
        !self.session.is_loading()
    }

    /// Current ring and overlay.
    #[must_use]
    pub fn indicator(&self) -> ProgressIndicator {
        ProgressIndicator::new(
            self.session.displayed_progress(),
            self.config.clamped_size(),
            self.config.kind,
            self.config.show_progress_ring,
            self.config.blur_on_progress,
            self.session.is_loading(),
            self.has_image(),
        )
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.session.error()
    }

    #[must_use]
    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut UploadSession {
        &mut self.session
    }

    #[must_use]
    pub fn preview(&self) -> &preview::State {
        &self.preview
    }

    /// Tears the widget down, aborting the running operation.
    pub fn dispose(&mut self) {
        self.session.dispose();
        self.preview.handle(preview::Message::Close);
    }
}
