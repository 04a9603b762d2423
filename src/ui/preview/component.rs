// SPDX-License-Identifier: MPL-2.0
//! Preview modal component encapsulating state and update logic.
//!
//! The host forwards input as [`Message`]s and acts on the returned
//! [`Effect`]: loading the image, toggling fullscreen, redrawing with the
//! new [`ViewTransform`](crate::ui::state::ViewTransform).

use crate::domain::{Point, Size};
use crate::ui::state::{
    PointerButton, RotationDirection, SliderState, SliderTrack, ViewportState, ZoomDirection,
};

use super::layout::StageLayout;

/// Lifecycle of the preview modal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewStatus {
    #[default]
    Closed,
    /// Modal shown, waiting for the image's natural size.
    Loading { url: String },
    /// Image loaded and interactive.
    Open { url: String },
}

/// Messages emitted by the preview modal.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Show the image at `url`. Empty URLs are ignored.
    Open(String),
    /// The image finished loading with its natural size.
    ImageLoaded(Size),
    ImageFailed(String),
    WindowResized(Size),
    /// The stage was measured.
    ContainerResized(Size),
    Close,
    Escape,
    BackdropPressed,
    Wheel { delta_y: f32, position: Point },
    PointerPressed { button: PointerButton, position: Point },
    PointerMoved(Point),
    PointerReleased,
    /// Pointer left the stage or the gesture was interrupted.
    PointerCancelled,
    DoubleClick,
    ZoomIn,
    ZoomOut,
    RotateClockwise,
    RotateCounterClockwise,
    ResetView,
    ActualSize,
    SliderPressed { track: SliderTrack, y: f32 },
    SliderMoved(f32),
    SliderReleased,
    ToggleFullscreen,
    /// The platform reported a fullscreen change.
    FullscreenChanged(bool),
    FullscreenFailed(String),
}

/// Effects produced by preview changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// No effect.
    None,
    /// The transform changed and the image must be redrawn.
    ViewChanged,
    /// The image must be fetched to learn its natural size.
    LoadImage(String),
    /// The modal was dismissed.
    Closed,
    RequestFullscreen,
    ExitFullscreen,
}

/// Preview component state.
#[derive(Debug, Clone, Default)]
pub struct State {
    status: PreviewStatus,
    viewport: ViewportState,
    slider: SliderState,
    window: Size,
    is_fullscreen: bool,
}

impl State {
    /// Handle a preview message.
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Open(url) => self.open(url),
            Message::ImageLoaded(size) => self.image_loaded(size),
            Message::ImageFailed(reason) => {
                if matches!(self.status, PreviewStatus::Closed) {
                    return Effect::None;
                }
                tracing::warn!(url = self.url().unwrap_or_default(), %reason, "failed to load preview image");
                self.close()
            }
            Message::WindowResized(size) => {
                self.window = size;
                Effect::ViewChanged
            }
            Message::ContainerResized(size) => {
                self.viewport.set_container_size(size);
                Effect::ViewChanged
            }
            Message::Close | Message::Escape | Message::BackdropPressed => self.close(),
            Message::FullscreenChanged(active) => {
                self.is_fullscreen = active;
                Effect::None
            }
            Message::FullscreenFailed(reason) => {
                tracing::warn!(%reason, "fullscreen request failed");
                self.is_fullscreen = false;
                Effect::None
            }
            Message::ToggleFullscreen => {
                if !self.is_open() {
                    return Effect::None;
                }
                self.is_fullscreen = !self.is_fullscreen;
                if self.is_fullscreen {
                    Effect::RequestFullscreen
                } else {
                    Effect::ExitFullscreen
                }
            }
            other => self.handle_view(other),
        }
    }

    /// Input that only applies while an image is on the stage.
    fn handle_view(&mut self, msg: Message) -> Effect {
        if !self.is_interactive() {
            return Effect::None;
        }
        let changed = match msg {
            Message::Wheel { delta_y, position } => self.viewport.zoom_wheel(delta_y, position),
            Message::PointerPressed { button, position } => {
                self.viewport.begin_pan(button, position);
                false
            }
            Message::PointerMoved(position) => self.viewport.pan_to(position),
            Message::PointerReleased | Message::PointerCancelled => {
                self.viewport.end_pan();
                false
            }
            Message::DoubleClick => {
                self.viewport.toggle_fit_actual();
                true
            }
            Message::ZoomIn => {
                self.viewport.zoom_step(ZoomDirection::In);
                true
            }
            Message::ZoomOut => {
                self.viewport.zoom_step(ZoomDirection::Out);
                true
            }
            Message::RotateClockwise => {
                self.viewport.rotate(RotationDirection::Clockwise);
                true
            }
            Message::RotateCounterClockwise => {
                self.viewport.rotate(RotationDirection::CounterClockwise);
                true
            }
            Message::ResetView => {
                self.viewport.reset_view();
                true
            }
            Message::ActualSize => {
                self.viewport.actual_size();
                true
            }
            Message::SliderPressed { track, y } => match self.slider.press(track, y) {
                Some(ratio) => {
                    self.viewport.set_scale_from_ratio(ratio);
                    true
                }
                None => false,
            },
            Message::SliderMoved(y) => match self.slider.drag_to(y) {
                Some(ratio) => {
                    self.viewport.set_scale_from_ratio(ratio);
                    true
                }
                None => false,
            },
            Message::SliderReleased => {
                self.slider.release();
                false
            }
            _ => false,
        };
        if changed {
            Effect::ViewChanged
        } else {
            Effect::None
        }
    }

    fn open(&mut self, url: String) -> Effect {
        if url.is_empty() {
            return Effect::None;
        }
        tracing::debug!(%url, "opening preview");
        self.viewport.open();
        self.slider.release();
        self.status = PreviewStatus::Loading { url: url.clone() };
        Effect::LoadImage(url)
    }

    fn image_loaded(&mut self, size: Size) -> Effect {
        let url = match &self.status {
            PreviewStatus::Loading { url } | PreviewStatus::Open { url } => url.clone(),
            PreviewStatus::Closed => return Effect::None,
        };
        self.viewport.set_image_size(size);
        self.status = PreviewStatus::Open { url };
        Effect::ViewChanged
    }

    fn close(&mut self) -> Effect {
        if matches!(self.status, PreviewStatus::Closed) {
            return Effect::None;
        }
        self.status = PreviewStatus::Closed;
        self.viewport.close();
        self.slider.release();
        self.is_fullscreen = false;
        Effect::Closed
    }

    /// Whether the modal is shown (loading or open).
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self.status, PreviewStatus::Closed)
    }

    /// Whether the image is loaded and accepts view input.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self.status, PreviewStatus::Open { .. })
    }

    #[must_use]
    pub fn status(&self) -> &PreviewStatus {
        &self.status
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match &self.status {
            PreviewStatus::Loading { url } | PreviewStatus::Open { url } => Some(url),
            PreviewStatus::Closed => None,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    #[must_use]
    pub fn is_slider_dragging(&self) -> bool {
        self.slider.is_dragging
    }

    /// Stage layout for the current image and window.
    #[must_use]
    pub fn layout(&self) -> StageLayout {
        StageLayout::compute(self.viewport.image_size(), self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn opened(image: Size, container: Size) -> State {
        let mut state = State::default();
        state.handle(Message::ContainerResized(container));
        assert_eq!(
            state.handle(Message::Open("https://cdn.test/a.png".into())),
            Effect::LoadImage("https://cdn.test/a.png".into())
        );
        assert_eq!(state.handle(Message::ImageLoaded(image)), Effect::ViewChanged);
        state
    }

    #[test]
    fn empty_url_does_not_open() {
        let mut state = State::default();
        assert_eq!(state.handle(Message::Open(String::new())), Effect::None);
        assert!(!state.is_open());
    }

    #[test]
    fn open_then_load_resets_view_to_base() {
        let state = opened(Size::new(1600.0, 1200.0), Size::new(800.0, 600.0));
        assert!(state.is_interactive());
        assert_eq!(state.url(), Some("https://cdn.test/a.png"));
        assert_abs_diff_eq!(state.viewport().scale(), 0.5);
    }

    #[test]
    fn input_is_ignored_while_loading() {
        let mut state = State::default();
        state.handle(Message::Open("https://cdn.test/a.png".into()));
        assert!(state.is_open());
        assert!(!state.is_interactive());
        assert_eq!(state.handle(Message::ZoomIn), Effect::None);
        assert_eq!(state.viewport().scale(), 1.0);
    }

    #[test]
    fn failed_load_closes_the_modal() {
        let mut state = State::default();
        state.handle(Message::Open("https://cdn.test/missing.png".into()));
        assert_eq!(
            state.handle(Message::ImageFailed("404".into())),
            Effect::Closed
        );
        assert_eq!(state.status(), &PreviewStatus::Closed);
    }

    #[test]
    fn escape_and_backdrop_close() {
        for close in [Message::Escape, Message::BackdropPressed, Message::Close] {
            let mut state = opened(Size::new(100.0, 100.0), Size::new(400.0, 400.0));
            assert_eq!(state.handle(close), Effect::Closed);
            assert!(!state.is_open());
        }
        let mut closed = State::default();
        assert_eq!(closed.handle(Message::Escape), Effect::None);
    }

    #[test]
    fn reopening_resets_rotation() {
        let mut state = opened(Size::new(800.0, 800.0), Size::new(400.0, 400.0));
        state.handle(Message::RotateClockwise);
        assert_eq!(state.viewport().rotation().degrees(), 90);

        state.handle(Message::Close);
        state.handle(Message::Open("https://cdn.test/b.png".into()));
        state.handle(Message::ImageLoaded(Size::new(800.0, 800.0)));
        assert_eq!(state.viewport().rotation().degrees(), 0);
    }

    #[test]
    fn drag_pans_the_image() {
        let mut state = opened(Size::new(800.0, 800.0), Size::new(400.0, 400.0));
        state.handle(Message::PointerPressed {
            button: PointerButton::Primary,
            position: Point::new(10.0, 10.0),
        });
        assert_eq!(
            state.handle(Message::PointerMoved(Point::new(30.0, 5.0))),
            Effect::ViewChanged
        );
        state.handle(Message::PointerCancelled);
        assert_eq!(
            state.handle(Message::PointerMoved(Point::new(90.0, 90.0))),
            Effect::None
        );
        assert_eq!(state.viewport().translate().x, 20.0);
        assert_eq!(state.viewport().translate().y, -5.0);
    }

    #[test]
    fn slider_drag_sets_scale() {
        let mut state = opened(Size::new(800.0, 800.0), Size::new(400.0, 400.0));
        let track = SliderTrack::new(0.0, 160.0);
        assert_eq!(
            state.handle(Message::SliderPressed { track, y: 0.0 }),
            Effect::ViewChanged
        );
        assert_eq!(state.viewport().scale(), state.viewport().bounds().max());
        assert!(state.is_slider_dragging());

        state.handle(Message::SliderReleased);
        assert_eq!(state.handle(Message::SliderMoved(80.0)), Effect::None);
    }

    #[test]
    fn fullscreen_toggle_requests_and_exits() {
        let mut state = opened(Size::new(800.0, 800.0), Size::new(400.0, 400.0));
        assert_eq!(state.handle(Message::ToggleFullscreen), Effect::RequestFullscreen);
        assert!(state.is_fullscreen());
        assert_eq!(state.handle(Message::ToggleFullscreen), Effect::ExitFullscreen);

        state.handle(Message::FullscreenChanged(true));
        assert!(state.is_fullscreen());
        state.handle(Message::Close);
        assert!(!state.is_fullscreen());
    }

    #[test]
    fn layout_follows_window_and_image() {
        let mut state = opened(Size::new(4000.0, 3000.0), Size::new(800.0, 600.0));
        state.handle(Message::WindowResized(Size::new(1000.0, 800.0)));
        assert_eq!(state.layout().stage.width, 800.0);
    }
}
