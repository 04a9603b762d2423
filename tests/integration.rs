// SPDX-License-Identifier: MPL-2.0
use std::collections::BTreeMap;
use std::time::Duration;

use image_rs::{ImageBuffer, Rgba};
use picture_selector::application::port::{
    cancel, CancellationToken, DeleteRequest, ProgressSender, TransportResponse, UploadError,
    UploadRequest, UploadTransport,
};
use picture_selector::config::{self, Config, SelectorKind, UploadMethod};
use picture_selector::domain::Size;
use picture_selector::infrastructure::simulated::{self, SimulatedTransport};
use picture_selector::media::{
    self,
    upload::{SelectorListener, UploadTiming, Uploader},
};
use picture_selector::ui::{preview, selector};
use serde_json::Value;
use tempfile::tempdir;

#[derive(Default)]
struct Events(Vec<String>);

impl SelectorListener for Events {
    fn on_change_image(&mut self, url: &str, _response: Option<&Value>) {
        let kind = if url.is_empty() { "cleared" } else { "changed" };
        self.0.push(kind.to_string());
    }
    fn on_upload_success(&mut self, _url: &str) {
        self.0.push("success".to_string());
    }
    fn on_upload_error(&mut self, error: &UploadError) {
        self.0.push(format!("error: {error}"));
    }
    fn on_delete_start(&mut self) {
        self.0.push("delete-start".to_string());
    }
    fn on_delete_success(&mut self) {
        self.0.push("delete-success".to_string());
    }
}

fn simulated_uploader() -> Uploader<SimulatedTransport> {
    let transport = SimulatedTransport::new(Duration::from_millis(20))
        .with_delete_duration(Duration::from_millis(1));
    Uploader::new(transport, config::ApiConfig::default())
        .with_response_path(simulated::RESPONSE_PATH)
        .with_timing(UploadTiming::immediate())
}

#[tokio::test]
async fn test_simulated_upload_then_preview() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("avatar.png");
    ImageBuffer::from_pixel(400, 200, Rgba([10_u8, 20, 30, 255]))
        .save(&path)
        .expect("Failed to write test image");

    let file = media::read_file_upload(&path)
        .await
        .expect("Failed to read test image");
    let mut state = selector::State::default();
    let selector::Effect::StartUpload(file) =
        state.handle(selector::Message::FileChosen(Some(file)))
    else {
        panic!("a png must start an upload");
    };

    let mut events = Events::default();
    let url = simulated_uploader()
        .upload(state.session_mut(), None, file, &mut events)
        .await
        .expect("Simulated upload failed");
    assert!(url.starts_with("data:image/png;base64,"));
    assert_eq!(events.0, vec!["changed", "success"]);
    assert!(!state.session().is_loading());

    state.handle(selector::Message::ImageChanged(Some(url)));
    assert!(state.has_image());
    assert!(state.shows_delete_button());

    state.handle(selector::Message::ImagePressed);
    let natural = media::image_size(&path).expect("Failed to read image size");
    state.handle(selector::Message::Preview(preview::Message::ImageLoaded(natural)));
    state.handle(selector::Message::Preview(
        preview::Message::ContainerResized(Size::new(300.0, 300.0)),
    ));

    let viewport = state.preview().viewport();
    assert!(state.preview().is_interactive());
    assert_eq!(viewport.scale(), 0.75);
    assert_eq!(viewport.info_label(), "75% • 400×200 • Fit 75%");
}

#[tokio::test]
async fn test_replacing_image_deletes_previous_one() {
    let mut state = selector::State::new(
        config::WidgetConfig::default(),
        Some("https://cdn.test/old.png".to_string()),
    );
    let current = state.image_url().map(str::to_owned);
    let file = picture_selector::application::port::FileUpload::new(
        "new.png",
        "image/png",
        vec![1, 2, 3],
    );

    let mut events = Events::default();
    let url = simulated_uploader()
        .upload(state.session_mut(), current.as_deref(), file, &mut events)
        .await
        .expect("Simulated upload failed");
    state.handle(selector::Message::ImageChanged(Some(url)));

    assert_eq!(
        events.0,
        vec!["delete-start", "cleared", "delete-success", "changed", "success"]
    );
    assert!(!state.session().is_deleting());
    assert_ne!(state.image_url(), Some("https://cdn.test/old.png"));
}

#[tokio::test]
async fn test_text_file_is_rejected_before_upload() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").expect("Failed to write text file");

    let file = media::read_file_upload(&path)
        .await
        .expect("Failed to read text file");
    let mut state = selector::State::default();

    assert_eq!(
        state.handle(selector::Message::FileChosen(Some(file))),
        selector::Effect::None
    );
    assert_eq!(state.error(), Some("Please select an image file"));
}

/// Cancels every upload as soon as it starts, like a second upload would.
struct CancellingTransport(SimulatedTransport);

impl UploadTransport for CancellingTransport {
    async fn upload(
        &self,
        request: UploadRequest,
        progress: ProgressSender,
        token: CancellationToken,
    ) -> Result<TransportResponse, UploadError> {
        cancel(&token);
        self.0.upload(request, progress, token).await
    }

    async fn delete(
        &self,
        request: DeleteRequest,
        token: CancellationToken,
    ) -> Result<TransportResponse, UploadError> {
        self.0.delete(request, token).await
    }
}

#[tokio::test]
async fn test_cancelled_upload_is_silent() {
    let uploader = Uploader::new(
        CancellingTransport(SimulatedTransport::new(Duration::from_millis(20))),
        config::ApiConfig::default(),
    )
    .with_timing(UploadTiming::immediate());
    let mut state = selector::State::default();
    let file = picture_selector::application::port::FileUpload::new("a.png", "image/png", vec![1]);

    let mut events = Events::default();
    let result = uploader
        .upload(state.session_mut(), None, file, &mut events)
        .await;

    assert_eq!(result, Err(UploadError::Cancelled));
    assert!(events.0.is_empty());
    assert_eq!(state.error(), None);
    assert!(!state.session().is_loading());
    assert_eq!(state.indicator().percent(), 0.0);
}

#[test]
fn test_settings_file_round_trip() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut initial = Config::default();
    initial.api.base_url = "https://api.test".to_string();
    initial.api.upload_url = "/upload".to_string();
    initial.api.upload_method = UploadMethod::Put;
    initial.api.upload_headers =
        BTreeMap::from([("Authorization".to_string(), "Bearer t".to_string())]);
    initial.widget.kind = SelectorKind::Image;
    initial.widget.view_only = true;

    config::save_to_path(&initial, &path).expect("Failed to write config file");
    let loaded = config::load_from_path(&path).expect("Failed to load config file");
    assert_eq!(loaded, initial);
    assert_eq!(loaded.api.upload_endpoint(), "https://api.test/upload");

    dir.close().expect("Failed to close temporary directory");
}
