// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use picture_selector::application::port::UploadError;
use picture_selector::config::{self, Config};
use picture_selector::domain::Size;
use picture_selector::infrastructure::simulated::{self, SimulatedTransport};
use picture_selector::media::{self, upload::SelectorListener, upload::Uploader};
use picture_selector::ui::{preview, selector};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: picture_selector [--debug] [--delay-ms N] [--size N] [--config PATH] <image>

Runs a simulated upload of <image>, then opens it in the preview.";

/// Window the preview is laid out in.
const WINDOW: Size = Size::new(1280.0, 800.0);

struct Args {
    debug: bool,
    delay_ms: Option<u64>,
    size: Option<f32>,
    config: Option<PathBuf>,
    image: PathBuf,
}

fn parse_args() -> Result<Args> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        println!("{USAGE}");
        std::process::exit(0);
    }

    let debug = args.contains("--debug");
    let delay_ms = args.opt_value_from_str("--delay-ms")?;
    let size = args.opt_value_from_str("--size")?;
    let config = args.opt_value_from_str("--config")?;
    let image = args
        .finish()
        .into_iter()
        .next()
        .map(PathBuf::from)
        .context(USAGE)?;

    Ok(Args {
        debug,
        delay_ms,
        size,
        config,
        image,
    })
}

/// Prints selector events to the terminal.
#[derive(Default)]
struct ConsoleListener {
    last_percent: Option<f32>,
}

impl SelectorListener for ConsoleListener {
    fn on_progress(&mut self, percent: f32) {
        let rounded = percent.round();
        if self.last_percent != Some(rounded) {
            self.last_percent = Some(rounded);
            println!("progress {rounded:>3}%");
        }
    }

    fn on_upload_success(&mut self, url: &str) {
        println!("uploaded: {}", abbreviate(url));
    }

    fn on_upload_error(&mut self, error: &UploadError) {
        eprintln!("upload failed: {error}");
    }
}

fn abbreviate(url: &str) -> String {
    const MAX: usize = 64;
    match url.char_indices().nth(MAX) {
        Some((end, _)) => format!("{}…", &url[..end]),
        None => url.to_string(),
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    if let Some(size) = args.size {
        config.widget.size = size;
    }
    if let Some(delay) = args.delay_ms {
        config.widget.test_upload_delay_ms = delay;
    }
    config.widget.test_mode = true;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.debug { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(&args)?;
    let file = media::read_file_upload(&args.image)
        .await
        .with_context(|| format!("reading {}", args.image.display()))?;

    let mut widget = selector::State::new(config.widget.clone(), None);
    let file = match widget.handle(selector::Message::FileChosen(Some(file))) {
        selector::Effect::StartUpload(file) => file,
        _ => bail!(
            "{}",
            widget.error().unwrap_or("the file cannot be uploaded")
        ),
    };

    let transport = SimulatedTransport::new(Duration::from_millis(
        config.widget.test_upload_delay_ms,
    ));
    let uploader =
        Uploader::new(transport, config.api.clone()).with_response_path(simulated::RESPONSE_PATH);

    let current = widget.image_url().map(str::to_owned);
    let mut listener = ConsoleListener::default();
    let url = uploader
        .upload(
            widget.session_mut(),
            current.as_deref(),
            file,
            &mut listener,
        )
        .await?;
    widget.handle(selector::Message::ImageChanged(Some(url)));

    let natural = match media::image_size(&args.image) {
        Ok(size) => size,
        Err(err) => {
            tracing::warn!(error = %err, "cannot read image size, skipping preview");
            return Ok(());
        }
    };

    widget.handle(selector::Message::ImagePressed);
    widget.handle(selector::Message::Preview(preview::Message::WindowResized(
        WINDOW,
    )));
    widget.handle(selector::Message::Preview(preview::Message::ImageLoaded(
        natural,
    )));
    let layout = widget.preview().layout();
    widget.handle(selector::Message::Preview(
        preview::Message::ContainerResized(layout.stage),
    ));

    let viewport = widget.preview().viewport();
    println!(
        "stage {}×{}{}",
        layout.stage.width,
        layout.stage.height,
        if layout.compact { " (compact)" } else { "" }
    );
    println!("view {}", viewport.info_label());
    println!("transform {}", viewport.transform());
    Ok(())
}
