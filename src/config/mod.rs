// SPDX-License-Identifier: MPL-2.0
//! This module handles the selector's configuration: the upload/delete API,
//! widget options and colors, loaded from and saved to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use picture_selector::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Point uploads at a server
//! config.api.base_url = "https://example.com".to_string();
//! config.api.upload_url = "/avatar".to_string();
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_file = PathBuf::from("./temp_config_dir/settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded.api.upload_url, "/avatar");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "PictureSelector";

/// Header sent with every request unless overridden.
pub const DEFAULT_CONTENT_TYPE: (&str, &str) = ("Content-Type", "multipart/form-data");

/// HTTP method used for uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UploadMethod {
    #[default]
    Post,
    Put,
    Patch,
}

impl UploadMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            UploadMethod::Post => "POST",
            UploadMethod::Put => "PUT",
            UploadMethod::Patch => "PATCH",
        }
    }
}

/// HTTP method used for deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeleteMethod {
    #[default]
    Post,
    Delete,
    Put,
}

impl DeleteMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DeleteMethod::Post => "POST",
            DeleteMethod::Delete => "DELETE",
            DeleteMethod::Put => "PUT",
        }
    }
}

/// Body sent with a delete request.
///
/// `fields` are sent as-is; when `image_url_field` is set, the URL of the
/// image being deleted is added under that key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url_field: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl DeleteBody {
    /// Builds the JSON body for deleting `image_url`.
    #[must_use]
    pub fn render(&self, image_url: &str) -> Value {
        let mut body: Map<String, Value> = self
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        if let Some(field) = &self.image_url_field {
            body.insert(field.clone(), Value::String(image_url.to_string()));
        }
        Value::Object(body)
    }
}

/// Upload and delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub upload_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_url: Option<String>,
    /// Dotted path to the image URL, resolved against `{ status, data }`
    /// where `data` is the response body.
    pub response_path: String,
    /// Multipart field name of the uploaded file.
    pub form_data_name: String,
    pub upload_method: UploadMethod,
    pub delete_method: DeleteMethod,
    /// Headers sent with both uploads and deletes.
    pub additional_headers: BTreeMap<String, String>,
    pub upload_headers: BTreeMap<String, String>,
    pub delete_headers: BTreeMap<String, String>,
    pub delete_body: DeleteBody,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            upload_url: String::new(),
            delete_url: None,
            response_path: "data".to_string(),
            form_data_name: "File".to_string(),
            upload_method: UploadMethod::default(),
            delete_method: DeleteMethod::default(),
            additional_headers: BTreeMap::new(),
            upload_headers: BTreeMap::new(),
            delete_headers: BTreeMap::new(),
            delete_body: DeleteBody::default(),
        }
    }
}

impl ApiConfig {
    /// Full upload URL.
    #[must_use]
    pub fn upload_endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.upload_url)
    }

    /// Full delete URL, if deletes go through the server at all.
    #[must_use]
    pub fn delete_endpoint(&self) -> Option<String> {
        self.delete_url
            .as_ref()
            .filter(|url| !url.is_empty())
            .map(|url| format!("{}{}", self.base_url, url))
    }

    /// Default headers, overridden by `additional_headers`, overridden by
    /// `upload_headers`.
    #[must_use]
    pub fn effective_upload_headers(&self) -> BTreeMap<String, String> {
        self.merged_headers(&self.upload_headers)
    }

    /// Default headers, overridden by `additional_headers`, overridden by
    /// `delete_headers`.
    #[must_use]
    pub fn effective_delete_headers(&self) -> BTreeMap<String, String> {
        self.merged_headers(&self.delete_headers)
    }

    fn merged_headers(&self, specific: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert(
            DEFAULT_CONTENT_TYPE.0.to_string(),
            DEFAULT_CONTENT_TYPE.1.to_string(),
        );
        for (key, value) in self.additional_headers.iter().chain(specific) {
            // Header names are case-insensitive; the later spelling wins.
            headers.retain(|existing: &String, _| !existing.eq_ignore_ascii_case(key));
            headers.insert(key.clone(), value.clone());
        }
        headers
    }
}

/// Shape of the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorKind {
    /// Circular avatar.
    #[default]
    Profile,
    /// Rounded square picture.
    Image,
}

impl SelectorKind {
    #[must_use]
    pub fn is_circle(self) -> bool {
        self == SelectorKind::Profile
    }
}

/// Widget behavior options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub kind: SelectorKind,
    pub size: f32,
    pub view_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub show_progress_ring: bool,
    pub blur_on_progress: bool,
    /// Abort the in-flight operation when a new one starts or the widget
    /// is torn down.
    pub enable_abort_controller: bool,
    /// Upload through the simulated transport instead of the network.
    pub test_mode: bool,
    pub test_upload_delay_ms: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            kind: SelectorKind::default(),
            size: DEFAULT_WIDGET_SIZE_PX,
            view_only: false,
            title: None,
            show_progress_ring: true,
            blur_on_progress: true,
            enable_abort_controller: true,
            test_mode: false,
            test_upload_delay_ms: DEFAULT_TEST_UPLOAD_DELAY_MS,
        }
    }
}

impl WidgetConfig {
    /// Widget side, clamped to the supported range.
    #[must_use]
    pub fn clamped_size(&self) -> f32 {
        if self.size.is_finite() {
            self.size.clamp(MIN_WIDGET_SIZE_PX, MAX_WIDGET_SIZE_PX)
        } else {
            DEFAULT_WIDGET_SIZE_PX
        }
    }
}

/// Colors handed to the display layer, as CSS-style hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPalette {
    pub primary: String,
    pub error: String,
    pub progress: String,
    pub placeholder: String,
    pub text: String,
    pub text_disabled: String,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: "#2a84fa".to_string(),
            error: "#EF4444".to_string(),
            progress: "#d24670".to_string(),
            placeholder: "#BCBEC0".to_string(),
            text: "#fafafa".to_string(),
            text_disabled: "#e6e6e6".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub widget: WidgetConfig,
    pub colors: ColorPalette,
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_api_and_widget() {
        let mut config = Config::default();
        config.api.base_url = "https://cdn.example".to_string();
        config.api.upload_url = "/upload".to_string();
        config.api.delete_url = Some("/delete".to_string());
        config.api.upload_method = UploadMethod::Put;
        config.api.delete_body.image_url_field = Some("url".to_string());
        config.widget.kind = SelectorKind::Image;
        config.widget.test_mode = true;

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(
            &config_path,
            "[api]\nupload_url = \"/avatar\"\n\n[widget]\nsize = 96.0\n",
        )
        .expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.api.upload_url, "/avatar");
        assert_eq!(loaded.api.response_path, "data");
        assert_eq!(loaded.api.form_data_name, "File");
        assert_eq!(loaded.widget.size, 96.0);
        assert!(loaded.widget.show_progress_ring);
    }

    #[test]
    fn upload_headers_override_defaults_case_insensitively() {
        let mut api = ApiConfig::default();
        api.additional_headers
            .insert("X-Client".to_string(), "selector".to_string());
        api.upload_headers
            .insert("content-type".to_string(), "application/octet-stream".to_string());

        let headers = api.effective_upload_headers();
        assert_eq!(headers.len(), 2);
        assert_eq!(
            headers.get("content-type").map(String::as_str),
            Some("application/octet-stream")
        );
        assert!(!headers.contains_key("Content-Type"));
        assert_eq!(headers.get("X-Client").map(String::as_str), Some("selector"));
    }

    #[test]
    fn delete_headers_start_from_the_default_content_type() {
        let api = ApiConfig::default();
        let headers = api.effective_delete_headers();
        assert_eq!(
            headers.get("Content-Type").map(String::as_str),
            Some("multipart/form-data")
        );
    }

    #[test]
    fn endpoints_join_base_url() {
        let api = ApiConfig {
            base_url: "https://api.example".to_string(),
            upload_url: "/images".to_string(),
            delete_url: Some(String::new()),
            ..ApiConfig::default()
        };
        assert_eq!(api.upload_endpoint(), "https://api.example/images");
        assert_eq!(api.delete_endpoint(), None);
    }

    #[test]
    fn delete_body_includes_image_url_when_requested() {
        let mut body = DeleteBody::default();
        body.fields.insert("kind".to_string(), "avatar".to_string());
        body.image_url_field = Some("imageUrl".to_string());

        let rendered = body.render("https://cdn.example/a.png");
        assert_eq!(
            rendered,
            serde_json::json!({ "kind": "avatar", "imageUrl": "https://cdn.example/a.png" })
        );
    }

    #[test]
    fn widget_size_is_clamped() {
        let widget = WidgetConfig {
            size: 4.0,
            ..WidgetConfig::default()
        };
        assert_eq!(widget.clamped_size(), MIN_WIDGET_SIZE_PX);

        let widget = WidgetConfig {
            size: f32::NAN,
            ..WidgetConfig::default()
        };
        assert_eq!(widget.clamped_size(), DEFAULT_WIDGET_SIZE_PX);
    }
}
