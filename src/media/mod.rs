// SPDX-License-Identifier: MPL-2.0
//! Local image files and the upload lifecycle.
//!
//! This module turns files on disk into [`FileUpload`]s, reads natural image
//! sizes for the preview, and hosts the [`upload`] session and driver.

pub mod upload;

use std::path::Path;

use crate::application::port::FileUpload;
use crate::domain::Size;
use crate::error::Result;

/// Supported media extensions
pub mod extensions {
    /// Image file extensions and their MIME types
    pub const IMAGE_MIME_TYPES: &[(&str, &str)] = &[
        ("jpg", "image/jpeg"),
        ("jpeg", "image/jpeg"),
        ("png", "image/png"),
        ("gif", "image/gif"),
        ("tiff", "image/tiff"),
        ("tif", "image/tiff"),
        ("webp", "image/webp"),
        ("bmp", "image/bmp"),
        ("ico", "image/x-icon"),
        ("svg", "image/svg+xml"),
    ];

    /// MIME type for files that are not recognised.
    pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

    /// Image file extensions
    #[must_use]
    pub fn image_extensions() -> Vec<&'static str> {
        IMAGE_MIME_TYPES.iter().map(|(ext, _)| *ext).collect()
    }
}

/// Guesses the MIME type of `path` from its extension.
#[must_use]
pub fn mime_type_for<P: AsRef<Path>>(path: P) -> &'static str {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    extensions::IMAGE_MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map_or(extensions::FALLBACK_MIME_TYPE, |(_, mime)| *mime)
}

/// Reads `path` into a [`FileUpload`] named after the file.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub async fn read_file_upload<P: AsRef<Path>>(path: P) -> Result<FileUpload> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(FileUpload::new(name, mime_type_for(path), bytes))
}

/// Reads the natural size of the image at `path` without decoding pixels.
///
/// # Errors
/// Returns an error if the file is missing or not a decodable image.
pub fn image_size<P: AsRef<Path>>(path: P) -> Result<Size> {
    Ok(Size::from(image_rs::image_dimensions(path)?))
}
