// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type for files, settings and image headers.
//!
//! Upload and delete failures have their own type,
//! [`UploadError`](crate::application::port::UploadError), because the widget
//! shows them to the user.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    /// The file is not a readable image.
    #[error("Image Error: {0}")]
    Image(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        match err {
            image_rs::ImageError::IoError(io) => Error::Io(io.to_string()),
            other => Error::Image(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_are_prefixed() {
        assert_eq!(Error::Io("disk full".into()).to_string(), "I/O Error: disk full");
        assert_eq!(
            Error::Image("bad header".into()).to_string(),
            "Image Error: bad header"
        );
    }

    #[test]
    fn missing_file_is_io() {
        let err: Error = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn invalid_toml_is_config() {
        let parse_error = toml::from_str::<toml::Table>("size = = 1").unwrap_err();
        let err: Error = parse_error.into();
        assert!(err.to_string().starts_with("Config Error: "));
    }
}
