// SPDX-License-Identifier: MPL-2.0
//! Upload lifecycle: session state, response parsing and the async driver.

pub mod driver;
pub mod response;
pub mod session;

pub use driver::{SelectorListener, UploadTiming, Uploader};
pub use response::{extract_image_url, redact_headers, resolve_path};
pub use session::UploadSession;
