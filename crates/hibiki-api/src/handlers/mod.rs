//! Request handlers, one module per operation group.

pub mod audio_delete;
pub mod audio_download;
pub mod audio_upload;
pub mod index;
pub mod url_delete;
pub mod url_redirect;
pub mod url_shorten;

/// Where every mutating handler sends the browser afterwards.
pub(crate) const INDEX_PATH: &str = "/";
