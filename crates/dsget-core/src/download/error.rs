//! Resource download error type.

use thiserror::Error;

/// Why a single directive could not be downloaded. Rendered into `DownloadResult::error`.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Curl reported an error (timeout, connection, aborted write, ...).
    #[error("transport: {0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Creating, writing or renaming the local file failed.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
    /// The destination filename would escape the target directory.
    #[error("invalid destination filename {0:?}")]
    InvalidFilename(String),
}
