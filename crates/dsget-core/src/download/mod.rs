//! Streamed single-GET downloader for extracted directives.
//!
//! Each chunk curl hands us is written straight to `<filename>.part` in the
//! target directory, so memory stays bounded by curl's buffer size. The temp
//! file is renamed over `<filename>` only after a 2xx response; any failure
//! removes it and leaves an earlier copy untouched.

mod error;
mod part_file;

pub use error::DownloadError;

use crate::config::HttpConfig;
use crate::http;
use part_file::PartFile;
use std::path::Path;

/// Outcome of one directive: success plus bytes written, or a readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub bytes: u64,
    pub error: Option<String>,
}

impl DownloadResult {
    pub fn ok(bytes: u64) -> Self {
        Self { bytes, error: None }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            bytes: 0,
            error: Some(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl From<Result<u64, DownloadError>> for DownloadResult {
    fn from(r: Result<u64, DownloadError>) -> Self {
        match r {
            Ok(bytes) => DownloadResult::ok(bytes),
            Err(e) => DownloadResult::failed(e.to_string()),
        }
    }
}

/// Downloads `url` into `dir/filename`. Never returns an error; see [`DownloadResult`].
pub fn download(url: &str, dir: &Path, filename: &str, http_cfg: &HttpConfig) -> DownloadResult {
    let result = try_download(url, dir, filename, http_cfg);
    match &result {
        Ok(bytes) => tracing::info!(%url, filename, bytes, "download complete"),
        Err(e) => tracing::warn!(%url, filename, "download failed: {}", e),
    }
    result.into()
}

/// Like [`download`] but keeps the typed error. Returns the number of bytes written.
pub fn try_download(
    url: &str,
    dir: &Path,
    filename: &str,
    http_cfg: &HttpConfig,
) -> Result<u64, DownloadError> {
    if filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\'])
    {
        return Err(DownloadError::InvalidFilename(filename.to_string()));
    }
    let final_path = dir.join(filename);

    let mut easy = http::easy_for(url, http_cfg)?;
    let mut part = PartFile::create(&final_path)?;
    let mut write_err: Option<std::io::Error> = None;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match part.write_chunk(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                write_err = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = write_err {
        return Err(DownloadError::Storage(e));
    }
    performed?;

    let code = easy.response_code()?;
    if !http::is_success(code) {
        return Err(DownloadError::Http(code));
    }

    tracing::debug!(%url, written = part.written(), "finalizing {}", final_path.display());
    Ok(part.finalize(&final_path)?)
}
