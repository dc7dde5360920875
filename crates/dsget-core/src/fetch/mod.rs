//! Descriptor retrieval.
//!
//! Issues a single GET for a numbered descriptor. A 404 is reported as
//! [`FetchOutcome::Absent`] so callers can skip the index; every other
//! non-2xx status or transport failure is a [`FetchError`].

mod error;

pub use error::FetchError;

use crate::config::{HttpConfig, SourceConfig};
use crate::descriptor::DescriptorId;
use crate::http;

const NOT_FOUND: u32 = 404;

/// What the remote location returned for a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(String),
    Absent,
}

impl FetchOutcome {
    pub fn into_text(self) -> Option<String> {
        match self {
            FetchOutcome::Found(text) => Some(text),
            FetchOutcome::Absent => None,
        }
    }
}

/// Fetches the text of descriptor `id` from `source`.
pub fn fetch_descriptor(
    source: &SourceConfig,
    http_cfg: &HttpConfig,
    id: DescriptorId,
) -> Result<FetchOutcome, FetchError> {
    let url = id
        .location(source)
        .map_err(|e| FetchError::Location(format!("{:#}", e)))?;
    fetch_text(url.as_str(), http_cfg)
}

/// GETs `url` and returns the body as text. Invalid UTF-8 is replaced lossily.
pub fn fetch_text(url: &str, http_cfg: &HttpConfig) -> Result<FetchOutcome, FetchError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = http::easy_for(url, http_cfg)?;
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if code == NOT_FOUND {
        tracing::debug!(%url, "descriptor not found");
        return Ok(FetchOutcome::Absent);
    }
    if !http::is_success(code) {
        return Err(FetchError::Http(code));
    }

    tracing::debug!(%url, bytes = body.len(), "descriptor fetched");
    Ok(FetchOutcome::Found(String::from_utf8_lossy(&body).into_owned()))
}
