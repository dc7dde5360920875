//! Shared libcurl easy-handle setup.

use crate::config::HttpConfig;

const USER_AGENT: &str = concat!("dsget/", env!("CARGO_PKG_VERSION"));

/// Creates an easy handle for `url` with redirects followed and the configured limits applied.
pub(crate) fn easy_for(url: &str, http: &HttpConfig) -> Result<curl::easy::Easy, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(USER_AGENT)?;
    if let Some(t) = http.connect_timeout() {
        easy.connect_timeout(t)?;
    }
    if let Some(t) = http.timeout() {
        easy.timeout(t)?;
    }
    Ok(easy)
}

pub(crate) fn is_success(code: u32) -> bool {
    (200..300).contains(&code)
}
