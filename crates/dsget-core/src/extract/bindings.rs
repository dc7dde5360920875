//! URL list declarations (`name <- c("http://...", ...)`) collected from one descriptor.

use super::scan::{self, CodeMap};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z.][A-Za-z0-9._]*)\s*(?:<<-|<-|=)\s*(?:c|list)\s*\(")
        .expect("declaration regex")
});

const URL_SCHEMES: [&str; 3] = ["http://", "https://", "ftp://"];

pub(crate) fn looks_like_url(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    URL_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

/// One declaration: where it starts and the URLs it lists, in order.
#[derive(Debug, Clone)]
struct Declaration {
    offset: usize,
    urls: Vec<String>,
}

/// Name to URL-list bindings for a single descriptor text. Built fresh per extraction.
#[derive(Debug, Default)]
pub(crate) struct Bindings {
    by_name: HashMap<String, Vec<Declaration>>,
}

impl Bindings {
    /// Scans `text` for every list declaration. Non-URL literals inside a list are skipped.
    pub(crate) fn collect(text: &str, code: &CodeMap) -> Self {
        let mut by_name: HashMap<String, Vec<Declaration>> = HashMap::new();
        for caps in DECLARATION.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if !code.is_code(whole.start()) {
                continue;
            }
            let Some(body) = scan::call_body(text, whole.end() - 1) else {
                continue;
            };
            let urls: Vec<String> = scan::literals(body)
                .filter(|s| looks_like_url(s))
                .map(|s| s.trim().to_string())
                .collect();
            tracing::trace!(name = name.as_str(), urls = urls.len(), "list declaration");
            by_name
                .entry(name.as_str().to_string())
                .or_default()
                .push(Declaration {
                    offset: whole.start(),
                    urls,
                });
        }
        Self { by_name }
    }

    /// URLs of the latest declaration of `name` that starts before byte `before`.
    pub(crate) fn lookup(&self, name: &str, before: usize) -> Option<&[String]> {
        self.by_name
            .get(name)?
            .iter()
            .rev()
            .find(|d| d.offset < before)
            .map(|d| d.urls.as_slice())
    }
}
