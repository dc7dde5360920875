//! Download-directive extraction from descriptor text.
//!
//! Descriptors are R scripts; the directives we want are their
//! `download.file(url, destfile)` calls. Recognition is heuristic and works on
//! raw text (calls may wrap across lines):
//!
//! - indexed: `download.file(urls[2], destfile = ...)` where `urls` was declared
//!   earlier as `urls <- c("http://...", ...)`; the 1-based index selects the URL.
//! - literal: `download.file("http://...", destfile = ...)`. A literal call with
//!   no usable destination of its own takes the destination of the nearest
//!   following call that supplies one.
//!
//! Indexed directives come first, then literal ones, each in text order.
//! Calls that cannot be resolved are left out of [`Extraction::directives`] and
//! recorded in [`Extraction::dropped`].

mod bindings;
mod destination;
mod scan;

pub use destination::destination_filename;

use bindings::Bindings;
use scan::CodeMap;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static DOWNLOAD_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdownload\.file\s*\(").expect("download call regex"));

static INDEXED_SOURCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z.][A-Za-z0-9._]*)\s*\[\[?\s*([^\]]*?)\s*\]\]?$")
        .expect("indexed source regex")
});

/// Formals of `download.file` we care about, in R's positional order.
const FORMALS: [&str; 2] = ["url", "destfile"];

/// A resolved download: fetch `url`, store as `filename` in the descriptor's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub url: String,
    pub filename: String,
}

impl Directive {
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
        }
    }
}

/// Why a recognized call produced no directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// `name[i]` where no list named `name` was declared before the call.
    UnknownBinding { name: String },
    /// `name[i]` with `i` of 0 or past the end of the list.
    IndexOutOfRange { name: String, index: usize },
    /// `name[i]` where `i` is not an integer literal.
    NonLiteralIndex { name: String, index: String },
    /// Neither a literal URL nor `name[i]` (e.g. a loop variable).
    UnsupportedSource { expression: String },
    /// URL resolved but no usable destination filename.
    MissingDestination { url: String },
    /// The call's closing parenthesis was never found.
    Unterminated,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::UnknownBinding { name } => write!(f, "unknown list `{}`", name),
            DropReason::IndexOutOfRange { name, index } => {
                write!(f, "index {} out of range for `{}`", index, name)
            }
            DropReason::NonLiteralIndex { name, index } => {
                write!(f, "non-literal index `{}[{}]`", name, index)
            }
            DropReason::UnsupportedSource { expression } => {
                write!(f, "unsupported url expression `{}`", expression)
            }
            DropReason::MissingDestination { url } => write!(f, "no destination for {}", url),
            DropReason::Unterminated => f.write_str("unterminated call"),
        }
    }
}

/// A dropped `download.file` occurrence and the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropped {
    pub line: usize,
    pub reason: DropReason,
}

/// Result of scanning one descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub directives: Vec<Directive>,
    pub dropped: Vec<Dropped>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// First argument of a recognized call.
#[derive(Debug)]
enum Source {
    Literal(String),
    Indexed { name: String, index: String },
    Other(String),
}

/// A `download.file` call split into the pieces the strategies need.
#[derive(Debug)]
struct Call {
    offset: usize,
    line: usize,
    source: Option<Source>,
    /// Filename derived from the call's own destination argument.
    filename: Option<String>,
}

fn classify_source(value: &str) -> Source {
    if let Some(url) = scan::literal(value) {
        return Source::Literal(url.trim().to_string());
    }
    if let Some(caps) = INDEXED_SOURCE.captures(value.trim()) {
        return Source::Indexed {
            name: caps[1].to_string(),
            index: caps[2].to_string(),
        };
    }
    Source::Other(value.trim().to_string())
}

/// Finds every `download.file(...)` call; `source` is `None` for unterminated calls.
fn find_calls(text: &str, code: &CodeMap) -> Vec<Call> {
    DOWNLOAD_CALL
        .find_iter(text)
        .filter(|m| code.is_code(m.start()))
        .map(|m| {
            let offset = m.start();
            let line = scan::line_of(text, offset);
            let Some(body) = scan::call_body(text, m.end() - 1) else {
                return Call {
                    offset,
                    line,
                    source: None,
                    filename: None,
                };
            };
            let args = scan::split_args(body);
            let matched = scan::match_args(&args, &FORMALS);
            Call {
                offset,
                line,
                source: Some(classify_source(matched[0].unwrap_or_default())),
                filename: matched[1].and_then(destination_filename),
            }
        })
        .collect()
}

/// `download.file(name[i], ...)` against the list declarations.
fn resolve_indexed(
    call: &Call,
    name: &str,
    index: &str,
    bindings: &Bindings,
) -> Result<Directive, DropReason> {
    let position: usize = index.parse().map_err(|_| DropReason::NonLiteralIndex {
        name: name.to_string(),
        index: index.to_string(),
    })?;
    let urls = bindings
        .lookup(name, call.offset)
        .ok_or_else(|| DropReason::UnknownBinding {
            name: name.to_string(),
        })?;
    let url = position
        .checked_sub(1)
        .and_then(|i| urls.get(i))
        .ok_or_else(|| DropReason::IndexOutOfRange {
            name: name.to_string(),
            index: position,
        })?;
    match &call.filename {
        Some(filename) => Ok(Directive::new(url.as_str(), filename.as_str())),
        None => Err(DropReason::MissingDestination { url: url.clone() }),
    }
}

/// `download.file("http://...", ...)`. `calls` starts at the literal's own call; the
/// first of them with a usable destination supplies the filename.
fn resolve_literal(url: &str, calls: &[Call]) -> Result<Directive, DropReason> {
    let Some((distance, filename)) = calls
        .iter()
        .enumerate()
        .find_map(|(i, c)| c.filename.as_deref().map(|f| (i, f)))
    else {
        return Err(DropReason::MissingDestination {
            url: url.to_string(),
        });
    };
    if distance > 0 {
        tracing::debug!(url, filename, distance, "destination taken from a later call");
    }
    Ok(Directive::new(url, filename))
}

/// Extracts download directives from descriptor `text`.
///
/// Never fails: unresolvable calls are reported in [`Extraction::dropped`].
pub fn extract_directives(text: &str) -> Extraction {
    let mut extraction = Extraction::default();
    if text.trim().is_empty() {
        return extraction;
    }

    let code = CodeMap::new(text);
    let calls = find_calls(text, &code);
    let bindings = Bindings::collect(text, &code);
    let mut indexed = Vec::new();
    let mut literal = Vec::new();

    for (position, call) in calls.iter().enumerate() {
        let outcome = match &call.source {
            None => Err(DropReason::Unterminated),
            Some(Source::Indexed { name, index }) => {
                resolve_indexed(call, name, index, &bindings).map(|d| indexed.push(d))
            }
            Some(Source::Literal(url)) => {
                resolve_literal(url, &calls[position..]).map(|d| literal.push(d))
            }
            Some(Source::Other(expression)) => Err(DropReason::UnsupportedSource {
                expression: expression.clone(),
            }),
        };
        if let Err(reason) = outcome {
            tracing::debug!(line = call.line, %reason, "dropped download.file call");
            extraction.dropped.push(Dropped {
                line: call.line,
                reason,
            });
        }
    }

    extraction.directives = indexed;
    extraction.directives.append(&mut literal);
    extraction
}

#[cfg(test)]
mod tests;
