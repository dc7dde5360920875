//! Destination filename derivation from a `destfile` argument.

use super::scan;
use regex::Regex;
use std::sync::LazyLock;

/// `paste0(folder, 'x')`, `file.path(folder, "x")`, `paste(folder, "x", sep = "")`.
static FOLDER_WRAPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)^(?:paste0|file\.path|paste)\s*\(\s*[A-Za-z.][\w.$]*\s*,\s*(?:"([^"]*)"|'([^']*)')\s*(?:,\s*sep\s*=\s*(?:""|''))?\s*\)$"#,
    )
    .expect("folder wrapper regex")
});

/// Derives the local filename from the raw destination argument text.
///
/// A folder-concatenation wrapper is reduced to its literal suffix; any other
/// expression contributes its last quoted literal. Only the final path segment
/// is kept.
///
/// Returns `None` when the argument has no quoted literal (a variable such as
/// `tmp` is not a path) or the final segment is empty, `.` or `..`.
pub fn destination_filename(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let path = match FOLDER_WRAPPER.captures(raw) {
        Some(caps) => caps.get(1).or_else(|| caps.get(2))?.as_str(),
        None => scan::literals(raw).last()?,
    };
    final_segment(path).map(sanitize)
}

/// Text after the last `/` or `\`. A trailing separator names a directory, not a file.
fn final_segment(path: &str) -> Option<&str> {
    let segment = path.rsplit(['/', '\\']).next()?.trim();
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment)
}

/// Replaces NUL and control characters with `_`; everything else is kept verbatim.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_control() { '_' } else { c })
        .collect()
}
