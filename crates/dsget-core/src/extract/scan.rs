//! Quote- and comment-aware scanning of call arguments in descriptor text.
//!
//! Only delimits text; nothing here evaluates the descriptor language.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)'"#).expect("literal regex")
});

static WHOLE_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')$"#).expect("whole literal regex")
});

/// What a character is part of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Code,
    Quoted,
    Comment,
}

/// Tracks string literals (`"`, `'`, backticks) and `#` line comments.
#[derive(Debug, Default)]
struct Lexer {
    quote: Option<char>,
    escaped: bool,
    comment: bool,
}

impl Lexer {
    fn step(&mut self, c: char) -> Class {
        if self.comment {
            if c == '\n' {
                self.comment = false;
                return Class::Code;
            }
            return Class::Comment;
        }
        if let Some(q) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == q {
                self.quote = None;
            }
            return Class::Quoted;
        }
        match c {
            '"' | '\'' | '`' => {
                self.quote = Some(c);
                Class::Quoted
            }
            '#' => {
                self.comment = true;
                Class::Comment
            }
            _ => Class::Code,
        }
    }
}

fn opens(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

fn closes(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

/// Returns the text between the `(` at byte `open` and its matching `)`.
///
/// `None` if `open` is not a `(` or the call is never closed.
pub(crate) fn call_body(text: &str, open: usize) -> Option<&str> {
    let rest = text.get(open..)?;
    if !rest.starts_with('(') {
        return None;
    }
    let mut lexer = Lexer::default();
    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        if lexer.step(c) != Class::Code {
            continue;
        }
        if opens(c) {
            depth += 1;
        } else if closes(c) {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(&rest[1..i]);
            }
        }
    }
    None
}

/// One argument of a call: `name = value` or a positional `value`. Comments are stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Arg {
    pub name: Option<String>,
    pub value: String,
}

/// Splits a call body on top-level commas.
pub(crate) fn split_args(body: &str) -> Vec<Arg> {
    let mut lexer = Lexer::default();
    let mut depth = 0usize;
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in body.chars() {
        match lexer.step(c) {
            Class::Comment => continue,
            Class::Quoted => {}
            Class::Code => {
                if opens(c) {
                    depth += 1;
                } else if closes(c) {
                    depth = depth.saturating_sub(1);
                } else if c == ',' && depth == 0 {
                    pieces.push(std::mem::take(&mut current));
                    continue;
                }
            }
        }
        current.push(c);
    }
    pieces.push(current);

    pieces
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(parse_arg)
        .collect()
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '.' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
}

fn parse_arg(piece: &str) -> Arg {
    if let Some((name, value)) = piece.split_once('=') {
        let name = name.trim();
        if is_identifier(name) && !value.starts_with('=') {
            return Arg {
                name: Some(name.to_string()),
                value: value.trim().to_string(),
            };
        }
    }
    Arg {
        name: None,
        value: piece.to_string(),
    }
}

/// R-style argument matching: named arguments first, then positionals fill the
/// remaining `formals` in order.
pub(crate) fn match_args<'a>(args: &'a [Arg], formals: &[&str]) -> Vec<Option<&'a str>> {
    let mut positional = args.iter().filter(|a| a.name.is_none());
    formals
        .iter()
        .map(|formal| {
            args.iter()
                .find(|a| a.name.as_deref() == Some(*formal))
                .or_else(|| positional.next())
                .map(|a| a.value.as_str())
        })
        .collect()
}

/// Content of `value` when it is exactly one quoted literal.
pub(crate) fn literal(value: &str) -> Option<&str> {
    let caps = WHOLE_LITERAL.captures(value.trim())?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

/// Contents of every quoted literal in `text`, in order.
pub(crate) fn literals(text: &str) -> impl Iterator<Item = &str> {
    LITERAL
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str()))
}

/// Byte ranges of a text that are inside string literals or `#` comments.
///
/// Built by lexing the whole text once, so literals that span lines are honoured.
#[derive(Debug)]
pub(crate) struct CodeMap {
    masked: Vec<Range<usize>>,
}

impl CodeMap {
    pub(crate) fn new(text: &str) -> Self {
        let mut lexer = Lexer::default();
        let mut masked: Vec<Range<usize>> = Vec::new();
        for (i, c) in text.char_indices() {
            if lexer.step(c) == Class::Code {
                continue;
            }
            let end = i + c.len_utf8();
            match masked.last_mut() {
                Some(last) if last.end == i => last.end = end,
                _ => masked.push(i..end),
            }
        }
        Self { masked }
    }

    /// True when byte `at` is outside comments and string literals.
    pub(crate) fn is_code(&self, at: usize) -> bool {
        let after = self.masked.partition_point(|r| r.end <= at);
        self.masked.get(after).map_or(true, |r| r.start > at)
    }
}

/// 1-based line number of byte offset `at`.
pub(crate) fn line_of(text: &str, at: usize) -> usize {
    text.get(..at).map_or(1, |head| head.matches('\n').count() + 1)
}
