//! Shortening of link display text.
//!
//! Three placement strategies are available: cut at the end, cut in the
//! middle, or a URL-aware cut that keeps the scheme and host intact. All
//! lengths are counted in `char`s so a cut never splits a code point.
//!
//! None of the functions fail. When the requested length cannot even hold the
//! ellipsis, the text is hard cut to the requested length instead.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_TRUNCATE_LENGTH: usize = 32;
pub const DEFAULT_ELLIPSIS: &str = "..";

/// Matches text that looks like `scheme://host:port/rest`, where only the
/// host is required.
fn url_shape_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<scheme>[A-Za-z][A-Za-z0-9+.\-]*://)?(?P<host>(?:[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}|localhost|\d{1,3}(?:\.\d{1,3}){3})(?P<port>:\d{1,5})?(?P<rest>[/?#].*)?$",
        )
        .unwrap()
    })
}

/// Where the ellipsis is placed when text is shortened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruncateLocation {
    End,
    Middle,
    #[default]
    Smart,
}

impl TruncateLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            TruncateLocation::End => "end",
            TruncateLocation::Middle => "middle",
            TruncateLocation::Smart => "smart",
        }
    }
}

impl fmt::Display for TruncateLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown truncate location '{0}' (expected end, middle or smart)")]
pub struct ParseTruncateLocationError(String);

impl FromStr for TruncateLocation {
    type Err = ParseTruncateLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "end" => Ok(TruncateLocation::End),
            "middle" => Ok(TruncateLocation::Middle),
            "smart" => Ok(TruncateLocation::Smart),
            _ => Err(ParseTruncateLocationError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruncateOptions {
    /// Maximum number of characters in the result.
    pub length: usize,
    /// Marker inserted at the cut point.
    pub ellipsis: String,
    pub location: TruncateLocation,
}

impl Default for TruncateOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_TRUNCATE_LENGTH,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
            location: TruncateLocation::default(),
        }
    }
}

impl TruncateOptions {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }

    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    pub fn with_location(mut self, location: TruncateLocation) -> Self {
        self.location = location;
        self
    }
}

/// Shortens `text` to at most `options.length` characters.
///
/// Returns `text` unchanged when it already fits.
pub fn truncate(text: &str, options: &TruncateOptions) -> String {
    match options.location {
        TruncateLocation::End => end(text, options.length, &options.ellipsis),
        TruncateLocation::Middle => middle(text, options.length, &options.ellipsis),
        TruncateLocation::Smart => smart(text, options.length, &options.ellipsis),
    }
}

/// Keeps the beginning of `text` and appends `ellipsis`.
pub fn end(text: &str, max_len: usize, ellipsis: &str) -> String {
    if char_len(text) <= max_len {
        return text.to_string();
    }

    match text_budget(max_len, ellipsis) {
        Some(available) => format!("{}{}", take_chars(text, available), ellipsis),
        None => take_chars(text, max_len).to_string(),
    }
}

/// Keeps a prefix and a suffix of `text` joined by `ellipsis`. The prefix gets
/// the extra character when the budget is odd.
pub fn middle(text: &str, max_len: usize, ellipsis: &str) -> String {
    if char_len(text) <= max_len {
        return text.to_string();
    }

    let Some(available) = text_budget(max_len, ellipsis) else {
        return take_chars(text, max_len).to_string();
    };

    format!(
        "{}{}{}",
        take_chars(text, available.div_ceil(2)),
        ellipsis,
        last_chars(text, available / 2)
    )
}

/// URL-aware truncation.
///
/// Text shaped like `scheme://host:port/rest` keeps its scheme, host and port
/// whole while `rest` is cut in the middle. When the host part alone does not
/// fit, the whole text is cut at the end. Anything that is not URL shaped is
/// handled by [`middle`].
pub fn smart(text: &str, max_len: usize, ellipsis: &str) -> String {
    if char_len(text) <= max_len {
        return text.to_string();
    }

    let Some(caps) = url_shape_regex().captures(text) else {
        return middle(text, max_len, ellipsis);
    };

    let Some(available) = text_budget(max_len, ellipsis) else {
        return take_chars(text, max_len).to_string();
    };

    let head_end = caps
        .name("port")
        .or_else(|| caps.name("host"))
        .map_or(0, |m| m.end());
    let (head, rest) = text.split_at(head_end);
    let head_len = char_len(head);

    if rest.is_empty() || head_len >= available {
        return end(text, max_len, ellipsis);
    }

    let remaining = available - head_len;
    format!(
        "{}{}{}{}",
        head,
        take_chars(rest, remaining.div_ceil(2)),
        ellipsis,
        last_chars(rest, remaining / 2)
    )
}

/// Characters left for text once the ellipsis is placed, or `None` when the
/// ellipsis alone does not fit.
fn text_budget(max_len: usize, ellipsis: &str) -> Option<usize> {
    max_len.checked_sub(char_len(ellipsis))
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn last_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    let len = char_len(s);
    if n >= len {
        return s;
    }
    match s.char_indices().nth(len - n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}
