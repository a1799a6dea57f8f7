//! Source excerpts around a cursor
//!
//! An excerpt is the trimmed text of the line the cursor sits on, cut from a
//! bounded window around the cursor, plus the offset of the failing token
//! inside it. The token is the run of non-whitespace characters starting at
//! the cursor.

use serde::{Deserialize, Serialize};

use crate::utils::{find_chars, is_whitespace, trim};

/// Excerpt text used when there is no source to quote.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// How much source surrounds the cursor in an excerpt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcerptWindow {
    /// Characters kept before the cursor
    pub before: usize,
    /// Characters kept from the cursor on
    pub after: usize,
    /// Longest token used to place the caret
    pub token_limit: usize,
}

impl Default for ExcerptWindow {
    fn default() -> Self {
        ExcerptWindow {
            before: 20,
            after: 30,
            token_limit: 30,
        }
    }
}

impl ExcerptWindow {
    /// Character range `[start, end)` of the window around `cursor`.
    ///
    /// When the window runs past the end of the buffer it is clamped to the
    /// buffer and its start moves a further `after` characters left, keeping
    /// roughly the same amount of context. `cursor` must be `<= len`.
    pub fn bounds(&self, cursor: usize, len: usize) -> (usize, usize) {
        let mut start = cursor.saturating_sub(self.before);
        let mut end = cursor.saturating_add(self.after);

        if end > len {
            end = len;
            start = start.saturating_sub(self.after);
        }

        (start, end)
    }
}

/// A single-line excerpt of source and the caret position within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    /// Trimmed excerpt text
    pub text: String,
    /// Character offset of the failing token in `text`, if it was found
    pub caret: Option<usize>,
}

impl Excerpt {
    /// An excerpt that quotes no source, with the caret at its start.
    pub fn placeholder(text: impl Into<String>) -> Self {
        Excerpt {
            text: text.into(),
            caret: Some(0),
        }
    }

    /// Caret offset to render; a token that was not found puts the caret at 0.
    pub fn caret_offset(&self) -> usize {
        self.caret.unwrap_or(0)
    }
}

/// Extract the excerpt for `cursor` from `source`.
///
/// A missing or empty source yields the [`UNKNOWN_SOURCE`] placeholder. A
/// cursor past the end of the source is clamped to the end.
pub fn extract_excerpt(source: Option<&str>, cursor: usize, window: &ExcerptWindow) -> Excerpt {
    let Some(source) = source.filter(|s| !s.is_empty()) else {
        return Excerpt::placeholder(UNKNOWN_SOURCE);
    };

    let chars: Vec<char> = source.chars().collect();
    let cursor = if cursor > chars.len() {
        tracing::debug!(cursor, length = chars.len(), "cursor past end of source, clamping");
        chars.len()
    } else {
        cursor
    };

    let (start, end) = window.bounds(cursor, chars.len());
    let token = token_at(&chars[cursor..], window.token_limit);
    let line = isolate_line(&chars[start..end], cursor - start);
    let trimmed = trim(line);
    let caret = find_chars(trimmed, token);

    tracing::trace!(
        cursor,
        start,
        end,
        token_len = token.len(),
        excerpt_len = trimmed.len(),
        "isolated excerpt line"
    );
    if caret.is_none() {
        tracing::debug!(cursor, "failing token not found in excerpt");
    }

    Excerpt {
        text: trimmed.iter().collect(),
        caret,
    }
}

/// The run of characters at the start of `rest` up to the first whitespace
/// or line feed, at most `limit` long.
fn token_at(rest: &[char], limit: usize) -> &[char] {
    let len = rest
        .iter()
        .take(limit)
        .take_while(|c| **c != '\n' && !is_whitespace(**c))
        .count();
    &rest[..len]
}

/// One step of line isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cut {
    /// Keep the text before the only line feed
    Before(usize),
    /// Keep the text after the only line feed
    After(usize),
    /// Keep the text between the first and last line feeds
    Between(usize, usize),
}

/// Decide how to cut `chars`, or `None` once no line feed is left.
///
/// `cursor` is the cursor position relative to `chars`; it may fall outside
/// them after earlier cuts. A line feed at the cursor belongs to the cursor's
/// line, so the text before it is kept.
fn next_cut(chars: &[char], cursor: isize) -> Option<Cut> {
    let first = chars.iter().position(|c| *c == '\n')?;
    let last = chars.iter().rposition(|c| *c == '\n')?;

    let cut = if first != last {
        Cut::Between(first, last)
    } else if first as isize >= cursor {
        Cut::Before(first)
    } else {
        Cut::After(first)
    };
    Some(cut)
}

/// Narrow a window down to a single line around the cursor.
///
/// Every cut drops at least one line feed, so the loop ends.
fn isolate_line(window: &[char], cursor: usize) -> &[char] {
    let mut chars = window;
    let mut cursor = cursor as isize;

    while let Some(cut) = next_cut(chars, cursor) {
        match cut {
            Cut::Before(newline) => chars = &chars[..newline],
            Cut::After(newline) => {
                chars = &chars[newline + 1..];
                cursor -= (newline + 1) as isize;
            }
            Cut::Between(first, last) => {
                chars = &chars[first + 1..last];
                cursor -= (first + 1) as isize;
            }
        }
    }

    chars
}
