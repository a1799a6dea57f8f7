//! Character helpers shared by the resolver and the excerpt extractor

/// Whether `c` separates tokens in an excerpt.
///
/// Control characters count as whitespace, as does the no-break space.
pub fn is_whitespace(c: char) -> bool {
    c <= ' ' || c == '\u{a0}' || c.is_whitespace()
}

/// Build a string of `count` copies of `c`.
pub fn repeat_char(c: char, count: usize) -> String {
    std::iter::repeat_n(c, count).collect()
}

/// Drop leading whitespace from a character slice.
pub fn trim_left(chars: &[char]) -> &[char] {
    let start = chars
        .iter()
        .position(|c| !is_whitespace(*c))
        .unwrap_or(chars.len());
    &chars[start..]
}

/// Drop leading and trailing whitespace from a character slice.
pub fn trim(chars: &[char]) -> &[char] {
    let chars = trim_left(chars);
    let end = chars
        .iter()
        .rposition(|c| !is_whitespace(*c))
        .map_or(0, |i| i + 1);
    &chars[..end]
}

/// Find the first occurrence of `needle` in `haystack`, as a character index.
///
/// An empty needle matches at index 0.
pub fn find_chars(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
