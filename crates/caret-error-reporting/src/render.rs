//! Text rendering of compile errors.
//!
//! Layout:
//! ```text
//! [Error: <message>]
//! [Near : {... <excerpt> ....}]
//!              ^
//! [Line: <line>, Column: <column + 1>]
//! ```
//!
//! The caret is indented past the `[Near : {... ` prefix so it sits under the
//! failing token. The last line is left out when the location is suppressed.

use caret_source_map::{Excerpt, Location, repeat_char};

/// Text before the excerpt on the `Near` line.
pub const NEAR_PREFIX: &str = "[Near : {... ";

/// Text after the excerpt on the `Near` line.
pub const NEAR_SUFFIX: &str = " ....}]";

/// Assemble the diagnostic text.
///
/// # Example
///
/// ```
/// use caret_error_reporting::{Excerpt, Location, render_diagnostic};
///
/// let excerpt = Excerpt { text: "x = = 1".to_string(), caret: Some(4) };
/// let text = render_diagnostic("unexpected '='", &excerpt, Some(&Location::new(3, 4)));
/// assert_eq!(
///     text,
///     "[Error: unexpected '=']\n\
///      [Near : {... x = = 1 ....}]\n                 ^\n\
///      [Line: 3, Column: 5]"
/// );
/// ```
pub fn render_diagnostic(message: &str, excerpt: &Excerpt, location: Option<&Location>) -> String {
    let mut result = String::new();

    result.push_str(&format!("[Error: {}]\n", message));
    result.push_str(&format!("{}{}{}\n", NEAR_PREFIX, excerpt.text, NEAR_SUFFIX));

    let indent = NEAR_PREFIX.chars().count() + excerpt.caret_offset();
    result.push_str(&repeat_char(' ', indent));
    result.push('^');

    if let Some(location) = location {
        result.push_str(&format!(
            "\n[Line: {}, Column: {}]",
            location.line,
            location.display_column()
        ));
    }

    result
}
