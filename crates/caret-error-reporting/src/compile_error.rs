//! The compile error diagnostic.

use std::error::Error as StdError;
use std::fmt;

use caret_source_map::{Excerpt, Location, extract_excerpt, resolve_location};
use once_cell::sync::OnceCell;

use crate::config::RenderConfig;
use crate::detail::ErrorDetail;
use crate::render::render_diagnostic;

type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// A compile failure anchored at a cursor in the source being compiled.
///
/// The error keeps the message, the source and the cursor exactly as the
/// parser supplied them. Its line and column come from one of three places,
/// in order of precedence:
///
/// 1. values set with [`set_line`](Self::set_line) / [`set_column`](Self::set_column)
///    or taken from the first [`ErrorDetail`] at construction
/// 2. a scan of the source up to the cursor, done on first use and cached
/// 3. [`Location::UNRESOLVED`] when there is no source to scan
///
/// Line and column are pinned independently, so setting only the line still
/// scans for the column. Changing the source or the cursor drops the cached
/// scan.
#[derive(Debug)]
pub struct CompileError {
    message: String,
    source: Option<String>,
    cursor: usize,
    line: Option<usize>,
    column: Option<usize>,
    location_suppressed: bool,
    scanned: OnceCell<Location>,
    errors: Vec<ErrorDetail>,
    last_line_start: usize,
    cause: Option<Cause>,
    config: RenderConfig,
}

impl CompileError {
    /// Create an error at `cursor` in `source`.
    pub fn new(message: impl Into<String>, source: impl Into<String>, cursor: usize) -> Self {
        Self::build(message.into(), Some(source.into()), cursor)
    }

    /// Create an error for input whose source text is not available.
    pub fn without_source(message: impl Into<String>, cursor: usize) -> Self {
        Self::build(message.into(), None, cursor)
    }

    /// Create an error that wraps a lower-level failure.
    ///
    /// The failure is returned by [`std::error::Error::source`].
    pub fn with_cause(
        message: impl Into<String>,
        source: impl Into<String>,
        cursor: usize,
        cause: impl Into<Cause>,
    ) -> Self {
        let mut error = Self::new(message, source, cursor);
        error.cause = Some(cause.into());
        error
    }

    /// Create an error from parser-reported error records.
    ///
    /// The first record's row and column become the error's location.
    pub fn with_errors(
        message: impl Into<String>,
        errors: Vec<ErrorDetail>,
        source: impl Into<String>,
        cursor: usize,
    ) -> Self {
        let mut error = Self::new(message, source, cursor);
        if let Some(first) = errors.first() {
            tracing::debug!(
                row = first.row(),
                col = first.col(),
                "location taken from first error detail"
            );
            error.line = Some(first.row());
            error.column = Some(first.col());
        }
        error.errors = errors;
        error
    }

    fn build(message: String, source: Option<String>, cursor: usize) -> Self {
        CompileError {
            message,
            source,
            cursor,
            line: None,
            column: None,
            location_suppressed: false,
            scanned: OnceCell::new(),
            errors: Vec::new(),
            last_line_start: 0,
            cause: None,
            config: RenderConfig::default(),
        }
    }

    /// Render with a different configuration.
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// The message supplied by the parser, without any source context.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_text(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn errors(&self) -> &[ErrorDetail] {
        &self.errors
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn last_line_start(&self) -> usize {
        self.last_line_start
    }

    /// Resolved line (1-indexed).
    pub fn line(&self) -> usize {
        self.resolved_location().line
    }

    /// Resolved column, as stored (rendered with a +1 offset).
    pub fn column(&self) -> usize {
        self.resolved_location().column
    }

    /// The location printed on the last line, or `None` when suppressed.
    pub fn location(&self) -> Option<Location> {
        if self.location_suppressed {
            None
        } else {
            Some(self.resolved_location())
        }
    }

    pub fn is_location_suppressed(&self) -> bool {
        self.location_suppressed
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = Some(source.into());
        self.scanned = OnceCell::new();
    }

    pub fn clear_source(&mut self) {
        self.source = None;
        self.scanned = OnceCell::new();
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
        self.scanned = OnceCell::new();
    }

    /// Pin the line, overriding the scanned one.
    pub fn set_line(&mut self, line: usize) {
        self.line = Some(line);
    }

    /// Pin the column, overriding the scanned one.
    pub fn set_column(&mut self, column: usize) {
        self.column = Some(column);
    }

    /// Replace the error records. The location is not touched.
    pub fn set_errors(&mut self, errors: Vec<ErrorDetail>) {
        self.errors = errors;
    }

    pub fn set_last_line_start(&mut self, last_line_start: usize) {
        self.last_line_start = last_line_start;
    }

    /// Leave the `[Line: .., Column: ..]` line out of the rendering.
    pub fn suppress_location(&mut self) {
        self.location_suppressed = true;
    }

    /// The excerpt shown on the `Near` line.
    pub fn excerpt(&self) -> Excerpt {
        match self.scannable_source() {
            Some(source) => extract_excerpt(Some(source), self.cursor, &self.config.window),
            None => Excerpt::placeholder(self.config.placeholder.as_str()),
        }
    }

    /// Render the full diagnostic text.
    ///
    /// # Example
    ///
    /// ```
    /// use caret_error_reporting::CompileError;
    ///
    /// let error = CompileError::new("unknown variable", "x + yy", 4);
    /// assert_eq!(
    ///     error.describe(),
    ///     "[Error: unknown variable]\n\
    ///      [Near : {... x + yy ....}]\n                 ^\n\
    ///      [Line: 1, Column: 6]"
    /// );
    /// ```
    pub fn describe(&self) -> String {
        let location = self.location();
        render_diagnostic(&self.message, &self.excerpt(), location.as_ref())
    }

    /// Render the diagnostic as a JSON value.
    ///
    /// ```json
    /// {
    ///   "message": "unknown variable",
    ///   "near": "x + yy",
    ///   "caret": 4,
    ///   "location": { "line": 1, "column": 6 },
    ///   "errors": []
    /// }
    /// ```
    ///
    /// `location.column` is the rendered column. `location` is left out when
    /// the location is suppressed.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        let excerpt = self.excerpt();
        let mut obj = json!({
            "message": self.message,
            "near": excerpt.text,
            "caret": excerpt.caret_offset(),
            "errors": self.errors,
        });

        if let Some(location) = self.location() {
            obj["location"] = json!({
                "line": location.line,
                "column": location.display_column(),
            });
        }

        obj
    }

    fn scannable_source(&self) -> Option<&str> {
        self.source.as_deref().filter(|s| !s.is_empty())
    }

    fn scanned_location(&self) -> Location {
        *self.scanned.get_or_init(|| match self.scannable_source() {
            Some(source) => resolve_location(source, self.cursor),
            None => Location::UNRESOLVED,
        })
    }

    fn resolved_location(&self) -> Location {
        match (self.line, self.column) {
            (Some(line), Some(column)) => Location { line, column },
            (line, column) => {
                let scanned = self.scanned_location();
                Location {
                    line: line.unwrap_or(scanned.line),
                    column: column.unwrap_or(scanned.column),
                }
            }
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl StdError for CompileError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new() {
        let error = CompileError::new("oops", "abc", 1);
        assert_eq!(error.message(), "oops");
        assert_eq!(error.source_text(), Some("abc"));
        assert_eq!(error.cursor(), 1);
        assert!(error.errors().is_empty());
        assert_eq!(error.last_line_start(), 0);
        assert!(!error.is_location_suppressed());
    }

    #[test]
    fn test_line_after_newline() {
        let error = CompileError::new("unexpected token", "a = 1 +\n  b", 8);
        assert_eq!(error.line(), 2);
        assert_eq!(error.column(), 0);
        assert_eq!(
            error.describe(),
            "[Error: unexpected token]\n\
             [Near : {... b ....}]\n             ^\n\
             [Line: 2, Column: 1]"
        );
    }

    #[test]
    fn test_empty_source() {
        let error = CompileError::new("empty input", "", 0);
        assert_eq!(error.location(), Some(Location::UNRESOLVED));
        assert_eq!(error.excerpt(), Excerpt::placeholder("Unknown"));
        assert_eq!(
            error.describe(),
            "[Error: empty input]\n\
             [Near : {... Unknown ....}]\n             ^\n\
             [Line: 1, Column: 1]"
        );
    }

    #[test]
    fn test_without_source() {
        let error = CompileError::without_source("no input", 12);
        assert_eq!(error.source_text(), None);
        assert_eq!(error.line(), 1);
        assert_eq!(error.column(), 0);
        assert!(error.describe().contains("[Near : {... Unknown ....}]"));
    }

    #[test]
    fn test_placeholder_from_config() {
        let config = RenderConfig {
            placeholder: "<no source>".to_string(),
            ..RenderConfig::default()
        };
        let error = CompileError::without_source("no input", 0).with_config(config);
        assert!(error.describe().contains("[Near : {... <no source> ....}]"));
    }

    #[test]
    fn test_end_of_input() {
        let error = CompileError::new("unexpected end of input", "xx", 2);
        assert_eq!(error.excerpt().text, "xx");
        assert_eq!(error.excerpt().caret, Some(0));
        assert_eq!(error.location(), Some(Location::new(1, 3)));
    }

    #[test]
    fn test_error_details_pin_location() {
        let error = CompileError::with_errors(
            "type mismatch",
            vec![ErrorDetail::new(5, 3), ErrorDetail::new(9, 9)],
            "a\nb",
            2,
        );
        assert_eq!(error.line(), 5);
        assert_eq!(error.column(), 3);
        assert!(error.describe().ends_with("[Line: 5, Column: 4]"));
        assert_eq!(error.errors().len(), 2);
    }

    #[test]
    fn test_error_details_pin_zero_column() {
        let error = CompileError::with_errors("bad", vec![ErrorDetail::new(4, 0)], "abcdef", 5);
        assert_eq!(error.location(), Some(Location::new(4, 0)));
    }

    #[test]
    fn test_empty_error_details_scan() {
        let error = CompileError::with_errors("bad", Vec::new(), "ab\ncd", 4);
        assert_eq!(error.location(), Some(Location::new(2, 1)));
    }

    #[test]
    fn test_set_errors_keeps_location() {
        let mut error = CompileError::new("bad", "abc", 1);
        error.set_errors(vec![ErrorDetail::new(7, 7)]);
        assert_eq!(error.location(), Some(Location::new(1, 2)));
        assert_eq!(error.errors(), &[ErrorDetail::new(7, 7)]);
    }

    #[test]
    fn test_set_line_only_scans_column() {
        let mut error = CompileError::new("bad", "ab\ncd", 4);
        error.set_line(10);
        assert_eq!(error.location(), Some(Location::new(10, 1)));

        error.set_column(0);
        assert_eq!(error.location(), Some(Location::new(10, 0)));
    }

    #[test]
    fn test_set_cursor_rescans() {
        let mut error = CompileError::new("bad", "ab\ncd", 1);
        assert_eq!(error.location(), Some(Location::new(1, 2)));
        assert!(error.describe().contains("[Near : {... ab ....}]"));

        error.set_cursor(4);
        assert_eq!(error.location(), Some(Location::new(2, 1)));
        assert!(error.describe().contains("[Near : {... cd ....}]"));
    }

    #[test]
    fn test_set_source_rescans() {
        let mut error = CompileError::new("bad", "abc", 2);
        assert_eq!(error.line(), 1);

        error.set_source("\n\nabc");
        assert_eq!(error.line(), 3);

        error.clear_source();
        assert_eq!(error.location(), Some(Location::UNRESOLVED));
    }

    #[test]
    fn test_suppress_location() {
        let mut error = CompileError::new("bad", "abc", 1);
        error.suppress_location();
        assert_eq!(error.location(), None);
        assert_eq!(error.line(), 1);
        assert_eq!(
            error.describe(),
            "[Error: bad]\n[Near : {... abc ....}]\n              ^"
        );
    }

    #[test]
    fn test_last_line_start_is_inert() {
        let mut error = CompileError::new("bad", "abc\ndef", 5);
        let before = error.describe();
        error.set_last_line_start(4);
        assert_eq!(error.last_line_start(), 4);
        assert_eq!(error.describe(), before);
    }

    #[test]
    fn test_describe_is_idempotent() {
        let error = CompileError::new("bad", "first line\nsecond line\nthird line", 18);
        assert_eq!(error.describe(), error.describe());
        assert_eq!(error.to_string(), error.describe());
    }

    #[test]
    fn test_cause_is_error_source() {
        let io = std::io::Error::other("disk on fire");
        let error = CompileError::with_cause("could not read include", "include 'x'", 8, io);

        let source = error.source().expect("cause should be exposed");
        assert_eq!(source.to_string(), "disk on fire");
    }

    #[test]
    fn test_no_cause() {
        let error = CompileError::new("bad", "abc", 0);
        assert!(error.source().is_none());
    }

    #[test]
    fn test_boxed_error_propagation() {
        fn compile(input: &str) -> Result<(), Box<dyn StdError + Send + Sync>> {
            Err(CompileError::new("unexpected token", input, 2))?
        }

        let err = compile("1 ) 2").unwrap_err();
        assert!(err.to_string().starts_with("[Error: unexpected token]"));
    }

    #[test]
    fn test_to_json() {
        let error = CompileError::new("unknown variable", "x + yy", 4);
        let json = error.to_json();

        assert_eq!(json["message"], "unknown variable");
        assert_eq!(json["near"], "x + yy");
        assert_eq!(json["caret"], 4);
        assert_eq!(json["location"]["line"], 1);
        assert_eq!(json["location"]["column"], 6);
        assert_eq!(json["errors"], serde_json::json!([]));
    }

    #[test]
    fn test_to_json_suppressed_location() {
        let mut error = CompileError::with_errors(
            "bad",
            vec![ErrorDetail::new(2, 1).with_message("here")],
            "a\nb",
            2,
        );
        error.suppress_location();
        let json = error.to_json();

        assert!(json.get("location").is_none());
        assert_eq!(json["errors"][0]["row"], 2);
        assert_eq!(json["errors"][0]["message"], "here");
    }
}
