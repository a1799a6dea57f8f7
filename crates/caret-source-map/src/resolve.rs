//! Cursor to line/column resolution

use crate::types::Location;

/// Resolve the line and column of a character cursor.
///
/// Scans the characters before `cursor`: a line feed starts a new line with
/// the column reset to 0, a carriage return is skipped, and anything else
/// advances the column. The first line starts counting from column 1, so a
/// cursor on the first line reports one column further right than the same
/// cursor on a later line. Diagnostics rely on that offset.
///
/// A cursor past the end of `source` is clamped to the end.
pub fn resolve_location(source: &str, cursor: usize) -> Location {
    let mut line = 1;
    let mut column = 1;
    let mut scanned = 0;

    for ch in source.chars().take(cursor) {
        scanned += 1;
        match ch {
            '\r' => {}
            '\n' => {
                line += 1;
                column = 0;
            }
            _ => column += 1,
        }
    }

    if scanned < cursor {
        tracing::debug!(cursor, length = scanned, "cursor past end of source, clamping");
    }
    tracing::trace!(cursor, line, column, "resolved cursor location");

    Location { line, column }
}
