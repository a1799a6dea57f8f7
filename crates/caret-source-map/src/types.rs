//! Core types for source positions

use serde::{Deserialize, Serialize};

/// A resolved position in source text
///
/// `line` is 1-indexed. `column` is stored the way the resolver counts it and
/// is shown to users as `column + 1` (see [`Location::display_column`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (characters, rendered with a +1 offset)
    pub column: usize,
}

impl Location {
    /// The location reported when nothing could be resolved.
    pub const UNRESOLVED: Location = Location { line: 1, column: 0 };

    pub fn new(line: usize, column: usize) -> Self {
        Location { line, column }
    }

    /// Column as printed in a diagnostic.
    pub fn display_column(&self) -> usize {
        self.column + 1
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::UNRESOLVED
    }
}
