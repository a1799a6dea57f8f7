//! Source position arithmetic for caret diagnostics
//!
//! This crate turns a raw cursor (a zero-based character offset into a source
//! buffer) into the two things a single-point diagnostic needs:
//!
//! - [`resolve_location`]: the line/column the cursor falls on
//! - [`extract_excerpt`]: a short, single-line excerpt of the source around
//!   the cursor, plus the offset of the failing token inside that excerpt
//!
//! Both operate on characters rather than bytes, and both clamp out-of-range
//! cursors instead of failing.
//!
//! # Example
//!
//! ```rust
//! use caret_source_map::*;
//!
//! let source = "a = 1 +\n  b";
//!
//! let location = resolve_location(source, 10);
//! assert_eq!(location.line, 2);
//! assert_eq!(location.column, 2);
//!
//! let excerpt = extract_excerpt(Some(source), 10, &ExcerptWindow::default());
//! assert_eq!(excerpt.text, "b");
//! assert_eq!(excerpt.caret, Some(0));
//! ```

pub mod excerpt;
pub mod resolve;
pub mod types;
pub mod utils;

// Re-export main types
pub use excerpt::{Excerpt, ExcerptWindow, UNKNOWN_SOURCE, extract_excerpt};
pub use resolve::resolve_location;
pub use types::Location;
pub use utils::{find_chars, is_whitespace, repeat_char, trim, trim_left};
