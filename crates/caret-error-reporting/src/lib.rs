//! Compile error diagnostics for expression compilers.
//!
//! A parser or compiler that gives up at some point in its input raises a
//! [`CompileError`] carrying the failure message, the source text and the
//! cursor (a character offset) where it stopped. Rendering the error produces
//! a short, fixed-layout report:
//!
//! ```text
//! [Error: unexpected character '$']
//! [Near : {... total = price $ rate ....}]
//!                            ^
//! [Line: 1, Column: 16]
//! ```
//!
//! # Architecture
//!
//! - [`caret_source_map`] does the position arithmetic: resolving a cursor to
//!   a line/column and cutting the excerpt shown on the `Near` line.
//! - [`render`] assembles the four-line report from those pieces.
//! - [`CompileError`] owns the inputs, resolves its location lazily the first
//!   time it is needed, and implements [`std::error::Error`] so it can be
//!   propagated with `?`.
//! - [`RenderConfig`] tunes the excerpt window and placeholder text, and can
//!   be loaded from TOML.
//!
//! # Example
//!
//! ```
//! use caret_error_reporting::CompileError;
//!
//! let error = CompileError::new("unexpected token", "a = 1 +\n  b", 10);
//! assert_eq!(error.line(), 2);
//! assert!(error.describe().contains("[Near : {... b ....}]"));
//! ```
//!
//! # Thread safety
//!
//! Rendering only needs `&CompileError` and is safe to do from several
//! threads at once. The setters take `&mut self`; sharing an error between
//! threads while mutating it needs external synchronization.

pub mod compile_error;
pub mod config;
pub mod detail;
pub mod render;

// Re-export main types for convenience
pub use caret_source_map::{Excerpt, ExcerptWindow, Location};
pub use compile_error::CompileError;
pub use config::{ConfigError, ConfigResult, RenderConfig};
pub use detail::ErrorDetail;
pub use render::render_diagnostic;
