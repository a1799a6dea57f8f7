//! Render configuration.
//!
//! Controls how much source the `Near` line quotes and what it shows when
//! there is no source at all. Configurations can be written in TOML:
//!
//! ```toml
//! placeholder = "<no source>"
//!
//! [window]
//! before = 10
//! after = 15
//! token_limit = 15
//! ```
//!
//! Every field is optional and falls back to its default.

use caret_source_map::{ExcerptWindow, UNKNOWN_SOURCE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a render configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid TOML, or a field has the wrong type.
    #[error("Failed to parse render configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field parsed but its value cannot be used.
    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// How a [`CompileError`](crate::CompileError) renders its excerpt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Excerpt window around the cursor
    pub window: ExcerptWindow,
    /// Text quoted when the error has no source
    pub placeholder: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            window: ExcerptWindow::default(),
            placeholder: UNKNOWN_SOURCE.to_string(),
        }
    }
}

impl RenderConfig {
    /// Parse and validate a TOML render configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use caret_error_reporting::RenderConfig;
    ///
    /// let config = RenderConfig::from_toml_str("[window]\nbefore = 5").unwrap();
    /// assert_eq!(config.window.before, 5);
    /// assert_eq!(config.window.after, 30);
    /// assert_eq!(config.placeholder, "Unknown");
    /// ```
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        let config: RenderConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can render an excerpt.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.window.before.saturating_add(self.window.after) == 0 {
            return Err(ConfigError::Invalid {
                field: "window".to_string(),
                reason: "window must include at least one character".to_string(),
            });
        }
        if self.window.token_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "window.token_limit".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.placeholder.is_empty() {
            return Err(ConfigError::Invalid {
                field: "placeholder".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
