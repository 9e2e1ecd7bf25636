//! Error types for the meridian library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all adapter operations.
#[derive(Error, Debug)]
pub enum MeridianError {
    /// Text or field value that cannot be read as a point in time
    #[error("Invalid timestamp '{input}': {reason}")]
    InvalidTimestamp { input: String, reason: String },
    /// A selector that should have matched an element matched nothing
    #[error("No element matches selector '{selector}'")]
    MissingElement { selector: String },
    /// The environment could not supply the visitor's offset
    #[error("Timezone offset unavailable: {0}")]
    OffsetUnavailable(String),
    /// Offset outside UTC-12:00..=UTC+14:00
    #[error("Timezone offset of {minutes} minutes is outside the supported range")]
    OffsetOutOfRange { minutes: i32 },
    /// Flag field holding something other than "true" or "false"
    #[error("Invalid conversion flag value '{value}'")]
    InvalidFlag { value: String },
    /// Selector text that cannot be parsed
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
    /// Clipboard write rejected by the environment
    #[error("{message}")]
    ClipboardUnavailable { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating timestamp errors.
pub struct InvalidTimestampBuilder {
    input: String,
}

impl InvalidTimestampBuilder {
    /// Create a new timestamp error builder for the offending input.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl fmt::Display) -> MeridianError {
        MeridianError::InvalidTimestamp {
            input: self.input,
            reason: reason.to_string(),
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> MeridianError {
        MeridianError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl MeridianError {
    /// Creates a builder for timestamp errors.
    pub fn invalid_timestamp(input: impl Into<String>) -> InvalidTimestampBuilder {
        InvalidTimestampBuilder::new(input)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a missing element error for a selector.
    pub fn missing_element(selector: impl Into<String>) -> Self {
        Self::MissingElement {
            selector: selector.into(),
        }
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T, E> {
    /// Add context to any error type, converting to MeridianError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| MeridianError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, MeridianError>;
