//! Error types for styled_layout
//!
//! This module defines the error types used while building styled converters.
//! Per-event formatting never fails; every variant here describes a
//! construction-time or configuration-time condition.

use thiserror::Error;

/// Main error type for styled_layout operations
#[derive(Error, Debug)]
pub enum StyledLayoutError {
    /// No pattern was supplied to the converter factory
    #[error("No pattern supplied on style '{style}'")]
    MissingPattern { style: String },

    /// The pattern parser could not be obtained for the current configuration
    #[error("No pattern parser available for style '{style}'")]
    ParserUnavailable { style: String },

    /// The pattern parser rejected the pattern
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A style name (or one of its tokens) has no escape sequence
    #[error("Unknown style name: {0}")]
    UnknownStyleName(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    ConfigFileMissing(String),

    /// Invalid log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// I/O errors (reading configuration files)
    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlError {
        #[from]
        source: toml::de::Error,
    },

    /// Tracing subscriber errors
    #[error("Tracing error: {0}")]
    TracingError(String),
}

/// Result type alias for styled_layout operations
pub type Result<T> = std::result::Result<T, StyledLayoutError>;

impl StyledLayoutError {
    /// Create a new missing pattern error
    pub fn missing_pattern<S: Into<String>>(style: S) -> Self {
        Self::MissingPattern {
            style: style.into(),
        }
    }

    /// Create a new parser unavailable error
    pub fn parser_unavailable<S: Into<String>>(style: S) -> Self {
        Self::ParserUnavailable {
            style: style.into(),
        }
    }

    /// Create a new invalid pattern error
    pub fn invalid_pattern<P: Into<String>, R: Into<String>>(pattern: P, reason: R) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create a new unknown style name error
    pub fn unknown_style<S: Into<String>>(name: S) -> Self {
        Self::UnknownStyleName(name.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a new tracing error
    pub fn tracing<S: Into<String>>(msg: S) -> Self {
        Self::TracingError(msg.into())
    }

    /// Whether this error is one the converter factory degrades to
    /// "converter unavailable"
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::MissingPattern { .. }
                | Self::ParserUnavailable { .. }
                | Self::InvalidPattern { .. }
                | Self::UnknownStyleName(_)
        )
    }

    /// Get the error category for logging purposes
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingPattern { .. } => "missing_pattern",
            Self::ParserUnavailable { .. } => "parser_unavailable",
            Self::InvalidPattern { .. } => "invalid_pattern",
            Self::UnknownStyleName(_) => "unknown_style",
            Self::ConfigError(_) | Self::ConfigFileMissing(_) | Self::InvalidLogLevel(_) => {
                "config"
            }
            Self::IoError { .. } => "io",
            Self::TomlError { .. } => "toml",
            Self::TracingError(_) => "tracing",
        }
    }
}
