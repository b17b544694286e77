//! Error types for Filterkit.
//!
//! This module defines the error types used throughout Filterkit. Filters
//! convert these into [`minijinja::Error`] at the template boundary so that
//! failures show up as regular template errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Filterkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Filterkit.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Obfuscation Errors
    // ========================================================================
    /// The email contains characters the substitution alphabet cannot encode.
    #[error("Email contains characters that cannot be protected: {}", format_chars(.characters))]
    UnsupportedEmailCharacters {
        /// Offending characters, deduplicated, in first-occurrence order
        characters: Vec<char>,
    },

    /// A cipher key is not a permutation of the alphabet.
    #[error("Invalid cipher key: {0}")]
    InvalidKey(String),

    // ========================================================================
    // Filter Argument Errors
    // ========================================================================
    /// A filter or function received an argument it cannot use.
    #[error("Invalid argument for '{filter}': {message}")]
    InvalidArgument {
        /// Filter or function name
        filter: &'static str,
        /// Error message
        message: String,
    },

    /// A date or time value could not be parsed.
    #[error("Unable to parse date '{0}'")]
    InvalidDate(String),

    /// A strftime-style format string is malformed.
    #[error("Invalid date format '{0}'")]
    InvalidFormat(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Error loading a configuration file.
    #[error("Failed to load config from '{path}': {message}")]
    ConfigLoad {
        /// Path to the configuration file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // Wrapped Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse error.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Template error.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl Error {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(filter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            filter,
            message: message.into(),
        }
    }

    /// Creates a new config load error.
    pub fn config_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the error code for CLI exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UnsupportedEmailCharacters { .. } | Error::InvalidKey(_) => 2,
            Error::ConfigLoad { .. } | Error::Config(_) => 3,
            Error::Template(_) => 4,
            _ => 1,
        }
    }
}

fn format_chars(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| format!("{c:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<Error> for minijinja::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Template(inner) => inner,
            other => {
                minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, other.to_string())
                    .with_source(other)
            }
        }
    }
}
