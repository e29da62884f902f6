//! Error types for internparse.
//!
//! Library crates use [`InternParseError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Only two extraction paths are fail-fast: malformed working hours
//! ([`InternParseError::InvalidFormat`]) and non-numeric posting ids
//! ([`InternParseError::InvalidIdentifier`]). Every other parser degrades to a
//! value-level default instead of returning an error.

use std::path::PathBuf;

/// Top-level error type for all internparse operations.
#[derive(Debug, thiserror::Error)]
pub enum InternParseError {
    /// A field whose phrasing must be exact could not be parsed.
    #[error("invalid time format: {message}")]
    InvalidFormat { message: String },

    /// A record identifier that must be numeric was not.
    #[error("invalid identifier: {value:?}")]
    InvalidIdentifier { value: String },

    /// Bad or unreadable `internparse.toml`.
    #[error("config error: {message}")]
    Config { message: String },

    /// Malformed JSON/TOML input, or an unknown field kind.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Reading a config, taxonomy or input file failed.
    #[error("cannot access {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Inconsistent data (e.g. a taxonomy listing one major under two colleges).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// `Result` carrying [`InternParseError`].
pub type Result<T> = std::result::Result<T, InternParseError>;

impl InternParseError {
    /// Create an invalid-format error from any displayable message.
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: msg.into(),
        }
    }

    /// Create an invalid-identifier error carrying the offending value.
    pub fn invalid_identifier(value: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            value: value.into(),
        }
    }

    /// Config file problem.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Unparseable input document.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Inconsistent taxonomy or other structurally invalid data.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
