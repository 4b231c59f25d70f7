//! Error types for the Congreso normalizers.
//!
//! Library crates use [`CongresoError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all normalization operations.
#[derive(Debug, thiserror::Error)]
pub enum CongresoError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Markup that cannot be used at all (e.g. the initiative container is missing).
    #[error("parse error: {message}")]
    Parse { message: String },

    /// A listing batch that is not a well-formed keyed mapping of records.
    #[error("malformed listing record {key}: {message}")]
    Listing { key: String, message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON payload that could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Data validation error (bad numeral, out-of-range value, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CongresoError>;

impl CongresoError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a listing error naming the offending record key.
    pub fn listing(key: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Listing {
            key: key.into(),
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = CongresoError::config("bad base url");
        assert_eq!(err.to_string(), "config error: bad base url");

        let err = CongresoError::listing("iniciativa7", "missing id_iniciativa");
        assert_eq!(
            err.to_string(),
            "malformed listing record iniciativa7: missing id_iniciativa"
        );

        let err = CongresoError::validation("invalid roman numeral \"XIIV\"");
        assert!(err.to_string().contains("XIIV"));
    }

    #[test]
    fn json_errors_convert() {
        let err: CongresoError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("json error:"));
    }
}
