//! Error types for vicky

use std::path::PathBuf;

use thiserror::Error;

use crate::syntax::Role;

/// Result type alias for vicky operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
///
/// Everything the highlighting core reports is recoverable; these values are
/// usually collected as warnings next to a usable result rather than
/// returned as `Err`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Color(#[from] ColorParseError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("{0}")]
    Message(String),
}

/// Missing, unreadable or malformed configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cannot read {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("cannot write {}: {reason}", path.display())]
    Unwritable { path: PathBuf, reason: String },

    #[error("line {line}: malformed entry: {text}")]
    Syntax { line: usize, text: String },

    #[error("missing section [{0}]")]
    MissingSection(String),

    #[error("invalid value for {section}.{key}: {value:?}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },

    #[error("unknown highlighter: {0}")]
    UnknownHighlighter(String),
}

/// A theme role whose value is neither a hex triplet nor a known color name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unable to load the color for {role}: {value:?}")]
pub struct ColorParseError {
    pub role: Role,
    pub value: String,
}

/// A pattern that the regex engine rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid pattern {pattern:?}: {reason}")]
pub struct PatternError {
    pub pattern: String,
    pub reason: String,
}

impl PatternError {
    pub(crate) fn new(pattern: &str, err: &regex::Error) -> Self {
        Self {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        }
    }
}

impl ConfigError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        ConfigError::Unreadable {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_error_message_names_role() {
        let err = ColorParseError {
            role: Role::Keyword,
            value: "zzzzzz".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unable to load the color for Keyword: \"zzzzzz\""
        );
    }

    #[test]
    fn test_wrapping_is_transparent() {
        let err: Error = ConfigError::MissingSection("Colors".to_string()).into();
        assert_eq!(err.to_string(), "missing section [Colors]");
    }
}
