// Error types for reference extraction and tokenization
//
// Shape and pattern-table problems fail fast before any traversal starts.
// A node whose value does not resolve to the requested type is not an error:
// it is filtered out and never reaches this enum.

use thiserror::Error;

/// Errors raised by the extraction engine and the tokenizer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    /// A required argument is missing or of the wrong shape
    /// (empty pattern collection, root that is not a file root, bad regex, ...)
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// A text argument is empty or consists only of whitespace
    #[error("argument `{name}` cannot be empty or whitespace only")]
    EmptyInput { name: &'static str },

    /// An explicit numeric-to-text coercion could not produce text
    #[error("cannot convert value `{value}` to text")]
    ConversionFailure { value: String },
}

impl ExtractError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        ExtractError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

impl From<regex::Error> for ExtractError {
    fn from(err: regex::Error) -> Self {
        ExtractError::invalid_argument("pattern", err.to_string())
    }
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;
