//! Error types for the stress script parser

use thiserror::Error;

/// Parser errors
///
/// Every variant is fatal to the whole script: the classifier stops at the
/// first error and returns no statements.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A token did not match what the grammar requires at this point
    ///
    /// **Triggered by:** a statement whose shape does not match its keyword
    /// **Example:** `SET rate` (missing value), `QUERY q1 select 1 DO many`
    #[error("found {found:?}, expected {expected} (line {line}, column {column})")]
    UnexpectedToken {
        /// Token category the grammar wanted
        expected: String,
        /// Lexeme that was actually found
        found: String,
        /// Line within the chunk (1-indexed)
        line: usize,
        /// Column within the chunk (1-indexed)
        column: usize,
    },

    /// The chunk starts with something that is not a statement keyword
    #[error("unknown statement starting with {found:?} (line {line}, column {column})")]
    UnknownStatement {
        /// Leading lexeme of the chunk
        found: String,
        /// Line within the chunk (1-indexed)
        line: usize,
        /// Column within the chunk (1-indexed)
        column: usize,
    },

    /// A bracketed `[...]` template inside an INSERT failed to parse
    #[error("template error: {0}")]
    TemplateError(#[source] Box<Error>),

    /// A `TYPE name(argument) count` generator function failed to parse
    #[error("function error: {0}")]
    FunctionError(#[source] Box<Error>),

    /// The trailing timestamp of an INSERT failed to parse
    #[error("timestamp error: {0}")]
    TimestampError(#[source] Box<Error>),

    /// Parser configuration could not be decoded
    #[error("invalid parser configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Build an unexpected-token error
    pub fn unexpected(
        expected: impl Into<String>,
        found: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Error::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            line,
            column,
        }
    }

    /// True for errors raised while parsing script text
    pub fn is_syntax(&self) -> bool {
        !matches!(self, Error::InvalidConfig(_))
    }

    /// Strip template/function/timestamp wrappers down to the first mismatch
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::TemplateError(inner)
            | Error::FunctionError(inner)
            | Error::TimestampError(inner) => inner.root_cause(),
            other => other,
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, Error>;
