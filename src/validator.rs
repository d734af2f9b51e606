//! Native query language hook
//!
//! Before a chunk is treated as DSL it is offered to a [`QueryValidator`].
//! A chunk the validator accepts is kept verbatim as a passthrough statement.

use lazy_static::lazy_static;
use regex::Regex;

/// Decides whether a chunk is a statement of the native query language
///
/// Implementations must not have side effects and must not panic on
/// malformed input; rejecting is the only way to signal "not mine".
pub trait QueryValidator {
    /// True when `text` parses as a native statement
    fn accepts(&self, text: &str) -> bool;
}

impl<F> QueryValidator for F
where
    F: Fn(&str) -> bool,
{
    fn accepts(&self, text: &str) -> bool {
        self(text)
    }
}

/// Validator that recognises nothing, so every chunk is parsed as DSL
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAll;

impl QueryValidator for RejectAll {
    fn accepts(&self, _text: &str) -> bool {
        false
    }
}

lazy_static! {
    static ref INFLUXQL_STATEMENT: Regex = Regex::new(
        r"(?i)^\s*(?:(?:select|show|create|drop|delete|alter|grant|revoke|kill|explain)\b|set\s+password\s+for\b)"
    )
    .expect("static InfluxQL statement pattern is valid");
}

/// Recognises InfluxQL statements by their leading verb
///
/// This only looks at how a chunk starts; it does not check the rest of the
/// statement.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfluxQlPrefix;

impl QueryValidator for InfluxQlPrefix {
    fn accepts(&self, text: &str) -> bool {
        INFLUXQL_STATEMENT.is_match(text)
    }
}
