//! # stressql - parser for stress test scripts
//!
//! Stress scripts describe load-test workloads against a time-series
//! database. A script is a sequence of statements separated by blank lines.
//! Each statement is either a native InfluxQL query, passed through as-is,
//! or one of the DSL statements below.
//!
//! ```text
//! INSERT cpu,host=[STR rand(8) 100] value=[FLOAT rand(100) 0] 1000 10s
//!
//! GO QUERY q1 SELECT * FROM cpu WHERE host='%s' DO 100
//!
//! SET rate 5
//!
//! WAIT
//!
//! EXEC teardown
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use stressql::{parse_script, Statement};
//!
//! # fn main() -> stressql::Result<()> {
//! let statements = parse_script("SET rate 5\n\nGO EXEC loadscript\n\nWAIT\n")?;
//!
//! assert_eq!(statements.len(), 3);
//! assert!(matches!(statements[1], Statement::Go(_)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Script → ChunkSplitter → chunk → QueryValidator ─accept→ Passthrough
//!                                        │
//!                                     reject
//!                                        ↓
//!                          DslScanner → StatementParser → Statement
//! ```
//!
//! - [`ChunkSplitter`] - cuts the script at blank lines
//! - [`QueryValidator`] - decides whether a chunk is native query language
//! - [`DslScanner`] - tokenizes a DSL chunk
//! - [`StatementParser`] - recursive descent over the tokens of one chunk
//! - [`ScriptParser`] - ties it together; fails on the first bad statement
//!
//! Parsing never executes anything. `GO` only marks its statement for
//! asynchronous execution by whatever runs the result.

pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod validator;

pub use config::ParserConfig;
pub use error::{Error, Result};
pub use lexer::{Chunk, ChunkKind, ChunkSplitter, DslScanner, Token, TokenKind};
pub use parser::{
    parse_statement, ExecStatement, Function, GoStatement, GoTarget, InsertStatement,
    PassthroughStatement, QueryStatement, ScriptParser, SetStatement, Statement,
    StatementParser, Template, Timestamp, ValueType, WaitStatement,
};
pub use validator::{InfluxQlPrefix, QueryValidator, RejectAll};

/// Parses a script with the default [`ScriptParser`]
pub fn parse_script(script: &str) -> Result<Vec<Statement>> {
    ScriptParser::new().parse(script)
}
