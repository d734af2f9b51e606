//! Statement parsing
//!
//! [`ScriptParser`] drives the chunk splitter and classifies each chunk;
//! [`StatementParser`] turns one DSL chunk into a [`Statement`].

mod ast;
mod classifier;
mod stmt_parser;

pub use ast::{
    ExecStatement, Function, GoStatement, GoTarget, InsertStatement, PassthroughStatement,
    QueryStatement, SetStatement, Statement, Template, Timestamp, ValueType, WaitStatement,
    PLACEHOLDER,
};
pub use classifier::ScriptParser;
pub use stmt_parser::{parse_statement, StatementParser};
