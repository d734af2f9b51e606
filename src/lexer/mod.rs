//! Lexical analysis for stress scripts
//!
//! Two stages share one rune reader: the chunk splitter cuts a script at
//! blank lines, and the DSL scanner turns one chunk into tokens.

mod char_scanner;
mod chunker;
mod dsl_scanner;
mod token;

pub use char_scanner::CharScanner;
pub use chunker::{Chunk, ChunkKind, ChunkSplitter};
pub use dsl_scanner::DslScanner;
pub use token::{Token, TokenKind};
