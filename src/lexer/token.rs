use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single token from a statement chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token, case preserved
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: String, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            column,
        }
    }

    /// True for a whitespace run that spans a line break
    pub fn is_newline_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace && self.lexeme.contains('\n')
    }
}

/// All possible token types in a DSL statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Special
    /// Character the scanner has no rule for
    Illegal,
    /// End of the chunk
    Eof,
    /// Run of spaces, tabs and newlines
    Whitespace,

    // Literals
    /// Identifier (`cpu`, `host=serverA`, `value:float`)
    Ident,
    /// Integer literal (`100`)
    Number,
    /// Number with a unit suffix (`10s`, `5m`, `100n`)
    DurationVal,
    /// Quoted string
    QuotedString,
    /// Unterminated quoted string
    BadString,
    /// `%` followed by one character (`%s`, `%d`)
    TemplateVar,

    // Punctuation
    /// `,`
    Comma,
    /// `.`
    Period,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `|`
    Pipe,

    // Keywords
    /// SET keyword
    Set,
    /// USE keyword
    Use,
    /// QUERY keyword
    Query,
    /// INSERT keyword
    Insert,
    /// GO keyword
    Go,
    /// DO keyword
    Do,
    /// WAIT keyword
    Wait,
    /// EXEC keyword
    Exec,
    /// STR value type
    Str,
    /// INT value type
    Int,
    /// FLOAT value type
    Float,
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenKind> = {
        let mut m = HashMap::new();
        m.insert("SET", TokenKind::Set);
        m.insert("USE", TokenKind::Use);
        m.insert("QUERY", TokenKind::Query);
        m.insert("INSERT", TokenKind::Insert);
        m.insert("GO", TokenKind::Go);
        m.insert("DO", TokenKind::Do);
        m.insert("WAIT", TokenKind::Wait);
        m.insert("EXEC", TokenKind::Exec);
        m.insert("STR", TokenKind::Str);
        m.insert("INT", TokenKind::Int);
        m.insert("FLOAT", TokenKind::Float);
        m
    };
}

impl TokenKind {
    /// Look up a fully scanned word in the keyword table, ignoring case
    pub fn keyword(word: &str) -> Option<TokenKind> {
        KEYWORDS.get(word.to_ascii_uppercase().as_str()).copied()
    }

    /// Check if token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Set
                | TokenKind::Use
                | TokenKind::Query
                | TokenKind::Insert
                | TokenKind::Go
                | TokenKind::Do
                | TokenKind::Wait
                | TokenKind::Exec
                | TokenKind::Str
                | TokenKind::Int
                | TokenKind::Float
        )
    }

    /// Check if token is one of the generator value types
    pub fn is_value_type(&self) -> bool {
        matches!(self, TokenKind::Str | TokenKind::Int | TokenKind::Float)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Whitespace => "WS",
            TokenKind::Ident => "IDENT",
            TokenKind::Number => "NUMBER",
            TokenKind::DurationVal => "DURATION",
            TokenKind::QuotedString => "STRING",
            TokenKind::BadString => "BADSTRING",
            TokenKind::TemplateVar => "TEMPLATEVAR",
            TokenKind::Comma => ",",
            TokenKind::Period => ".",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Pipe => "|",
            TokenKind::Set => "SET",
            TokenKind::Use => "USE",
            TokenKind::Query => "QUERY",
            TokenKind::Insert => "INSERT",
            TokenKind::Go => "GO",
            TokenKind::Do => "DO",
            TokenKind::Wait => "WAIT",
            TokenKind::Exec => "EXEC",
            TokenKind::Str => "STRING",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
        };
        f.write_str(name)
    }
}
