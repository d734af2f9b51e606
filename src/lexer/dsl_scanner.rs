use super::char_scanner::CharScanner;
use super::token::{Token, TokenKind};

/// Scanner for the statement DSL
///
/// Works on the text of one chunk and hands out one token per `scan` call.
/// Characters it has no rule for come back as `Illegal` tokens; the parser
/// decides whether that is an error.
pub struct DslScanner<'a> {
    source: &'a str,
    chars: CharScanner<'a>,
}

fn is_whitespace(ch: char) -> bool {
    ch == ' ' || ch == '\t' || ch == '\n'
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | ':' | '=' | '-')
}

impl<'a> DslScanner<'a> {
    /// Creates a scanner over a single chunk
    pub fn new(source: &'a str) -> Self {
        DslScanner {
            source,
            chars: CharScanner::new(source),
        }
    }

    /// Scans the next token; returns `Eof` forever once the chunk is spent
    pub fn scan(&mut self) -> Token {
        let start = self.chars.offset();
        let (line, column) = self.chars.position();

        let kind = match self.chars.read() {
            None => TokenKind::Eof,
            Some(c) if is_whitespace(c) => self.scan_whitespace(),
            Some(c) if is_letter(c) || c == '"' => self.scan_ident(start),
            Some(c) if c.is_ascii_digit() => self.scan_number(),
            Some('%') => {
                // the character after `%` is taken as-is
                self.chars.read();
                TokenKind::TemplateVar
            }
            Some(',') => TokenKind::Comma,
            Some('.') => TokenKind::Period,
            Some('(') => TokenKind::LeftParen,
            Some(')') => TokenKind::RightParen,
            Some('[') => TokenKind::LeftBracket,
            Some(']') => TokenKind::RightBracket,
            Some('|') => TokenKind::Pipe,
            Some(_) => TokenKind::Illegal,
        };

        let lexeme = self.source[start..self.chars.offset()].to_string();
        Token::new(kind, lexeme, line, column)
    }

    /// Scans every token up to and including `Eof`
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    fn scan_whitespace(&mut self) -> TokenKind {
        while let Some(c) = self.chars.read() {
            if !is_whitespace(c) {
                self.chars.unread();
                break;
            }
        }
        TokenKind::Whitespace
    }

    fn scan_ident(&mut self, start: usize) -> TokenKind {
        while let Some(c) = self.chars.read() {
            if !is_ident_char(c) {
                self.chars.unread();
                break;
            }
        }

        let word = &self.source[start..self.chars.offset()];
        TokenKind::keyword(word).unwrap_or(TokenKind::Ident)
    }

    fn scan_number(&mut self) -> TokenKind {
        while let Some(c) = self.chars.read() {
            match c {
                'n' | 's' | 'm' => return TokenKind::DurationVal,
                c if c.is_ascii_digit() => {}
                _ => {
                    self.chars.unread();
                    break;
                }
            }
        }
        TokenKind::Number
    }
}
