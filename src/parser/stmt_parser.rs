use super::ast::{
    ExecStatement, Function, GoStatement, GoTarget, InsertStatement, QueryStatement,
    SetStatement, Statement, Template, Timestamp, ValueType, WaitStatement, PLACEHOLDER,
};
use crate::error::{Error, Result};
use crate::lexer::{DslScanner, Token, TokenKind};

/// Recursive descent parser for one DSL statement
///
/// Pulls tokens from a [`DslScanner`] on demand and keeps the last one so it
/// can be pushed back once with `unscan`.
pub struct StatementParser<'a> {
    scanner: DslScanner<'a>,
    /// Last token returned by `scan`
    buf: Token,
    /// Whether `buf` is waiting to be returned again
    unscanned: bool,
    /// Error on tokens left over after a complete statement
    reject_trailing: bool,
}

impl<'a> StatementParser<'a> {
    /// Creates a parser over the text of one chunk
    pub fn new(source: &'a str) -> Self {
        StatementParser {
            scanner: DslScanner::new(source),
            buf: Token::new(TokenKind::Eof, String::new(), 1, 1),
            unscanned: false,
            reject_trailing: true,
        }
    }

    /// Whether leftover tokens after the statement are an error (default: yes)
    pub fn reject_trailing_tokens(mut self, reject: bool) -> Self {
        self.reject_trailing = reject;
        self
    }

    /// Parses the chunk into a single statement
    pub fn parse(&mut self) -> Result<Statement> {
        let first = self.scan_ignore_whitespace();
        self.unscan();

        tracing::trace!(keyword = %first.kind, line = first.line, "dispatching statement");

        let stmt = match first.kind {
            TokenKind::Query => Statement::Query(self.parse_query()?),
            TokenKind::Insert => Statement::Insert(self.parse_insert()?),
            TokenKind::Exec => Statement::Exec(self.parse_exec()?),
            TokenKind::Set => Statement::Set(self.parse_set()?),
            TokenKind::Go => Statement::Go(self.parse_go()?),
            TokenKind::Wait => Statement::Wait(self.parse_wait()?),
            _ => {
                return Err(Error::UnknownStatement {
                    found: Self::describe(&first),
                    line: first.line,
                    column: first.column,
                })
            }
        };

        if self.reject_trailing {
            let tok = self.scan_ignore_whitespace();
            if tok.kind != TokenKind::Eof {
                return Err(Self::unexpected("end of statement", &tok));
            }
        }

        Ok(stmt)
    }

    /// Parse `INSERT name field-list timestamp`
    fn parse_insert(&mut self) -> Result<InsertStatement> {
        self.expect(TokenKind::Insert, "INSERT")?;
        let name = self.expect_ident()?;

        // `INSERT cpu,host=a ...` has no space between name and tags
        if self.scan().kind != TokenKind::Whitespace {
            self.unscan();
        }

        let mut template_string = String::new();
        let mut templates = Vec::new();
        let mut prev = None;

        let timestamp = loop {
            let tok = self.scan();
            if tok.kind == TokenKind::Whitespace {
                if prev != Some(TokenKind::Comma) {
                    template_string.push(' ');
                }
                continue;
            }
            prev = Some(tok.kind);

            match tok.kind {
                TokenKind::LeftBracket => {
                    template_string.push_str(PLACEHOLDER);
                    let template = self
                        .parse_template()
                        .map_err(|e| Error::TemplateError(Box::new(e)))?;
                    templates.push(template);
                }
                TokenKind::Number | TokenKind::DurationVal => {
                    template_string.push_str(PLACEHOLDER);
                    self.unscan();
                    break self
                        .parse_timestamp()
                        .map_err(|e| Error::TimestampError(Box::new(e)))?;
                }
                TokenKind::Ident | TokenKind::Comma => template_string.push_str(&tok.lexeme),
                _ => return Err(Self::unexpected("IDENT or COMMA", &tok)),
            }
        };

        Ok(InsertStatement {
            name,
            template_string,
            templates,
            timestamp: Some(timestamp),
        })
    }

    /// Parse the inside of `[...]`; the opening bracket is already consumed
    fn parse_template(&mut self) -> Result<Template> {
        let mut template = Template::default();

        loop {
            let tok = self.scan_ignore_whitespace();
            match tok.kind {
                TokenKind::Ident => template.tags.push(tok.lexeme),
                kind if kind.is_value_type() => {
                    self.unscan();
                    let function = self
                        .parse_function()
                        .map_err(|e| Error::FunctionError(Box::new(e)))?;
                    template.functions.push(function);
                }
                TokenKind::Comma => continue,
                TokenKind::RightBracket => return Ok(template),
                _ => return Err(Self::unexpected("IDENT, STR, INT, FLOAT or ]", &tok)),
            }
        }
    }

    /// Parse `TYPE name(argument) count`
    fn parse_function(&mut self) -> Result<Function> {
        let tok = self.scan_ignore_whitespace();
        let value_type = match tok.kind {
            TokenKind::Str => ValueType::Str,
            TokenKind::Int => ValueType::Int,
            TokenKind::Float => ValueType::Float,
            _ => return Err(Self::unexpected("STR, INT or FLOAT", &tok)),
        };

        let name = self.expect_ident()?;
        self.expect(TokenKind::LeftParen, "(")?;
        let argument = self.expect(TokenKind::Number, "NUMBER")?.lexeme;
        self.expect(TokenKind::RightParen, ")")?;
        let count = self.expect(TokenKind::Number, "NUMBER")?.lexeme;

        Ok(Function {
            value_type,
            name,
            argument,
            count,
        })
    }

    /// Parse `NUMBER DURATION`, or a lone `DURATION` split into count and unit
    fn parse_timestamp(&mut self) -> Result<Timestamp> {
        let tok = self.scan_ignore_whitespace();
        let (count, duration) = match tok.kind {
            TokenKind::Number => {
                let duration = self.expect(TokenKind::DurationVal, "DURATION")?.lexeme;
                (tok.lexeme, duration)
            }
            TokenKind::DurationVal => {
                let split = tok
                    .lexeme
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(tok.lexeme.len());
                let (count, unit) = tok.lexeme.split_at(split);
                (count.to_string(), unit.to_string())
            }
            _ => return Err(Self::unexpected("NUMBER", &tok)),
        };

        Ok(Timestamp {
            count,
            duration,
            jitter: false,
        })
    }

    /// Parse `QUERY name body DO count`
    fn parse_query(&mut self) -> Result<QueryStatement> {
        self.expect(TokenKind::Query, "QUERY")?;
        let name = self.expect_ident()?;

        let mut template_string = String::new();
        let mut args = Vec::new();

        let count = loop {
            let tok = self.scan();
            match tok.kind {
                TokenKind::TemplateVar => {
                    template_string.push_str(PLACEHOLDER);
                    args.push(tok.lexeme);
                }
                TokenKind::Do => break self.expect(TokenKind::Number, "NUMBER")?.lexeme,
                TokenKind::Eof => return Err(Self::unexpected("DO", &tok)),
                TokenKind::Whitespace if tok.is_newline_whitespace() => continue,
                _ => template_string.push_str(&tok.lexeme),
            }
        };

        Ok(QueryStatement {
            name,
            template_string: template_string.trim().to_string(),
            args,
            count,
        })
    }

    /// Parse `EXEC script`
    fn parse_exec(&mut self) -> Result<ExecStatement> {
        self.expect(TokenKind::Exec, "EXEC")?;
        let script_name = self.expect_ident()?;
        Ok(ExecStatement { script_name })
    }

    /// Parse `SET variable value`
    fn parse_set(&mut self) -> Result<SetStatement> {
        self.expect(TokenKind::Set, "SET")?;
        let variable_name = self.expect_ident()?;

        let tok = self.scan_ignore_whitespace();
        match tok.kind {
            TokenKind::Ident | TokenKind::Number | TokenKind::DurationVal => Ok(SetStatement {
                variable_name,
                value: tok.lexeme,
            }),
            _ => Err(Self::unexpected("IDENT, NUMBER or DURATION", &tok)),
        }
    }

    fn parse_wait(&mut self) -> Result<WaitStatement> {
        self.expect(TokenKind::Wait, "WAIT")?;
        Ok(WaitStatement {})
    }

    /// Parse `GO` followed by an INSERT, QUERY or EXEC
    fn parse_go(&mut self) -> Result<GoStatement> {
        self.expect(TokenKind::Go, "GO")?;

        let tok = self.scan_ignore_whitespace();
        self.unscan();

        let inner = match tok.kind {
            TokenKind::Query => GoTarget::Query(self.parse_query()?),
            TokenKind::Insert => GoTarget::Insert(self.parse_insert()?),
            TokenKind::Exec => GoTarget::Exec(self.parse_exec()?),
            _ => {
                tracing::debug!(
                    found = %tok.kind,
                    line = tok.line,
                    "GO without a runnable statement"
                );
                // the rest of the chunk is not part of any statement
                while self.scan().kind != TokenKind::Eof {}
                self.unscan();
                return Ok(GoStatement { inner: None });
            }
        };

        Ok(GoStatement {
            inner: Some(Box::new(inner)),
        })
    }

    fn scan(&mut self) -> Token {
        if self.unscanned {
            self.unscanned = false;
            return self.buf.clone();
        }

        let tok = self.scanner.scan();
        self.buf = tok.clone();
        tok
    }

    /// Scans the next token, skipping one whitespace run in front of it
    fn scan_ignore_whitespace(&mut self) -> Token {
        let tok = self.scan();
        if tok.kind == TokenKind::Whitespace {
            return self.scan();
        }
        tok
    }

    /// Pushes the previously scanned token back
    fn unscan(&mut self) {
        self.unscanned = true;
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token> {
        let tok = self.scan_ignore_whitespace();
        if tok.kind == kind {
            Ok(tok)
        } else {
            Err(Self::unexpected(expected, &tok))
        }
    }

    fn expect_ident(&mut self) -> Result<String> {
        Ok(self.expect(TokenKind::Ident, "IDENT")?.lexeme)
    }

    fn unexpected(expected: &str, found: &Token) -> Error {
        Error::unexpected(expected, Self::describe(found), found.line, found.column)
    }

    fn describe(tok: &Token) -> String {
        match tok.kind {
            TokenKind::Eof => "EOF".to_string(),
            _ => tok.lexeme.clone(),
        }
    }
}

/// Parses a single DSL statement from one chunk of text
pub fn parse_statement(source: &str) -> Result<Statement> {
    StatementParser::new(source).parse()
}
