use super::ast::{PassthroughStatement, Statement};
use super::stmt_parser::StatementParser;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::lexer::{Chunk, ChunkKind, ChunkSplitter, DslScanner, TokenKind};
use crate::validator::{InfluxQlPrefix, QueryValidator};

/// Parses a whole script into statements
///
/// Each chunk is first offered to the native query validator; if it is not
/// accepted it is parsed as DSL. The first DSL error aborts the script and no
/// statements are returned.
pub struct ScriptParser {
    config: ParserConfig,
    validator: Box<dyn QueryValidator>,
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptParser {
    /// Creates a parser with default configuration and the InfluxQL recogniser
    pub fn new() -> Self {
        ScriptParser {
            config: ParserConfig::default(),
            validator: Box::new(InfluxQlPrefix),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the native query validator
    pub fn with_validator<V: QueryValidator + 'static>(mut self, validator: V) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses every chunk of `script`, in order
    pub fn parse(&self, script: &str) -> Result<Vec<Statement>> {
        let mut splitter = ChunkSplitter::new(script);
        let mut statements = Vec::new();

        loop {
            let chunk = splitter.next_chunk();
            if chunk.kind == ChunkKind::Eof {
                break;
            }

            if let Some(stmt) = self.classify(&chunk)? {
                statements.push(stmt);
            }
        }

        tracing::debug!(statements = statements.len(), "parsed script");
        Ok(statements)
    }

    fn classify(&self, chunk: &Chunk<'_>) -> Result<Option<Statement>> {
        if self.offer_to_validator(chunk) && self.validator.accepts(chunk.text) {
            tracing::debug!(line = chunk.line, "passthrough statement");
            return Ok(Some(Statement::Passthrough(PassthroughStatement {
                raw_text: chunk.text.to_string(),
            })));
        }

        if chunk.kind == ChunkKind::Break {
            return Ok(None);
        }

        let stmt = StatementParser::new(chunk.text)
            .reject_trailing_tokens(self.config.reject_trailing_tokens)
            .parse()
            .inspect_err(|e| {
                tracing::warn!(line = chunk.line, error = %e, "aborting script parse");
            })?;

        tracing::debug!(line = chunk.line, kind = stmt.keyword(), "DSL statement");
        Ok(Some(stmt))
    }

    fn offer_to_validator(&self, chunk: &Chunk<'_>) -> bool {
        if !self.config.passthrough {
            return false;
        }
        !(self.config.dsl_keywords_first && starts_with_statement_keyword(chunk.text))
    }
}

fn starts_with_statement_keyword(text: &str) -> bool {
    let mut scanner = DslScanner::new(text);
    let mut tok = scanner.scan();
    if tok.kind == TokenKind::Whitespace {
        tok = scanner.scan();
    }
    matches!(
        tok.kind,
        TokenKind::Query
            | TokenKind::Insert
            | TokenKind::Exec
            | TokenKind::Set
            | TokenKind::Go
            | TokenKind::Wait
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::parser::ast::{SetStatement, WaitStatement};
    use crate::validator::RejectAll;

    #[test]
    fn test_mixed_script() {
        let script = "SELECT * FROM cpu\n\nSET rate 5\n\n\nWAIT\n";
        let statements = ScriptParser::new().parse(script).unwrap();

        assert_eq!(statements.len(), 3);
        assert_eq!(
            statements[0],
            Statement::Passthrough(PassthroughStatement {
                raw_text: "SELECT * FROM cpu".to_string()
            })
        );
        assert_eq!(
            statements[1],
            Statement::Set(SetStatement {
                variable_name: "rate".to_string(),
                value: "5".to_string(),
            })
        );
        assert_eq!(statements[2], Statement::Wait(WaitStatement {}));
    }

    #[test]
    fn test_first_error_aborts_script() {
        let script = "WAIT\n\nSET rate\n\nWAIT";
        let err = ScriptParser::new().parse(script).unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { .. }));
    }

    #[test]
    fn test_validator_sees_break_chunks_first() {
        let parser = ScriptParser::new().with_validator(|text: &str| text.trim().is_empty());
        let statements = parser.parse("WAIT\n\nWAIT").unwrap();
        assert_eq!(statements.len(), 3);
        assert_eq!(
            statements[1],
            Statement::Passthrough(PassthroughStatement {
                raw_text: "\n\n".to_string()
            })
        );
    }

    #[test]
    fn test_dsl_keywords_first() {
        let greedy = |_: &str| true;

        let statements = ScriptParser::new()
            .with_validator(greedy)
            .parse("SET rate 5")
            .unwrap();
        assert!(matches!(statements[0], Statement::Passthrough(_)));

        let config = ParserConfig {
            dsl_keywords_first: true,
            ..ParserConfig::default()
        };
        let statements = ScriptParser::new()
            .with_validator(greedy)
            .with_config(config)
            .parse("SET rate 5\n\nanything else")
            .unwrap();
        assert!(matches!(statements[0], Statement::Set(_)));
        assert!(matches!(statements[1], Statement::Passthrough(_)));
    }

    #[test]
    fn test_passthrough_disabled() {
        let config = ParserConfig {
            passthrough: false,
            ..ParserConfig::default()
        };
        let err = ScriptParser::new()
            .with_config(config)
            .parse("SELECT * FROM cpu")
            .unwrap_err();
        assert!(matches!(err, Error::UnknownStatement { .. }));

        let err = ScriptParser::new()
            .with_validator(RejectAll)
            .parse("SHOW DATABASES")
            .unwrap_err();
        assert!(matches!(err, Error::UnknownStatement { .. }));
    }
}
