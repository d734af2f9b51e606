//! Property-based tests for the chunker, scanner and parser
//!
//! These use proptest to generate inputs and check that:
//! 1. Scanning and parsing never panic on arbitrary input
//! 2. Generated INSERT and QUERY statements keep their placeholder counts
//! 3. Passthrough chunks come back byte-for-byte

use proptest::prelude::*;
use stressql::{
    parse_script, ChunkKind, ChunkSplitter, DslScanner, GoTarget, ScriptParser, Statement,
    TokenKind,
};

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

/// Generate random strings that might break the scanners
fn arbitrary_source_string() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[\x00-\x7F]{0,300}").unwrap()
}

/// Generate words that look like DSL fragments
fn dsl_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("INSERT".to_string()),
        Just("QUERY".to_string()),
        Just("GO".to_string()),
        Just("DO".to_string()),
        Just("SET".to_string()),
        Just("WAIT".to_string()),
        Just("EXEC".to_string()),
        Just("STR".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just(",".to_string()),
        Just("\n".to_string()),
        Just("\n\n".to_string()),
        "%[a-z]".prop_map(|s| s),
        (0u32..10_000).prop_map(|n| n.to_string()),
        (1u32..100).prop_map(|n| format!("{}s", n)),
        "[a-z][a-z0-9_=]{0,8}".prop_map(|s| s),
    ]
}

fn ident() -> impl Strategy<Value = String> {
    // keep clear of keywords such as `do`, `go` and `int`
    "[a-z]{1,3}_[a-z0-9]{0,5}".prop_map(|s| s)
}

fn function() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("STR"), Just("INT"), Just("FLOAT")],
        ident(),
        0u32..1000,
        0u32..1000,
    )
        .prop_map(|(ty, name, arg, count)| format!("{} {}({}) {}", ty, name, arg, count))
}

fn template() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![ident(), function()], 0..4)
        .prop_map(|items| format!("[{}]", items.join(" ")))
}

/// Generate well-formed INSERT statements; returns source and template count
fn insert_statement() -> impl Strategy<Value = (String, usize)> {
    (
        ident(),
        prop::collection::vec((ident(), template()), 1..5),
        1u32..100_000,
        1u32..60,
    )
        .prop_map(|(name, fields, count, secs)| {
            let field_list: Vec<String> = fields
                .iter()
                .map(|(key, tmpl)| format!("{}={}", key, tmpl))
                .collect();
            let source = format!(
                "INSERT {},{} {} {}s",
                name,
                field_list.join(","),
                count,
                secs
            );
            (source, fields.len())
        })
}

/// Generate well-formed QUERY statements; returns source and variable count
fn query_statement() -> impl Strategy<Value = (String, usize)> {
    (
        ident(),
        prop::collection::vec(
            prop_oneof![ident().prop_map(|w| (w, false)), "%[a-z]".prop_map(|v| (v, true))],
            0..12,
        ),
        1u32..1000,
    )
        .prop_map(|(name, body, count)| {
            let vars = body.iter().filter(|(_, is_var)| *is_var).count();
            let words: Vec<String> = body.into_iter().map(|(w, _)| w).collect();
            (
                format!("QUERY {} {} DO {}", name, words.join(" "), count),
                vars,
            )
        })
}

// =============================================================================
// ROBUSTNESS
// =============================================================================

proptest! {
    #[test]
    fn scanner_never_panics(source in arbitrary_source_string()) {
        let tokens = DslScanner::new(&source).scan_tokens();
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));

        let rebuilt: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        prop_assert_eq!(rebuilt, source);
    }

    #[test]
    fn chunks_cover_the_script(source in arbitrary_source_string()) {
        let rebuilt: String = ChunkSplitter::new(&source).map(|c| c.text).collect();
        prop_assert_eq!(rebuilt, source);
    }

    #[test]
    fn parser_never_panics(tokens in prop::collection::vec(dsl_token(), 0..40)) {
        let _ = parse_script(&tokens.join(" "));
    }

    #[test]
    fn arbitrary_input_never_panics(source in arbitrary_source_string()) {
        let _ = parse_script(&source);
    }

    // =========================================================================
    // INVARIANTS
    // =========================================================================

    #[test]
    fn blank_scripts_are_empty(n in 0usize..20) {
        let statements = parse_script(&"\n".repeat(n)).unwrap();
        prop_assert!(statements.is_empty());
    }

    #[test]
    fn break_chunks_are_only_newlines(source in arbitrary_source_string()) {
        for chunk in ChunkSplitter::new(&source) {
            if chunk.kind == ChunkKind::Break {
                prop_assert!(chunk.text.chars().all(|c| c == '\n'));
            } else {
                prop_assert!(!chunk.text.contains("\n\n"));
            }
        }
    }

    #[test]
    fn insert_placeholders_match_templates((source, templates) in insert_statement()) {
        let statements = parse_script(&source).unwrap();
        prop_assert_eq!(statements.len(), 1);
        match &statements[0] {
            Statement::Insert(insert) => {
                prop_assert_eq!(insert.templates.len(), templates);
                prop_assert!(insert.timestamp.is_some());
                prop_assert_eq!(insert.placeholder_count(), templates + 1);
            }
            other => prop_assert!(false, "expected INSERT, got {:?}", other),
        }
    }

    #[test]
    fn query_placeholders_match_args((source, vars) in query_statement()) {
        let statements = parse_script(&source).unwrap();
        match &statements[0] {
            Statement::Query(query) => {
                prop_assert_eq!(query.args.len(), vars);
                prop_assert_eq!(query.placeholder_count(), query.args.len());
            }
            other => prop_assert!(false, "expected QUERY, got {:?}", other),
        }
    }

    #[test]
    fn go_wraps_only_insert_query_exec((source, _) in query_statement()) {
        let statements = parse_script(&format!("GO {}", source)).unwrap();
        match &statements[0] {
            Statement::Go(go) => {
                prop_assert!(matches!(go.inner.as_deref(), Some(GoTarget::Query(_))))
            }
            other => prop_assert!(false, "expected GO, got {:?}", other),
        }
    }

    #[test]
    fn passthrough_is_verbatim(lines in prop::collection::vec("[ -~]{1,40}", 1..4)) {
        let chunk = lines.join("\n");
        let parser = ScriptParser::new().with_validator(|_: &str| true);
        let statements = parser.parse(&chunk).unwrap();
        prop_assert_eq!(statements.len(), 1);
        match &statements[0] {
            Statement::Passthrough(p) => prop_assert_eq!(&p.raw_text, &chunk),
            other => prop_assert!(false, "expected passthrough, got {:?}", other),
        }
    }
}
