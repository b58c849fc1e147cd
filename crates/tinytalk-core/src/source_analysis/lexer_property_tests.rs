// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the tinytalk lexer.
//!
//! These tests use `proptest` to verify lexer invariants over generated inputs:
//!
//! 1. **Lexer never panics**: arbitrary string input always terminates
//! 2. **Token spans within input**: all token spans satisfy `end <= input.len()`
//! 3. **Spans are ordered**: tokens and errors never overlap
//! 4. **Lexer is deterministic**: same input always produces same tokens
//! 5. **Valid fragments produce no errors**: known-valid inputs lex cleanly
//! 6. **Positions agree with spans**: a token's line matches its byte offset

use proptest::prelude::*;

use super::lexer::{Lexer, tokenize};
use super::token::TokenKind;

// ============================================================================
// Generators
// ============================================================================

/// Known-valid single-token fragments that should lex without errors.
const VALID_SINGLE_TOKENS: &[&str] = &[
    "42",
    "-7",
    "2.5",
    "'hello'",
    "'it\\'s'",
    "x",
    "myVariable",
    "_tmp",
    "+",
    "-",
    "->",
    "~=",
    "(",
    ")",
    "[",
    "]",
    "{",
    "}",
    "$A",
    "$ ",
    "#symbol",
    "#+",
    "at:",
    "ifTrue:",
    ":=",
    "^",
    ";",
    "|",
    ".",
    "\"a comment\"",
];

/// Multi-token valid expressions that should lex cleanly.
const VALID_EXPRESSIONS: &[&str] = &[
    "x + 1",
    "arr at: 1",
    "obj at: 1 put: 2",
    "[:x | x + 1]",
    "(3 + 4)",
    "^42",
    "| a b |",
    "{1. 2. 3}",
    "{#a -> 1}",
    "x := 42",
    "3 timesRepeat: [x := x + 1]",
    "Transcript show: 'hi'; cr",
];

fn valid_single_token() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_SINGLE_TOKENS).prop_map(std::string::ToString::to_string)
}

fn valid_expression() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_EXPRESSIONS).prop_map(std::string::ToString::to_string)
}

// ============================================================================
// Property tests
// ============================================================================

/// Default is 512 cases; override via `PROPTEST_CASES` env var for nightly runs.
fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(512),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Property 1: Lexer never panics on arbitrary string input.
    #[test]
    fn lexer_never_panics(input in "\\PC{0,500}") {
        let _result = tokenize(&input);
    }

    /// Property 2: All token and error spans are within input bounds.
    #[test]
    fn spans_within_input(input in "\\PC{0,500}") {
        let result = tokenize(&input);
        let input_len = u32::try_from(input.len()).unwrap_or(u32::MAX);
        let spans = result
            .tokens
            .iter()
            .map(|t| t.span())
            .chain(result.errors.iter().map(|e| e.span));
        for span in spans {
            prop_assert!(
                span.end() <= input_len,
                "span {:?} exceeds input length {} for input {:?}",
                span,
                input_len,
                input,
            );
            prop_assert!(
                span.start() < span.end(),
                "empty span {:?} for input {:?}",
                span,
                input,
            );
        }
    }

    /// Property 3: Tokens and skipped text never overlap.
    #[test]
    fn spans_are_ordered(input in "\\PC{0,500}") {
        let result = tokenize(&input);
        let mut spans: Vec<_> = result
            .tokens
            .iter()
            .map(|t| t.span())
            .chain(result.errors.iter().map(|e| e.span))
            .collect();
        spans.sort_by_key(|s| s.start());
        for window in spans.windows(2) {
            prop_assert!(
                window[1].start() >= window[0].end(),
                "overlapping spans {:?} and {:?} for input {:?}",
                window[0],
                window[1],
                input,
            );
        }
    }

    /// Property 4: Lexer is deterministic, and a clone replays the same tokens.
    #[test]
    fn lexer_deterministic(input in "\\PC{0,200}") {
        let first = tokenize(&input);
        let second = tokenize(&input);
        prop_assert_eq!(&first, &second);

        let lexer = Lexer::new(&input);
        let replay: Vec<_> = lexer.clone().collect();
        let original: Vec<_> = lexer.collect();
        prop_assert_eq!(original, replay);
    }

    /// Property 5a: Valid single tokens lex without errors.
    #[test]
    fn valid_single_tokens_lex_cleanly(input in valid_single_token()) {
        let result = tokenize(&input);
        prop_assert!(result.is_clean(), "errors {:?} for {:?}", result.errors, input);
        prop_assert_eq!(result.tokens.len(), 1, "tokens {:?}", result.tokens);
    }

    /// Property 5b: Valid expressions lex without errors.
    #[test]
    fn valid_expressions_lex_cleanly(input in valid_expression()) {
        let result = tokenize(&input);
        prop_assert!(result.is_clean(), "errors {:?} for {:?}", result.errors, input);
    }

    /// Property 5c: Whitespace-separated valid tokens keep their count.
    #[test]
    fn joined_tokens_keep_their_count(parts in prop::collection::vec(valid_single_token(), 1..20)) {
        let input = parts.join(" ");
        let result = tokenize(&input);
        prop_assert!(result.is_clean(), "errors {:?} for {:?}", result.errors, input);
        // A separated `-7` may become `-` and `7` after an operand
        prop_assert!(result.tokens.len() >= parts.len());
    }

    /// Property 6: Each token's line equals one plus the newlines before it.
    #[test]
    fn positions_agree_with_spans(input in "[a-z0-9 \\n'\"+]{0,200}") {
        let result = tokenize(&input);
        for token in &result.tokens {
            let before = &input[..token.span().start() as usize];
            let expected = u32::try_from(before.matches('\n').count() + 1).unwrap_or(u32::MAX);
            prop_assert_eq!(token.position().line, expected, "token {:?} in {:?}", token, input);
        }
        let lines = u32::try_from(input.matches('\n').count() + 1).unwrap_or(u32::MAX);
        prop_assert_eq!(result.lines, lines);
    }

    /// Identifier tokens never contain a colon; keywords always end with one.
    #[test]
    fn keyword_shape(input in "[a-z: =]{0,100}") {
        for token in Lexer::new(&input) {
            match token.kind() {
                TokenKind::Identifier(name) => prop_assert!(!name.contains(':')),
                TokenKind::Keyword(name) => prop_assert!(name.ends_with(':')),
                _ => {}
            }
        }
    }
}
