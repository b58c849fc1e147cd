// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for tokenizer and parser crash safety.
//!
//! Arbitrary bytes that form valid UTF-8 are tokenized and parsed. Either
//! stage may report errors; neither may panic, and every reported span must
//! lie inside the input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tinytalk_core::source_analysis::{ParseError, parse, tokenize};

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 is rejected before it reaches the front end
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let len = source.len();

    let tokenized = tokenize(source);
    for token in &tokenized.tokens {
        assert!(token.span().end() as usize <= len);
    }

    match parse(source) {
        Ok(parsed) => assert!(parsed.program.span.end() as usize <= len),
        Err(ParseError::Syntax(error)) => assert!(error.span().end() as usize <= len),
        Err(ParseError::Lexical(_)) => unreachable!("lexical errors are not fatal by default"),
    }
});
