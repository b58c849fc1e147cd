// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parsing infrastructure for tinytalk source code.
//!
//! This module contains the lexer and the parser.
//!
//! # Lexical Analysis
//!
//! The [`Lexer`] converts source text into a lazy stream of [`Token`]s. Each
//! token carries its byte [`Span`] and its line/column [`Position`].
//!
//! ```
//! use tinytalk_core::source_analysis::{Lexer, TokenKind};
//!
//! let tokens: Vec<_> = Lexer::new("x + 1").collect();
//! assert_eq!(tokens.len(), 3); // x, +, 1
//! ```
//!
//! See [`TokenKind`] for all supported syntactic elements.
//!
//! # Parsing
//!
//! The [`parse`] function converts source text into a
//! [`Program`](crate::ast::Program). [`parse_tokens`] runs the grammar over
//! tokens produced elsewhere.
//!
//! # Error Handling
//!
//! The lexer recovers from text it cannot tokenize: it records a
//! [`LexError`] and skips ahead. The parser stops at the first
//! [`SyntaxError`].

mod error;
mod lexer;
mod parser;
mod span;
mod token;

// Property-based tests for the lexer
#[cfg(test)]
mod lexer_property_tests;

pub use error::{LexError, LexErrorKind, ParseError, SyntaxError};
pub use lexer::{Lexer, Tokenized, tokenize};
pub use parser::{
    DEFAULT_MAX_NESTING_DEPTH, ParseOptions, Parsed, parse, parse_tokens, parse_with_options,
};
pub use span::{Position, Span};
pub use token::{Number, Token, TokenKind};
