// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! tinytalk front end.
//!
//! This crate turns Smalltalk-style source text into a syntax tree:
//! - Lexical analysis (tokenization) with recovery from illegal characters
//! - Parsing into an AST following unary/binary/keyword message precedence
//! - Uniform diagnostics for both stages
//!
//! It performs no evaluation and no name resolution.
//!
//! ```
//! use tinytalk_core::prelude::*;
//!
//! let parsed = parse("| x | x := 3 + 4. ^ x").unwrap();
//! assert_eq!(parsed.program.statements.len(), 3);
//! assert!(matches!(parsed.program.statements[2], Statement::Return { .. }));
//! ```

pub mod ast;
pub mod diagnostic;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{Expression, Identifier, Literal, Message, Program, Statement};
    pub use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity};
    pub use crate::source_analysis::{
        ParseError, ParseOptions, Parsed, Span, Token, TokenKind, parse, tokenize,
    };
}
