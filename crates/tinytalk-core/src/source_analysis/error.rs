// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for tinytalk lexing and parsing.
//!
//! Errors carry a byte [`Span`] and a line/column [`Position`]. They
//! integrate with [`miette`] so a driver can render them against the source.
//!
//! Lexical errors are recoverable: the lexer records them and keeps going.
//! Syntax errors are fatal: the first one aborts the parse.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use super::{Position, Span, TokenKind};

/// A lexical error encountered during tokenization.
///
/// The offending text is dropped from the token stream and scanning resumes
/// right after it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind} at {position}")]
#[diagnostic(code(tinytalk::lex))]
pub struct LexError {
    /// The kind of lexical error.
    pub kind: LexErrorKind,
    /// The source location of the skipped text.
    #[label("skipped")]
    pub span: Span,
    /// Line and column of the skipped text.
    pub position: Position,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(kind: LexErrorKind, span: Span, position: Position) -> Self {
        Self {
            kind,
            span,
            position,
        }
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A character that starts no token.
    #[error("illegal character '{0}'")]
    IllegalCharacter(char),

    /// An integer literal that does not fit in 64 bits.
    #[error("number literal out of range")]
    NumberOutOfRange,
}

/// A fatal error raised by the grammar.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum SyntaxError {
    /// A token that matches no continuation at the current position.
    #[error("unexpected token `{found}` at {position}: expected {expected}")]
    #[diagnostic(code(tinytalk::syntax::unexpected_token))]
    UnexpectedToken {
        /// The token that was found.
        found: TokenKind,
        /// What the grammar would have accepted.
        expected: EcoString,
        /// Location of the offending token.
        #[label("expected {expected}")]
        span: Span,
        /// Line and column of the offending token.
        position: Position,
    },

    /// The input ended while the grammar still needed tokens.
    #[error("unexpected end of input at {position}: expected {expected}")]
    #[diagnostic(code(tinytalk::syntax::unexpected_eof))]
    UnexpectedEndOfInput {
        /// What the grammar would have accepted.
        expected: EcoString,
        /// Empty span at the end of the input.
        #[label("input ends here")]
        span: Span,
        /// Position just past the last character.
        position: Position,
    },

    /// Blocks, parentheses or brace literals nested deeper than allowed.
    #[error("expression nesting is too deep at {position} (maximum {limit} levels)")]
    #[diagnostic(code(tinytalk::syntax::nesting))]
    NestingTooDeep {
        /// The configured maximum depth.
        limit: usize,
        /// Location of the token that opened the level past the limit.
        #[label("too deep")]
        span: Span,
        /// Line and column of that token.
        position: Position,
    },
}

impl SyntaxError {
    /// Returns the source span the error points at.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::UnexpectedEndOfInput { span, .. }
            | Self::NestingTooDeep { span, .. } => *span,
        }
    }

    /// Returns the line and column the error points at.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position, .. }
            | Self::NestingTooDeep { position, .. } => *position,
        }
    }
}

/// The error returned by the parse entry points.
///
/// Lexical errors only end up here when strict lexing is requested; by
/// default they are reported alongside the parsed program.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ParseError {
    /// A lexical error made fatal by strict lexing.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lexical(#[from] LexError),

    /// A syntax error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    /// Returns the source span the error points at.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Lexical(error) => error.span,
            Self::Syntax(error) => error.span(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display() {
        let err = LexError::new(
            LexErrorKind::IllegalCharacter('§'),
            Span::new(2, 4),
            Position::new(1, 3),
        );
        assert_eq!(err.to_string(), "illegal character '§' at 1:3");
        assert_eq!(err.position.line, 1);

        let err = LexError::new(
            LexErrorKind::NumberOutOfRange,
            Span::new(0, 30),
            Position::new(4, 1),
        );
        assert_eq!(err.to_string(), "number literal out of range at 4:1");
    }

    #[test]
    fn syntax_error_display() {
        let err = SyntaxError::UnexpectedToken {
            found: TokenKind::Pipe,
            expected: "identifier".into(),
            span: Span::new(1, 2),
            position: Position::new(1, 2),
        };
        assert_eq!(
            err.to_string(),
            "unexpected token `|` at 1:2: expected identifier"
        );
        assert_eq!(err.span(), Span::new(1, 2));
        assert_eq!(err.position(), Position::new(1, 2));

        let err = SyntaxError::UnexpectedEndOfInput {
            expected: "expression".into(),
            span: Span::new(4, 4),
            position: Position::new(2, 1),
        };
        assert_eq!(
            err.to_string(),
            "unexpected end of input at 2:1: expected expression"
        );
    }

    #[test]
    fn parse_error_is_transparent() {
        let lex = LexError::new(
            LexErrorKind::IllegalCharacter('?'),
            Span::new(0, 1),
            Position::new(3, 1),
        );
        let err = ParseError::from(lex.clone());
        assert_eq!(err.to_string(), lex.to_string());
        assert_eq!(err.span(), Span::new(0, 1));
    }
}
