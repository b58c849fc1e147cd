// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Uniform diagnostics for lexical and syntax errors.
//!
//! [`LexError`] and [`SyntaxError`] are precise but differently shaped. A
//! [`Diagnostic`] flattens either into one record with a kind, a severity, a
//! message and a location, which is what tools that list problems want.
//!
//! ```
//! use tinytalk_core::diagnostic::{DiagnosticKind, Severity, check};
//! use tinytalk_core::source_analysis::ParseOptions;
//!
//! let diagnostics = check("x := §", &ParseOptions::default());
//! assert_eq!(diagnostics.len(), 2);
//! assert_eq!(diagnostics[0].kind, DiagnosticKind::IllegalCharacter);
//! assert_eq!(diagnostics[0].severity, Severity::Warning);
//! assert_eq!(diagnostics[1].kind, DiagnosticKind::UnexpectedEndOfInput);
//! ```

use std::fmt;

use ecow::{EcoString, eco_format};
use tracing::debug;

use crate::source_analysis::{
    LexError, LexErrorKind, ParseError, ParseOptions, Position, Span, SyntaxError,
    parse_with_options, tokenize,
};

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A character that starts no token.
    IllegalCharacter,
    /// An integer literal that does not fit in 64 bits.
    NumberOutOfRange,
    /// A token the grammar did not expect.
    UnexpectedToken,
    /// Input ended too early.
    UnexpectedEndOfInput,
    /// Nesting deeper than the configured limit.
    NestingTooDeep,
}

impl DiagnosticKind {
    /// Returns a short, stable name for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IllegalCharacter => "illegal-character",
            Self::NumberOutOfRange => "number-out-of-range",
            Self::UnexpectedToken => "unexpected-token",
            Self::UnexpectedEndOfInput => "unexpected-end-of-input",
            Self::NestingTooDeep => "nesting-too-deep",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// A problem the parser recovered from.
    Warning,
    /// A problem that stopped the parse.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A diagnostic message with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// How bad it is.
    pub severity: Severity,
    /// The message, without location.
    pub message: EcoString,
    /// The source span.
    pub span: Span,
    /// Line and column of the span start.
    pub position: Position,
}

impl Diagnostic {
    /// Creates a diagnostic for a lexical error.
    ///
    /// Lexical errors are recoverable, so the caller picks the severity.
    #[must_use]
    pub fn from_lex_error(error: &LexError, severity: Severity) -> Self {
        let kind = match error.kind {
            LexErrorKind::IllegalCharacter(_) => DiagnosticKind::IllegalCharacter,
            LexErrorKind::NumberOutOfRange => DiagnosticKind::NumberOutOfRange,
        };
        Self {
            kind,
            severity,
            message: eco_format!("{}", error.kind),
            span: error.span,
            position: error.position,
        }
    }

    /// Returns true for [`Severity::Error`].
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<&SyntaxError> for Diagnostic {
    fn from(error: &SyntaxError) -> Self {
        let (kind, message) = match error {
            SyntaxError::UnexpectedToken {
                found, expected, ..
            } => (
                DiagnosticKind::UnexpectedToken,
                eco_format!("unexpected token `{found}`: expected {expected}"),
            ),
            SyntaxError::UnexpectedEndOfInput { expected, .. } => (
                DiagnosticKind::UnexpectedEndOfInput,
                eco_format!("unexpected end of input: expected {expected}"),
            ),
            SyntaxError::NestingTooDeep { limit, .. } => (
                DiagnosticKind::NestingTooDeep,
                eco_format!("expression nesting is too deep (maximum {limit} levels)"),
            ),
        };
        Self {
            kind,
            severity: Severity::Error,
            message,
            span: error.span(),
            position: error.position(),
        }
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(error: &ParseError) -> Self {
        match error {
            ParseError::Lexical(error) => Self::from_lex_error(error, Severity::Error),
            ParseError::Syntax(error) => error.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.position, self.severity, self.message)
    }
}

/// Collects every diagnostic for `source`, in source order.
///
/// Every lexical error is listed, as a warning, or as an error when
/// `options.strict_lexing` is set. At most one syntax error follows, since
/// parsing stops at the first.
#[must_use]
pub fn check(source: &str, options: &ParseOptions) -> Vec<Diagnostic> {
    let lex_severity = if options.strict_lexing {
        Severity::Error
    } else {
        Severity::Warning
    };
    let mut diagnostics: Vec<Diagnostic> = tokenize(source)
        .errors
        .iter()
        .map(|error| Diagnostic::from_lex_error(error, lex_severity))
        .collect();

    let lenient = ParseOptions {
        strict_lexing: false,
        ..*options
    };
    if let Err(error) = parse_with_options(source, &lenient) {
        diagnostics.push(Diagnostic::from(&error));
    }

    diagnostics.sort_by_key(|d| (d.span.start(), d.span.end()));
    debug!(count = diagnostics.len(), "checked source");
    diagnostics
}
