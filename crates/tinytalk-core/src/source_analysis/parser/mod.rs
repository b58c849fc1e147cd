// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for tinytalk source code.
//!
//! This parser builds a [`Program`] from a stream of tokens, pulling one token
//! at a time with a single token of lookahead. It is fail-fast: the first
//! syntax error aborts the parse and no partial tree is returned.
//!
//! # Message Precedence
//!
//! tinytalk follows Smalltalk's three-tier message precedence:
//!
//! 1. **Unary messages**: `object message` (highest precedence)
//! 2. **Binary messages**: `3 + 4`, strictly left to right, so `1 + 2 * 3`
//!    is `(1 + 2) * 3`
//! 3. **Keyword messages**: `array at: 1 put: 'x'` (lowest precedence)
//!
//! A cascade (`x foo; bar`) sends further messages to the receiver of the
//! last send before the first `;`.
//!
//! # Lexical Errors
//!
//! Lexical errors never stop the parser: the offending text is simply
//! missing from the token stream. [`parse`] returns them next to the program
//! in [`Parsed::lex_errors`], or fails on the first one when
//! [`ParseOptions::strict_lexing`] is set.
//!
//! # Usage
//!
//! ```
//! use tinytalk_core::source_analysis::parse;
//!
//! let parsed = parse("x := 3 + 4").unwrap();
//!
//! assert!(parsed.lex_errors.is_empty());
//! assert_eq!(parsed.program.statements.len(), 1);
//! ```

use tracing::debug;

use crate::ast::Program;
use crate::source_analysis::{
    LexError, Lexer, ParseError, Position, Span, SyntaxError, Token, TokenKind,
};

// Submodules with additional impl blocks for Parser
mod expressions;
mod statements;


/// Default for [`ParseOptions::max_nesting_depth`].
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Result type used throughout the grammar.
pub(super) type ParseResult<T> = Result<T, SyntaxError>;

/// Options controlling a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail on the first lexical error instead of reporting it alongside the
    /// program.
    pub strict_lexing: bool,
    /// Maximum nesting of blocks, parentheses and brace literals.
    pub max_nesting_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict_lexing: false,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// A successfully parsed program.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    /// The program tree.
    pub program: Program,
    /// Lexical errors recovered from while tokenizing, in source order.
    pub lex_errors: Vec<LexError>,
}

/// Parses source text with default options.
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] on the first syntax error.
pub fn parse(source: &str) -> Result<Parsed, ParseError> {
    parse_with_options(source, &ParseOptions::default())
}

/// Parses source text.
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] on the first syntax error, or
/// [`ParseError::Lexical`] on the first lexical error when
/// [`ParseOptions::strict_lexing`] is set.
pub fn parse_with_options(source: &str, options: &ParseOptions) -> Result<Parsed, ParseError> {
    debug!(
        bytes = source.len(),
        strict = options.strict_lexing,
        "parsing source"
    );

    let mut lexer = Lexer::new(source);
    let (end, end_position) = Lexer::end_of_input(source);
    let result = Parser::new(&mut lexer, *options)
        .with_end_of_input(end, end_position)
        .parse_program();

    if options.strict_lexing {
        if let Some(error) = lexer.errors().first() {
            debug!(%error, "lexical error in strict mode");
            return Err(error.clone().into());
        }
    }
    let lex_errors = lexer.into_errors();

    match result {
        Ok(program) => {
            debug!(
                statements = program.statements.len(),
                lex_errors = lex_errors.len(),
                "parsed source"
            );
            Ok(Parsed {
                program,
                lex_errors,
            })
        }
        Err(error) => {
            debug!(%error, "syntax error");
            Err(error.into())
        }
    }
}

/// Parses an already-produced token sequence.
///
/// [`TokenKind::Comment`] tokens are skipped. Without the source text, an
/// unexpected end of input is reported at the end of the last token.
///
/// # Errors
///
/// Returns the first [`SyntaxError`].
pub fn parse_tokens<I>(tokens: I, options: &ParseOptions) -> Result<Program, SyntaxError>
where
    I: IntoIterator<Item = Token>,
{
    Parser::new(tokens.into_iter(), *options).parse_program()
}

/// The parser state.
pub(super) struct Parser<I: Iterator<Item = Token>> {
    /// Remaining tokens.
    tokens: I,
    /// The lookahead token, `None` at end of input.
    current: Option<Token>,
    /// Location of the most recently consumed token.
    last: Option<(Span, Position)>,
    /// Location just past the source, when known.
    end_of_input: Option<(Span, Position)>,
    /// Parse configuration.
    options: ParseOptions,
    /// Current nesting depth of blocks, parentheses and brace literals.
    nesting_depth: usize,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Creates a new parser over the given tokens.
    fn new(tokens: I, options: ParseOptions) -> Self {
        let mut parser = Self {
            tokens,
            current: None,
            last: None,
            end_of_input: None,
            options,
            nesting_depth: 0,
        };
        parser.current = parser.next_significant();
        parser
    }

    /// Sets the location reported by end-of-input errors.
    fn with_end_of_input(mut self, span: Span, position: Position) -> Self {
        self.end_of_input = Some((span, position));
        self
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Pulls the next token the grammar cares about.
    fn next_significant(&mut self) -> Option<Token> {
        self.tokens.by_ref().find(|token| !token.kind().is_trivia())
    }

    /// Returns the current token kind.
    pub(super) fn current_kind(&self) -> Option<&TokenKind> {
        self.current.as_ref().map(Token::kind)
    }

    /// Checks if we're at the end of input.
    pub(super) fn is_at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Advances to the next token and returns the current one.
    pub(super) fn advance(&mut self) -> Option<Token> {
        let token = self.current.take()?;
        self.last = Some((token.span(), token.position()));
        self.current = self.next_significant();
        Some(token)
    }

    /// Checks if the current token matches the given kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind()
            .is_some_and(|current| std::mem::discriminant(current) == std::mem::discriminant(kind))
    }

    /// Consumes the current token if it matches the given kind.
    pub(super) fn match_token(&mut self, kind: &TokenKind) -> Option<Token> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    /// Expects the current token to match the given kind, advancing if it does.
    pub(super) fn expect(&mut self, kind: &TokenKind, expected: &str) -> ParseResult<Token> {
        self.match_token(kind)
            .ok_or_else(|| self.unexpected(expected))
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Builds the error for the current token not matching `expected`.
    pub(super) fn unexpected(&self, expected: &str) -> SyntaxError {
        match &self.current {
            Some(token) => SyntaxError::UnexpectedToken {
                found: token.kind().clone(),
                expected: expected.into(),
                span: token.span(),
                position: token.position(),
            },
            None => {
                let (span, position) = self.end_location();
                SyntaxError::UnexpectedEndOfInput {
                    expected: expected.into(),
                    span,
                    position,
                }
            }
        }
    }

    /// Returns the location just past the input.
    fn end_location(&self) -> (Span, Position) {
        self.end_of_input
            .or_else(|| {
                self.last
                    .map(|(span, position)| (Span::new(span.end(), span.end()), position))
            })
            .unwrap_or_default()
    }

    /// Returns the location of the current token, or the end of input.
    fn current_location(&self) -> (Span, Position) {
        self.current
            .as_ref()
            .map_or_else(|| self.end_location(), |t| (t.span(), t.position()))
    }

    // ========================================================================
    // Nesting
    // ========================================================================

    /// Runs `parse` one nesting level deeper.
    ///
    /// Fails with [`SyntaxError::NestingTooDeep`] past
    /// [`ParseOptions::max_nesting_depth`]. `stacker::maybe_grow` extends the
    /// stack on the heap if remaining space falls below 32 KiB.
    pub(super) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        stacker::maybe_grow(32 * 1024, 256 * 1024, || {
            self.enter_nesting()?;
            let result = parse(self);
            self.leave_nesting();
            result
        })
    }

    /// Increments the nesting depth, failing if it exceeds the limit.
    fn enter_nesting(&mut self) -> ParseResult<()> {
        if self.nesting_depth >= self.options.max_nesting_depth {
            let (span, position) = self.current_location();
            return Err(SyntaxError::NestingTooDeep {
                limit: self.options.max_nesting_depth,
                span,
                position,
            });
        }
        self.nesting_depth += 1;
        Ok(())
    }

    /// Decrements the nesting depth (pair with [`Self::enter_nesting`]).
    fn leave_nesting(&mut self) {
        debug_assert!(
            self.nesting_depth > 0,
            "leave_nesting called without matching enter_nesting"
        );
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }
}
