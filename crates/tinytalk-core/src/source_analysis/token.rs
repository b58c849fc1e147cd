// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for tinytalk lexical analysis.
//!
//! # Token Structure
//!
//! Each token consists of:
//! - A [`TokenKind`] indicating the lexical category and carrying its value
//! - A [`Span`] indicating its byte range in the source
//! - A [`Position`] giving the line and column where it starts
//!
//! # Smalltalk Syntax Coverage
//!
//! - Unary messages: `object message`
//! - Binary messages: `3 + 4`
//! - Keyword messages: `array at: 1 put: value`
//! - Blocks: `[:x | x + 1]`
//! - Cascades: `stream nextPut: 'a'; nextPut: 'b'`
//!
//! There is no dedicated unary-selector kind: a unary selector is lexed as an
//! [`TokenKind::Identifier`] and the parser decides its role from context.

use std::fmt;

use ecow::EcoString;

use super::{Position, Span};

/// A numeric literal value.
///
/// Literals with a decimal point are floats, everything else is an integer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// An integer literal: `42`, `-17`
    Integer(i64),
    /// A floating-point literal: `3.14`, `-0.5`
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// The kind of token, not including source location.
///
/// Tokens are cheap to clone ([`EcoString`] for string data).
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // === Names and Selectors ===
    /// An identifier: `foo`, `myVariable`, `Transcript`. Never contains `:`.
    Identifier(EcoString),

    /// A keyword selector part, always ending with `:`: `at:`, `ifTrue:`
    Keyword(EcoString),

    /// A binary selector: `+`, `-`, `<=`, `->`, `~=`
    BinarySelector(EcoString),

    // === Literals ===
    /// A number literal with its parsed value.
    Number(Number),

    /// A single-quoted string. The value is the body between the quotes;
    /// backslash escapes are kept as written.
    String(EcoString),

    /// A character literal: `$a` carries `a`.
    Character(char),

    /// A symbol literal: `#foo` and `#+` carry `foo` and `+`.
    Symbol(EcoString),

    /// A double-quoted comment. The value is the text between the quotes.
    Comment(EcoString),

    // === Delimiters ===
    /// Left parenthesis: `(`
    LeftParen,

    /// Right parenthesis: `)`
    RightParen,

    /// Left bracket (block start): `[`
    LeftBracket,

    /// Right bracket (block end): `]`
    RightBracket,

    /// Left brace (array literal start): `{`
    LeftBrace,

    /// Right brace: `}`
    RightBrace,

    // === Punctuation ===
    /// Statement separator: `.`
    Period,

    /// Return operator: `^`
    Caret,

    /// Temporaries delimiter and block parameter separator: `|`
    Pipe,

    /// Colon introducing a block parameter: `:`
    Colon,

    /// Assignment operator: `:=`
    Assign,

    /// Cascade separator: `;`
    Semicolon,
}

impl TokenKind {
    /// Returns `true` if this token is a literal value.
    ///
    /// Identifiers are not literals: they are names that reference values.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::Number(_) | Self::String(_) | Self::Character(_) | Self::Symbol(_)
        )
    }

    /// Returns `true` if this token is trivia the grammar never sees.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    /// Returns `true` if an operand can end with this token.
    ///
    /// The lexer uses this to decide whether a `-` directly before a digit
    /// is a binary operator (`3-4`) or the sign of a number (`x := -4`).
    #[must_use]
    pub const fn ends_operand(&self) -> bool {
        matches!(
            self,
            Self::Identifier(_)
                | Self::Number(_)
                | Self::String(_)
                | Self::Character(_)
                | Self::Symbol(_)
                | Self::RightParen
                | Self::RightBracket
                | Self::RightBrace
        )
    }

    /// Returns the name of the lexical category, for listings and messages.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Identifier(_) => "identifier",
            Self::Keyword(_) => "keyword",
            Self::BinarySelector(_) => "binary selector",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Character(_) => "character",
            Self::Symbol(_) => "symbol",
            Self::Comment(_) => "comment",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::LeftBrace => "'{'",
            Self::RightBrace => "'}'",
            Self::Period => "'.'",
            Self::Caret => "'^'",
            Self::Pipe => "'|'",
            Self::Colon => "':'",
            Self::Assign => "':='",
            Self::Semicolon => "';'",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Tokens that display their string content directly
            Self::Identifier(s) | Self::Keyword(s) | Self::BinarySelector(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            // Tokens with delimiters around content
            Self::String(s) => write!(f, "'{s}'"),
            Self::Character(c) => write!(f, "${c}"),
            Self::Symbol(s) => write!(f, "#{s}"),
            Self::Comment(s) => write!(f, "\"{s}\""),
            // Fixed-text tokens
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::LeftBracket => write!(f, "["),
            Self::RightBracket => write!(f, "]"),
            Self::LeftBrace => write!(f, "{{"),
            Self::RightBrace => write!(f, "}}"),
            Self::Period => write!(f, "."),
            Self::Caret => write!(f, "^"),
            Self::Pipe => write!(f, "|"),
            Self::Colon => write!(f, ":"),
            Self::Assign => write!(f, ":="),
            Self::Semicolon => write!(f, ";"),
        }
    }
}

/// A token with its source location.
///
/// # Examples
///
/// ```
/// use tinytalk_core::source_analysis::{Position, Span, Token, TokenKind};
///
/// let token = Token::new(
///     TokenKind::Identifier("foo".into()),
///     Span::new(0, 3),
///     Position::new(1, 1),
/// );
/// assert!(matches!(token.kind(), TokenKind::Identifier(_)));
/// assert_eq!(token.span().len(), 3);
/// assert_eq!(token.position().line, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    span: Span,
    position: Position,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, position: Position) -> Self {
        Self {
            kind,
            span,
            position,
        }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Returns the source span of this token.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the line and column where this token starts.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.position, self.kind)
    }
}
