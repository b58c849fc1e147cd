// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for tinytalk source code.
//!
//! This module converts source text into a stream of [`Token`]s. The lexer
//! is hand-written and scans lazily: each call to [`Iterator::next`] produces
//! exactly one token.
//!
//! # Lexical Rules
//!
//! At each position the first matching rule wins:
//!
//! 1. Identifier `[A-Za-z_][A-Za-z0-9_]*`, or a keyword when the name is
//!    directly followed by a `:` that does not start `:=`
//! 2. Binary selector: a run of `- + * / ~ = < > & ! ? @ %`
//! 3. Number: digits with an optional fraction; a leading `-` is part of the
//!    number unless the previous token ends an operand
//! 4. String `'...'` with backslash escapes kept verbatim
//! 5. Character `$c` for any `c` except a backslash
//! 6. Symbol `#name` or `#+`
//! 7. Comment `"..."`
//! 8. Delimiters `( ) [ ] { } . ^ | : ;` and `:=`
//!
//! `|` never joins a binary-selector run; it is always a [`TokenKind::Pipe`].
//!
//! # Error Recovery
//!
//! The lexer never fails. A character that starts no token is recorded as a
//! [`LexError`] and skipped, and scanning resumes at the next character.
//!
//! # Example
//!
//! ```
//! use tinytalk_core::source_analysis::{Lexer, TokenKind};
//!
//! let tokens: Vec<_> = Lexer::new("x + 1").collect();
//! assert_eq!(tokens.len(), 3); // x, +, 1
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use ecow::EcoString;
use tracing::{debug, trace};

use super::{LexError, LexErrorKind, Number, Position, Span, Token, TokenKind};

/// A lexer that tokenizes tinytalk source code.
///
/// The lexer is [`Clone`]: a clone taken at any point is an independent
/// scanner that replays the remaining input identically.
#[derive(Clone)]
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
    /// Current line, starting at 1.
    line: u32,
    /// Column of the next character, in characters, starting at 1.
    column: u32,
    /// Whether the previous token can end an operand.
    after_operand: bool,
    /// Lexical errors recorded so far.
    errors: Vec<LexError>,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.position)
            .field("line", &self.line)
            .field("remaining", &self.source.get(self.position..).unwrap_or(""))
            .finish_non_exhaustive()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            line: 1,
            column: 1,
            after_operand: false,
            errors: Vec::new(),
        }
    }

    /// Returns the line the lexer is currently on.
    ///
    /// After the iterator is exhausted this is the number of lines in the
    /// source.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the lexical errors recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// Consumes the lexer and returns the lexical errors it recorded.
    #[must_use]
    pub fn into_errors(self) -> Vec<LexError> {
        self.errors
    }

    /// Returns the span and position just past the end of the source.
    #[must_use]
    pub fn end_of_input(source: &str) -> (Span, Position) {
        let end = offset(source.len());
        let line_start = source.rfind('\n').map_or(0, |i| i + 1);
        let line = source.matches('\n').count() + 1;
        let column = source[line_start..].chars().count() + 1;
        (
            Span::new(end, end),
            Position::new(saturate(line), saturate(column)),
        )
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks at the character `n` positions ahead (0 = next character).
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.source[self.position..].chars().nth(n)
    }

    /// Consumes the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column = self.column.saturating_add(1);
        }
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Consumes characters up to the given byte offset.
    fn advance_to(&mut self, end: usize) {
        while self.position < end && self.advance().is_some() {}
    }

    /// Returns the current byte position.
    fn current_offset(&self) -> u32 {
        offset(self.position)
    }

    /// Returns the line and column of the current position.
    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Creates a span from start to current position.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_offset())
    }

    /// Extracts source text for a span.
    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// Skips spaces, tabs, carriage returns and newlines.
    fn skip_whitespace(&mut self) {
        self.advance_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
    }

    /// Lexes the next token, skipping any text that starts no token.
    fn lex_token(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();
            let c = self.peek_char()?;
            let start = self.current_offset();
            let position = self.current_position();

            match self.lex_token_kind(c) {
                Ok(kind) => {
                    if !kind.is_trivia() {
                        self.after_operand = kind.ends_operand();
                    }
                    return Some(Token::new(kind, self.span_from(start), position));
                }
                Err(kind) => self.record_error(kind, start, position),
            }
        }
    }

    /// Records a lexical error for the text between `start` and the current
    /// position, consuming one character if nothing has been consumed yet.
    fn record_error(&mut self, kind: LexErrorKind, start: u32, position: Position) {
        if self.span_from(start).is_empty() {
            self.advance();
        }
        let span = self.span_from(start);
        trace!(line = position.line, column = position.column, %kind, "skipping source text");
        self.errors.push(LexError::new(kind, span, position));
    }

    /// Lexes a token kind based on the first character.
    ///
    /// Returns `Err` when no rule matches; the caller records the error.
    fn lex_token_kind(&mut self, c: char) -> Result<TokenKind, LexErrorKind> {
        match c {
            // Identifiers and keywords
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.lex_identifier_or_keyword()),

            // Numbers
            '0'..='9' => self.lex_number(),

            // Negative number literal, unless this `-` follows an operand
            '-' if !self.after_operand && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.lex_number()
            }

            // Binary selectors
            c if is_binary_selector_char(c) => Ok(self.lex_binary_selector()),

            // Strings
            '\'' => self.lex_string().ok_or(LexErrorKind::IllegalCharacter(c)),

            // Character literals
            '$' => self.lex_character().ok_or(LexErrorKind::IllegalCharacter(c)),

            // Symbols
            '#' => self.lex_symbol().ok_or(LexErrorKind::IllegalCharacter(c)),

            // Comments
            '"' => self.lex_comment().ok_or(LexErrorKind::IllegalCharacter(c)),

            // Colon or assignment
            ':' => Ok(self.lex_colon_or_assign()),

            // Single-character tokens
            _ => {
                let kind = match c {
                    '(' => TokenKind::LeftParen,
                    ')' => TokenKind::RightParen,
                    '[' => TokenKind::LeftBracket,
                    ']' => TokenKind::RightBracket,
                    '{' => TokenKind::LeftBrace,
                    '}' => TokenKind::RightBrace,
                    '.' => TokenKind::Period,
                    '^' => TokenKind::Caret,
                    '|' => TokenKind::Pipe,
                    ';' => TokenKind::Semicolon,
                    // Unknown character - error recovery
                    _ => return Err(LexErrorKind::IllegalCharacter(c)),
                };
                self.advance();
                Ok(kind)
            }
        }
    }

    /// Lexes an identifier or keyword selector.
    fn lex_identifier_or_keyword(&mut self) -> TokenKind {
        let start = self.current_offset();
        self.advance_while(is_identifier_char);

        // A trailing colon makes a keyword, unless it begins `:=`
        if self.peek_char() == Some(':') && self.peek_char_n(1) != Some('=') {
            self.advance(); // consume the colon
            let text = self.text_for(self.span_from(start));
            TokenKind::Keyword(EcoString::from(text))
        } else {
            let text = self.text_for(self.span_from(start));
            TokenKind::Identifier(EcoString::from(text))
        }
    }

    /// Lexes an integer or float literal, with an optional leading `-`.
    fn lex_number(&mut self) -> Result<TokenKind, LexErrorKind> {
        let start = self.current_offset();

        if self.peek_char() == Some('-') {
            self.advance();
        }
        self.advance_while(|c| c.is_ascii_digit());

        // Fraction: decimal point followed by a digit
        let is_float = if self.peek_char() == Some('.')
            && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance(); // consume '.'
            self.advance_while(|c| c.is_ascii_digit());
            true
        } else {
            false
        };

        let text = self.text_for(self.span_from(start));
        let number = if is_float {
            text.parse::<f64>().map(Number::Float).ok()
        } else {
            text.parse::<i64>().map(Number::Integer).ok()
        };
        number
            .map(TokenKind::Number)
            .ok_or(LexErrorKind::NumberOutOfRange)
    }

    /// Lexes a binary selector (one or more operator characters).
    fn lex_binary_selector(&mut self) -> TokenKind {
        let start = self.current_offset();
        self.advance_while(is_binary_selector_char);
        let text = self.text_for(self.span_from(start));
        TokenKind::BinarySelector(EcoString::from(text))
    }

    /// Lexes a single-quoted string literal: `'it\'s'`.
    ///
    /// Returns `None` without consuming anything when the string is not
    /// terminated on a valid escape sequence.
    fn lex_string(&mut self) -> Option<TokenKind> {
        let body_start = self.position + 1;
        let mut chars = self.source[body_start..].char_indices();
        let body_end = loop {
            match chars.next()? {
                (i, '\'') => break body_start + i,
                (_, '\\') => {
                    // An escape consumes the next character, which may not be a newline
                    if chars.next()?.1 == '\n' {
                        return None;
                    }
                }
                _ => {}
            }
        };

        let body = &self.source[body_start..body_end];
        self.advance_to(body_end + 1);
        Some(TokenKind::String(EcoString::from(body)))
    }

    /// Lexes a character literal: `$a`.
    fn lex_character(&mut self) -> Option<TokenKind> {
        match self.peek_char_n(1) {
            Some('\\') | None => None,
            Some(c) => {
                self.advance(); // $
                self.advance();
                Some(TokenKind::Character(c))
            }
        }
    }

    /// Lexes a symbol literal: `#foo` or `#+`.
    fn lex_symbol(&mut self) -> Option<TokenKind> {
        let tail_start = self.current_offset() + 1;
        match self.peek_char_n(1)? {
            c if c.is_ascii_alphabetic() || c == '_' => {
                self.advance(); // #
                self.advance_while(is_identifier_char);
            }
            c if is_binary_selector_char(c) || c == '|' => {
                self.advance(); // #
                self.advance_while(|c| is_binary_selector_char(c) || c == '|');
            }
            _ => return None,
        }
        let name = self.text_for(self.span_from(tail_start));
        Some(TokenKind::Symbol(EcoString::from(name)))
    }

    /// Lexes a double-quoted comment: `"note"`.
    fn lex_comment(&mut self) -> Option<TokenKind> {
        let body_start = self.position + 1;
        let body_end = body_start + self.source[body_start..].find('"')?;
        let body = &self.source[body_start..body_end];
        self.advance_to(body_end + 1);
        Some(TokenKind::Comment(EcoString::from(body)))
    }

    /// Lexes colon or assignment operator.
    fn lex_colon_or_assign(&mut self) -> TokenKind {
        self.advance(); // :
        if self.peek_char() == Some('=') {
            self.advance(); // =
            TokenKind::Assign
        } else {
            TokenKind::Colon
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.lex_token()
    }
}

/// Returns true if the character can continue an identifier.
fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns true if the character can appear in a binary selector.
///
/// `|` is deliberately absent: it always lexes as [`TokenKind::Pipe`].
fn is_binary_selector_char(c: char) -> bool {
    matches!(
        c,
        '-' | '+' | '*' | '/' | '~' | '=' | '<' | '>' | '&' | '!' | '?' | '@' | '%'
    )
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "source files over 4GB are not supported"
)]
fn offset(position: usize) -> u32 {
    position as u32
}

fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// The result of tokenizing a whole source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Tokenized {
    /// Tokens in source order, comments included.
    pub tokens: Vec<Token>,
    /// Every lexical error, in source order.
    pub errors: Vec<LexError>,
    /// Number of lines in the source.
    pub lines: u32,
}

impl Tokenized {
    /// Returns true if no lexical errors were recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Tokenizes a whole source text eagerly.
///
/// For lazy consumption, iterate a [`Lexer`] directly.
///
/// # Examples
///
/// ```
/// use tinytalk_core::source_analysis::{tokenize, LexErrorKind};
///
/// let result = tokenize("x §ok");
/// assert_eq!(result.tokens.len(), 2);
/// assert_eq!(result.errors.len(), 1);
/// assert_eq!(result.errors[0].kind, LexErrorKind::IllegalCharacter('§'));
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Tokenized {
    let mut lexer = Lexer::new(source);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    let lines = lexer.line();
    let errors = lexer.into_errors();
    debug!(
        tokens = tokens.len(),
        errors = errors.len(),
        lines,
        "tokenized source"
    );
    Tokenized {
        tokens,
        errors,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to lex and extract just the token kinds.
    fn lex_kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).map(|t| t.kind().clone()).collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(name.into())
    }

    fn int(n: i64) -> TokenKind {
        TokenKind::Number(Number::Integer(n))
    }

    #[test]
    fn lex_empty() {
        assert!(lex_kinds("").is_empty());
        assert!(lex_kinds("  \t\r\n ").is_empty());
    }

    #[test]
    fn lex_identifiers() {
        assert_eq!(
            lex_kinds("foo bar Baz _private x1"),
            vec![
                ident("foo"),
                ident("bar"),
                ident("Baz"),
                ident("_private"),
                ident("x1"),
            ]
        );
    }

    #[test]
    fn lex_keywords() {
        assert_eq!(
            lex_kinds("at: put: ifTrue:"),
            vec![
                TokenKind::Keyword("at:".into()),
                TokenKind::Keyword("put:".into()),
                TokenKind::Keyword("ifTrue:".into()),
            ]
        );
    }

    #[test]
    fn keyword_wins_over_identifier_then_colon() {
        assert_eq!(
            lex_kinds("x foo: 1"),
            vec![ident("x"), TokenKind::Keyword("foo:".into()), int(1)]
        );
    }

    #[test]
    fn identifier_before_assign_is_not_a_keyword() {
        assert_eq!(
            lex_kinds("x:=1"),
            vec![ident("x"), TokenKind::Assign, int(1)]
        );
        assert_eq!(
            lex_kinds("x := 1"),
            vec![ident("x"), TokenKind::Assign, int(1)]
        );
    }

    #[test]
    fn lex_numbers() {
        assert_eq!(
            lex_kinds("42 0 2.75"),
            vec![int(42), int(0), TokenKind::Number(Number::Float(2.75))]
        );
        assert_eq!(lex_kinds("-7"), vec![int(-7)]);
        assert_eq!(
            lex_kinds("-0.5"),
            vec![TokenKind::Number(Number::Float(-0.5))]
        );
    }

    #[test]
    fn trailing_period_is_not_a_fraction() {
        assert_eq!(lex_kinds("10."), vec![int(10), TokenKind::Period]);
        assert_eq!(
            lex_kinds("1.x"),
            vec![int(1), TokenKind::Period, ident("x")]
        );
    }

    #[test]
    fn minus_after_operand_is_binary() {
        assert_eq!(
            lex_kinds("3-4"),
            vec![int(3), TokenKind::BinarySelector("-".into()), int(4)]
        );
        assert_eq!(
            lex_kinds("x - 4"),
            vec![ident("x"), TokenKind::BinarySelector("-".into()), int(4)]
        );
        assert_eq!(
            lex_kinds("(a) -1"),
            vec![
                TokenKind::LeftParen,
                ident("a"),
                TokenKind::RightParen,
                TokenKind::BinarySelector("-".into()),
                int(1),
            ]
        );
    }

    #[test]
    fn minus_after_operator_is_a_sign() {
        assert_eq!(
            lex_kinds("x := -4"),
            vec![ident("x"), TokenKind::Assign, int(-4)]
        );
        assert_eq!(
            lex_kinds("3 + -4"),
            vec![int(3), TokenKind::BinarySelector("+".into()), int(-4)]
        );
    }

    #[test]
    fn integer_overflow_is_reported_and_skipped() {
        let result = tokenize("99999999999999999999 x");
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, LexErrorKind::NumberOutOfRange);
        assert_eq!(result.errors[0].span, Span::new(0, 20));
    }

    #[test]
    fn lex_binary_selectors() {
        assert_eq!(
            lex_kinds("+ - * / ~= <= -> == & ! ? @ %"),
            ["+", "-", "*", "/", "~=", "<=", "->", "==", "&", "!", "?", "@", "%"]
                .into_iter()
                .map(|s| TokenKind::BinarySelector(s.into()))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn pipe_never_joins_a_selector_run() {
        assert_eq!(
            lex_kinds("|| a"),
            vec![TokenKind::Pipe, TokenKind::Pipe, ident("a")]
        );
        assert_eq!(
            lex_kinds("a |b"),
            vec![ident("a"), TokenKind::Pipe, ident("b")]
        );
    }

    #[test]
    fn lex_strings() {
        assert_eq!(
            lex_kinds("'hello' 'wor ld' ''"),
            vec![
                TokenKind::String("hello".into()),
                TokenKind::String("wor ld".into()),
                TokenKind::String("".into()),
            ]
        );
    }

    #[test]
    fn string_escapes_are_kept_verbatim() {
        assert_eq!(
            lex_kinds(r"'it\'s' 'a\nb'"),
            vec![
                TokenKind::String(r"it\'s".into()),
                TokenKind::String(r"a\nb".into()),
            ]
        );
    }

    #[test]
    fn unterminated_string_drops_only_the_quote() {
        let result = tokenize("'abc");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, LexErrorKind::IllegalCharacter('\''));
        assert_eq!(
            result.tokens.iter().map(|t| t.kind().clone()).collect::<Vec<_>>(),
            vec![ident("abc")]
        );
    }

    #[test]
    fn lex_characters() {
        assert_eq!(
            lex_kinds("$a $  $$"),
            vec![
                TokenKind::Character('a'),
                TokenKind::Character(' '),
                TokenKind::Character('$'),
            ]
        );
    }

    #[test]
    fn backslash_character_is_illegal() {
        let result = tokenize(r"$\");
        assert!(result.tokens.is_empty());
        assert_eq!(
            result
                .errors
                .iter()
                .map(|e| e.kind.clone())
                .collect::<Vec<_>>(),
            vec![
                LexErrorKind::IllegalCharacter('$'),
                LexErrorKind::IllegalCharacter('\\'),
            ]
        );
    }

    #[test]
    fn lex_symbols() {
        assert_eq!(
            lex_kinds("#foo #bar2 #+ #<= #|"),
            vec![
                TokenKind::Symbol("foo".into()),
                TokenKind::Symbol("bar2".into()),
                TokenKind::Symbol("+".into()),
                TokenKind::Symbol("<=".into()),
                TokenKind::Symbol("|".into()),
            ]
        );
    }

    #[test]
    fn keyword_shaped_symbol_stops_at_colon() {
        assert_eq!(
            lex_kinds("#at:"),
            vec![TokenKind::Symbol("at".into()), TokenKind::Colon]
        );
    }

    #[test]
    fn lone_hash_is_illegal() {
        let result = tokenize("# x");
        assert_eq!(result.errors[0].kind, LexErrorKind::IllegalCharacter('#'));
        assert_eq!(result.tokens.len(), 1);
    }

    #[test]
    fn lex_comments() {
        assert_eq!(
            lex_kinds("x \"a note\" y"),
            vec![ident("x"), TokenKind::Comment("a note".into()), ident("y")]
        );
    }

    #[test]
    fn comment_does_not_reset_operand_state() {
        assert_eq!(
            lex_kinds("3 \"c\" -4"),
            vec![
                int(3),
                TokenKind::Comment("c".into()),
                TokenKind::BinarySelector("-".into()),
                int(4),
            ]
        );
    }

    #[test]
    fn lex_delimiters() {
        assert_eq!(
            lex_kinds("( ) [ ] { } . ^ | : ; :="),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Period,
                TokenKind::Caret,
                TokenKind::Pipe,
                TokenKind::Colon,
                TokenKind::Semicolon,
                TokenKind::Assign,
            ]
        );
    }

    #[test]
    fn block_tokens() {
        assert_eq!(
            lex_kinds("[:a | a]"),
            vec![
                TokenKind::LeftBracket,
                TokenKind::Colon,
                ident("a"),
                TokenKind::Pipe,
                ident("a"),
                TokenKind::RightBracket,
            ]
        );
    }

    #[test]
    fn illegal_character_is_reported_and_skipped() {
        let result = tokenize("x §ok");
        assert_eq!(
            result
                .tokens
                .iter()
                .map(|t| t.kind().clone())
                .collect::<Vec<_>>(),
            vec![ident("x"), ident("ok")]
        );
        assert_eq!(result.errors.len(), 1);
        let error = &result.errors[0];
        assert_eq!(error.kind, LexErrorKind::IllegalCharacter('§'));
        assert_eq!(error.position, Position::new(1, 3));
        // '§' is two bytes in UTF-8
        assert_eq!(error.span, Span::new(2, 4));
    }

    #[test]
    fn every_illegal_character_is_reported() {
        let result = tokenize("a ` b \u{7f} c");
        assert_eq!(result.tokens.len(), 3);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let tokens: Vec<Token> = Lexer::new("x\n  y := 'a\nb' z").collect();
        let positions: Vec<Position> = tokens.iter().map(Token::position).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(1, 1),
                Position::new(2, 3),
                Position::new(2, 5),
                Position::new(2, 8),
                Position::new(3, 4),
            ]
        );
    }

    #[test]
    fn columns_on_a_long_single_line() {
        let count = 200_000;
        let source = "ab ".repeat(count);
        let started = std::time::Instant::now();
        let result = tokenize(&source);
        let elapsed = started.elapsed();

        assert_eq!(result.tokens.len(), count);
        let last = result.tokens.last().map(Token::position);
        assert_eq!(last, Some(Position::new(1, saturate(3 * count - 2))));
        // Linear scanning takes milliseconds; recounting each line prefix takes minutes
        assert!(elapsed.as_secs() < 10, "tokenizing took {elapsed:?}");
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let tokens: Vec<Token> = Lexer::new("'é§' x\n§ y").collect();
        assert_eq!(tokens[1].position(), Position::new(1, 6));
        assert_eq!(tokens[2].position(), Position::new(2, 3));
    }

    #[test]
    fn line_counter_reaches_last_line() {
        let mut lexer = Lexer::new("a\n\n\nb\n");
        assert_eq!(lexer.line(), 1);
        let _ = lexer.by_ref().count();
        assert_eq!(lexer.line(), 5);
        assert_eq!(tokenize("a\n\n\nb\n").lines, 5);
    }

    #[test]
    fn spans_cover_token_text() {
        let source = "foo: 'bar' #baz";
        let spans: Vec<&str> = Lexer::new(source)
            .map(|t| &source[t.span().as_range()])
            .collect();
        assert_eq!(spans, vec!["foo:", "'bar'", "#baz"]);
    }

    #[test]
    fn cloned_lexer_replays_remaining_input() {
        let mut lexer = Lexer::new("a b c");
        lexer.next();
        let replay = lexer.clone();
        assert_eq!(
            lexer.collect::<Vec<_>>(),
            replay.collect::<Vec<_>>()
        );
    }

    #[test]
    fn end_of_input_position() {
        assert_eq!(
            Lexer::end_of_input("ab\ncd"),
            (Span::new(5, 5), Position::new(2, 3))
        );
        assert_eq!(
            Lexer::end_of_input(""),
            (Span::new(0, 0), Position::new(1, 1))
        );
    }

    #[test]
    fn demo_program_tokenizes_cleanly() {
        let source = "| x y resultado |\nx := 10.\ny := 20.\nresultado := x + y.\n^ resultado\n";
        let result = tokenize(source);
        assert!(result.is_clean());
        assert_eq!(result.tokens.len(), 21);
        assert_eq!(result.tokens.last().map(|t| t.position().line), Some(5));
    }
}
