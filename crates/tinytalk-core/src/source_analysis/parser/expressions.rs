// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing for tinytalk.
//!
//! Expression parsing handles, from lowest to highest precedence:
//!
//! - Cascades (`;`)
//! - Keyword messages (`at: 1 put: 2`)
//! - Binary messages (`+ 4`)
//! - Unary messages (`size`)
//! - Primaries: literals, variables, blocks, brace literals and
//!   parenthesized expressions

use ecow::EcoString;

use crate::ast::{
    Block, BlockBody, Cascade, DictEntry, Expression, Identifier, KeywordPart, Literal, Message,
    MessageSend, Statement,
};
use crate::source_analysis::{Number, Token, TokenKind};

use super::{ParseResult, Parser};

impl<I: Iterator<Item = Token>> Parser<I> {
    // ========================================================================
    // Expression Parsing
    // ========================================================================

    /// Parses any expression.
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expression> {
        let primary = self.parse_primary()?;
        self.parse_expression_from(primary)
    }

    /// Parses the rest of an expression whose primary is already parsed.
    pub(super) fn parse_expression_from(&mut self, primary: Expression) -> ParseResult<Expression> {
        let primary_end = self.last;
        let unary = self.parse_unary_chain(primary);
        let binary = self.parse_binary_chain(unary)?;
        let keyword = self.parse_keyword_send(binary)?;
        let sent = self.last != primary_end;
        self.parse_cascade(keyword, sent)
    }

    /// Parses cascaded messages after a send: `; bar; baz: 1`.
    ///
    /// `sent` is false when no message followed the primary. A parenthesized
    /// send is then a complete operand and cannot start a cascade.
    fn parse_cascade(&mut self, expression: Expression, sent: bool) -> ParseResult<Expression> {
        if !self.check(&TokenKind::Semicolon) {
            return Ok(expression);
        }
        let (true, Expression::MessageSend(first)) = (sent, expression) else {
            return Err(self.unexpected("message send before ';'"));
        };

        let mut messages = Vec::new();
        while self.match_token(&TokenKind::Semicolon).is_some() {
            messages.push(self.parse_cascade_message()?);
        }
        // Each cascade part is a single message.
        if matches!(
            self.current_kind(),
            Some(TokenKind::Identifier(_) | TokenKind::Keyword(_) | TokenKind::BinarySelector(_))
        ) {
            return Err(self.unexpected("';' or end of statement"));
        }

        let span = messages
            .iter()
            .fold(first.span, |span, message| span.merge(message.span()));
        Ok(Expression::Cascade(Cascade {
            first,
            messages,
            span,
        }))
    }

    /// Parses one message of a cascade.
    fn parse_cascade_message(&mut self) -> ParseResult<Message> {
        if let Some(message) = self.parse_unary_message() {
            return Ok(message);
        }
        if let Some(message) = self.parse_binary_message()? {
            return Ok(message);
        }
        if let Some(message) = self.parse_keyword_message()? {
            return Ok(message);
        }
        Err(self.unexpected("message"))
    }

    // ========================================================================
    // Message Sends
    // ========================================================================

    /// Parses a keyword message to `receiver`, if one follows.
    fn parse_keyword_send(&mut self, receiver: Expression) -> ParseResult<Expression> {
        Ok(match self.parse_keyword_message()? {
            Some(message) => send(receiver, message),
            None => receiver,
        })
    }

    /// Parses `keyword: argument` pairs, if the current token is a keyword.
    fn parse_keyword_message(&mut self) -> ParseResult<Option<Message>> {
        let mut parts = Vec::new();
        while let Some(TokenKind::Keyword(keyword)) = self.current_kind() {
            let keyword = keyword.clone();
            let Some(token) = self.advance() else {
                break;
            };
            let argument = self.parse_keyword_argument()?;
            let span = token.span().merge(argument.span());
            parts.push(KeywordPart::new(keyword, argument, span));
        }
        Ok((!parts.is_empty()).then_some(Message::Keyword(parts)))
    }

    /// Parses a keyword argument: a primary with unary and binary sends.
    fn parse_keyword_argument(&mut self) -> ParseResult<Expression> {
        let operand = self.parse_binary_operand()?;
        self.parse_binary_chain(operand)
    }

    /// Parses binary sends to `receiver`, left to right.
    fn parse_binary_chain(&mut self, mut receiver: Expression) -> ParseResult<Expression> {
        while let Some(message) = self.parse_binary_message()? {
            receiver = send(receiver, message);
        }
        Ok(receiver)
    }

    /// Parses an operator and its argument, if the current token is an operator.
    ///
    /// `|` is accepted as an operator here even though it never lexes as a
    /// binary selector.
    fn parse_binary_message(&mut self) -> ParseResult<Option<Message>> {
        let selector: EcoString = match self.current_kind() {
            Some(TokenKind::BinarySelector(selector)) => selector.clone(),
            Some(TokenKind::Pipe) => "|".into(),
            _ => return Ok(None),
        };
        let Some(operator) = self.advance() else {
            return Ok(None);
        };
        let argument = self.parse_binary_operand()?;
        let span = operator.span().merge(argument.span());
        Ok(Some(Message::Binary {
            selector,
            argument: Box::new(argument),
            span,
        }))
    }

    /// Parses a binary operand: a primary with unary sends.
    fn parse_binary_operand(&mut self) -> ParseResult<Expression> {
        let primary = self.parse_primary()?;
        Ok(self.parse_unary_chain(primary))
    }

    /// Parses unary sends to `receiver`, left to right.
    fn parse_unary_chain(&mut self, mut receiver: Expression) -> Expression {
        while let Some(message) = self.parse_unary_message() {
            receiver = send(receiver, message);
        }
        receiver
    }

    /// Parses a unary message, if the current token is an identifier.
    fn parse_unary_message(&mut self) -> Option<Message> {
        self.match_identifier().map(Message::Unary)
    }

    /// Consumes the current token if it is an identifier.
    pub(super) fn match_identifier(&mut self) -> Option<Identifier> {
        let Some(TokenKind::Identifier(name)) = self.current_kind() else {
            return None;
        };
        let name = name.clone();
        let token = self.advance()?;
        Some(Identifier::new(name, token.span()))
    }

    // ========================================================================
    // Primaries
    // ========================================================================

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> ParseResult<Expression> {
        match self.current_kind() {
            Some(kind) if kind.is_literal() => self.parse_literal(),
            Some(TokenKind::Identifier(_)) => self
                .match_identifier()
                .map(Expression::Variable)
                .ok_or_else(|| self.unexpected("expression")),
            Some(TokenKind::LeftBracket) => self.parse_block().map(Expression::Block),
            Some(TokenKind::LeftParen) => self.parse_parenthesized(),
            Some(TokenKind::LeftBrace) => self.parse_brace_literal(),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Parses a number, string, character or symbol literal.
    fn parse_literal(&mut self) -> ParseResult<Expression> {
        let literal = match self.current_kind() {
            Some(TokenKind::Number(Number::Integer(n))) => Literal::Integer(*n),
            Some(TokenKind::Number(Number::Float(x))) => Literal::Float(*x),
            Some(TokenKind::String(s)) => Literal::String(s.clone()),
            Some(TokenKind::Character(c)) => Literal::Character(*c),
            Some(TokenKind::Symbol(s)) => Literal::Symbol(s.clone()),
            _ => return Err(self.unexpected("literal")),
        };
        let token = self.advance().ok_or_else(|| self.unexpected("literal"))?;
        Ok(Expression::Literal(literal, token.span()))
    }

    /// Parses a block: `[:x :y | statements]`.
    ///
    /// The `|` after the parameters is optional and the body may be empty.
    /// A body that is exactly one return statement becomes
    /// [`BlockBody::ReturnOnly`].
    pub(super) fn parse_block(&mut self) -> ParseResult<Block> {
        self.nested(|parser| {
            let open = parser.expect(&TokenKind::LeftBracket, "'['")?;

            let mut parameters = Vec::new();
            while parser.match_token(&TokenKind::Colon).is_some() {
                let parameter = parser
                    .match_identifier()
                    .ok_or_else(|| parser.unexpected("block parameter name"))?;
                parameters.push(parameter);
            }
            if !parameters.is_empty() {
                parser.match_token(&TokenKind::Pipe);
            }

            let statements = parser.parse_statements(Some(&TokenKind::RightBracket))?;
            let close = parser.expect(&TokenKind::RightBracket, "'.' or ']'")?;

            Ok(Block {
                parameters,
                body: block_body(statements),
                span: open.span().merge(close.span()),
            })
        })
    }

    /// Parses a parenthesized expression. The parentheses leave no node.
    fn parse_parenthesized(&mut self) -> ParseResult<Expression> {
        self.nested(|parser| {
            parser.expect(&TokenKind::LeftParen, "'('")?;
            let expression = parser.parse_expression()?;
            parser.expect(&TokenKind::RightParen, "')'")?;
            Ok(expression)
        })
    }

    /// Parses a brace literal: `{1. 2. 3}` or `{#a -> 1. #b -> 2}`.
    fn parse_brace_literal(&mut self) -> ParseResult<Expression> {
        self.nested(|parser| {
            let open = parser.expect(&TokenKind::LeftBrace, "'{'")?;
            let mut elements = vec![parser.parse_expression()?];
            while parser.match_token(&TokenKind::Period).is_some() {
                elements.push(parser.parse_expression()?);
            }
            let close = parser.expect(&TokenKind::RightBrace, "'.' or '}'")?;
            Ok(Expression::Literal(
                brace_literal(elements),
                open.span().merge(close.span()),
            ))
        })
    }
}

/// Wraps a message and its receiver in a send expression.
fn send(receiver: Expression, message: Message) -> Expression {
    Expression::MessageSend(MessageSend::new(receiver, message))
}

/// Makes a body of exactly one return statement [`BlockBody::ReturnOnly`].
fn block_body(statements: Vec<Statement>) -> BlockBody {
    match <[Statement; 1]>::try_from(statements) {
        Ok([Statement::Return { value, .. }]) => BlockBody::ReturnOnly(Box::new(value)),
        Ok(single) => BlockBody::Statements(single.into()),
        Err(statements) => BlockBody::Statements(statements),
    }
}

/// Returns true if `expression` is a `key -> value` send.
fn is_association(expression: &Expression) -> bool {
    matches!(
        expression,
        Expression::MessageSend(MessageSend {
            message: Message::Binary { selector, .. },
            ..
        }) if selector == "->"
    )
}

/// Builds a dictionary when every element is an association, else an array.
fn brace_literal(elements: Vec<Expression>) -> Literal {
    if !elements.iter().all(is_association) {
        return Literal::Array(elements);
    }
    let entries = elements
        .into_iter()
        .filter_map(|element| match element {
            Expression::MessageSend(MessageSend {
                receiver,
                message: Message::Binary { argument, .. },
                span,
            }) => Some(DictEntry {
                key: *receiver,
                value: *argument,
                span,
            }),
            _ => None,
        })
        .collect();
    Literal::Dictionary(entries)
}
