// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Statement parsing for tinytalk.
//!
//! Statements are separated by periods; a trailing period is optional and a
//! temporaries declaration (`| a b |`) needs no period after it.

use crate::ast::{Expression, Identifier, Program, Statement};
use crate::source_analysis::{Token, TokenKind};

use super::{ParseResult, Parser};

impl<I: Iterator<Item = Token>> Parser<I> {
    // ========================================================================
    // Program
    // ========================================================================

    /// Parses a whole program: one or more statements up to end of input.
    pub(super) fn parse_program(&mut self) -> ParseResult<Program> {
        let statements = self.parse_statements(None)?;
        if !self.is_at_end() {
            return Err(self.unexpected("'.' or end of input"));
        }

        let (Some(first), Some(last)) = (statements.first(), statements.last()) else {
            return Err(self.unexpected("statement"));
        };
        let span = first.span().merge(last.span());
        Ok(Program::new(statements, span))
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Parses statements until end of input or the `closing` token.
    ///
    /// Stops without consuming after a statement that is neither followed
    /// by a period nor a declaration; the caller decides whether the next
    /// token is acceptable.
    pub(super) fn parse_statements(
        &mut self,
        closing: Option<&TokenKind>,
    ) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        while !self.is_at_end() && !closing.is_some_and(|kind| self.check(kind)) {
            let statement = self.parse_statement()?;
            let is_declaration = matches!(statement, Statement::Declaration { .. });
            statements.push(statement);

            if self.match_token(&TokenKind::Period).is_none() && !is_declaration {
                break;
            }
        }
        Ok(statements)
    }

    /// Parses a single statement.
    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current_kind() {
            Some(TokenKind::Pipe) => self.parse_declaration(),
            Some(TokenKind::Caret) => self.parse_return(),
            _ => match self.match_identifier() {
                Some(name) => self.parse_identifier_statement(name),
                None => Ok(expression_statement(self.parse_expression()?)),
            },
        }
    }

    /// Parses a statement that starts with an identifier: an assignment, or
    /// an expression whose primary is that identifier.
    fn parse_identifier_statement(&mut self, name: Identifier) -> ParseResult<Statement> {
        if self.match_token(&TokenKind::Assign).is_some() {
            let value = self.parse_expression()?;
            let span = name.span.merge(value.span());
            return Ok(Statement::Assignment {
                target: name,
                value,
                span,
            });
        }
        let expression = self.parse_expression_from(Expression::Variable(name))?;
        Ok(Statement::Expression(expression))
    }

    /// Parses a return statement: `^ expression`.
    fn parse_return(&mut self) -> ParseResult<Statement> {
        let caret = self.expect(&TokenKind::Caret, "'^'")?;
        let value = self.parse_expression()?;
        let span = caret.span().merge(value.span());
        Ok(Statement::Return { value, span })
    }

    /// Parses a temporaries declaration: `| a b c |`.
    fn parse_declaration(&mut self) -> ParseResult<Statement> {
        let open = self.expect(&TokenKind::Pipe, "'|'")?;
        let mut names = Vec::new();
        while let Some(name) = self.match_identifier() {
            names.push(name);
        }
        if names.is_empty() {
            return Err(self.unexpected("identifier"));
        }
        let close = self.expect(&TokenKind::Pipe, "identifier or '|'")?;
        Ok(Statement::Declaration {
            names,
            span: open.span().merge(close.span()),
        })
    }
}

/// Wraps an expression as a statement; a bare block becomes a block statement.
fn expression_statement(expression: Expression) -> Statement {
    match expression {
        Expression::Block(block) => Statement::Block(block),
        other => Statement::Expression(other),
    }
}
