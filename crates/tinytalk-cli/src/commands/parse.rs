// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `tinytalk parse`: print the syntax tree of a source file.
//!
//! The `debug` format is the pretty-printed AST. The `compact` format prints
//! one s-expression per statement:
//!
//! ```text
//! (:= x (send 3 + 4))
//! (send Transcript show: 'hi')
//! ```

use std::fmt::Write as _;

use camino::Utf8Path;
use miette::Result;
use tinytalk_core::ast::{
    Block, BlockBody, Expression, Literal, Message, MessageSend, Program, Statement,
};
use tinytalk_core::diagnostic::{Diagnostic, Severity};
use tinytalk_core::source_analysis::{ParseOptions, parse_with_options};
use tracing::{info, instrument};

use super::read_source;
use crate::diagnostic::report_all;

/// Parses the file at `path` and prints its tree in `format`.
#[instrument(skip_all, fields(path = %path, format = ?format))]
pub fn run(path: &Utf8Path, options: &ParseOptions, format: OutputFormat) -> Result<()> {
    let source = read_source(path)?;

    let parsed = match parse_with_options(&source.text, options) {
        Ok(parsed) => parsed,
        Err(error) => {
            report_all(&[Diagnostic::from(&error)], &source.name, &source.text);
            miette::bail!("Failed to parse '{}'", source.name);
        }
    };
    info!(
        statements = parsed.program.statements.len(),
        lex_errors = parsed.lex_errors.len(),
        "parsed"
    );

    let warnings: Vec<Diagnostic> = parsed
        .lex_errors
        .iter()
        .map(|error| Diagnostic::from_lex_error(error, Severity::Warning))
        .collect();
    report_all(&warnings, &source.name, &source.text);

    match format {
        OutputFormat::Debug => println!("{:#?}", parsed.program),
        OutputFormat::Compact => print!("{}", render_compact(&parsed.program)),
    }
    Ok(())
}

/// Output format for the syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed `Debug` output (default).
    #[default]
    Debug,
    /// One s-expression per statement.
    Compact,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "debug" => Ok(Self::Debug),
            "compact" => Ok(Self::Compact),
            other => Err(format!(
                "unknown format '{other}': expected 'debug' or 'compact'"
            )),
        }
    }
}

// ============================================================================
// Compact rendering
// ============================================================================

/// Renders `program` as one s-expression per line.
pub fn render_compact(program: &Program) -> String {
    let mut out = String::new();
    for statement in &program.statements {
        write_statement(&mut out, statement);
        out.push('\n');
    }
    out
}

fn write_statement(out: &mut String, statement: &Statement) {
    match statement {
        Statement::Expression(expression) => write_expression(out, expression),
        Statement::Assignment { target, value, .. } => {
            let _ = write!(out, "(:= {} ", target.name);
            write_expression(out, value);
            out.push(')');
        }
        Statement::Return { value, .. } => {
            out.push_str("(^ ");
            write_expression(out, value);
            out.push(')');
        }
        Statement::Declaration { names, .. } => {
            out.push_str("(|");
            for name in names {
                out.push(' ');
                out.push_str(&name.name);
            }
            out.push(')');
        }
        Statement::Block(block) => write_block(out, block),
    }
}

fn write_expression(out: &mut String, expression: &Expression) {
    match expression {
        Expression::Literal(literal, _) => write_literal(out, literal),
        Expression::Variable(identifier) => out.push_str(&identifier.name),
        Expression::Block(block) => write_block(out, block),
        Expression::MessageSend(send) => write_send(out, send),
        Expression::Cascade(cascade) => {
            out.push_str("(cascade ");
            write_expression(out, cascade.receiver());
            for message in std::iter::once(&cascade.first.message).chain(&cascade.messages) {
                out.push_str(" (");
                write_message(out, message);
                out.push(')');
            }
            out.push(')');
        }
    }
}

fn write_send(out: &mut String, send: &MessageSend) {
    out.push_str("(send ");
    write_expression(out, &send.receiver);
    out.push(' ');
    write_message(out, &send.message);
    out.push(')');
}

/// Writes the selector followed by the arguments.
fn write_message(out: &mut String, message: &Message) {
    out.push_str(&message.selector());
    for argument in message.arguments() {
        out.push(' ');
        write_expression(out, argument);
    }
}

fn write_block(out: &mut String, block: &Block) {
    out.push_str("(block (");
    for (i, parameter) in block.parameters.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&parameter.name);
    }
    out.push(')');
    match &block.body {
        BlockBody::Statements(statements) => {
            for statement in statements {
                out.push(' ');
                write_statement(out, statement);
            }
        }
        BlockBody::ReturnOnly(value) => {
            out.push_str(" (^ ");
            write_expression(out, value);
            out.push(')');
        }
    }
    out.push(')');
}

fn write_literal(out: &mut String, literal: &Literal) {
    match literal {
        Literal::Integer(n) => {
            let _ = write!(out, "{n}");
        }
        Literal::Float(x) => {
            let _ = write!(out, "{x:?}");
        }
        Literal::String(s) => {
            let _ = write!(out, "'{}'", s.replace("'", "\\'"));
        }
        Literal::Character(c) => {
            let _ = write!(out, "${c}");
        }
        Literal::Symbol(s) => {
            let _ = write!(out, "#{s}");
        }
        Literal::Array(elements) => {
            out.push_str("(array");
            for element in elements {
                out.push(' ');
                write_expression(out, element);
            }
            out.push(')');
        }
        Literal::Dictionary(entries) => {
            out.push_str("(dict");
            for entry in entries {
                out.push_str(" (-> ");
                write_expression(out, &entry.key);
                out.push(' ');
                write_expression(out, &entry.value);
                out.push(')');
            }
            out.push(')');
        }
    }
}
