// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `tinytalk tokens`: print the token stream of a source file.
//!
//! Each token goes on its own line as `line:column`, category and text,
//! separated by tabs. Lexical errors are reported on stderr; they only fail
//! the command under `--strict`.

use std::fmt::Write as _;

use camino::Utf8Path;
use miette::Result;
use tinytalk_core::diagnostic::{Diagnostic, Severity};
use tinytalk_core::source_analysis::{ParseOptions, Token, tokenize};
use tracing::{info, instrument};

use super::read_source;
use crate::diagnostic::report_all;

/// Tokenizes the file at `path` and prints the tokens.
#[instrument(skip_all, fields(path = %path))]
pub fn run(path: &Utf8Path, options: &ParseOptions) -> Result<()> {
    let source = read_source(path)?;
    let tokenized = tokenize(&source.text);
    info!(
        tokens = tokenized.tokens.len(),
        errors = tokenized.errors.len(),
        "tokenized"
    );

    print!("{}", render_tokens(&tokenized.tokens));
    if tokenized.is_clean() {
        return Ok(());
    }

    let severity = if options.strict_lexing {
        Severity::Error
    } else {
        Severity::Warning
    };
    let diagnostics: Vec<Diagnostic> = tokenized
        .errors
        .iter()
        .map(|error| Diagnostic::from_lex_error(error, severity))
        .collect();
    let errors = report_all(&diagnostics, &source.name, &source.text);

    if errors > 0 {
        let plural = if errors == 1 { "" } else { "s" };
        miette::bail!("{errors} lexical error{plural} in '{}'", source.name);
    }
    Ok(())
}

/// Renders one tab-separated line per token.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(
            out,
            "{}\t{}\t{}",
            token.position(),
            token.kind().category(),
            token.kind()
        );
    }
    out
}
