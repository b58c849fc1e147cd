// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `tinytalk check`: report diagnostics for a source file.
//!
//! Nothing is printed for a clean file. Lexical errors are warnings unless
//! `--strict` is given; any error makes the command fail.

use camino::Utf8Path;
use miette::Result;
use tinytalk_core::diagnostic::check;
use tinytalk_core::source_analysis::ParseOptions;
use tracing::{info, instrument};

use super::read_source;
use crate::diagnostic::report_all;

/// Checks the file at `path` and prints its diagnostics.
#[instrument(skip_all, fields(path = %path))]
pub fn run(path: &Utf8Path, options: &ParseOptions) -> Result<()> {
    let source = read_source(path)?;
    let diagnostics = check(&source.text, options);
    info!(count = diagnostics.len(), "checked");

    let errors = report_all(&diagnostics, &source.name, &source.text);
    if errors > 0 {
        let plural = if errors == 1 { "" } else { "s" };
        miette::bail!("{errors} error{plural} found in '{}'", source.name);
    }
    Ok(())
}
