// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! CLI command implementations.

use std::io::Read;

use camino::Utf8Path;
use miette::{Context, IntoDiagnostic, Result};
use tracing::debug;

pub mod check;
pub mod parse;
pub mod tokens;

/// Source text together with the name diagnostics should show for it.
#[derive(Debug)]
pub struct SourceFile {
    /// File path, or `<stdin>`.
    pub name: String,
    /// The whole text.
    pub text: String,
}

/// Reads `path`, or standard input when `path` is `-`.
pub fn read_source(path: &Utf8Path) -> Result<SourceFile> {
    let source = if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .into_diagnostic()
            .wrap_err("Failed to read standard input")?;
        SourceFile {
            name: "<stdin>".to_string(),
            text,
        }
    } else {
        let text = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read '{path}'"))?;
        SourceFile {
            name: path.to_string(),
            text,
        }
    };
    debug!(name = %source.name, bytes = source.text.len(), "read source");
    Ok(source)
}
