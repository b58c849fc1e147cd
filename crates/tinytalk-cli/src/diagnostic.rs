// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error diagnostics rendered with miette.
//!
//! Converts tinytalk-core diagnostics into miette reports with the source
//! attached, a label under the offending span and a stable diagnostic code.

// Suppress unused_assignments for struct fields used by derive macros
#![allow(unused_assignments)]

use miette::{Diagnostic, SourceSpan};
use tinytalk_core::diagnostic::{Diagnostic as CoreDiagnostic, Severity};

/// A front-end diagnostic with rich formatting.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{message}")]
#[diagnostic(code(tinytalk::syntax))]
pub struct SourceDiagnostic {
    /// Error or warning
    pub severity: Severity,
    /// Human-readable message, prefixed with its location
    pub message: String,
    /// Source code for context
    #[source_code]
    pub src: miette::NamedSource<String>,
    /// Location of the problem
    #[label("{label}")]
    pub span: SourceSpan,
    /// Label for the span (interpolated by miette derive macro)
    pub label: String,
}

impl SourceDiagnostic {
    /// Creates a diagnostic from a tinytalk-core diagnostic.
    pub fn from_core_diagnostic(
        diagnostic: &CoreDiagnostic,
        source_path: &str,
        source: &str,
    ) -> Self {
        let label = match diagnostic.severity {
            Severity::Error => "error here",
            Severity::Warning => "warning here",
        };

        Self {
            severity: diagnostic.severity,
            message: format!("{}: {}", diagnostic.position, diagnostic.message),
            src: miette::NamedSource::new(source_path, source.to_string()),
            span: diagnostic.span.into(),
            label: label.to_string(),
        }
    }
}

/// Prints every diagnostic to stderr as a miette report.
///
/// Returns the number of errors among them.
pub fn report_all(diagnostics: &[CoreDiagnostic], source_path: &str, source: &str) -> usize {
    let mut errors = 0;
    for diagnostic in diagnostics {
        let rendered = SourceDiagnostic::from_core_diagnostic(diagnostic, source_path, source);
        if diagnostic.is_error() {
            errors += 1;
        }
        eprintln!("{:?}", miette::Report::new(rendered));
    }
    errors
}
