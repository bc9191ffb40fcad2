// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `diagnostics` module defines errors and warnings emitted by the compiler driver.

use std::fmt;
use std::io::{self, Write};

/// A diagnostic emitted by the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    message: String,
}

/// The kind of diagnostic.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DiagnosticKind {
    Error,
    Warning,
}

impl Diagnostic {
    /// Creates an error diagnostic with the given error message.
    pub fn error(message: String) -> Self {
        Self { kind: DiagnosticKind::Error, message }
    }

    /// Creates a warning diagnostic with the given message.
    pub fn warning(message: String) -> Self {
        Self { kind: DiagnosticKind::Warning, message }
    }

    /// The kind of diagnostic.
    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    /// The diagnostic's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::Error => write!(f, "error: {}", self.message),
            DiagnosticKind::Warning => write!(f, "warning: {}", self.message),
        }
    }
}

/// Writes the diagnostics to the buffer, one per line, with errors before warnings, followed by their counts.
pub fn write_diagnostics(mut buffer: impl Write, errors: &[Diagnostic], warnings: &[Diagnostic]) -> io::Result<()> {
    for diagnostic in errors.iter().chain(warnings) {
        writeln!(buffer, "{diagnostic}")?;
    }

    if !errors.is_empty() {
        let error_count = errors.len();
        let errors_label = if error_count == 1 { "error" } else { "errors" };
        writeln!(buffer, "{error_count} {errors_label} generated")?;
    }

    if !warnings.is_empty() {
        let warning_count = warnings.len();
        let warnings_label = if warning_count == 1 { "warning" } else { "warnings" };
        writeln!(buffer, "{warning_count} {warnings_label} generated")?;
    }

    buffer.flush()
}
