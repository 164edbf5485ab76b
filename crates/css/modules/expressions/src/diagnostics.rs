//! Diagnostics emitted while reducing expressions.
//!
//! Every failure of the evaluator is reported here and turns the failing
//! sub-expression into "no result"; nothing is thrown.

use core::fmt;
use core::mem;
use css_values_units::Position;
use log::{error, info, warn};

/// How serious a diagnostic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// One reported message with its source location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub position: Position,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}: {}", self.position, self.severity, self.message)
    }
}

/// Receiver for evaluator diagnostics.
pub trait DiagnosticSink {
    fn emit(&mut self, severity: Severity, position: &Position, message: &str);
}

/// Forwards diagnostics to the `log` facade and counts them.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink {
    errors: usize,
    warnings: usize,
}

impl LogSink {
    pub const fn error_count(&self) -> usize {
        self.errors
    }

    pub const fn warning_count(&self) -> usize {
        self.warnings
    }
}

impl DiagnosticSink for LogSink {
    fn emit(&mut self, severity: Severity, position: &Position, message: &str) {
        match severity {
            Severity::Info => info!("{position}: {message}"),
            Severity::Warning => {
                self.warnings += 1;
                warn!("{position}: {message}");
            }
            Severity::Error => {
                self.errors += 1;
                error!("{position}: {message}");
            }
        }
    }
}

/// Keeps every diagnostic for later inspection.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Messages of the diagnostics reported with `severity`.
    pub fn messages(&self, severity: Severity) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .map(|diagnostic| diagnostic.message.as_str())
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.messages(Severity::Error).len()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity == Severity::Error)
    }

    /// Drain the collected diagnostics.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        mem::take(&mut self.diagnostics)
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&mut self, severity: Severity, position: &Position, message: &str) {
        self.diagnostics.push(Diagnostic {
            severity,
            position: position.clone(),
            message: message.to_owned(),
        });
    }
}
