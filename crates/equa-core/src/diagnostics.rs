//! Diagnostics collector — structured analysis findings
//!
//! Every phase (pattern-match compiler, type checker, verifier) funnels its
//! findings here; the report is the sole channel to the external CLI/report
//! layer. Diagnostics accumulate — no phase stops at its first finding —
//! and failures are never silent: non-exhaustiveness, unreachable clauses,
//! and unproved obligations always leave a record.

use serde::{Deserialize, Serialize};

use crate::ast::Span;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// Category of analysis finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A clause set fails to cover some constructor case
    NonExhaustiveMatch,
    /// A clause is fully subsumed by an earlier one
    UnreachableClause,
    /// An expression's type disagrees with its context
    TypeMismatch,
    /// An obligation was neither proved nor refuted
    ObligationUnknown,
    /// An obligation was refuted with a concrete witness
    ObligationRefuted,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DiagnosticKind::NonExhaustiveMatch => write!(f, "non-exhaustive-match"),
            DiagnosticKind::UnreachableClause => write!(f, "unreachable-clause"),
            DiagnosticKind::TypeMismatch => write!(f, "type-mismatch"),
            DiagnosticKind::ObligationUnknown => write!(f, "obligation-unknown"),
            DiagnosticKind::ObligationRefuted => write!(f, "obligation-refuted"),
        }
    }
}

/// A single analysis diagnostic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Name of the function the finding belongs to
    pub function: String,
    pub message: String,
    pub span: Option<Span>,
    /// Concrete witness value or input shape, when one exists
    pub witness: Option<String>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{} [{}] in '{}'", prefix, self.kind, self.function)?;
        if let Some(ref span) = self.span {
            write!(f, " at {}", span)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(ref witness) = self.witness {
            write!(f, " (witness: {})", witness)?;
        }
        Ok(())
    }
}

/// Accumulating report of all diagnostics for one compilation unit.
///
/// Insertion order is source order: functions are analyzed in declaration
/// order and phases run in a fixed sequence per function, so merging by
/// concatenation keeps the report stable for the same input set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Report { diagnostics: Vec::new() }
    }

    /// Returns true if no errors were found (warnings are OK)
    pub fn is_valid(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns only error-level diagnostics
    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .collect()
    }

    /// Returns only warning-level diagnostics
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .collect()
    }

    /// Diagnostics attached to one function
    pub fn for_function(&self, name: &str) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.function == name)
            .collect()
    }

    /// Concatenate another report's findings onto this one
    pub fn merge(&mut self, other: Report) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub(crate) fn add_error(
        &mut self,
        kind: DiagnosticKind,
        function: &str,
        message: String,
        span: Option<Span>,
    ) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            kind,
            function: function.to_string(),
            message,
            span,
            witness: None,
        });
    }

    pub(crate) fn add_error_with_witness(
        &mut self,
        kind: DiagnosticKind,
        function: &str,
        message: String,
        span: Option<Span>,
        witness: String,
    ) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            kind,
            function: function.to_string(),
            message,
            span,
            witness: Some(witness),
        });
    }

    pub(crate) fn add_warning(
        &mut self,
        kind: DiagnosticKind,
        function: &str,
        message: String,
        span: Option<Span>,
    ) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            kind,
            function: function.to_string(),
            message,
            span,
            witness: None,
        });
    }
}
