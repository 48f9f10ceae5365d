//! Semantic warnings raised while building and querying symbol tables.
//!
//! The tables never decide how warnings are surfaced: they hand them to a
//! [`SemanticLogger`] injected through the resolve helper.

use std::fmt;
use std::sync::{Mutex, PoisonError};
use symscope_api::models::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// An import names a class that is not on the classpath.
    /// Argument: the unresolved name.
    CannotFindClasspathSymbol,
}

impl DiagnosticKind {
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::CannotFindClasspathSymbol => "CANNOT_FIND_CLASSPATH_SYMBOL",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            DiagnosticKind::CannotFindClasspathSymbol => {
                "Cannot find type {0} on the classpath, analysis results may be incomplete"
            }
        }
    }

    /// Substitutes `{0}`, `{1}`, ... in the message template.
    pub fn format(&self, args: &[&str]) -> String {
        args.iter()
            .enumerate()
            .fold(self.template().to_string(), |msg, (i, arg)| {
                msg.replace(&format!("{{{i}}}"), arg)
            })
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub range: Range,
    pub args: Vec<String>,
}

impl Diagnostic {
    pub fn message(&self) -> String {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        self.kind.format(&args)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {}",
            self.range.start_line + 1,
            self.range.start_col + 1,
            self.kind,
            self.message()
        )
    }
}

/// Sink for semantic warnings. Shared by every table of an analysis and
/// possibly by several analyses running on different threads.
pub trait SemanticLogger: Send + Sync {
    fn warning(&self, location: Range, kind: DiagnosticKind, args: &[&str]);
}

/// Forwards warnings to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl SemanticLogger for TracingLogger {
    fn warning(&self, location: Range, kind: DiagnosticKind, args: &[&str]) {
        tracing::warn!(
            code = kind.code(),
            line = location.start_line + 1,
            col = location.start_col + 1,
            "{}",
            kind.format(args)
        );
    }
}

/// Keeps every warning in memory, in emission order.
#[derive(Debug, Default)]
pub struct CollectingLogger {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|d| d.kind == kind)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl SemanticLogger for CollectingLogger {
    fn warning(&self, location: Range, kind: DiagnosticKind, args: &[&str]) {
        tracing::debug!(code = kind.code(), "collected semantic warning");
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Diagnostic {
                kind,
                range: location,
                args: args.iter().map(|a| a.to_string()).collect(),
            });
    }
}
