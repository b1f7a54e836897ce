use std::fmt;

use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A problem found while processing a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// `Target` or `Target::member`.
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, location: Option<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            location,
        }
    }

    pub fn warning(message: impl Into<String>, location: Option<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {location}: {}", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// Receives diagnostics without halting whatever produced them.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);

    fn error(&mut self, message: impl Into<String>, location: Option<String>)
    where
        Self: Sized,
    {
        self.report(Diagnostic::error(message, location));
    }
}

/// Collects diagnostics in order.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    reported: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.reported.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.reported.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.reported.push(diagnostic);
    }
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => log::error!("{diagnostic}"),
            Severity::Warning => log::warn!("{diagnostic}"),
            Severity::Info => log::info!("{diagnostic}"),
        }
    }
}
