//! Operator results

use itertools::Itertools;
use slothtools_core::Error;
use std::fmt;

/// Whether the operator ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Finished,
    Cancelled,
}

/// Severity of the user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Warning,
}

/// One object, material or texture that could not be processed
#[derive(Debug)]
pub struct ItemFailure {
    pub item: String,
    pub error: Error,
}

/// Summary of one operator invocation
#[derive(Debug)]
pub struct OperatorReport {
    pub outcome: Outcome,
    pub level: ReportLevel,
    pub message: String,
    /// Items successfully changed
    pub changed: usize,
    /// Per-item lines, e.g. kept and removed face counts
    pub details: Vec<String>,
    pub failures: Vec<ItemFailure>,
}

impl OperatorReport {
    pub fn finished(message: impl Into<String>, changed: usize) -> Self {
        Self {
            outcome: Outcome::Finished,
            level: ReportLevel::Info,
            message: message.into(),
            changed,
            details: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Nothing was done; shown to the user as a warning
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Cancelled,
            level: ReportLevel::Warning,
            message: message.into(),
            changed: 0,
            details: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// Attach per-item failures; any failure raises the level to warning
    pub fn with_failures(mut self, failures: Vec<ItemFailure>) -> Self {
        if !failures.is_empty() {
            self.level = ReportLevel::Warning;
        }
        self.failures = failures;
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.outcome == Outcome::Cancelled
    }
}

impl fmt::Display for OperatorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if !self.failures.is_empty() {
            let failed = self
                .failures
                .iter()
                .map(|fail| format!("{}: {}", fail.item, fail.error))
                .join("; ");
            write!(f, " ({} failed: {})", self.failures.len(), failed)?;
        }
        Ok(())
    }
}
