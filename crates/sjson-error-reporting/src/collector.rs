//! Ordered accumulation of diagnostics.
//!
//! Parsing and table materialization report into the same collector, so the
//! caller gets one flat list in emission order.

use crate::builder::DiagnosticMessageBuilder;
use crate::diagnostic::{DiagnosticKind, DiagnosticMessage};
use sjson_source_map::SourceInfo;

/// Append-only collector for diagnostic messages.
///
/// Diagnostics keep the order in which they were reported. Nothing is
/// sorted, merged or suppressed.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<DiagnosticMessage>,
}

impl DiagnosticCollector {
    /// Create a new empty diagnostic collector.
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    /// Add a diagnostic message.
    pub fn add(&mut self, diagnostic: DiagnosticMessage) {
        self.diagnostics.push(diagnostic);
    }

    /// Add several diagnostic messages, keeping their order.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = DiagnosticMessage>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Add an error message with source location.
    pub fn error_at(&mut self, message: impl Into<String>, location: SourceInfo) {
        let diagnostic = DiagnosticMessageBuilder::error(message)
            .with_location(location)
            .build();
        self.add(diagnostic);
    }

    /// Add a warning message with source location.
    pub fn warn_at(&mut self, message: impl Into<String>, location: SourceInfo) {
        let diagnostic = DiagnosticMessageBuilder::warning(message)
            .with_location(location)
            .build();
        self.add(diagnostic);
    }

    /// Add an error message with error code and source location.
    pub fn error_with_code(&mut self, code: &str, message: impl Into<String>, location: SourceInfo) {
        let diagnostic = DiagnosticMessageBuilder::error(message)
            .with_code(code)
            .with_location(location)
            .build();
        self.add(diagnostic);
    }

    /// Add a warning message with error code and source location.
    pub fn warn_with_code(&mut self, code: &str, message: impl Into<String>, location: SourceInfo) {
        let diagnostic = DiagnosticMessageBuilder::warning(message)
            .with_code(code)
            .with_location(location)
            .build();
        self.add(diagnostic);
    }

    /// Check if any errors were collected (warnings don't count).
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::Error)
    }

    /// Number of collected errors.
    pub fn error_count(&self) -> usize {
        self.count(DiagnosticKind::Error)
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.count(DiagnosticKind::Warning)
    }

    fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    /// Get a reference to the collected diagnostics.
    pub fn diagnostics(&self) -> &[DiagnosticMessage] {
        &self.diagnostics
    }

    /// Consume the collector and return the diagnostics in emission order.
    pub fn into_diagnostics(self) -> Vec<DiagnosticMessage> {
        self.diagnostics
    }

    /// Number of collected diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Check if the collector is empty.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
