//! Diagnostics: informational reporting for the usage analysis.
//!
//! This module provides the diagnostic type shared with the binder (whose
//! diagnostics are handed in as input) and the hidden-severity diagnostics
//! produced for unused import directives.

use std::sync::Arc;

use crate::base::{FileId, TextRange};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Not shown by default; used for code-cleanup suggestions.
    Hidden,
    Hint,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Whether a diagnostic of this severity fails the compilation.
    pub fn is_blocking(&self) -> bool {
        *self == Severity::Error
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// The file containing this diagnostic.
    pub file: FileId,
    /// Byte range within the file.
    pub range: TextRange,
    /// Severity level.
    pub severity: Severity,
    /// Diagnostic code (e.g., "H0001").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
}

impl Diagnostic {
    fn with_severity(
        severity: Severity,
        file: FileId,
        range: TextRange,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            file,
            range,
            severity,
            code: None,
            message: message.into(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(file: FileId, range: TextRange, message: impl Into<Arc<str>>) -> Self {
        Self::with_severity(Severity::Error, file, range, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(file: FileId, range: TextRange, message: impl Into<Arc<str>>) -> Self {
        Self::with_severity(Severity::Warning, file, range, message)
    }

    /// Create a new hidden diagnostic.
    pub fn hidden(file: FileId, range: TextRange, message: impl Into<Arc<str>>) -> Self {
        Self::with_severity(Severity::Hidden, file, range, message)
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Ordering key: file, then start offset, then end offset.
    pub(crate) fn sort_key(&self) -> (FileId, u32, u32) {
        (
            self.file,
            u32::from(self.range.start()),
            u32::from(self.range.end()),
        )
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Codes for diagnostics produced by this crate.
///
/// ## Code Ranges
///
/// - **H0001-H0099**: Hidden (code cleanup) diagnostics
pub mod codes {
    /// Import directive, static import or alias that no lookup went through.
    pub const UNNECESSARY_IMPORT: &str = "H0001";
    /// Extern alias that no lookup went through.
    pub const UNUSED_EXTERN_ALIAS: &str = "H0002";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during analysis.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add every diagnostic from an iterator.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Add an unnecessary import directive diagnostic.
    pub fn unnecessary_import(&mut self, file: FileId, range: TextRange, what: &str) {
        self.add(
            Diagnostic::hidden(file, range, format!("unnecessary {}", what))
                .with_code(codes::UNNECESSARY_IMPORT),
        );
    }

    /// Add an unused extern alias diagnostic.
    pub fn unused_extern_alias(&mut self, file: FileId, range: TextRange, alias: &str) {
        self.add(
            Diagnostic::hidden(file, range, format!("unused extern alias: '{}'", alias))
                .with_code(codes::UNUSED_EXTERN_ALIAS),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_blocking())
    }

    /// Take all diagnostics sorted by location, leaving the collector empty.
    pub fn take_sorted(&mut self) -> Vec<Diagnostic> {
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        diagnostics.sort_by_key(Diagnostic::sort_key);
        diagnostics
    }
}
