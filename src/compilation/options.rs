//! Analysis configuration carried by a compilation.

use crate::model::DocumentationMode;

/// Options controlling how the usage analysis runs and reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Walk declarations on the rayon pool. The result is identical either way.
    pub parallel: bool,
    /// Merge hidden unused-import diagnostics into
    /// [`Compilation::diagnostics`](crate::Compilation::diagnostics).
    pub report_unused_imports: bool,
    /// Mode given to files added without an explicit one.
    pub default_documentation_mode: DocumentationMode,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            report_unused_imports: true,
            default_documentation_mode: DocumentationMode::Parse,
        }
    }
}

impl AnalysisOptions {
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn with_report_unused_imports(mut self, report: bool) -> Self {
        self.report_unused_imports = report;
        self
    }

    pub fn with_default_documentation_mode(mut self, mode: DocumentationMode) -> Self {
        self.default_documentation_mode = mode;
        self
    }
}
