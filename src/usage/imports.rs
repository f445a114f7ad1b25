//! Unused-import projection.
//!
//! Turns the per-directive bookkeeping of the walk into
//! [`ImportDirectiveRecord`]s and hidden diagnostics.

use tracing::debug;

use super::accumulator::UsageSummary;
use super::records::ImportDirectiveRecord;
use crate::compilation::Compilation;
use crate::diagnostics::{Diagnostic, DiagnosticCollector};
use crate::model::ImportKind;

pub(crate) fn import_records(
    compilation: &Compilation,
    summary: &UsageSummary,
) -> Vec<ImportDirectiveRecord> {
    compilation
        .imports()
        .map(|(import, directive)| ImportDirectiveRecord {
            import,
            file: directive.file,
            range: directive.range,
            kind: directive.kind.clone(),
            targets: directive.kind.targets(),
            used: summary.is_import_used(import),
        })
        .collect()
}

/// One hidden diagnostic per directive no lookup went through. Duplicate
/// directives are judged independently.
pub(crate) fn unused_import_diagnostics(
    compilation: &Compilation,
    summary: &UsageSummary,
) -> Vec<Diagnostic> {
    let mut collector = DiagnosticCollector::new();
    for (import, directive) in compilation.imports() {
        if summary.is_import_used(import) {
            continue;
        }
        match &directive.kind {
            ImportKind::ExternAlias { alias, .. } => {
                collector.unused_extern_alias(directive.file, directive.range, alias)
            }
            kind => collector.unnecessary_import(directive.file, directive.range, kind.describe()),
        }
    }
    debug!(
        "[USAGE] {} unused import directives in '{}'",
        collector.diagnostics().len(),
        compilation.name()
    );
    collector.take_sorted()
}
