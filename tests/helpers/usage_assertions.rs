//! Assertions over the used-reference results of a compilation.

use refscope::{Compilation, Diagnostic, ReferenceId, Severity};

/// Display names of the used handles, in result order.
pub fn used_names(compilation: &Compilation) -> Vec<String> {
    compilation
        .used_reference_handles()
        .iter()
        .map(|handle| handle.display.to_string())
        .collect()
}

/// Assert the exact used set, in order.
pub fn assert_used(compilation: &Compilation, expected: &[ReferenceId]) {
    assert_eq!(
        compilation.used_references(),
        expected,
        "used references were {:?}",
        used_names(compilation)
    );
}

pub fn assert_not_used(compilation: &Compilation, reference: ReferenceId) {
    assert!(
        !compilation.used_references().contains(&reference),
        "'{}' should not be used, got {:?}",
        compilation
            .reference(reference)
            .map(|h| h.display.to_string())
            .unwrap_or_default(),
        used_names(compilation)
    );
}

/// Rebuilding with only the used handles must leave nothing missing and
/// yield the same used set.
pub fn assert_round_trips(compilation: &Compilation) {
    let trimmed = compilation
        .retain_references(compilation.used_references())
        .expect("used references belong to the compilation");
    assert!(
        trimmed.missing_references().is_empty(),
        "missing after trimming: {:?}",
        trimmed.missing_references()
    );
    assert_eq!(trimmed.used_references(), compilation.used_references());
}

pub fn hidden_diagnostics(compilation: &Compilation) -> Vec<Diagnostic> {
    compilation
        .diagnostics()
        .into_iter()
        .filter(|d| d.severity == Severity::Hidden)
        .collect()
}
