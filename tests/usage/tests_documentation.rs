//! Documentation cross-references under each documentation mode.

use refscope::{AnalysisOptions, Declaration, DocumentationMode, ImportKind, Occurrence};
use rstest::rstest;

use crate::helpers::fixture::*;
use crate::helpers::usage_assertions::*;

#[rstest]
#[case(DocumentationMode::None, false)]
#[case(DocumentationMode::Parse, true)]
#[case(DocumentationMode::Diagnose, true)]
fn test_doc_reference_counts_per_mode(#[case] mode: DocumentationMode, #[case] counted: bool) {
    let mut fx = Fixture::new();
    let (r0, a0) = fx.library("Docs");
    let c0 = fx.class("C0", a0);
    let file = fx.builder.add_file_with_mode("Documented.cs", mode);
    let documented = fx.method(fx.program, "Documented", 0, Vec::new());
    fx.declare(Declaration::new(documented, file).with_doc_reference(c0));
    let compilation = fx.build();

    if counted {
        assert_used(&compilation, &[r0]);
    } else {
        assert_not_used(&compilation, r0);
    }
}

#[rstest]
#[case(DocumentationMode::None, 1)]
#[case(DocumentationMode::Parse, 0)]
#[case(DocumentationMode::Diagnose, 0)]
fn test_import_used_only_by_doc_reference(
    #[case] mode: DocumentationMode,
    #[case] unused_imports: usize,
) {
    let mut fx = Fixture::new();
    let (_, a0) = fx.library("Docs");
    let n0 = fx.namespace("N0");
    let c0 = fx.class("C0", a0);
    let file = fx.builder.add_file_with_mode("Documented.cs", mode);
    let import = fx
        .builder
        .add_import(file, span(0, 10), ImportKind::Namespace { namespace: n0 });
    let documented = fx.method(fx.program, "Documented", 0, Vec::new());
    fx.declare(
        Declaration::new(documented, file).with_doc_reference(Occurrence::via(c0, import)),
    );
    let compilation = fx.build();

    assert_eq!(compilation.unused_import_diagnostics().len(), unused_imports);
}

#[test]
fn test_default_mode_applies_to_files_without_one() {
    let options =
        AnalysisOptions::default().with_default_documentation_mode(DocumentationMode::None);
    let mut fx = Fixture::with_options(options);
    let (r0, a0) = fx.library("Docs");
    let c0 = fx.class("C0", a0);
    let documented = fx.method(fx.program, "Documented", 0, Vec::new());
    let file = fx.file;
    fx.declare(Declaration::new(documented, file).with_doc_reference(c0));
    let compilation = fx.build();

    assert_eq!(
        compilation.file(file).map(|f| f.documentation_mode),
        Some(DocumentationMode::None)
    );
    assert_not_used(&compilation, r0);
}
