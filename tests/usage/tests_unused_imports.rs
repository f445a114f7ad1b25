//! Unused import directives and their hidden diagnostics.

use refscope::diagnostics::codes;
use refscope::{
    AnalysisOptions, BoundNode, Diagnostic, ExternalReference, ImportKind, NamedType, Occurrence,
    Severity,
};

use crate::helpers::fixture::*;
use crate::helpers::usage_assertions::*;

#[test]
fn test_unused_namespace_import_is_reported() {
    // import N1;   nothing in N1 is dereferenced
    let mut fx = Fixture::new();
    let corlib = fx.corlib();
    let (r1, a1) = fx.library("Lib1");
    let n1 = fx.namespace("N1");
    fx.builder.symbols().named_type(NamedType {
        name: "C1".into(),
        assembly: a1,
        container: Some(n1),
        arity: 0,
        embedded_from: None,
    });
    let import = fx.import(ImportKind::Namespace { namespace: n1 });
    fx.main(BoundNode::Literal);
    let compilation = fx.build();

    assert!(!compilation.is_import_used(import));
    let hidden = hidden_diagnostics(&compilation);
    assert_eq!(hidden.len(), 1);
    assert_eq!(hidden[0].range, span(0, 10));
    assert_eq!(hidden[0].code.as_deref(), Some(codes::UNNECESSARY_IMPORT));
    assert_eq!(&*hidden[0].message, "unnecessary import directive");
    assert!(!hidden[0].severity.is_blocking());

    assert_used(&compilation, &[corlib.reference]);
    assert_not_used(&compilation, r1);
}

#[test]
fn test_import_used_by_a_lookup_is_not_reported() {
    let mut fx = Fixture::new();
    let (r1, a1) = fx.library("Lib1");
    let n1 = fx.namespace("N1");
    let c1 = fx.builder.symbols().named_type(NamedType {
        name: "C1".into(),
        assembly: a1,
        container: Some(n1),
        arity: 0,
        embedded_from: None,
    });
    let import = fx.import(ImportKind::Namespace { namespace: n1 });
    fx.main(BoundNode::type_expression(Occurrence::via(c1, import)));
    let compilation = fx.build();

    assert!(compilation.is_import_used(import));
    assert!(compilation.unused_import_diagnostics().is_empty());
    assert_used(&compilation, &[r1]);
}

#[test]
fn test_duplicate_directives_are_judged_independently() {
    let mut fx = Fixture::new();
    let (_, a1) = fx.library("Lib1");
    let n1 = fx.namespace("N1");
    let c1 = fx.builder.symbols().named_type(NamedType {
        name: "C1".into(),
        assembly: a1,
        container: Some(n1),
        arity: 0,
        embedded_from: None,
    });
    let first = fx.import(ImportKind::Namespace { namespace: n1 });
    let second = fx.import(ImportKind::Namespace { namespace: n1 });
    fx.main(BoundNode::type_expression(Occurrence::via(c1, first)));
    let compilation = fx.build();

    assert!(compilation.is_import_used(first));
    assert!(!compilation.is_import_used(second));
    let diagnostics = compilation.unused_import_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].range, span(20, 30));
}

#[test]
fn test_lookup_of_error_symbol_does_not_mark_import() {
    let mut fx = Fixture::new();
    let n1 = fx.namespace("N1");
    let import = fx.import(ImportKind::Namespace { namespace: n1 });
    let missing = fx.builder.symbols().error("Missing");
    fx.main(BoundNode::type_expression(Occurrence::via(missing, import)));
    let compilation = fx.build();

    assert!(!compilation.is_import_used(import));
    assert_eq!(compilation.unused_import_diagnostics().len(), 1);
}

#[test]
fn test_unused_alias_target_contributes_nothing() {
    let mut fx = Fixture::new();
    let (r1, a1) = fx.library("Lib1");
    let c1 = fx.class("C1", a1);
    fx.import(ImportKind::TypeAlias {
        alias: "X".into(),
        ty: c1,
    });
    let compilation = fx.build();

    assert_not_used(&compilation, r1);
    let diagnostics = compilation.unused_import_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(&*diagnostics[0].message, "unnecessary alias directive");
}

#[test]
fn test_used_static_import_walks_its_target() {
    let mut fx = Fixture::new();
    let (r1, a1) = fx.library("Math");
    let (r2, a2) = fx.library("Numerics");
    let number = fx.class("Number", a2);
    let math = fx.derived_class("Math", a1, number);
    let abs = fx.method(math, "Abs", 0, Vec::new());
    let import = fx.import(ImportKind::StaticType { ty: math });
    fx.main(BoundNode::invocation(
        None,
        Occurrence::via(abs, import),
        Vec::new(),
    ));
    let compilation = fx.build();

    assert!(compilation.is_import_used(import));
    assert_used(&compilation, &[r1, r2]);
}

#[test]
fn test_unused_extern_alias_has_its_own_code() {
    let mut fx = Fixture::new();
    let (aliased, _) = fx.handle(ExternalReference::assembly(identity("Lib")).with_alias("L"));
    let import = fx.import(ImportKind::ExternAlias {
        alias: "L".into(),
        references: vec![aliased],
    });
    let compilation = fx.build();

    assert!(!compilation.is_import_used(import));
    let diagnostics = compilation.unused_import_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code.as_deref(), Some(codes::UNUSED_EXTERN_ALIAS));
    assert_eq!(&*diagnostics[0].message, "unused extern alias: 'L'");
    assert_not_used(&compilation, aliased);
}

#[test]
fn test_extern_alias_dereference_uses_only_the_aliased_handle() {
    let mut fx = Fixture::new();
    let (aliased, aliased_assembly) =
        fx.handle(ExternalReference::assembly(identity("Lib")).with_alias("L"));
    let (plain, plain_assembly) = fx.library("Lib");
    let aliased_c = fx.class("C", aliased_assembly);
    fx.class("C", plain_assembly);
    let import = fx.import(ImportKind::ExternAlias {
        alias: "L".into(),
        references: vec![aliased],
    });
    fx.main(BoundNode::type_expression(Occurrence::via(aliased_c, import)));
    let compilation = fx.build();

    assert!(compilation.is_import_used(import));
    assert_used(&compilation, &[aliased]);
    assert_not_used(&compilation, plain);
}

#[test]
fn test_import_records_reflect_the_walk() {
    let mut fx = Fixture::new();
    let (_, a1) = fx.library("Lib1");
    let n1 = fx.namespace("N1");
    let n2 = fx.namespace("N2");
    let c1 = fx.class("C1", a1);
    let used = fx.import(ImportKind::Namespace { namespace: n1 });
    let unused = fx.import(ImportKind::NamespaceAlias {
        alias: "Two".into(),
        namespace: n2,
    });
    fx.main(BoundNode::type_expression(Occurrence::via(c1, used)));
    let compilation = fx.build();

    let records = compilation.import_records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].import, used);
    assert!(records[0].used);
    assert_eq!(records[0].targets, vec![n1]);
    assert_eq!(records[1].import, unused);
    assert!(!records[1].used);
    assert_eq!(records[1].targets, vec![n2]);
}

#[test]
fn test_diagnostics_merge_binder_and_hidden_sorted() {
    let mut fx = Fixture::new();
    let n1 = fx.namespace("N1");
    fx.import(ImportKind::Namespace { namespace: n1 });
    fx.builder
        .add_diagnostic(Diagnostic::error(fx.file, span(50, 60), "type expected"));
    fx.builder
        .add_diagnostic(Diagnostic::warning(fx.file, span(5, 8), "obsolete"));
    let compilation = fx.build();

    let diagnostics = compilation.diagnostics();
    let severities: Vec<Severity> = diagnostics.iter().map(|d| d.severity).collect();
    assert_eq!(
        severities,
        vec![Severity::Hidden, Severity::Warning, Severity::Error]
    );
}

#[test]
fn test_reporting_can_be_disabled() {
    let mut fx = Fixture::with_options(AnalysisOptions::default().with_report_unused_imports(false));
    let n1 = fx.namespace("N1");
    fx.import(ImportKind::Namespace { namespace: n1 });
    let compilation = fx.build();

    assert!(hidden_diagnostics(&compilation).is_empty());
    assert_eq!(compilation.unused_import_diagnostics().len(), 1);
}
