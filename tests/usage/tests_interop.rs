//! Interop type embedding.

use refscope::{
    AssemblyId, BoundNode, ExternalReference, NamedType, ReferenceId, SymbolId, SymbolUsageRecord,
};

use crate::helpers::fixture::*;
use crate::helpers::usage_assertions::*;

struct InteropFixture {
    fx: Fixture,
    embedded: ReferenceId,
    consumer: ReferenceId,
    duplicate: ReferenceId,
    duplicate_assembly: AssemblyId,
    f0: SymbolId,
    local_type: SymbolId,
}

/// R0 (embedded) defines `ITest33`; R1 declares `static ITest33 F0` built
/// against the embedded R0; a second, non-embedded copy of R0 is supplied
/// as well.
fn interop_fixture() -> InteropFixture {
    let mut fx = Fixture::new();
    let (embedded, embedded_assembly) =
        fx.handle(ExternalReference::assembly(identity("Interop")).with_embedded_interop_types());
    let (consumer, consumer_assembly) = fx.library("Consumer");
    let (duplicate, duplicate_assembly) = fx.library("Interop");

    fx.class("ITest33", embedded_assembly);
    let local_type = fx.builder.symbols().named_type(NamedType {
        name: "ITest33".into(),
        assembly: consumer_assembly,
        container: None,
        arity: 0,
        embedded_from: Some(embedded),
    });
    let c1 = fx.class("C1", consumer_assembly);
    let f0 = fx.field(c1, "F0", local_type);

    InteropFixture {
        fx,
        embedded,
        consumer,
        duplicate,
        duplicate_assembly,
        f0,
        local_type,
    }
}

#[test]
fn test_embedded_local_type_uses_embedding_handle() {
    let mut setup = interop_fixture();
    setup.fx.main(BoundNode::member_access(None, setup.f0));
    let compilation = setup.fx.build();

    assert_used(&compilation, &[setup.embedded, setup.consumer]);
    assert_not_used(&compilation, setup.duplicate);
    assert_eq!(
        compilation.symbol_usage(setup.local_type),
        SymbolUsageRecord::Reference(setup.embedded)
    );
    assert_round_trips(&compilation);
}

#[test]
fn test_duplicate_used_independently_is_kept() {
    let mut setup = interop_fixture();
    let helper = setup.fx.class("Helper", setup.duplicate_assembly);
    setup.fx.main(BoundNode::Block(vec![
        BoundNode::member_access(None, setup.f0),
        BoundNode::type_expression(helper),
    ]));
    let compilation = setup.fx.build();

    assert_used(
        &compilation,
        &[setup.embedded, setup.consumer, setup.duplicate],
    );
}

#[test]
fn test_unused_field_leaves_interop_unused() {
    let mut setup = interop_fixture();
    setup.fx.main(BoundNode::Literal);
    let compilation = setup.fx.build();

    assert!(compilation.used_references().is_empty());
}
