//! Concurrent first queries against one aggregate.

use std::thread;

use refscope::{BoundNode, Declaration, ReferenceId};

use crate::helpers::fixture::*;

#[test]
fn test_racing_callers_converge_on_one_result() {
    let mut fx = Fixture::new();
    let corlib = fx.corlib();
    let mut expected = vec![corlib.reference];
    for i in 0..32 {
        let (reference, assembly) = fx.library(&format!("Lib{}", i));
        let class = fx.class(&format!("C{}", i), assembly);
        if i % 2 == 0 {
            expected.push(reference);
            let user = fx.method(fx.program, &format!("Use{}", i), 0, Vec::new());
            fx.declare(Declaration::new(user, fx.file).with_body(BoundNode::local(class, None)));
        }
    }
    let compilation = fx.build();

    let results: Vec<&[ReferenceId]> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| compilation.used_references()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for result in &results {
        assert_eq!(*result, expected.as_slice());
        assert!(std::ptr::eq(*result, results[0]));
    }
}

#[test]
fn test_symbol_usage_is_consistent_across_threads() {
    let mut fx = Fixture::new();
    let (r0, a0) = fx.library("Lib");
    let classes: Vec<_> = (0..64)
        .map(|i| fx.class(&format!("C{}", i), a0))
        .collect();
    let compilation = fx.build();

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for class in &classes {
                    assert_eq!(compilation.symbol_usage(*class).reference(), Some(r0));
                }
            });
        }
    });
}
