//! Named type resolution: forward references, recursion, alias chains,
//! opaque merging and emission order.

mod common;

use common::*;
use lumen_ast::TypeExpr;
use lumen_ir::TypeKind;
use lumen_lower::{lower_module, LowerError};

fn def_names(module: &lumen_ir::Module) -> Vec<String> {
    module
        .type_defs
        .iter()
        .map(|id| module.types.get(*id).name.clone().expect("named def"))
        .collect()
}

#[test]
fn test_type_defs_keep_first_occurrence_order() {
    let ast = module(vec![
        type_def("c", int(8)),
        type_def("a", int(16)),
        type_def("b", int(32)),
    ]);
    let module = lower_module(&ast).unwrap();
    assert_eq!(def_names(&module), ["c", "a", "b"]);
}

#[test]
fn test_forward_reference_between_types() {
    // %a embeds %b before %b is defined.
    let ast = module(vec![
        type_def("a", strukt(vec![named("b")])),
        type_def("b", int(64)),
    ]);
    let module = lower_module(&ast).unwrap();
    let a = module.type_def("a").unwrap();
    let b = module.type_def("b").unwrap();
    match module.types.kind(a) {
        TypeKind::Struct { fields, .. } => assert_eq!(fields.as_slice(), [b]),
        other => panic!("expected struct, got {:?}", other),
    }
    assert_eq!(*module.types.kind(b), TypeKind::Int { bits: 64 });
}

#[test]
fn test_self_referential_struct_resolves() {
    // %node = type { i64, %node* } is not an alias cycle.
    let ast = module(vec![type_def(
        "node",
        strukt(vec![int(64), ptr(named("node"))]),
    )]);
    let module = lower_module(&ast).unwrap();
    let node = module.type_def("node").unwrap();
    let fields = match module.types.kind(node) {
        TypeKind::Struct { fields, .. } => fields.clone(),
        other => panic!("expected struct, got {:?}", other),
    };
    assert_eq!(fields.len(), 2);
    match module.types.kind(fields[1]) {
        // The embedded reference is the same node, not a copy.
        TypeKind::Pointer { elem, .. } => assert_eq!(*elem, node),
        other => panic!("expected pointer, got {:?}", other),
    }
}

#[test]
fn test_mutually_recursive_structs_resolve() {
    let ast = module(vec![
        type_def("a", strukt(vec![ptr(named("b"))])),
        type_def("b", strukt(vec![ptr(named("a"))])),
    ]);
    let module = lower_module(&ast).unwrap();
    let a = module.type_def("a").unwrap();
    let b = module.type_def("b").unwrap();
    let a_field = match module.types.kind(a) {
        TypeKind::Struct { fields, .. } => fields[0],
        other => panic!("expected struct, got {:?}", other),
    };
    match module.types.kind(a_field) {
        TypeKind::Pointer { elem, .. } => assert_eq!(*elem, b),
        other => panic!("expected pointer, got {:?}", other),
    }
}

#[test]
fn test_two_alias_cycle_reports_both_names() {
    let ast = module(vec![
        type_def("a", named("b")),
        type_def("b", named("a")),
    ]);
    match lower_module(&ast).unwrap_err() {
        LowerError::CyclicTypeAlias { names, .. } => {
            assert_eq!(names, ["%a", "%b"]);
        }
        other => panic!("expected CyclicTypeAlias, got {:?}", other),
    }
}

#[test]
fn test_self_alias_cycle_fails() {
    let ast = module(vec![type_def("a", named("a"))]);
    match lower_module(&ast).unwrap_err() {
        LowerError::CyclicTypeAlias { names, .. } => assert_eq!(names, ["%a"]),
        other => panic!("expected CyclicTypeAlias, got {:?}", other),
    }
}

#[test]
fn test_alias_resolves_to_concrete_body() {
    // %a is a bare alias of %b, defined before %b appears.
    let ast = module(vec![
        type_def("a", named("b")),
        type_def("b", strukt(vec![int(32)])),
    ]);
    let module = lower_module(&ast).unwrap();
    assert_eq!(def_names(&module), ["a", "b"]);
    let a = module.type_def("a").unwrap();
    let b = module.type_def("b").unwrap();
    // Each name keeps its own node; both carry the concrete body.
    assert_ne!(a, b);
    for id in [a, b] {
        match module.types.kind(id) {
            TypeKind::Struct { fields, opaque, .. } => {
                assert_eq!(fields.len(), 1);
                assert!(!opaque);
            }
            other => panic!("expected struct, got {:?}", other),
        }
    }
}

#[test]
fn test_opaque_then_concrete_is_one_definition() {
    let ast = module(vec![
        type_def("t", TypeExpr::Opaque),
        type_def("t", strukt(vec![int(32), int(32)])),
    ]);
    let module = lower_module(&ast).unwrap();
    assert_eq!(def_names(&module), ["t"]);
    let t = module.type_def("t").unwrap();
    match module.types.kind(t) {
        TypeKind::Struct { fields, opaque, .. } => {
            assert_eq!(fields.len(), 2);
            assert!(!opaque);
        }
        other => panic!("expected struct, got {:?}", other),
    }
}

#[test]
fn test_opaque_without_body_stays_opaque() {
    let ast = module(vec![type_def("t", TypeExpr::Opaque)]);
    let module = lower_module(&ast).unwrap();
    let t = module.type_def("t").unwrap();
    assert!(matches!(
        module.types.kind(t),
        TypeKind::Struct { opaque: true, .. }
    ));
}

#[test]
fn test_unresolved_alias_target_fails() {
    let ast = module(vec![type_def("a", named("missing"))]);
    match lower_module(&ast).unwrap_err() {
        LowerError::UnresolvedIdentifier { name, .. } => assert_eq!(name, "%missing"),
        other => panic!("expected UnresolvedIdentifier, got {:?}", other),
    }
}

#[test]
fn test_unresolved_embedded_type_fails() {
    let ast = module(vec![type_def("a", ptr(named("missing")))]);
    match lower_module(&ast).unwrap_err() {
        LowerError::UnresolvedIdentifier { name, .. } => assert_eq!(name, "%missing"),
        other => panic!("expected UnresolvedIdentifier, got {:?}", other),
    }
}

#[test]
fn test_resolution_is_idempotent() {
    let ast = module(vec![
        type_def("node", strukt(vec![int(64), ptr(named("node"))])),
        type_def("pair", strukt(vec![named("node"), named("node")])),
        global_def("head", ptr(named("node")), lumen_ast::Const::Null),
        func_decl("visit", lumen_ast::TypeExpr::Void, vec![param(ptr(named("node")), "n")]),
    ]);
    let first = lower_module(&ast).unwrap();
    let second = lower_module(&ast).unwrap();
    assert_eq!(first, second);
}
