//! Global variable and function resolution: eager typing, attribute fill,
//! initializers, namespace conflicts and emission order.

mod common;

use common::*;
use lumen_ast::{Const, Entity, Linkage, ThreadLocal, TlsModel, TypeExpr};
use lumen_ir::{Constant, ThreadLocalMode, TypeKind};
use lumen_lower::{lower_module, LowerError};

#[test]
fn test_global_def_pointer_and_content_types() {
    let ast = module(vec![global_def("g", int(32), Const::Int(41))]);
    let module = lower_module(&ast).unwrap();
    let (_, g) = module.global("g").unwrap();
    assert_eq!(*module.types.kind(g.content_ty), TypeKind::Int { bits: 32 });
    match module.types.kind(g.ty) {
        TypeKind::Pointer { elem, addr_space } => {
            assert_eq!(*elem, g.content_ty);
            assert_eq!(*addr_space, 0);
        }
        other => panic!("expected pointer, got {:?}", other),
    }
    assert_eq!(
        g.init,
        Some(Constant::Int {
            ty: g.content_ty,
            value: 41
        })
    );
}

#[test]
fn test_global_decl_has_no_initializer() {
    let ast = module(vec![global_decl("g", int(8))]);
    let module = lower_module(&ast).unwrap();
    let (_, g) = module.global("g").unwrap();
    assert!(!g.is_definition());
    assert_eq!(g.init, None);
}

#[test]
fn test_global_attributes_fill() {
    let mut def = match global_def("tls", int(64), Const::Int(0)) {
        Entity::GlobalDef(def) => def,
        _ => unreachable!(),
    };
    def.linkage = Some(Linkage::Internal);
    def.thread_local = Some(ThreadLocal {
        model: Some(TlsModel::InitialExec),
    });
    def.immutable = true;
    def.addr_space = Some(5);
    let ast = module(vec![Entity::GlobalDef(def)]);

    let module = lower_module(&ast).unwrap();
    let (_, g) = module.global("tls").unwrap();
    assert_eq!(g.linkage, Some(Linkage::Internal));
    assert_eq!(g.thread_local_mode, Some(ThreadLocalMode::InitialExec));
    assert!(g.immutable);
    assert_eq!(g.addr_space, 5);
    // The declared address space lands on the derived pointer type.
    assert!(matches!(
        module.types.kind(g.ty),
        TypeKind::Pointer { addr_space: 5, .. }
    ));
}

#[test]
fn test_duplicate_global_decl_then_def_fails() {
    let ast = module(vec![
        global_decl("g", int(32)),
        global_def("g", int(32), Const::Int(1)),
    ]);
    match lower_module(&ast).unwrap_err() {
        LowerError::DuplicateDefinition {
            name, prev, new, ..
        } => {
            assert_eq!(name, "@g");
            // Both textual forms ride along for diagnostics.
            assert!(prev.contains("@g"));
            assert!(new.contains("@g"));
            assert_ne!(prev, new);
        }
        other => panic!("expected DuplicateDefinition, got {:?}", other),
    }
}

#[test]
fn test_globals_and_functions_share_one_namespace() {
    let ast = module(vec![
        global_def("x", int(32), Const::Int(0)),
        func_decl("x", TypeExpr::Void, vec![]),
    ]);
    match lower_module(&ast).unwrap_err() {
        LowerError::DuplicateDefinition { name, .. } => assert_eq!(name, "@x"),
        other => panic!("expected DuplicateDefinition, got {:?}", other),
    }
}

#[test]
fn test_emission_order_and_cardinality() {
    // Interleaved in source; each list keeps its own first-occurrence order.
    let ast = module(vec![
        type_def("t1", int(8)),
        global_def("g1", int(32), Const::Int(1)),
        func_decl("f1", TypeExpr::Void, vec![]),
        type_def("t2", int(16)),
        global_def("g2", int(32), Const::Int(2)),
        global_def("g3", int(32), Const::Int(3)),
        func_decl("f2", TypeExpr::Void, vec![]),
    ]);
    let module = lower_module(&ast).unwrap();
    assert_eq!(module.type_defs.len(), 2);
    let globals: Vec<&str> = module.globals.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(globals, ["g1", "g2", "g3"]);
    let funcs: Vec<&str> = module.funcs.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(funcs, ["f1", "f2"]);
}

#[test]
fn test_initializer_references_later_global() {
    let ast = module(vec![
        global_def("a", ptr(int(32)), Const::GlobalRef {
            name: "b".to_string(),
            span: sp(),
        }),
        global_def("b", int(32), Const::Int(7)),
    ]);
    let module = lower_module(&ast).unwrap();
    let (a_id, a) = module.global("a").unwrap();
    let (b_id, b) = module.global("b").unwrap();
    assert_ne!(a_id, b_id);
    match a.init.as_ref().unwrap() {
        Constant::Global { id, ty } => {
            assert_eq!(*id, b_id);
            assert_eq!(*ty, b.ty);
        }
        other => panic!("expected global reference, got {:?}", other),
    }
}

#[test]
fn test_initializer_references_later_function() {
    let ast = module(vec![
        global_def(
            "fp",
            ptr(TypeExpr::Func {
                ret: Box::new(TypeExpr::Void),
                params: vec![],
                variadic: false,
            }),
            Const::GlobalRef {
                name: "f".to_string(),
                span: sp(),
            },
        ),
        func_decl("f", TypeExpr::Void, vec![]),
    ]);
    let module = lower_module(&ast).unwrap();
    let (_, fp) = module.global("fp").unwrap();
    let (f_id, f) = module.func("f").unwrap();
    match fp.init.as_ref().unwrap() {
        Constant::Func { id, ty } => {
            assert_eq!(*id, f_id);
            assert_eq!(*ty, f.ty);
        }
        other => panic!("expected function reference, got {:?}", other),
    }
}

#[test]
fn test_unresolved_initializer_reference_fails() {
    let ast = module(vec![global_def(
        "g",
        ptr(int(8)),
        Const::GlobalRef {
            name: "missing".to_string(),
            span: sp(),
        },
    )]);
    match lower_module(&ast).unwrap_err() {
        LowerError::UnresolvedIdentifier { name, .. } => assert_eq!(name, "@missing"),
        other => panic!("expected UnresolvedIdentifier, got {:?}", other),
    }
}

#[test]
fn test_aggregate_initializer() {
    let ast = module(vec![global_def(
        "arr",
        TypeExpr::Array {
            len: 2,
            elem: Box::new(int(32)),
        },
        Const::Array(vec![(int(32), Const::Int(1)), (int(32), Const::Int(2))]),
    )]);
    let module = lower_module(&ast).unwrap();
    let (_, arr) = module.global("arr").unwrap();
    match arr.init.as_ref().unwrap() {
        Constant::Array { elems, .. } => {
            assert_eq!(elems.len(), 2);
            assert!(matches!(elems[0], Constant::Int { value: 1, .. }));
            assert!(matches!(elems[1], Constant::Int { value: 2, .. }));
        }
        other => panic!("expected array constant, got {:?}", other),
    }
}

#[test]
fn test_named_content_type_resolves_through_table() {
    let ast = module(vec![
        global_def("g", named("t"), Const::ZeroInitializer),
        type_def("t", strukt(vec![int(32)])),
    ]);
    let module = lower_module(&ast).unwrap();
    let (_, g) = module.global("g").unwrap();
    let t = module.type_def("t").unwrap();
    // The content type is the named type's node itself, not a copy.
    assert_eq!(g.content_ty, t);
}

#[test]
fn test_function_signature_resolved_eagerly() {
    let ast = module(vec![func_decl(
        "f",
        int(32),
        vec![param(int(32), "x"), param(ptr(int(8)), "p")],
    )]);
    let module = lower_module(&ast).unwrap();
    let (_, f) = module.func("f").unwrap();
    match module.types.kind(f.sig) {
        TypeKind::Func {
            ret,
            params,
            variadic,
        } => {
            assert_eq!(*module.types.kind(*ret), TypeKind::Int { bits: 32 });
            assert_eq!(params.len(), 2);
            assert!(!variadic);
        }
        other => panic!("expected function type, got {:?}", other),
    }
    match module.types.kind(f.ty) {
        TypeKind::Pointer { elem, .. } => assert_eq!(*elem, f.sig),
        other => panic!("expected pointer, got {:?}", other),
    }
    assert_eq!(f.params.len(), 2);
    assert_eq!(f.params[0].name.as_deref(), Some("x"));
    assert!(!f.is_definition());
}
