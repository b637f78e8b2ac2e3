//! Shared builders for constructing AST modules in tests.
#![allow(dead_code)]

use lumen_ast::{
    BasicBlock, Const, Entity, FuncDecl, FuncDef, FuncHeader, GlobalDecl, GlobalDef, Inst,
    InstKind, Label, Module, Param, Span, TermKind, Terminator, TypeDef, TypeExpr, TypedValue,
    Value,
};

pub fn sp() -> Span {
    Span::dummy()
}

pub fn module(entities: Vec<Entity>) -> Module {
    Module { entities }
}

pub fn type_def(name: &str, ty: TypeExpr) -> Entity {
    Entity::TypeDef(TypeDef {
        name: name.to_string(),
        ty,
        span: sp(),
    })
}

pub fn int(bits: u32) -> TypeExpr {
    TypeExpr::Int { bits }
}

pub fn named(name: &str) -> TypeExpr {
    TypeExpr::named(name, sp())
}

pub fn ptr(elem: TypeExpr) -> TypeExpr {
    TypeExpr::ptr(elem)
}

pub fn strukt(fields: Vec<TypeExpr>) -> TypeExpr {
    TypeExpr::Struct {
        fields,
        packed: false,
    }
}

pub fn global_decl(name: &str, content_ty: TypeExpr) -> Entity {
    Entity::GlobalDecl(GlobalDecl {
        name: name.to_string(),
        linkage: None,
        preemption: None,
        visibility: None,
        dll_storage_class: None,
        thread_local: None,
        unnamed_addr: None,
        addr_space: None,
        externally_initialized: false,
        immutable: false,
        content_ty,
        span: sp(),
    })
}

pub fn global_def(name: &str, content_ty: TypeExpr, init: Const) -> Entity {
    Entity::GlobalDef(GlobalDef {
        name: name.to_string(),
        linkage: None,
        preemption: None,
        visibility: None,
        dll_storage_class: None,
        thread_local: None,
        unnamed_addr: None,
        addr_space: None,
        externally_initialized: false,
        immutable: false,
        content_ty,
        init,
        span: sp(),
    })
}

pub fn header(name: &str, ret: TypeExpr, params: Vec<Param>) -> FuncHeader {
    FuncHeader {
        name: name.to_string(),
        linkage: None,
        preemption: None,
        visibility: None,
        dll_storage_class: None,
        unnamed_addr: None,
        addr_space: None,
        ret,
        params,
        variadic: false,
        span: sp(),
    }
}

pub fn param(ty: TypeExpr, name: &str) -> Param {
    Param {
        ty,
        name: Some(name.to_string()),
    }
}

pub fn func_decl(name: &str, ret: TypeExpr, params: Vec<Param>) -> Entity {
    Entity::FuncDecl(FuncDecl {
        header: header(name, ret, params),
        span: sp(),
    })
}

pub fn func_def(name: &str, ret: TypeExpr, params: Vec<Param>, body: Vec<BasicBlock>) -> Entity {
    Entity::FuncDef(FuncDef {
        header: header(name, ret, params),
        body,
        span: sp(),
    })
}

pub fn block(label: &str, insts: Vec<Inst>, term: TermKind) -> BasicBlock {
    BasicBlock {
        label: label.to_string(),
        insts,
        term: Terminator {
            kind: term,
            span: sp(),
        },
        span: sp(),
    }
}

pub fn inst(result: Option<&str>, kind: InstKind) -> Inst {
    Inst {
        result: result.map(str::to_string),
        kind,
        span: sp(),
    }
}

pub fn local(name: &str) -> Value {
    Value::Local {
        name: name.to_string(),
        span: sp(),
    }
}

pub fn global_ref(name: &str) -> Value {
    Value::Global {
        name: name.to_string(),
        span: sp(),
    }
}

pub fn const_int(value: i128) -> Value {
    Value::Const(Const::Int(value))
}

pub fn tv(ty: TypeExpr, value: Value) -> TypedValue {
    TypedValue { ty, value }
}

pub fn label(name: &str) -> Label {
    Label {
        name: name.to_string(),
        span: sp(),
    }
}

/// `ret void`
pub fn ret_void() -> TermKind {
    TermKind::Ret { value: None }
}

/// `ret <ty> <value>`
pub fn ret(ty: TypeExpr, value: Value) -> TermKind {
    TermKind::Ret {
        value: Some(tv(ty, value)),
    }
}
