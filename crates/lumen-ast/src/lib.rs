//! Lumen AST
//!
//! This crate defines the syntax tree produced by a parser for the Lumen
//! textual IR. The lowering stage (`lumen-lower`) consumes these nodes; it
//! never re-parses text. Every node that can be named in a diagnostic
//! implements `Display`, rendering the node back in source syntax.

pub mod attrs;
pub mod constant;
pub mod inst;
pub mod module;
pub mod span;
pub mod types;

pub use attrs::{
    DllStorageClass, Linkage, Preemption, ThreadLocal, TlsModel, UnnamedAddr, Visibility,
};
pub use constant::Const;
pub use inst::{
    BasicBlock, BinOp, ICmpPred, Inst, InstKind, Label, TermKind, Terminator, TypedValue, Value,
};
pub use module::{
    AliasDef, Entity, FuncDecl, FuncDef, FuncHeader, GlobalDecl, GlobalDef, IFuncDef, Module,
    Param, TypeDef,
};
pub use span::Span;
pub use types::{FloatKind, TypeExpr};
