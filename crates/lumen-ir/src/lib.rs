//! Lumen IR
//!
//! This crate defines the in-memory IR object graph produced by lowering a
//! parsed module: a type arena with stable identities, global variables,
//! functions with basic blocks, and the assembled [`Module`] whose three
//! top-level collections preserve first-occurrence source order.
//!
//! Entities refer to each other through typed indices ([`TypeId`],
//! [`GlobalId`], [`FuncId`], [`BlockId`], [`InstId`]) into the module-owned
//! tables, so a name referenced from many places always denotes the same
//! node.

pub mod constant;
pub mod function;
pub mod global;
pub mod instruction;
pub mod module;
pub mod terminator;
pub mod types;

pub use constant::Constant;
pub use function::{Block, BlockId, Func, FuncId, Param};
pub use global::{Global, GlobalId, ThreadLocalMode};
pub use instruction::{Inst, InstId, InstKind, Value};
pub use module::Module;
pub use terminator::Terminator;
pub use types::{TypeData, TypeId, TypeKind, Types};

// Attribute and operator vocabularies are shared with the syntax tree.
pub use lumen_ast::{
    BinOp, DllStorageClass, FloatKind, ICmpPred, Linkage, Preemption, UnnamedAddr, Visibility,
};
