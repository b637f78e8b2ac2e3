#![doc = include_str!("../README.md")]

use indexmap::IndexMap;
use log::debug;
use rustc_hash::FxHashMap;

use lumen_ir::{FuncId, GlobalId, TypeId, TypeKind};

pub mod error;

mod body;
mod constant;
mod globals;
mod index;
mod types;

pub use error::LowerError;

/// Lower a parsed module to its IR object graph.
///
/// This is the main entry point of the crate. The pass is synchronous and
/// fail-fast: the first error encountered aborts the whole resolution and no
/// partial module is returned.
pub fn lower_module(module: &lumen_ast::Module) -> Result<lumen_ir::Module, LowerError> {
    Lowerer::new(module).lower()
}

/// A module-level value: the address of a global variable or of a function.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ValueEntry {
    Global(GlobalId, TypeId),
    Func(FuncId, TypeId),
}

/// State threaded through the resolution passes.
///
/// The two lookup tables (`ts` for named types, `vs` for globals and
/// functions) are the identity tables every reference resolves through;
/// they are dropped when the finished module is handed back.
pub(crate) struct Lowerer<'a> {
    ast: &'a lumen_ast::Module,
    module: lumen_ir::Module,
    /// Named type definitions, by name without the `%` sigil.
    ts: FxHashMap<String, TypeId>,
    /// Globals and functions, by name without the `@` sigil. Insertion
    /// order is skeleton-creation order; iteration is never relied on for
    /// output ordering.
    vs: IndexMap<String, ValueEntry>,
    void_ty: Option<TypeId>,
    bool_ty: Option<TypeId>,
}

impl<'a> Lowerer<'a> {
    pub(crate) fn new(ast: &'a lumen_ast::Module) -> Self {
        Self {
            ast,
            module: lumen_ir::Module::new(),
            ts: FxHashMap::default(),
            vs: IndexMap::new(),
            void_ty: None,
            bool_ty: None,
        }
    }

    /// Run all passes: index, type definitions, globals and functions.
    pub(crate) fn lower(mut self) -> Result<lumen_ir::Module, LowerError> {
        debug!("lowering module with {} top-level entities", self.ast.entities.len());
        let index = index::index_module(self.ast)?;
        self.resolve_type_defs(&index)?;
        self.resolve_globals(&index)?;
        Ok(self.module)
    }

    /// The shared `void` type, allocated on first use.
    pub(crate) fn void_type(&mut self) -> TypeId {
        match self.void_ty {
            Some(id) => id,
            None => {
                let id = self.module.types.alloc(None, TypeKind::Void);
                self.void_ty = Some(id);
                id
            }
        }
    }

    /// The shared `i1` type, allocated on first use.
    pub(crate) fn bool_type(&mut self) -> TypeId {
        match self.bool_ty {
            Some(id) => id,
            None => {
                let id = self.module.types.alloc(None, TypeKind::Int { bits: 1 });
                self.bool_ty = Some(id);
                id
            }
        }
    }
}
