//! The assembled module.

use crate::function::{Func, FuncId};
use crate::global::{Global, GlobalId};
use crate::types::{TypeId, Types};

/// A fully lowered module.
///
/// The three top-level collections are independently ordered by first
/// occurrence in the source text, never by any lookup-table iteration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    /// Arena owning every type in the module.
    pub types: Types,
    /// Named type definitions, in first-occurrence order.
    pub type_defs: Vec<TypeId>,
    /// Global variables, in first-occurrence order.
    pub globals: Vec<Global>,
    /// Functions, in first-occurrence order.
    pub funcs: Vec<Func>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a named type definition.
    pub fn type_def(&self, name: &str) -> Option<TypeId> {
        self.type_defs
            .iter()
            .copied()
            .find(|id| self.types.get(*id).name.as_deref() == Some(name))
    }

    /// Look up a global variable by name.
    pub fn global(&self, name: &str) -> Option<(GlobalId, &Global)> {
        self.globals
            .iter()
            .enumerate()
            .find(|(_, global)| global.name == name)
            .map(|(i, global)| (GlobalId::new(i), global))
    }

    /// Look up a function by name.
    pub fn func(&self, name: &str) -> Option<(FuncId, &Func)> {
        self.funcs
            .iter()
            .enumerate()
            .find(|(_, func)| func.name == name)
            .map(|(i, func)| (FuncId::new(i), func))
    }
}
