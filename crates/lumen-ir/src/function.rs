//! Functions and basic blocks.

use lumen_ast::{DllStorageClass, Linkage, Preemption, UnnamedAddr, Visibility};

use crate::instruction::{Inst, InstId};
use crate::terminator::Terminator;
use crate::types::TypeId;

/// Index of a function in [`crate::Module::funcs`].
///
/// Ids are assigned in first-occurrence source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FuncId(u32);

impl FuncId {
    pub fn new(index: usize) -> Self {
        FuncId(u32::try_from(index).expect("function table overflow"))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a basic block within its owning function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(u32);

impl BlockId {
    pub fn new(index: usize) -> Self {
        BlockId(u32::try_from(index).expect("block table overflow"))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A formal parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Option<String>,
    pub ty: TypeId,
}

/// A basic block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub name: String,
    pub insts: Vec<Inst>,
    pub term: Terminator,
}

/// A function declaration or definition.
///
/// The signature is resolved eagerly — before any body anywhere in the
/// module is filled — so that call sites can reference the function no
/// matter where its definition appears.
#[derive(Debug, Clone, PartialEq)]
pub struct Func {
    pub name: String,
    /// The function type (return type, parameter types, variadic flag).
    pub sig: TypeId,
    /// Pointer to `sig`; the value of the function symbol.
    pub ty: TypeId,
    pub linkage: Option<Linkage>,
    pub preemption: Option<Preemption>,
    pub visibility: Option<Visibility>,
    pub dll_storage_class: Option<DllStorageClass>,
    pub unnamed_addr: Option<UnnamedAddr>,
    pub addr_space: u32,
    pub params: Vec<Param>,
    /// Basic blocks, present only for definitions.
    pub blocks: Option<Vec<Block>>,
}

impl Func {
    /// Whether this is a definition (carries a body).
    pub fn is_definition(&self) -> bool {
        self.blocks.is_some()
    }

    /// Look up an instruction by result id.
    pub fn inst(&self, id: InstId) -> Option<&Inst> {
        self.blocks
            .as_deref()?
            .iter()
            .flat_map(|block| block.insts.iter())
            .find(|inst| inst.id == id)
    }
}
