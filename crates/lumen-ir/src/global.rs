//! Global variables.

use lumen_ast::{DllStorageClass, Linkage, Preemption, UnnamedAddr, Visibility};

use crate::constant::Constant;
use crate::types::TypeId;

/// Index of a global variable in [`crate::Module::globals`].
///
/// Ids are assigned in first-occurrence source order, so the index order of
/// the table is also the emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlobalId(u32);

impl GlobalId {
    pub fn new(index: usize) -> Self {
        GlobalId(u32::try_from(index).expect("global table overflow"))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Thread-local storage modes. Bare `thread_local` is the general-dynamic
/// mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadLocalMode {
    GeneralDynamic,
    LocalDynamic,
    InitialExec,
    LocalExec,
}

/// A global variable declaration or definition.
///
/// The value of a global is its address: `ty` is always a pointer to
/// `content_ty` in `addr_space`. Only definitions carry an initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct Global {
    pub name: String,
    /// Pointer to `content_ty` in `addr_space`.
    pub ty: TypeId,
    pub content_ty: TypeId,
    pub linkage: Option<Linkage>,
    pub preemption: Option<Preemption>,
    pub visibility: Option<Visibility>,
    pub dll_storage_class: Option<DllStorageClass>,
    pub thread_local_mode: Option<ThreadLocalMode>,
    pub unnamed_addr: Option<UnnamedAddr>,
    pub addr_space: u32,
    pub externally_initialized: bool,
    /// Declared `constant` rather than `global`.
    pub immutable: bool,
    pub init: Option<Constant>,
}

impl Global {
    /// Whether this is a definition (carries an initializer).
    pub fn is_definition(&self) -> bool {
        self.init.is_some()
    }
}
