//! Pass 3: resolve global variables and functions.
//!
//! Same two-phase discipline as type definitions, with one difference: the
//! skeleton of a global or function already carries its complete type. A
//! global's value is its address, so later references need the derived
//! pointer type before any initializer or body is filled; likewise any call
//! site may reference a function ahead of its definition, so the full
//! signature resolves eagerly.

use log::debug;

use lumen_ast as ast;
use lumen_ir::{self as ir, FuncId, GlobalId, ThreadLocalMode, TypeKind};

use crate::body::FuncLowerer;
use crate::error::LowerError;
use crate::index::ModuleIndex;
use crate::{Lowerer, ValueEntry};

impl<'a> Lowerer<'a> {
    /// Resolve all globals and functions. Entries land in the module's two
    /// tables in first-occurrence order, so id order is emission order.
    pub(crate) fn resolve_globals(&mut self, index: &ModuleIndex<'a>) -> Result<(), LowerError> {
        debug!(
            "resolving {} globals and {} functions",
            index.global_order.len(),
            index.func_order.len()
        );

        // Skeleton phase. Every module-level value exists, fully typed,
        // before any fill step runs.
        for name in &index.global_order {
            match index.values[name.as_str()] {
                ast::Entity::GlobalDecl(decl) => self.global_skeleton(name, &decl.content_ty)?,
                ast::Entity::GlobalDef(def) => self.global_skeleton(name, &def.content_ty)?,
                _ => unreachable!("global order only holds global entities"),
            }
        }
        for name in &index.func_order {
            match index.values[name.as_str()] {
                ast::Entity::FuncDecl(decl) => self.func_skeleton(name, &decl.header)?,
                ast::Entity::FuncDef(def) => self.func_skeleton(name, &def.header)?,
                _ => unreachable!("function order only holds function entities"),
            }
        }

        // Fill phase.
        for name in &index.global_order {
            let id = match self.vs[name.as_str()] {
                ValueEntry::Global(id, _) => id,
                ValueEntry::Func(..) => unreachable!("global name bound to a function"),
            };
            match index.values[name.as_str()] {
                ast::Entity::GlobalDecl(decl) => self.fill_global_decl(id, decl),
                ast::Entity::GlobalDef(def) => self.fill_global_def(id, def)?,
                _ => unreachable!("global order only holds global entities"),
            }
        }
        for name in &index.func_order {
            let id = match self.vs[name.as_str()] {
                ValueEntry::Func(id, _) => id,
                ValueEntry::Global(..) => unreachable!("function name bound to a global"),
            };
            match index.values[name.as_str()] {
                ast::Entity::FuncDecl(decl) => self.fill_func_header(id, &decl.header),
                ast::Entity::FuncDef(def) => {
                    self.fill_func_header(id, &def.header);
                    let blocks = FuncLowerer::new(self, id).resolve_body(&def.body, def.span)?;
                    self.module.funcs[id.index()].blocks = Some(blocks);
                }
                _ => unreachable!("function order only holds function entities"),
            }
        }
        Ok(())
    }

    fn global_skeleton(
        &mut self,
        name: &str,
        content_ty: &ast::TypeExpr,
    ) -> Result<(), LowerError> {
        let content = self.resolve_type(content_ty)?;
        let ty = self.module.types.alloc(
            None,
            TypeKind::Pointer {
                elem: content,
                addr_space: 0,
            },
        );
        let id = GlobalId::new(self.module.globals.len());
        self.module.globals.push(ir::Global {
            name: name.to_string(),
            ty,
            content_ty: content,
            linkage: None,
            preemption: None,
            visibility: None,
            dll_storage_class: None,
            thread_local_mode: None,
            unnamed_addr: None,
            addr_space: 0,
            externally_initialized: false,
            immutable: false,
            init: None,
        });
        self.vs.insert(name.to_string(), ValueEntry::Global(id, ty));
        Ok(())
    }

    fn func_skeleton(&mut self, name: &str, header: &ast::FuncHeader) -> Result<(), LowerError> {
        let ret = self.resolve_type(&header.ret)?;
        let mut param_tys = Vec::with_capacity(header.params.len());
        let mut params = Vec::with_capacity(header.params.len());
        for param in &header.params {
            let ty = self.resolve_type(&param.ty)?;
            param_tys.push(ty);
            params.push(ir::Param {
                name: param.name.clone(),
                ty,
            });
        }
        let sig = self.module.types.alloc(
            None,
            TypeKind::Func {
                ret,
                params: param_tys,
                variadic: header.variadic,
            },
        );
        let ty = self.module.types.alloc(
            None,
            TypeKind::Pointer {
                elem: sig,
                addr_space: 0,
            },
        );
        let id = FuncId::new(self.module.funcs.len());
        self.module.funcs.push(ir::Func {
            name: name.to_string(),
            sig,
            ty,
            linkage: None,
            preemption: None,
            visibility: None,
            dll_storage_class: None,
            unnamed_addr: None,
            addr_space: 0,
            params,
            blocks: None,
        });
        self.vs.insert(name.to_string(), ValueEntry::Func(id, ty));
        Ok(())
    }

    fn fill_global_decl(&mut self, id: GlobalId, decl: &ast::GlobalDecl) {
        let addr_space = decl.addr_space.unwrap_or(0);
        let global = &mut self.module.globals[id.index()];
        global.linkage = decl.linkage;
        global.preemption = decl.preemption;
        global.visibility = decl.visibility;
        global.dll_storage_class = decl.dll_storage_class;
        global.thread_local_mode = thread_local_mode(decl.thread_local);
        global.unnamed_addr = decl.unnamed_addr;
        global.addr_space = addr_space;
        global.externally_initialized = decl.externally_initialized;
        global.immutable = decl.immutable;
        let ty = global.ty;
        self.set_pointer_addr_space(ty, addr_space);
    }

    fn fill_global_def(&mut self, id: GlobalId, def: &ast::GlobalDef) -> Result<(), LowerError> {
        let addr_space = def.addr_space.unwrap_or(0);
        let global = &mut self.module.globals[id.index()];
        global.linkage = def.linkage;
        global.preemption = def.preemption;
        global.visibility = def.visibility;
        global.dll_storage_class = def.dll_storage_class;
        global.thread_local_mode = thread_local_mode(def.thread_local);
        global.unnamed_addr = def.unnamed_addr;
        global.addr_space = addr_space;
        global.externally_initialized = def.externally_initialized;
        global.immutable = def.immutable;
        let ty = global.ty;
        let content = global.content_ty;
        self.set_pointer_addr_space(ty, addr_space);
        // The content type is already known, which is what disambiguates
        // the initializer's literal forms.
        let init = self.resolve_constant(content, &def.init)?;
        self.module.globals[id.index()].init = Some(init);
        Ok(())
    }

    fn fill_func_header(&mut self, id: FuncId, header: &ast::FuncHeader) {
        let addr_space = header.addr_space.unwrap_or(0);
        let func = &mut self.module.funcs[id.index()];
        func.linkage = header.linkage;
        func.preemption = header.preemption;
        func.visibility = header.visibility;
        func.dll_storage_class = header.dll_storage_class;
        func.unnamed_addr = header.unnamed_addr;
        func.addr_space = addr_space;
        let ty = func.ty;
        self.set_pointer_addr_space(ty, addr_space);
    }

    /// The address space is written onto the derived pointer type in place;
    /// the skeleton allocated it in the default space.
    fn set_pointer_addr_space(&mut self, ty: lumen_ir::TypeId, space: u32) {
        match &mut self.module.types.get_mut(ty).kind {
            TypeKind::Pointer { addr_space, .. } => *addr_space = space,
            other => panic!(
                "invalid derived type for module-level value; expected pointer, got {}",
                other.kind_name()
            ),
        }
    }
}

fn thread_local_mode(thread_local: Option<ast::ThreadLocal>) -> Option<ThreadLocalMode> {
    thread_local.map(|tl| match tl.model {
        // Bare `thread_local` selects the general-dynamic model.
        None => ThreadLocalMode::GeneralDynamic,
        Some(ast::TlsModel::LocalDynamic) => ThreadLocalMode::LocalDynamic,
        Some(ast::TlsModel::InitialExec) => ThreadLocalMode::InitialExec,
        Some(ast::TlsModel::LocalExec) => ThreadLocalMode::LocalExec,
    })
}
