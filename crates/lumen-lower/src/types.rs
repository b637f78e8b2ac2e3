//! Pass 2: resolve named type definitions.
//!
//! Named types resolve in two phases. The skeleton phase allocates one
//! arena slot per defined name, tagged with the concrete kind found at the
//! end of its alias chain; because every name has a slot before any body is
//! examined, the fill phase can resolve forward and self references by
//! plain table lookup. A compound type that embeds its own name is not a
//! cycle — the embedded reference resolves to the already-allocated slot —
//! but a chain of bare aliases that returns to a visited name is.

use std::mem;

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use lumen_ast as ast;
use lumen_ir::{TypeId, TypeKind};

use crate::error::{src, LowerError};
use crate::index::ModuleIndex;
use crate::Lowerer;

impl<'a> Lowerer<'a> {
    /// Resolve all named type definitions and append them to the module in
    /// first-occurrence order.
    pub(crate) fn resolve_type_defs(&mut self, index: &ModuleIndex<'a>) -> Result<(), LowerError> {
        debug!("resolving {} type definitions", index.type_order.len());

        // Skeleton phase: allocate a slot per name. Alias chains are chased
        // here so each slot starts with the right kind; the chain-terminal
        // definition is kept for the fill phase.
        let mut concrete: FxHashMap<&str, &'a ast::TypeDef> = FxHashMap::default();
        for name in &index.type_order {
            let def = index.types[name.as_str()];
            let mut visiting = FxHashSet::default();
            let terminal = chase_alias(name, def, &index.types, &mut visiting)?;
            let id = self
                .module
                .types
                .alloc(Some(name.clone()), skeleton_kind(&terminal.ty));
            self.ts.insert(name.clone(), id);
            concrete.insert(name.as_str(), terminal);
        }

        // Fill phase: populate every slot in place. All skeletons exist, so
        // mutually recursive bodies terminate naturally.
        for name in &index.type_order {
            let id = self.ts[name.as_str()];
            self.populate(id, &concrete[name.as_str()].ty)?;
        }

        // Emit definitions in first-occurrence order.
        for name in &index.type_order {
            let id = self.ts[name.as_str()];
            self.module.type_defs.push(id);
        }
        Ok(())
    }

    /// Populate the body of an existing slot from a concrete definition
    /// body. The slot's kind was fixed at skeleton time; a disagreement
    /// with `raw` here is a resolver defect, not an input error.
    pub(crate) fn populate(&mut self, id: TypeId, raw: &ast::TypeExpr) -> Result<(), LowerError> {
        let kind = match raw {
            ast::TypeExpr::Opaque => {
                // An opaque definition leaves the struct body pending.
                match &mut self.module.types.get_mut(id).kind {
                    TypeKind::Struct { opaque, .. } => {
                        *opaque = true;
                        return Ok(());
                    }
                    other => panic!(
                        "invalid IR type for opaque definition; expected struct, got {}",
                        other.kind_name()
                    ),
                }
            }
            ast::TypeExpr::Named { .. } => {
                unreachable!("alias chains are resolved to concrete bodies before fill")
            }
            _ => self.build_kind(raw)?,
        };
        let slot = self.module.types.get_mut(id);
        if mem::discriminant(&slot.kind) != mem::discriminant(&kind) {
            panic!(
                "invalid IR type for {} body; expected {}, got {}",
                kind.kind_name(),
                kind.kind_name(),
                slot.kind.kind_name()
            );
        }
        slot.kind = kind;
        Ok(())
    }

    /// Resolve a type expression to a type id: named references go through
    /// the definition table, anything else gets a fresh anonymous slot.
    pub(crate) fn resolve_type(&mut self, raw: &ast::TypeExpr) -> Result<TypeId, LowerError> {
        match raw {
            ast::TypeExpr::Named { name, span } => {
                self.ts
                    .get(name.as_str())
                    .copied()
                    .ok_or_else(|| LowerError::UnresolvedIdentifier {
                        name: format!("%{}", name),
                        span: src(*span),
                        help: None,
                    })
            }
            _ => {
                let kind = self.build_kind(raw)?;
                Ok(self.module.types.alloc(None, kind))
            }
        }
    }

    /// Build the kind for a concrete (non-named) type expression, resolving
    /// nested references.
    fn build_kind(&mut self, raw: &ast::TypeExpr) -> Result<TypeKind, LowerError> {
        let kind = match raw {
            ast::TypeExpr::Opaque => {
                // The grammar only admits `opaque` as a definition body.
                panic!("opaque type is only valid as a type definition body")
            }
            ast::TypeExpr::Named { .. } => {
                unreachable!("named references are resolved by resolve_type")
            }
            ast::TypeExpr::Void => TypeKind::Void,
            ast::TypeExpr::Int { bits } => TypeKind::Int { bits: *bits },
            ast::TypeExpr::Float(kind) => TypeKind::Float(*kind),
            ast::TypeExpr::Mmx => TypeKind::Mmx,
            ast::TypeExpr::Label => TypeKind::Label,
            ast::TypeExpr::Token => TypeKind::Token,
            ast::TypeExpr::Metadata => TypeKind::Metadata,
            ast::TypeExpr::Pointer { elem, addr_space } => TypeKind::Pointer {
                elem: self.resolve_type(elem)?,
                addr_space: addr_space.unwrap_or(0),
            },
            ast::TypeExpr::Array { len, elem } => TypeKind::Array {
                len: *len,
                elem: self.resolve_type(elem)?,
            },
            ast::TypeExpr::Vector { len, elem } => TypeKind::Vector {
                len: *len,
                elem: self.resolve_type(elem)?,
            },
            ast::TypeExpr::Struct { fields, packed } => {
                let fields = fields
                    .iter()
                    .map(|field| self.resolve_type(field))
                    .collect::<Result<Vec<_>, _>>()?;
                TypeKind::Struct {
                    fields,
                    packed: *packed,
                    opaque: false,
                }
            }
            ast::TypeExpr::Func {
                ret,
                params,
                variadic,
            } => {
                let ret = self.resolve_type(ret)?;
                let params = params
                    .iter()
                    .map(|param| self.resolve_type(param))
                    .collect::<Result<Vec<_>, _>>()?;
                TypeKind::Func {
                    ret,
                    params,
                    variadic: *variadic,
                }
            }
        };
        Ok(kind)
    }
}

/// Chase a chain of bare aliases to its concrete definition, recording each
/// visited name. Revisiting a name means the chain never terminates.
fn chase_alias<'a>(
    alias: &str,
    def: &'a ast::TypeDef,
    index: &FxHashMap<String, &'a ast::TypeDef>,
    visiting: &mut FxHashSet<String>,
) -> Result<&'a ast::TypeDef, LowerError> {
    let (target, span) = match &def.ty {
        ast::TypeExpr::Named { name, span } => (name, *span),
        _ => return Ok(def),
    };
    if !visiting.insert(alias.to_string()) {
        let mut names: Vec<String> = visiting.iter().map(|name| format!("%{}", name)).collect();
        names.sort();
        return Err(LowerError::CyclicTypeAlias {
            names,
            span: src(def.span),
        });
    }
    let next = index
        .get(target.as_str())
        .ok_or_else(|| LowerError::UnresolvedIdentifier {
            name: format!("%{}", target),
            span: src(span),
            help: None,
        })?;
    chase_alias(target, next, index, visiting)
}

/// The empty variant matching a concrete definition body. Compound element
/// slots hold [`TypeId::INVALID`] until the fill phase replaces them.
fn skeleton_kind(raw: &ast::TypeExpr) -> TypeKind {
    match raw {
        ast::TypeExpr::Opaque | ast::TypeExpr::Struct { .. } => TypeKind::Struct {
            fields: Vec::new(),
            packed: false,
            opaque: false,
        },
        ast::TypeExpr::Void => TypeKind::Void,
        ast::TypeExpr::Int { .. } => TypeKind::Int { bits: 0 },
        ast::TypeExpr::Float(kind) => TypeKind::Float(*kind),
        ast::TypeExpr::Mmx => TypeKind::Mmx,
        ast::TypeExpr::Label => TypeKind::Label,
        ast::TypeExpr::Token => TypeKind::Token,
        ast::TypeExpr::Metadata => TypeKind::Metadata,
        ast::TypeExpr::Pointer { .. } => TypeKind::Pointer {
            elem: TypeId::INVALID,
            addr_space: 0,
        },
        ast::TypeExpr::Array { .. } => TypeKind::Array {
            len: 0,
            elem: TypeId::INVALID,
        },
        ast::TypeExpr::Vector { .. } => TypeKind::Vector {
            len: 0,
            elem: TypeId::INVALID,
        },
        ast::TypeExpr::Func { .. } => TypeKind::Func {
            ret: TypeId::INVALID,
            params: Vec::new(),
            variadic: false,
        },
        ast::TypeExpr::Named { .. } => {
            unreachable!("alias chains are chased before skeleton creation")
        }
    }
}
