//! Pass 1: index top-level entities by name.

use log::debug;
use rustc_hash::FxHashMap;

use lumen_ast as ast;

use crate::error::{src, LowerError};

/// The per-category name indexes for one module, plus the first-occurrence
/// order of every name.
///
/// The order vectors are what later passes iterate; the hash maps are only
/// consulted for lookup, so output ordering never depends on map iteration.
#[derive(Debug)]
pub(crate) struct ModuleIndex<'a> {
    /// Type name (without `%`) to its most recent definition. An opaque
    /// definition may be replaced by a concrete one under the same name.
    pub types: FxHashMap<String, &'a ast::TypeDef>,
    /// Type names in first-occurrence order. A name appearing first as an
    /// opaque placeholder and again with a concrete body is recorded once.
    pub type_order: Vec<String>,
    /// Global and function name (without `@`) to its entity. The two
    /// categories share one namespace for conflict detection.
    pub values: FxHashMap<String, &'a ast::Entity>,
    /// Global variable names in first-occurrence order.
    pub global_order: Vec<String>,
    /// Function names in first-occurrence order.
    pub func_order: Vec<String>,
}

/// Scan the top-level entities once and build the name indexes.
pub(crate) fn index_module(module: &ast::Module) -> Result<ModuleIndex<'_>, LowerError> {
    let mut index = ModuleIndex {
        types: FxHashMap::default(),
        type_order: Vec::new(),
        values: FxHashMap::default(),
        global_order: Vec::new(),
        func_order: Vec::new(),
    };
    for entity in &module.entities {
        match entity {
            ast::Entity::TypeDef(def) => index_type_def(&mut index, def)?,
            ast::Entity::GlobalDecl(_) | ast::Entity::GlobalDef(_) => {
                insert_value(&mut index.values, entity)?;
                index.global_order.push(entity.name().to_string());
            }
            ast::Entity::FuncDecl(_) | ast::Entity::FuncDef(_) => {
                insert_value(&mut index.values, entity)?;
                index.func_order.push(entity.name().to_string());
            }
            ast::Entity::AliasDef(def) => {
                return Err(LowerError::UnsupportedConstruct {
                    construct: "alias definition".to_string(),
                    span: src(def.span),
                });
            }
            ast::Entity::IFuncDef(def) => {
                return Err(LowerError::UnsupportedConstruct {
                    construct: "ifunc definition".to_string(),
                    span: src(def.span),
                });
            }
        }
    }
    debug!(
        "indexed {} types, {} globals, {} functions",
        index.type_order.len(),
        index.global_order.len(),
        index.func_order.len()
    );
    Ok(index)
}

fn index_type_def<'a>(
    index: &mut ModuleIndex<'a>,
    def: &'a ast::TypeDef,
) -> Result<(), LowerError> {
    match index.types.get(def.name.as_str()) {
        None => {
            index.type_order.push(def.name.clone());
        }
        Some(prev) => {
            // An opaque placeholder may be completed by a later definition
            // of the same name; anything else is a conflict.
            if !matches!(prev.ty, ast::TypeExpr::Opaque) {
                return Err(LowerError::DuplicateDefinition {
                    name: format!("%{}", def.name),
                    prev: prev.to_string(),
                    new: def.to_string(),
                    span: src(def.span),
                    prev_span: src(prev.span),
                });
            }
        }
    }
    index.types.insert(def.name.clone(), def);
    Ok(())
}

fn insert_value<'a>(
    values: &mut FxHashMap<String, &'a ast::Entity>,
    entity: &'a ast::Entity,
) -> Result<(), LowerError> {
    let name = entity.name();
    if let Some(prev) = values.get(name) {
        return Err(LowerError::DuplicateDefinition {
            name: format!("@{}", name),
            prev: prev.to_string(),
            new: entity.to_string(),
            span: src(entity.span()),
            prev_span: src(prev.span()),
        });
    }
    values.insert(name.to_string(), entity);
    Ok(())
}
