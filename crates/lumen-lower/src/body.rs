//! Pass 4: resolve function bodies.
//!
//! Each function gets a private local scope seeded with its parameters.
//! Branches may target labels that appear later in the function, so every
//! basic-block label is pre-registered before any operand is resolved — the
//! module-level skeleton discipline applied at function scope. Instruction
//! results, by contrast, are bound incrementally as they are produced, so a
//! use before the producing instruction is an unresolved local.

use rustc_hash::FxHashMap;

use lumen_ast as ast;
use lumen_ir::{self as ir, BlockId, FuncId, InstId, TypeId, TypeKind};

use crate::error::{src, LowerError};
use crate::Lowerer;

/// What a local name is bound to.
#[derive(Debug, Clone, Copy)]
enum Local {
    Param { index: u32 },
    Block(BlockId),
    Inst { id: InstId },
}

impl Local {
    fn kind_name(&self) -> &'static str {
        match self {
            Local::Param { .. } => "a parameter",
            Local::Block(_) => "a basic block",
            Local::Inst { .. } => "an instruction result",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct LocalEntry {
    local: Local,
    span: ast::Span,
}

/// Scope for resolving one function body. Dropped once the body is filled.
pub(crate) struct FuncLowerer<'l, 'a> {
    lower: &'l mut Lowerer<'a>,
    func: FuncId,
    locals: FxHashMap<String, LocalEntry>,
    next_inst: u32,
}

impl<'l, 'a> FuncLowerer<'l, 'a> {
    pub(crate) fn new(lower: &'l mut Lowerer<'a>, func: FuncId) -> Self {
        Self {
            lower,
            func,
            locals: FxHashMap::default(),
            next_inst: 0,
        }
    }

    /// Resolve the basic blocks of a function definition. `span` is the
    /// definition's span, used when a parameter name itself conflicts.
    pub(crate) fn resolve_body(
        mut self,
        body: &[ast::BasicBlock],
        span: ast::Span,
    ) -> Result<Vec<ir::Block>, LowerError> {
        // Seed the scope with the named parameters.
        let header_params = self.lower.module.funcs[self.func.index()].params.clone();
        for (index, param) in header_params.iter().enumerate() {
            if let Some(name) = &param.name {
                self.bind(
                    name,
                    Local::Param {
                        index: index as u32,
                    },
                    span,
                )?;
            }
        }

        // Pre-register every label so forward branches resolve.
        for (index, block) in body.iter().enumerate() {
            self.bind(&block.label, Local::Block(BlockId::new(index)), block.span)?;
        }

        let mut blocks = Vec::with_capacity(body.len());
        for (index, raw) in body.iter().enumerate() {
            let mut insts = Vec::with_capacity(raw.insts.len());
            for inst in &raw.insts {
                insts.push(self.resolve_inst(inst)?);
            }
            let term = self.resolve_term(&raw.term)?;
            blocks.push(ir::Block {
                id: BlockId::new(index),
                name: raw.label.clone(),
                insts,
                term,
            });
        }
        Ok(blocks)
    }

    /// Look up a branch target.
    fn resolve_block_ref(&self, label: &ast::Label) -> Result<BlockId, LowerError> {
        match self.locals.get(label.name.as_str()) {
            Some(entry) => match entry.local {
                Local::Block(id) => Ok(id),
                other => Err(LowerError::LocalKindMismatch {
                    name: format!("%{}", label.name),
                    expected: "a basic block",
                    found: other.kind_name(),
                    span: src(label.span),
                }),
            },
            None => Err(LowerError::UnresolvedLocal {
                name: format!("%{}", label.name),
                span: src(label.span),
            }),
        }
    }

    fn resolve_inst(&mut self, raw: &ast::Inst) -> Result<ir::Inst, LowerError> {
        let (ty, kind) = match &raw.kind {
            ast::InstKind::Alloca { ty } => {
                let allocated = self.lower.resolve_type(ty)?;
                let ptr = self.lower.module.types.alloc(
                    None,
                    TypeKind::Pointer {
                        elem: allocated,
                        addr_space: 0,
                    },
                );
                (ptr, ir::InstKind::Alloca { allocated })
            }
            ast::InstKind::Load { ty, src } => {
                let ty = self.lower.resolve_type(ty)?;
                let src = self.resolve_typed_value(src)?;
                (ty, ir::InstKind::Load { src })
            }
            ast::InstKind::Store { val, dst } => {
                let val = self.resolve_typed_value(val)?;
                let dst = self.resolve_typed_value(dst)?;
                (self.lower.void_type(), ir::InstKind::Store { val, dst })
            }
            ast::InstKind::Binary { op, ty, lhs, rhs } => {
                let ty = self.lower.resolve_type(ty)?;
                let lhs = self.resolve_value(ty, lhs)?;
                let rhs = self.resolve_value(ty, rhs)?;
                (ty, ir::InstKind::Binary { op: *op, lhs, rhs })
            }
            ast::InstKind::ICmp { pred, ty, lhs, rhs } => {
                let ty = self.lower.resolve_type(ty)?;
                let lhs = self.resolve_value(ty, lhs)?;
                let rhs = self.resolve_value(ty, rhs)?;
                (
                    self.lower.bool_type(),
                    ir::InstKind::ICmp {
                        pred: *pred,
                        lhs,
                        rhs,
                    },
                )
            }
            ast::InstKind::Call { ret, callee, args } => {
                let ret = self.lower.resolve_type(ret)?;
                let callee = self.resolve_value(ret, callee)?;
                let args = args
                    .iter()
                    .map(|arg| self.resolve_typed_value(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                (ret, ir::InstKind::Call { callee, args })
            }
            ast::InstKind::Fence => {
                return Err(LowerError::UnsupportedConstruct {
                    construct: "fence instruction".to_string(),
                    span: src(raw.span),
                })
            }
        };
        let id = InstId::new(self.next_inst);
        self.next_inst += 1;
        if let Some(name) = &raw.result {
            self.bind(name, Local::Inst { id }, raw.span)?;
        }
        Ok(ir::Inst {
            id,
            result: raw.result.clone(),
            ty,
            kind,
        })
    }

    fn resolve_term(&mut self, raw: &ast::Terminator) -> Result<ir::Terminator, LowerError> {
        match &raw.kind {
            ast::TermKind::Ret { value } => {
                let value = match value {
                    Some(value) => Some(self.resolve_typed_value(value)?),
                    None => None,
                };
                Ok(ir::Terminator::Ret { value })
            }
            ast::TermKind::Br { target } => Ok(ir::Terminator::Br {
                target: self.resolve_block_ref(target)?,
            }),
            ast::TermKind::CondBr {
                cond,
                then_target,
                else_target,
            } => Ok(ir::Terminator::CondBr {
                cond: self.resolve_typed_value(cond)?,
                then_target: self.resolve_block_ref(then_target)?,
                else_target: self.resolve_block_ref(else_target)?,
            }),
            ast::TermKind::Unreachable => Ok(ir::Terminator::Unreachable),
            ast::TermKind::IndirectBr => Err(LowerError::UnsupportedConstruct {
                construct: "indirectbr terminator".to_string(),
                span: src(raw.span),
            }),
        }
    }

    fn resolve_typed_value(&mut self, raw: &ast::TypedValue) -> Result<ir::Value, LowerError> {
        let ty = self.lower.resolve_type(&raw.ty)?;
        self.resolve_value(ty, &raw.value)
    }

    /// Resolve a value operand. `expected` types bare constant literals.
    fn resolve_value(
        &mut self,
        expected: TypeId,
        raw: &ast::Value,
    ) -> Result<ir::Value, LowerError> {
        match raw {
            ast::Value::Local { name, span } => match self.locals.get(name.as_str()) {
                Some(entry) => match entry.local {
                    Local::Param { index } => Ok(ir::Value::Param(index)),
                    Local::Inst { id } => Ok(ir::Value::Inst(id)),
                    Local::Block(_) => Err(LowerError::LocalKindMismatch {
                        name: format!("%{}", name),
                        expected: "a value",
                        found: "a basic block",
                        span: src(*span),
                    }),
                },
                None => Err(LowerError::UnresolvedLocal {
                    name: format!("%{}", name),
                    span: src(*span),
                }),
            },
            ast::Value::Global { name, span } => match self.lower.vs.get(name.as_str()) {
                Some(crate::ValueEntry::Global(id, _)) => Ok(ir::Value::Global(*id)),
                Some(crate::ValueEntry::Func(id, _)) => Ok(ir::Value::Func(*id)),
                None => Err(LowerError::UnresolvedIdentifier {
                    name: format!("@{}", name),
                    span: src(*span),
                    help: None,
                }),
            },
            ast::Value::Const(constant) => Ok(ir::Value::Const(
                self.lower.resolve_constant(expected, constant)?,
            )),
        }
    }

    fn bind(&mut self, name: &str, local: Local, span: ast::Span) -> Result<(), LowerError> {
        if let Some(prev) = self.locals.get(name) {
            return Err(LowerError::DuplicateDefinition {
                name: format!("%{}", name),
                prev: format!("{} %{}", prev.local.kind_name(), name),
                new: format!("{} %{}", local.kind_name(), name),
                span: src(span),
                prev_span: src(prev.span),
            });
        }
        self.locals
            .insert(name.to_string(), LocalEntry { local, span });
        Ok(())
    }
}
