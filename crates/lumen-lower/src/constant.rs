//! Constant resolution.
//!
//! Constants only resolve against an expected type: the same literal spells
//! different constants under different types, so the caller supplies the
//! type it already knows (a global's content type, an operand's written
//! type) and the literal form is interpreted under it.

use lumen_ast as ast;
use lumen_ir::Constant;
use lumen_ir::TypeId;

use crate::error::{src, LowerError};
use crate::{Lowerer, ValueEntry};

impl<'a> Lowerer<'a> {
    pub(crate) fn resolve_constant(
        &mut self,
        ty: TypeId,
        raw: &ast::Const,
    ) -> Result<Constant, LowerError> {
        let constant = match raw {
            ast::Const::Int(value) => Constant::Int { ty, value: *value },
            ast::Const::Float(value) => Constant::Float {
                ty,
                bits: value.to_bits(),
            },
            ast::Const::Bool(value) => Constant::Int {
                ty,
                value: i128::from(*value),
            },
            ast::Const::Null => Constant::Null { ty },
            ast::Const::ZeroInitializer => Constant::ZeroInitializer { ty },
            ast::Const::Undef => Constant::Undef { ty },
            ast::Const::Array(raw_elems) => {
                let mut elems = Vec::with_capacity(raw_elems.len());
                for (elem_ty, elem) in raw_elems {
                    let elem_ty = self.resolve_type(elem_ty)?;
                    elems.push(self.resolve_constant(elem_ty, elem)?);
                }
                Constant::Array { ty, elems }
            }
            ast::Const::Struct { fields: raw_fields, .. } => {
                let mut fields = Vec::with_capacity(raw_fields.len());
                for (field_ty, field) in raw_fields {
                    let field_ty = self.resolve_type(field_ty)?;
                    fields.push(self.resolve_constant(field_ty, field)?);
                }
                Constant::Struct { ty, fields }
            }
            ast::Const::GlobalRef { name, span } => match self.vs.get(name.as_str()) {
                Some(ValueEntry::Global(id, ty)) => Constant::Global { ty: *ty, id: *id },
                Some(ValueEntry::Func(id, ty)) => Constant::Func { ty: *ty, id: *id },
                None => {
                    return Err(LowerError::UnresolvedIdentifier {
                        name: format!("@{}", name),
                        span: src(*span),
                        help: None,
                    })
                }
            },
            ast::Const::BlockAddress { span, .. } => {
                return Err(LowerError::UnsupportedConstruct {
                    construct: "blockaddress constant".to_string(),
                    span: src(*span),
                })
            }
        };
        Ok(constant)
    }
}
