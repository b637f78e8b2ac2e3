//! Constant literals.

use std::fmt;

use crate::span::Span;
use crate::types::TypeExpr;

/// A constant literal as parsed, before the expected type is known.
///
/// The same token sequence can denote different constants depending on the
/// type it is checked against (`0` as `i8` versus `i64`); the lowering stage
/// disambiguates using the declared content type.
#[derive(Debug, Clone, PartialEq)]
pub enum Const {
    // "42", "-7"
    Int(i128),
    // "3.25", "1.0e6"
    Float(f64),
    // "true" / "false"
    Bool(bool),
    // "null"
    Null,
    // "zeroinitializer"
    ZeroInitializer,
    // "undef"
    Undef,
    // "[" <ty> <const>, ... "]"
    Array(Vec<(TypeExpr, Const)>),
    // "{" <ty> <const>, ... "}" or "<{" ... "}>" when packed
    Struct {
        fields: Vec<(TypeExpr, Const)>,
        packed: bool,
    },
    // "@" <name>
    GlobalRef { name: String, span: Span },
    // "blockaddress(@" <func> ", %" <block> ")"
    BlockAddress {
        func: String,
        block: String,
        span: Span,
    },
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Const::Int(value) => write!(f, "{}", value),
            Const::Float(value) => write!(f, "{}", value),
            Const::Bool(value) => write!(f, "{}", value),
            Const::Null => write!(f, "null"),
            Const::ZeroInitializer => write!(f, "zeroinitializer"),
            Const::Undef => write!(f, "undef"),
            Const::Array(elems) => {
                write!(f, "[")?;
                for (i, (ty, elem)) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", ty, elem)?;
                }
                write!(f, "]")
            }
            Const::Struct { fields, packed } => {
                let (open, close) = if *packed { ("<{", "}>") } else { ("{", "}") };
                write!(f, "{} ", open)?;
                for (i, (ty, field)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", ty, field)?;
                }
                write!(f, " {}", close)
            }
            Const::GlobalRef { name, .. } => write!(f, "@{}", name),
            Const::BlockAddress { func, block, .. } => {
                write!(f, "blockaddress(@{}, %{})", func, block)
            }
        }
    }
}
