//! Type expressions as they appear in source.

use std::fmt;

use crate::span::Span;

/// Floating-point kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    // "half"
    Half,
    // "float"
    Float,
    // "double"
    Double,
    // "x86_fp80"
    X86Fp80,
    // "fp128"
    Fp128,
    // "ppc_fp128"
    PpcFp128,
}

/// A type expression.
///
/// `Opaque` is only valid as the body of a type definition; everywhere else
/// the grammar forbids it.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    // "opaque"
    Opaque,
    // "void"
    Void,
    // "i" <bits>
    Int { bits: u32 },
    Float(FloatKind),
    // "x86_mmx"
    Mmx,
    // "label"
    Label,
    // "token"
    Token,
    // "metadata"
    Metadata,
    // "%" <name>
    Named { name: String, span: Span },
    // <elem> [ "addrspace(" <n> ")" ] "*"
    Pointer {
        elem: Box<TypeExpr>,
        addr_space: Option<u32>,
    },
    // "[" <len> " x " <elem> "]"
    Array { len: u64, elem: Box<TypeExpr> },
    // "<" <len> " x " <elem> ">"
    Vector { len: u64, elem: Box<TypeExpr> },
    // "{" <fields> "}" or "<{" <fields> "}>" when packed
    Struct {
        fields: Vec<TypeExpr>,
        packed: bool,
    },
    // <ret> "(" <params> [ ", ..." ] ")"
    Func {
        ret: Box<TypeExpr>,
        params: Vec<TypeExpr>,
        variadic: bool,
    },
}

impl TypeExpr {
    /// Shorthand for a named type reference.
    pub fn named(name: impl Into<String>, span: Span) -> Self {
        TypeExpr::Named {
            name: name.into(),
            span,
        }
    }

    /// Shorthand for a pointer in the default address space.
    pub fn ptr(elem: TypeExpr) -> Self {
        TypeExpr::Pointer {
            elem: Box::new(elem),
            addr_space: None,
        }
    }
}

impl fmt::Display for FloatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FloatKind::Half => "half",
            FloatKind::Float => "float",
            FloatKind::Double => "double",
            FloatKind::X86Fp80 => "x86_fp80",
            FloatKind::Fp128 => "fp128",
            FloatKind::PpcFp128 => "ppc_fp128",
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Opaque => write!(f, "opaque"),
            TypeExpr::Void => write!(f, "void"),
            TypeExpr::Int { bits } => write!(f, "i{}", bits),
            TypeExpr::Float(kind) => write!(f, "{}", kind),
            TypeExpr::Mmx => write!(f, "x86_mmx"),
            TypeExpr::Label => write!(f, "label"),
            TypeExpr::Token => write!(f, "token"),
            TypeExpr::Metadata => write!(f, "metadata"),
            TypeExpr::Named { name, .. } => write!(f, "%{}", name),
            TypeExpr::Pointer { elem, addr_space } => match addr_space {
                Some(n) => write!(f, "{} addrspace({})*", elem, n),
                None => write!(f, "{}*", elem),
            },
            TypeExpr::Array { len, elem } => write!(f, "[{} x {}]", len, elem),
            TypeExpr::Vector { len, elem } => write!(f, "<{} x {}>", len, elem),
            TypeExpr::Struct { fields, packed } => {
                let (open, close) = if *packed { ("<{", "}>") } else { ("{", "}") };
                write!(f, "{} ", open)?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", field)?;
                }
                write!(f, " {}", close)
            }
            TypeExpr::Func {
                ret,
                params,
                variadic,
            } => {
                write!(f, "{} (", ret)?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                if *variadic {
                    if !params.is_empty() {
                        write!(f, ", ")?;
                    }
                    write!(f, "...")?;
                }
                write!(f, ")")
            }
        }
    }
}
