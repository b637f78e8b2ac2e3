//! Function bodies: basic blocks, instructions and terminators.

use std::fmt;

use crate::constant::Const;
use crate::span::Span;
use crate::types::TypeExpr;

/// A basic block: a label followed by instructions and a terminator.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicBlock {
    pub label: String,
    pub insts: Vec<Inst>,
    pub term: Terminator,
    pub span: Span,
}

/// An instruction, optionally binding its result to a local name.
#[derive(Debug, Clone, PartialEq)]
pub struct Inst {
    /// Name bound to the result, when the source writes `%name = ...`.
    pub result: Option<String>,
    pub kind: InstKind,
    pub span: Span,
}

/// Instruction kinds.
///
/// `Fence` is recognized by the grammar but not lowered.
#[derive(Debug, Clone, PartialEq)]
pub enum InstKind {
    // "alloca" <ty>
    Alloca { ty: TypeExpr },
    // "load" <ty> "," <ptr>
    Load { ty: TypeExpr, src: TypedValue },
    // "store" <val> "," <ptr>
    Store { val: TypedValue, dst: TypedValue },
    // <op> <ty> <lhs> "," <rhs>
    Binary {
        op: BinOp,
        ty: TypeExpr,
        lhs: Value,
        rhs: Value,
    },
    // "icmp" <pred> <ty> <lhs> "," <rhs>
    ICmp {
        pred: ICmpPred,
        ty: TypeExpr,
        lhs: Value,
        rhs: Value,
    },
    // "call" <ret-ty> <callee> "(" <args> ")"
    Call {
        ret: TypeExpr,
        callee: Value,
        args: Vec<TypedValue>,
    },
    // "fence" [ordering]
    Fence,
}

/// Integer binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    UDiv,
    SDiv,
    URem,
    SRem,
    Shl,
    LShr,
    AShr,
    And,
    Or,
    Xor,
}

/// Integer comparison predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ICmpPred {
    Eq,
    Ne,
    Ugt,
    Uge,
    Ult,
    Ule,
    Sgt,
    Sge,
    Slt,
    Sle,
}

/// A value operand paired with its written type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    pub ty: TypeExpr,
    pub value: Value,
}

/// A bare value operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // "%" <name>
    Local { name: String, span: Span },
    // "@" <name>
    Global { name: String, span: Span },
    Const(Const),
}

/// A branch target, written `label %name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub name: String,
    pub span: Span,
}

/// A block terminator.
#[derive(Debug, Clone, PartialEq)]
pub struct Terminator {
    pub kind: TermKind,
    pub span: Span,
}

/// Terminator kinds.
///
/// `IndirectBr` is recognized by the grammar but not lowered.
#[derive(Debug, Clone, PartialEq)]
pub enum TermKind {
    // "ret void" / "ret" <ty> <val>
    Ret { value: Option<TypedValue> },
    // "br label" <target>
    Br { target: Label },
    // "br i1" <cond> ", label" <then> ", label" <else>
    CondBr {
        cond: TypedValue,
        then_target: Label,
        else_target: Label,
    },
    // "unreachable"
    Unreachable,
    // "indirectbr" ...
    IndirectBr,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::UDiv => "udiv",
            BinOp::SDiv => "sdiv",
            BinOp::URem => "urem",
            BinOp::SRem => "srem",
            BinOp::Shl => "shl",
            BinOp::LShr => "lshr",
            BinOp::AShr => "ashr",
            BinOp::And => "and",
            BinOp::Or => "or",
            BinOp::Xor => "xor",
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for ICmpPred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ICmpPred::Eq => "eq",
            ICmpPred::Ne => "ne",
            ICmpPred::Ugt => "ugt",
            ICmpPred::Uge => "uge",
            ICmpPred::Ult => "ult",
            ICmpPred::Ule => "ule",
            ICmpPred::Sgt => "sgt",
            ICmpPred::Sge => "sge",
            ICmpPred::Slt => "slt",
            ICmpPred::Sle => "sle",
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Local { name, .. } => write!(f, "%{}", name),
            Value::Global { name, .. } => write!(f, "@{}", name),
            Value::Const(c) => write!(f, "{}", c),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.value)
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(result) = &self.result {
            write!(f, "%{} = ", result)?;
        }
        match &self.kind {
            InstKind::Alloca { ty } => write!(f, "alloca {}", ty),
            InstKind::Load { ty, src } => write!(f, "load {}, {}", ty, src),
            InstKind::Store { val, dst } => write!(f, "store {}, {}", val, dst),
            InstKind::Binary { op, ty, lhs, rhs } => {
                write!(f, "{} {} {}, {}", op, ty, lhs, rhs)
            }
            InstKind::ICmp { pred, ty, lhs, rhs } => {
                write!(f, "icmp {} {} {}, {}", pred, ty, lhs, rhs)
            }
            InstKind::Call { ret, callee, args } => {
                write!(f, "call {} {}(", ret, callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            InstKind::Fence => write!(f, "fence"),
        }
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TermKind::Ret { value: Some(v) } => write!(f, "ret {}", v),
            TermKind::Ret { value: None } => write!(f, "ret void"),
            TermKind::Br { target } => write!(f, "br label %{}", target.name),
            TermKind::CondBr {
                cond,
                then_target,
                else_target,
            } => write!(
                f,
                "br {}, label %{}, label %{}",
                cond, then_target.name, else_target.name
            ),
            TermKind::Unreachable => write!(f, "unreachable"),
            TermKind::IndirectBr => write!(f, "indirectbr"),
        }
    }
}
