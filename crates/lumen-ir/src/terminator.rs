//! Block terminators.

use crate::function::BlockId;
use crate::instruction::Value;

/// The control transfer at the end of a basic block.
#[derive(Debug, Clone, PartialEq)]
pub enum Terminator {
    /// Return, with a value unless the function returns `void`.
    Ret { value: Option<Value> },
    /// Unconditional branch.
    Br { target: BlockId },
    /// Two-way conditional branch on an `i1` condition.
    CondBr {
        cond: Value,
        then_target: BlockId,
        else_target: BlockId,
    },
    Unreachable,
}
