use thiserror::Error;

use crate::label::Label;
use crate::opcode::OpCode;
use crate::operand::OperandKind;

/// Operand list does not fit an opcode's shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("`{op}` takes {expected} operand(s), got {got}")]
    Arity {
        op: OpCode,
        expected: usize,
        got: usize,
    },
    #[error("`{op}` operand {position} must be a {expected}, got a {got}")]
    Kind {
        op: OpCode,
        position: usize,
        expected: OperandKind,
        got: OperandKind,
    },
}

/// Errors found while laying bodies out into one flat program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// Two instructions claim the same label.
    #[error("label {label} claimed at both {first} and {second}")]
    DuplicateLabel {
        label: Label,
        first: usize,
        second: usize,
    },
    /// A branch names a label no instruction claims.
    #[error("instruction {at} branches to undefined label {label}")]
    UndefinedLabel { label: Label, at: usize },
    /// A segment's last instruction would fall through into the next segment.
    #[error("segment `{segment}` falls through past its last instruction")]
    FallThrough { segment: String },
    /// Two segments share a name.
    #[error("segment `{0}` added twice")]
    DuplicateSegment(String),
}
