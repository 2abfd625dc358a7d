//! OpCode definitions for hand-written library bodies
//!
//! Only the subset of the ZASM instruction set that native bindings emit is
//! defined here. Every opcode has a fixed operand shape; [`OpCode::shape`] is
//! the single source of truth that instruction construction checks against.
//!
//! Notation below: `R` is a register operand, `V` an immediate, `L` a label.

use std::fmt;

use crate::operand::OperandKind;

use crate::operand::OperandKind::{Immediate as V, Label as L, Register as R};

/// ZASM instruction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    // ===== Stack =====
    /// Push register: push R
    PushRegister = 0,
    /// Push immediate: push V
    PushImmediate = 1,
    /// Pop into register: R = pop
    PopRegister = 2,

    // ===== Moves =====
    /// Set immediate: R = V
    SetImmediate = 10,
    /// Set register: R[A] = R[B]
    SetRegister = 11,

    // ===== Comparison =====
    /// Compare register with immediate, setting the compare flag
    CompareImmediate = 20,
    /// Compare two registers, setting the compare flag
    CompareRegister = 21,

    // ===== Flow Control =====
    /// Unconditional jump: IP = L
    Goto = 30,
    /// Jump if the compare flag is set: IP = L
    GotoTrue = 31,
    /// Jump if the compare flag is clear: IP = L
    GotoFalse = 32,
    /// Register jump: IP = R. The only way a callee returns.
    GotoRegister = 33,

    // ===== Engine =====
    /// Switch the running ffc's script to R
    ChangeFfcScript = 40,
    /// Set the compare flag if the running ffc was triggered this frame
    CheckTrigger = 41,

    // ===== Special =====
    /// Terminate the running script
    Quit = 255,
}

impl OpCode {
    pub const ALL: [OpCode; 14] = [
        OpCode::PushRegister,
        OpCode::PushImmediate,
        OpCode::PopRegister,
        OpCode::SetImmediate,
        OpCode::SetRegister,
        OpCode::CompareImmediate,
        OpCode::CompareRegister,
        OpCode::Goto,
        OpCode::GotoTrue,
        OpCode::GotoFalse,
        OpCode::GotoRegister,
        OpCode::ChangeFfcScript,
        OpCode::CheckTrigger,
        OpCode::Quit,
    ];

    /// Get opcode from byte value
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(OpCode::PushRegister),
            1 => Some(OpCode::PushImmediate),
            2 => Some(OpCode::PopRegister),
            10 => Some(OpCode::SetImmediate),
            11 => Some(OpCode::SetRegister),
            20 => Some(OpCode::CompareImmediate),
            21 => Some(OpCode::CompareRegister),
            30 => Some(OpCode::Goto),
            31 => Some(OpCode::GotoTrue),
            32 => Some(OpCode::GotoFalse),
            33 => Some(OpCode::GotoRegister),
            40 => Some(OpCode::ChangeFfcScript),
            41 => Some(OpCode::CheckTrigger),
            255 => Some(OpCode::Quit),
            _ => None,
        }
    }

    /// Convert opcode to byte value
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Assembly mnemonic
    pub fn name(self) -> &'static str {
        match self {
            OpCode::PushRegister => "PUSHR",
            OpCode::PushImmediate => "PUSHV",
            OpCode::PopRegister => "POP",
            OpCode::SetImmediate => "SETV",
            OpCode::SetRegister => "SETR",
            OpCode::CompareImmediate => "COMPAREV",
            OpCode::CompareRegister => "COMPARER",
            OpCode::Goto => "GOTO",
            OpCode::GotoTrue => "GOTOTRUE",
            OpCode::GotoFalse => "GOTOFALSE",
            OpCode::GotoRegister => "GOTOR",
            OpCode::ChangeFfcScript => "CHANGEFFCSCRIPTR",
            OpCode::CheckTrigger => "CHECKTRIG",
            OpCode::Quit => "QUIT",
        }
    }

    /// Operand kinds this opcode takes, in order.
    pub fn shape(self) -> &'static [OperandKind] {
        match self {
            OpCode::PushRegister | OpCode::PopRegister | OpCode::GotoRegister => &[R],
            OpCode::ChangeFfcScript => &[R],
            OpCode::PushImmediate => &[V],
            OpCode::SetImmediate | OpCode::CompareImmediate => &[R, V],
            OpCode::SetRegister | OpCode::CompareRegister => &[R, R],
            OpCode::Goto | OpCode::GotoTrue | OpCode::GotoFalse => &[L],
            OpCode::CheckTrigger | OpCode::Quit => &[],
        }
    }

    #[inline]
    pub fn arity(self) -> usize {
        self.shape().len()
    }

    /// True for instructions after which execution never falls through:
    /// a register jump or a terminator.
    pub fn is_control_transfer(self) -> bool {
        matches!(self, OpCode::GotoRegister | OpCode::Quit)
    }

    /// True for jumps whose target is a label.
    pub fn is_label_branch(self) -> bool {
        matches!(self, OpCode::Goto | OpCode::GotoTrue | OpCode::GotoFalse)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
