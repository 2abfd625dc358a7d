//! Operand definitions for ZASM instructions
//!
//! An operand is one of three things:
//!
//! - a register the instruction reads or writes,
//! - an immediate literal baked into the instruction,
//! - a label naming a jump target elsewhere in the program.

use std::fmt;

use crate::label::Label;

/// Scale factor of ZASM fixed-point literals (4 decimal places).
pub const FIXED_ONE: i32 = 10_000;

/// VM register.
///
/// Only the registers that hand-written library bodies touch are modelled.
/// Engine variables (ffc position, velocity, ...) are addressed through field
/// offsets, not through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Register {
    /// Expression scratch register 1. Holds call results.
    Exp1 = 0,
    /// Expression scratch register 2. Conventionally holds return addresses.
    Exp2 = 1,
    /// Write-only sink; popping into it discards the value.
    Nul = 2,
    /// Stack frame base.
    Sframe = 3,
    /// Array index register used by indexed accessors.
    Index = 4,
    /// Secondary index register.
    Index2 = 5,
    /// Stack pointer.
    Sp = 6,
    /// Reference to the ffc the current accessor operates on.
    RefFfc = 7,
}

impl Register {
    pub const ALL: [Register; 8] = [
        Register::Exp1,
        Register::Exp2,
        Register::Nul,
        Register::Sframe,
        Register::Index,
        Register::Index2,
        Register::Sp,
        Register::RefFfc,
    ];

    /// Get register from byte value
    pub fn from_u8(byte: u8) -> Option<Self> {
        Self::ALL.get(byte as usize).copied()
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Assembly name of the register
    pub fn name(self) -> &'static str {
        match self {
            Register::Exp1 => "EXP1",
            Register::Exp2 => "EXP2",
            Register::Nul => "NUL",
            Register::Sframe => "SFRAME",
            Register::Index => "INDEX",
            Register::Index2 => "INDEX2",
            Register::Sp => "SP",
            Register::RefFfc => "REFFFC",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-point immediate literal, stored pre-scaled by [`FIXED_ONE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Immediate(pub i32);

impl Immediate {
    /// Literal for a whole number. `-1` becomes `-10000`.
    ///
    /// # Panics
    ///
    /// Panics if the scaled value does not fit in an `i32`.
    pub fn whole(n: i32) -> Self {
        match n.checked_mul(FIXED_ONE) {
            Some(raw) => Immediate(raw),
            None => panic!("immediate {n} overflows the fixed-point range"),
        }
    }

    /// Raw literal, already scaled.
    pub fn raw(raw: i32) -> Self {
        Immediate(raw)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an operand slot of an opcode accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    Register,
    Immediate,
    Label,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandKind::Register => f.write_str("register"),
            OperandKind::Immediate => f.write_str("immediate"),
            OperandKind::Label => f.write_str("label"),
        }
    }
}

/// A single instruction operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    Register(Register),
    Immediate(Immediate),
    Label(Label),
}

impl Operand {
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Register(_) => OperandKind::Register,
            Operand::Immediate(_) => OperandKind::Immediate,
            Operand::Label(_) => OperandKind::Label,
        }
    }

    pub fn as_register(&self) -> Option<Register> {
        match self {
            Operand::Register(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<Label> {
        match self {
            Operand::Label(l) => Some(*l),
            _ => None,
        }
    }
}

impl From<Register> for Operand {
    fn from(r: Register) -> Self {
        Operand::Register(r)
    }
}

impl From<Immediate> for Operand {
    fn from(i: Immediate) -> Self {
        Operand::Immediate(i)
    }
}

impl From<Label> for Operand {
    fn from(l: Label) -> Self {
        Operand::Label(l)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(r) => write!(f, "{r}"),
            Operand::Immediate(i) => write!(f, "{i}"),
            Operand::Label(l) => write!(f, "{l}"),
        }
    }
}
