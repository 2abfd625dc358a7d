use std::fmt;

use smallvec::SmallVec;

use crate::error::ShapeError;
use crate::label::Label;
use crate::opcode::OpCode;
use crate::operand::{Immediate, Operand, Register};

/// One ZASM operation plus its operands.
///
/// The operand list always matches [`OpCode::shape`]; constructing an
/// instruction any other way panics. An instruction may additionally claim one
/// label, marking it as that label's jump target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    op: OpCode,
    operands: SmallVec<[Operand; 2]>,
    label: Option<Label>,
}

/// Check `operands` against the shape of `op` without building anything.
pub fn check_shape(op: OpCode, operands: &[Operand]) -> Result<(), ShapeError> {
    let shape = op.shape();
    if operands.len() != shape.len() {
        return Err(ShapeError::Arity {
            op,
            expected: shape.len(),
            got: operands.len(),
        });
    }
    for (position, (operand, expected)) in operands.iter().zip(shape).enumerate() {
        if operand.kind() != *expected {
            return Err(ShapeError::Kind {
                op,
                position,
                expected: *expected,
                got: operand.kind(),
            });
        }
    }
    Ok(())
}

impl Instruction {
    /// Build an instruction from raw parts.
    ///
    /// # Panics
    ///
    /// Panics if `operands` does not match the shape of `op`. Operand shapes
    /// are fixed by the compiler itself, so a mismatch is a bug in the binding
    /// that emitted it.
    pub fn new(op: OpCode, operands: &[Operand]) -> Self {
        if let Err(e) = check_shape(op, operands) {
            panic!("malformed instruction: {e}");
        }
        Self {
            op,
            operands: SmallVec::from_slice(operands),
            label: None,
        }
    }

    pub fn push_register(reg: Register) -> Self {
        Self::new(OpCode::PushRegister, &[reg.into()])
    }

    pub fn push_immediate(value: Immediate) -> Self {
        Self::new(OpCode::PushImmediate, &[value.into()])
    }

    pub fn pop(reg: Register) -> Self {
        Self::new(OpCode::PopRegister, &[reg.into()])
    }

    pub fn set_immediate(reg: Register, value: Immediate) -> Self {
        Self::new(OpCode::SetImmediate, &[reg.into(), value.into()])
    }

    pub fn set_register(dst: Register, src: Register) -> Self {
        Self::new(OpCode::SetRegister, &[dst.into(), src.into()])
    }

    pub fn compare_immediate(reg: Register, value: Immediate) -> Self {
        Self::new(OpCode::CompareImmediate, &[reg.into(), value.into()])
    }

    pub fn compare_register(lhs: Register, rhs: Register) -> Self {
        Self::new(OpCode::CompareRegister, &[lhs.into(), rhs.into()])
    }

    pub fn goto(target: Label) -> Self {
        Self::new(OpCode::Goto, &[target.into()])
    }

    pub fn goto_true(target: Label) -> Self {
        Self::new(OpCode::GotoTrue, &[target.into()])
    }

    pub fn goto_false(target: Label) -> Self {
        Self::new(OpCode::GotoFalse, &[target.into()])
    }

    pub fn goto_register(reg: Register) -> Self {
        Self::new(OpCode::GotoRegister, &[reg.into()])
    }

    pub fn change_ffc_script(reg: Register) -> Self {
        Self::new(OpCode::ChangeFfcScript, &[reg.into()])
    }

    pub fn check_trigger() -> Self {
        Self::new(OpCode::CheckTrigger, &[])
    }

    pub fn quit() -> Self {
        Self::new(OpCode::Quit, &[])
    }

    /// Mark this instruction as the target of `label`.
    ///
    /// # Panics
    ///
    /// Panics if the instruction already claims a label.
    pub fn with_label(mut self, label: Label) -> Self {
        self.set_label(label);
        self
    }

    /// In-place form of [`Instruction::with_label`].
    pub fn set_label(&mut self, label: Label) {
        if let Some(existing) = self.label {
            panic!(
                "instruction `{}` already claims {existing}, cannot also claim {label}",
                self.op
            );
        }
        self.label = Some(label);
    }

    #[inline]
    pub fn opcode(&self) -> OpCode {
        self.op
    }

    #[inline]
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    #[inline]
    pub fn label(&self) -> Option<Label> {
        self.label
    }

    /// Label this instruction may jump to, if it is a label branch.
    pub fn branch_target(&self) -> Option<Label> {
        if self.op.is_label_branch() {
            self.operands.first().and_then(Operand::as_label)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_control_transfer(&self) -> bool {
        self.op.is_control_transfer()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = self.label {
            write!(f, "{label}: ")?;
        }
        write!(f, "{}", self.op)?;
        for (i, operand) in self.operands.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{operand}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::new_label;
    use crate::operand::OperandKind;

    #[test]
    fn test_pop_shape() {
        let inst = Instruction::pop(Register::Exp1);
        assert_eq!(inst.opcode(), OpCode::PopRegister);
        assert_eq!(inst.operands(), &[Operand::Register(Register::Exp1)]);
        assert_eq!(inst.label(), None);
    }

    #[test]
    fn test_check_shape_reports_arity() {
        let err = check_shape(OpCode::PopRegister, &[]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::Arity {
                op: OpCode::PopRegister,
                expected: 1,
                got: 0
            }
        );
    }

    #[test]
    fn test_check_shape_reports_kind() {
        let err = check_shape(OpCode::GotoTrue, &[Register::Exp1.into()]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::Kind {
                op: OpCode::GotoTrue,
                position: 0,
                expected: OperandKind::Label,
                got: OperandKind::Register
            }
        );
    }

    #[test]
    #[should_panic(expected = "malformed instruction")]
    fn test_new_panics_on_wrong_kind() {
        Instruction::new(OpCode::PopRegister, &[Immediate::whole(1).into()]);
    }

    #[test]
    #[should_panic(expected = "already claims")]
    fn test_double_label_panics() {
        Instruction::quit().with_label(new_label()).with_label(new_label());
    }

    #[test]
    fn test_branch_target() {
        let target = new_label();
        assert_eq!(Instruction::goto_true(target).branch_target(), Some(target));
        assert_eq!(Instruction::goto_register(Register::Exp2).branch_target(), None);
    }

    #[test]
    fn test_display() {
        let label = new_label();
        let inst = Instruction::compare_immediate(Register::Exp2, Immediate::whole(-1));
        assert_eq!(inst.to_string(), "COMPAREV EXP2, -10000");
        let inst = Instruction::pop(Register::Exp1).with_label(label);
        assert_eq!(inst.to_string(), format!("{label}: POP EXP1"));
        assert_eq!(Instruction::quit().to_string(), "QUIT");
    }
}
