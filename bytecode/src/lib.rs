pub mod error;
pub mod instruction;
pub mod label;
pub mod link;
pub mod opcode;
pub mod operand;

pub use error::{LinkError, ShapeError};
pub use instruction::Instruction;
pub use label::{new_label, Label};
pub use link::{Arena, LinkedProgram, Segment};
pub use opcode::OpCode;
pub use operand::{Immediate, Operand, OperandKind, Register};
