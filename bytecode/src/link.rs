//! Flat program layout.
//!
//! [`Arena`] collects named instruction segments (one per bound function) into
//! a single index-addressed vector. [`Arena::link`] then walks that vector
//! once, recording where every label lands, and checks every label branch
//! against the result. No instruction is ever patched in place; a branch's
//! destination is looked up through [`LinkedProgram::position`].

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

use tracing::debug;

use crate::error::LinkError;
use crate::instruction::Instruction;
use crate::label::Label;

/// A named run of instructions inside the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub name: String,
    pub range: Range<usize>,
}

#[derive(Debug, Default)]
pub struct Arena {
    instructions: Vec<Instruction>,
    segments: Vec<Segment>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `body` as a new segment and return its index.
    pub fn push_segment(&mut self, name: &str, body: &[Instruction]) -> Result<usize, LinkError> {
        if self.segments.iter().any(|s| s.name == name) {
            return Err(LinkError::DuplicateSegment(name.to_string()));
        }
        if let Some(last) = body.last() {
            if !last.is_control_transfer() {
                return Err(LinkError::FallThrough {
                    segment: name.to_string(),
                });
            }
        }
        let start = self.instructions.len();
        self.instructions.extend_from_slice(body);
        self.segments.push(Segment {
            name: name.to_string(),
            range: start..self.instructions.len(),
        });
        Ok(self.segments.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Resolve every label to its position.
    pub fn link(self) -> Result<LinkedProgram, LinkError> {
        let mut positions: HashMap<Label, usize> = HashMap::new();
        let mut pending: Vec<(Label, usize)> = Vec::new();

        for (at, inst) in self.instructions.iter().enumerate() {
            if let Some(label) = inst.label() {
                if let Some(&first) = positions.get(&label) {
                    return Err(LinkError::DuplicateLabel {
                        label,
                        first,
                        second: at,
                    });
                }
                positions.insert(label, at);
            }
            if let Some(target) = inst.branch_target() {
                pending.push((target, at));
            }
        }

        if let Some(&(label, at)) = pending.iter().find(|(l, _)| !positions.contains_key(l)) {
            return Err(LinkError::UndefinedLabel { label, at });
        }

        debug!(
            instructions = self.instructions.len(),
            segments = self.segments.len(),
            labels = positions.len(),
            "program linked"
        );

        Ok(LinkedProgram {
            instructions: self.instructions,
            segments: self.segments,
            positions,
        })
    }
}

/// A laid-out program with every label resolved.
#[derive(Debug, Clone)]
pub struct LinkedProgram {
    instructions: Vec<Instruction>,
    segments: Vec<Segment>,
    positions: HashMap<Label, usize>,
}

impl LinkedProgram {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.name == name)
    }

    /// Position of the instruction that claims `label`.
    pub fn position(&self, label: Label) -> Option<usize> {
        self.positions.get(&label).copied()
    }

    /// Destination of the branch at `at`, if it is a label branch.
    pub fn branch_destination(&self, at: usize) -> Option<usize> {
        self.instructions
            .get(at)
            .and_then(Instruction::branch_target)
            .and_then(|label| self.position(label))
    }

    pub fn label_count(&self) -> usize {
        self.positions.len()
    }
}

impl fmt::Display for LinkedProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            writeln!(f, "== {} ==", segment.name)?;
            for at in segment.range.clone() {
                let inst = &self.instructions[at];
                match self.branch_destination(at) {
                    Some(dest) => writeln!(f, "{at:04} {:<32} ; -> {dest:04}", inst.to_string())?,
                    None => writeln!(f, "{at:04} {inst}")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::new_label;
    use crate::operand::{Immediate, Register};

    fn returning(entry: Label) -> Vec<Instruction> {
        vec![
            Instruction::pop(Register::Exp2).with_label(entry),
            Instruction::goto_register(Register::Exp2),
        ]
    }

    #[test]
    fn test_link_resolves_entry_positions() {
        let (a, b) = (new_label(), new_label());
        let mut arena = Arena::new();
        arena.push_segment("a", &returning(a)).unwrap();
        arena.push_segment("b", &returning(b)).unwrap();
        let program = arena.link().unwrap();
        assert_eq!(program.position(a), Some(0));
        assert_eq!(program.position(b), Some(2));
        assert_eq!(program.segment("b").unwrap().range, 2..4);
    }

    #[test]
    fn test_forward_branch_resolves() {
        let (entry, skip) = (new_label(), new_label());
        let body = vec![
            Instruction::compare_immediate(Register::Exp1, Immediate::whole(0)).with_label(entry),
            Instruction::goto_true(skip),
            Instruction::quit(),
            Instruction::pop(Register::Exp2).with_label(skip),
            Instruction::goto_register(Register::Exp2),
        ];
        let mut arena = Arena::new();
        arena.push_segment("f", &body).unwrap();
        let program = arena.link().unwrap();
        assert_eq!(program.branch_destination(1), Some(3));
        assert_eq!(program.branch_destination(0), None);
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let entry = new_label();
        let mut arena = Arena::new();
        arena.push_segment("a", &returning(entry)).unwrap();
        arena.push_segment("b", &returning(entry)).unwrap();
        assert_eq!(
            arena.link().unwrap_err(),
            LinkError::DuplicateLabel {
                label: entry,
                first: 0,
                second: 2
            }
        );
    }

    #[test]
    fn test_undefined_label_rejected() {
        let missing = new_label();
        let body = vec![Instruction::goto(missing), Instruction::quit()];
        let mut arena = Arena::new();
        arena.push_segment("f", &body).unwrap();
        assert_eq!(
            arena.link().unwrap_err(),
            LinkError::UndefinedLabel {
                label: missing,
                at: 0
            }
        );
    }

    #[test]
    fn test_fall_through_segment_rejected() {
        let mut arena = Arena::new();
        let err = arena
            .push_segment("f", &[Instruction::pop(Register::Exp1)])
            .unwrap_err();
        assert_eq!(
            err,
            LinkError::FallThrough {
                segment: "f".into()
            }
        );
        assert!(arena.is_empty());
    }

    #[test]
    fn test_duplicate_segment_rejected() {
        let mut arena = Arena::new();
        arena.push_segment("f", &returning(new_label())).unwrap();
        assert_eq!(
            arena.push_segment("f", &returning(new_label())),
            Err(LinkError::DuplicateSegment("f".into()))
        );
    }
}
