//! Native method binding.
//!
//! A bound function is a typed name, an entry label and a hand-written body.
//! The calling convention the bodies follow:
//!
//! 1. The caller pushes the return address, then the receiver, then each
//!    parameter in declaration order, then jumps to the entry label.
//! 2. The callee pops the parameters, then the receiver, consuming it or
//!    discarding it into `NUL`.
//! 3. The callee pops the return address into a register and jumps to it.
//!
//! There is no return instruction; a body that does not end in a register jump
//! or a terminator would run straight into whatever is laid out after it.

use std::collections::HashSet;

use bytecode::{new_label, Instruction, Label};
use tracing::debug;

use crate::error::BindError;
use crate::types::{ClassKind, DataType, Signature};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundFunction {
    pub name: String,
    pub signature: Signature,
    pub entry: Label,
    body: Vec<Instruction>,
}

impl BoundFunction {
    pub fn body(&self) -> &[Instruction] {
        &self.body
    }

    /// Labels claimed inside the body, entry label included.
    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.body.iter().filter_map(Instruction::label)
    }
}

/// Handle to a declared function, valid for the binder that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionId(usize);

struct Pending {
    function: BoundFunction,
    attached: bool,
}

/// Declares the methods of one class and attaches their bodies.
pub struct FunctionBinder {
    class: ClassKind,
    functions: Vec<Pending>,
    claimed: HashSet<Label>,
}

impl FunctionBinder {
    pub fn new(class: ClassKind) -> Self {
        Self {
            class,
            functions: Vec::new(),
            claimed: HashSet::new(),
        }
    }

    /// Declare `ret name(this, params...)` with a fresh entry label and no body.
    pub fn declare(
        &mut self,
        name: &str,
        ret: DataType,
        params: &[DataType],
    ) -> Result<FunctionId, BindError> {
        if self.functions.iter().any(|p| p.function.name == name) {
            return Err(BindError::DuplicateFunction {
                class: self.class,
                name: name.to_string(),
            });
        }
        let function = BoundFunction {
            name: name.to_string(),
            signature: Signature::method(self.class, ret, params),
            entry: new_label(),
            body: Vec::new(),
        };
        debug!(class = %self.class, function = name, entry = %function.entry, "function declared");
        self.functions.push(Pending {
            function,
            attached: false,
        });
        Ok(FunctionId(self.functions.len() - 1))
    }

    pub fn entry(&self, id: FunctionId) -> Label {
        self.functions[id.0].function.entry
    }

    pub fn function(&self, id: FunctionId) -> &BoundFunction {
        &self.functions[id.0].function
    }

    /// Give `id` its body. Allowed exactly once per function.
    ///
    /// # Panics
    ///
    /// Panics if the function already has a body, if the first instruction
    /// does not claim the entry label, if the last instruction can fall
    /// through, or if the body claims a label some other body already claimed.
    pub fn attach_body(&mut self, id: FunctionId, code: Vec<Instruction>) {
        let pending = &self.functions[id.0];
        let name = &pending.function.name;
        let entry = pending.function.entry;

        assert!(!pending.attached, "function `{name}` already has a body");
        if let Some(first) = code.first() {
            assert_eq!(
                first.label(),
                Some(entry),
                "first instruction of `{name}` must claim its entry label {entry}"
            );
        }
        if let Some(last) = code.last() {
            assert!(
                last.is_control_transfer(),
                "`{name}` falls through after `{last}`; bodies must end in a register jump or QUIT"
            );
        }
        for label in code.iter().filter_map(Instruction::label) {
            assert!(
                !self.claimed.contains(&label),
                "label {label} in `{name}` is already claimed"
            );
        }

        let labels: Vec<Label> = code.iter().filter_map(Instruction::label).collect();
        for label in labels {
            if !self.claimed.insert(label) {
                panic!("label {label} claimed twice within one body");
            }
        }
        let pending = &mut self.functions[id.0];
        debug!(class = %self.class, function = %pending.function.name, len = code.len(), "body attached");
        pending.function.body = code;
        pending.attached = true;
    }

    /// Hand out the finished functions.
    ///
    /// # Panics
    ///
    /// Panics if a declared function never received a body.
    pub fn finish(self) -> Vec<BoundFunction> {
        self.functions
            .into_iter()
            .map(|p| {
                assert!(p.attached, "function `{}` declared without a body", p.function.name);
                p.function
            })
            .collect()
    }
}

/// Helper for authoring a body in order.
pub struct BodyBuilder {
    entry: Label,
    code: Vec<Instruction>,
    pending_label: Option<Label>,
}

impl BodyBuilder {
    pub fn new(entry: Label) -> Self {
        Self {
            entry,
            code: Vec::new(),
            pending_label: None,
        }
    }

    pub fn entry_label(&self) -> Label {
        self.entry
    }

    /// Mint a label for an internal branch target.
    pub fn label(&mut self) -> Label {
        new_label()
    }

    /// Make the next emitted instruction the target of `label`.
    ///
    /// # Panics
    ///
    /// Panics if a label is already waiting for an instruction.
    pub fn bind(&mut self, label: Label) {
        if let Some(waiting) = self.pending_label {
            panic!("label {waiting} never got an instruction before {label} was bound");
        }
        self.pending_label = Some(label);
    }

    pub fn emit(&mut self, inst: Instruction) {
        let inst = if self.code.is_empty() {
            if let Some(label) = self.pending_label.take() {
                panic!("entry instruction cannot also claim {label}");
            }
            inst.with_label(self.entry)
        } else {
            match self.pending_label.take() {
                Some(label) => inst.with_label(label),
                None => inst,
            }
        };
        self.code.push(inst);
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// # Panics
    ///
    /// Panics if a bound label never got an instruction.
    pub fn finish(self) -> Vec<Instruction> {
        if let Some(label) = self.pending_label {
            panic!("label {label} bound past the end of the body");
        }
        self.code
    }
}
