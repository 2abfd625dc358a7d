//! Destination symbol tables.
//!
//! [`Scope`] is what a library installs itself into. The compiler proper owns
//! the real implementation; [`SymbolTable`] is a self-contained one that keeps
//! members per class and synthesizes field accessors the way the compiler's
//! codegen expects them.

use std::collections::BTreeMap;

use bytecode::Label;
use tracing::trace;

use crate::error::ScopeError;
use crate::registrar::BoundField;
use crate::types::{ClassKind, DataType, Signature};

pub trait Scope {
    /// True if `name` is already a member of `class`.
    fn contains(&self, class: ClassKind, name: &str) -> bool;

    /// Make `field` reachable from scripts through a getter and a setter.
    fn declare_field(&mut self, class: ClassKind, field: &BoundField) -> Result<(), ScopeError>;

    /// Make a native method callable; calls resolve to a jump to `entry`.
    fn declare_function(
        &mut self,
        class: ClassKind,
        name: &str,
        signature: &Signature,
        entry: Label,
    ) -> Result<(), ScopeError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Getter,
    Setter,
}

/// Synthesized field accessor. Carries no bytecode; codegen reads and writes
/// storage at `offset` (plus the index, for arrays).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    pub class: ClassKind,
    pub field: String,
    pub kind: AccessorKind,
    pub ty: DataType,
    pub count: u16,
    pub offset: u16,
}

impl Accessor {
    fn new(class: ClassKind, field: &BoundField, kind: AccessorKind) -> Self {
        Self {
            class,
            field: field.name.clone(),
            kind,
            ty: field.ty,
            count: field.count,
            offset: field.offset,
        }
    }

    /// Script-visible type of the accessor.
    ///
    /// Array accessors take a leading `float` index.
    pub fn signature(&self) -> Signature {
        let mut params = Vec::with_capacity(2);
        if self.count > 1 {
            params.push(DataType::Float);
        }
        match self.kind {
            AccessorKind::Getter => Signature::method(self.class, self.ty, &params),
            AccessorKind::Setter => {
                params.push(self.ty);
                Signature::method(self.class, DataType::Void, &params)
            }
        }
    }

    /// Reject element indexes outside `0..count`.
    pub fn check_index(&self, index: i64) -> Result<(), ScopeError> {
        if index < 0 || index >= i64::from(self.count) {
            return Err(ScopeError::IndexOutOfRange {
                class: self.class,
                name: self.field.clone(),
                index,
                count: self.count,
            });
        }
        Ok(())
    }

    /// Storage slot holding element `index`.
    pub fn slot(&self, index: i64) -> Result<u16, ScopeError> {
        self.check_index(index)?;
        let size = self.ty.element_size().unwrap_or(1);
        Ok(self.offset + size * index as u16)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionEntry {
    pub class: ClassKind,
    pub name: String,
    pub signature: Signature,
    pub entry: Label,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Accessor(Accessor),
    Function(FunctionEntry),
}

impl Member {
    pub fn signature(&self) -> Signature {
        match self {
            Member::Accessor(a) => a.signature(),
            Member::Function(f) => f.signature.clone(),
        }
    }
}

/// In-memory [`Scope`] keyed by class and member name.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    members: BTreeMap<(ClassKind, String), Member>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, class: ClassKind, name: &str) -> Option<&Member> {
        self.members.get(&(class, name.to_string()))
    }

    pub fn accessor(&self, class: ClassKind, name: &str) -> Option<&Accessor> {
        match self.lookup(class, name)? {
            Member::Accessor(a) => Some(a),
            Member::Function(_) => None,
        }
    }

    pub fn function(&self, class: ClassKind, name: &str) -> Option<&FunctionEntry> {
        match self.lookup(class, name)? {
            Member::Function(f) => Some(f),
            Member::Accessor(_) => None,
        }
    }

    /// Members of `class` in name order.
    pub fn members(&self, class: ClassKind) -> impl Iterator<Item = (&str, &Member)> {
        self.members
            .iter()
            .filter(move |((c, _), _)| *c == class)
            .map(|((_, name), member)| (name.as_str(), member))
    }

    /// Accessors synthesized for field `field` of `class`.
    pub fn accessors_of<'a>(
        &'a self,
        class: ClassKind,
        field: &'a str,
    ) -> impl Iterator<Item = &'a Accessor> + 'a {
        self.members(class).filter_map(move |(_, m)| match m {
            Member::Accessor(a) if a.field == field => Some(a),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn reject_taken(&self, class: ClassKind, name: &str) -> Result<(), ScopeError> {
        if self.contains(class, name) {
            return Err(ScopeError::Duplicate {
                class,
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

impl Scope for SymbolTable {
    fn contains(&self, class: ClassKind, name: &str) -> bool {
        self.lookup(class, name).is_some()
    }

    fn declare_field(&mut self, class: ClassKind, field: &BoundField) -> Result<(), ScopeError> {
        let getter = field.getter_name();
        let setter = field.setter_name();
        self.reject_taken(class, &getter)?;
        self.reject_taken(class, &setter)?;

        trace!(%class, field = %field.name, "accessors synthesized");
        self.members.insert(
            (class, getter),
            Member::Accessor(Accessor::new(class, field, AccessorKind::Getter)),
        );
        self.members.insert(
            (class, setter),
            Member::Accessor(Accessor::new(class, field, AccessorKind::Setter)),
        );
        Ok(())
    }

    fn declare_function(
        &mut self,
        class: ClassKind,
        name: &str,
        signature: &Signature,
        entry: Label,
    ) -> Result<(), ScopeError> {
        self.reject_taken(class, name)?;
        self.members.insert(
            (class, name.to_string()),
            Member::Function(FunctionEntry {
                class,
                name: name.to_string(),
                signature: signature.clone(),
                entry,
            }),
        );
        Ok(())
    }
}
