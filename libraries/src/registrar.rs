//! Field registration for built-in classes.
//!
//! A field is pure data: a name, an element type, an element count and the
//! engine storage it maps to. No bytecode is authored per field; the scope
//! synthesizes getter and setter accessors from the recorded offset.

use std::ops::Range;

use tracing::{debug, warn};

use crate::error::BindError;
use crate::layout::{find_slot, StorageSlot};
use crate::types::{ClassKind, DataType};

/// Declared element count of a field.
///
/// `Unverified` marks counts that were carried over without anyone checking
/// them against the engine. They are accepted with a warning, or rejected
/// when the registrar runs in strict mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Verified(u16),
    Unverified(u16),
}

impl Arity {
    pub const SCALAR: Arity = Arity::Verified(1);

    pub fn count(self) -> u16 {
        match self {
            Arity::Verified(n) | Arity::Unverified(n) => n,
        }
    }

    pub fn is_verified(self) -> bool {
        matches!(self, Arity::Verified(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundField {
    pub name: String,
    pub ty: DataType,
    /// 1 for a scalar.
    pub count: u16,
    /// First storage slot within the owning class.
    pub offset: u16,
    /// Engine slot name, for diagnostics.
    pub slot: &'static str,
}

impl BoundField {
    pub fn is_array(&self) -> bool {
        self.count > 1
    }

    /// Slots this field occupies.
    pub fn storage(&self) -> Range<u16> {
        let size = self.ty.element_size().unwrap_or(0);
        self.offset..self.offset + size * self.count
    }

    pub fn getter_name(&self) -> String {
        format!("get{}", self.name)
    }

    pub fn setter_name(&self) -> String {
        format!("set{}", self.name)
    }
}

/// Collects the fields of one class, checking each against the engine layout.
pub struct Registrar {
    class: ClassKind,
    layout: &'static [StorageSlot],
    strict_arity: bool,
    fields: Vec<BoundField>,
}

impl Registrar {
    pub fn new(class: ClassKind, layout: &'static [StorageSlot]) -> Self {
        Self {
            class,
            layout,
            strict_arity: false,
            fields: Vec::new(),
        }
    }

    pub fn strict_arity(mut self, strict: bool) -> Self {
        self.strict_arity = strict;
        self
    }

    pub fn class(&self) -> ClassKind {
        self.class
    }

    /// Declare a field bound to the engine slot named `slot`.
    ///
    /// Nothing is recorded unless every check passes.
    pub fn add_field(
        &mut self,
        name: &str,
        ty: DataType,
        slot: &str,
        arity: Arity,
    ) -> Result<&BoundField, BindError> {
        let class = self.class;
        let count = arity.count();

        if self.fields.iter().any(|f| f.name == name) {
            return Err(BindError::DuplicateField {
                class,
                name: name.to_string(),
            });
        }
        if count == 0 {
            return Err(BindError::InvalidArity {
                class,
                name: name.to_string(),
            });
        }
        let size = ty.element_size().ok_or_else(|| BindError::NotStorable {
            class,
            name: name.to_string(),
            ty,
        })?;
        let storage = find_slot(self.layout, slot).ok_or_else(|| BindError::UnknownSlot {
            class,
            name: name.to_string(),
            slot: slot.to_string(),
        })?;

        let declared = size.checked_mul(count).unwrap_or(u16::MAX);
        if declared != storage.span {
            return Err(BindError::ArityMismatch {
                class,
                name: name.to_string(),
                slot: slot.to_string(),
                declared,
                span: storage.span,
            });
        }

        let field = BoundField {
            name: name.to_string(),
            ty,
            count,
            offset: storage.offset,
            slot: storage.name,
        };
        let range = field.storage();
        if let Some(other) = self.fields.iter().find(|f| overlaps(&f.storage(), &range)) {
            return Err(BindError::OffsetCollision {
                class,
                name: name.to_string(),
                other: other.name.clone(),
            });
        }

        if !arity.is_verified() {
            if self.strict_arity {
                return Err(BindError::UnverifiedArity {
                    class,
                    name: name.to_string(),
                    count,
                });
            }
            warn!(%class, field = name, count, "field arity has not been verified against the engine");
        }

        debug!(%class, field = name, %ty, count, offset = field.offset, "field registered");
        self.fields.push(field);
        Ok(&self.fields[self.fields.len() - 1])
    }

    pub fn fields(&self) -> &[BoundField] {
        &self.fields
    }

    pub fn finish(self) -> Vec<BoundField> {
        self.fields
    }
}

fn overlaps(a: &Range<u16>, b: &Range<u16>) -> bool {
    a.start < b.end && b.start < a.end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FFC_LAYOUT;

    fn registrar() -> Registrar {
        Registrar::new(ClassKind::Ffc, FFC_LAYOUT)
    }

    #[test]
    fn test_scalar_field() {
        let mut reg = registrar();
        let field = reg.add_field("Data", DataType::Float, "DATA", Arity::SCALAR).unwrap();
        assert_eq!(field.count, 1);
        assert_eq!(field.offset, 0);
        assert!(!field.is_array());
        assert_eq!(field.getter_name(), "getData");
        assert_eq!(field.setter_name(), "setData");
    }

    #[test]
    fn test_array_field_storage() {
        let mut reg = registrar();
        let field = reg
            .add_field("Misc", DataType::Float, "FFMISCD", Arity::Verified(16))
            .unwrap();
        assert!(field.is_array());
        assert_eq!(field.storage(), 17..33);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut reg = registrar();
        reg.add_field("X", DataType::Float, "FX", Arity::SCALAR).unwrap();
        let err = reg
            .add_field("X", DataType::Float, "FY", Arity::SCALAR)
            .unwrap_err();
        assert_eq!(
            err,
            BindError::DuplicateField {
                class: ClassKind::Ffc,
                name: "X".into()
            }
        );
        assert_eq!(reg.fields().len(), 1);
    }

    #[test]
    fn test_zero_count_rejected() {
        let mut reg = registrar();
        let err = reg
            .add_field("Misc", DataType::Float, "FFMISCD", Arity::Verified(0))
            .unwrap_err();
        assert!(matches!(err, BindError::InvalidArity { .. }));
    }

    #[test]
    fn test_void_rejected() {
        let mut reg = registrar();
        let err = reg
            .add_field("Data", DataType::Void, "DATA", Arity::SCALAR)
            .unwrap_err();
        assert!(matches!(err, BindError::NotStorable { .. }));
    }

    #[test]
    fn test_span_mismatch_rejected() {
        let mut reg = registrar();
        let err = reg
            .add_field("InitD", DataType::Float, "FFINITDD", Arity::Verified(7))
            .unwrap_err();
        assert_eq!(
            err,
            BindError::ArityMismatch {
                class: ClassKind::Ffc,
                name: "InitD".into(),
                slot: "FFINITDD".into(),
                declared: 7,
                span: 8
            }
        );
    }

    #[test]
    fn test_shared_slot_collides() {
        let mut reg = registrar();
        reg.add_field("X", DataType::Float, "FX", Arity::SCALAR).unwrap();
        let err = reg
            .add_field("PosX", DataType::Float, "FX", Arity::SCALAR)
            .unwrap_err();
        assert_eq!(
            err,
            BindError::OffsetCollision {
                class: ClassKind::Ffc,
                name: "PosX".into(),
                other: "X".into()
            }
        );
    }

    #[test]
    fn test_unknown_slot_rejected() {
        let mut reg = registrar();
        let err = reg
            .add_field("Z", DataType::Float, "FZ", Arity::SCALAR)
            .unwrap_err();
        assert!(matches!(err, BindError::UnknownSlot { .. }));
    }

    #[test]
    fn test_unverified_arity() {
        let mut lenient = registrar();
        assert!(lenient
            .add_field("Flags", DataType::Bool, "FFFLAGSD", Arity::Unverified(2))
            .is_ok());

        let mut strict = registrar().strict_arity(true);
        let err = strict
            .add_field("Flags", DataType::Bool, "FFFLAGSD", Arity::Unverified(2))
            .unwrap_err();
        assert_eq!(
            err,
            BindError::UnverifiedArity {
                class: ClassKind::Ffc,
                name: "Flags".into(),
                count: 2
            }
        );
        assert!(strict.fields().is_empty());
    }
}
