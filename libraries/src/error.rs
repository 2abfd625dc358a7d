use thiserror::Error;

use crate::types::{ClassKind, DataType};

/// Problems in a library's binding definitions, found while building it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("{class}: field `{name}` declared twice")]
    DuplicateField { class: ClassKind, name: String },

    #[error("{class}: function `{name}` declared twice")]
    DuplicateFunction { class: ClassKind, name: String },

    /// A field accessor and a function would share a script-visible name.
    #[error("{class}: `{name}` is both a field accessor and a function")]
    MemberClash { class: ClassKind, name: String },

    #[error("{class}: field `{name}` must have at least one element")]
    InvalidArity { class: ClassKind, name: String },

    #[error("{class}: field `{name}` has type `{ty}`, which cannot be stored")]
    NotStorable {
        class: ClassKind,
        name: String,
        ty: DataType,
    },

    #[error("{class}: field `{name}` refers to unknown storage slot `{slot}`")]
    UnknownSlot {
        class: ClassKind,
        name: String,
        slot: String,
    },

    /// Declared element count times element size disagrees with the slot's span.
    #[error("{class}: field `{name}` covers {declared} slot(s) but `{slot}` spans {span}")]
    ArityMismatch {
        class: ClassKind,
        name: String,
        slot: String,
        declared: u16,
        span: u16,
    },

    #[error("{class}: field `{name}` overlaps storage of field `{other}`")]
    OffsetCollision {
        class: ClassKind,
        name: String,
        other: String,
    },

    /// Strict mode refuses arities nobody has confirmed against the engine.
    #[error("{class}: field `{name}` has unverified arity {count}")]
    UnverifiedArity {
        class: ClassKind,
        name: String,
        count: u16,
    },

    /// Configuration names a binding the library does not describe.
    #[error("{class}: no binding named `{name}`")]
    UnknownBinding { class: ClassKind, name: String },
}

/// Errors raised by a destination scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("{class}: `{name}` is already declared")]
    Duplicate { class: ClassKind, name: String },

    #[error("{class}.{name}: index {index} out of range for {count} element(s)")]
    IndexOutOfRange {
        class: ClassKind,
        name: String,
        index: i64,
        count: u16,
    },
}
