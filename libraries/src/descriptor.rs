//! Static binding descriptors.
//!
//! A library is described as two tables: its fields and its methods. Each
//! entry carries an `enabled` flag so work-in-progress bindings can sit in the
//! table, fully written, without ever reaching a scope.

use crate::binder::BodyBuilder;
use crate::registrar::Arity;
use crate::types::DataType;

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub ty: DataType,
    /// Engine storage slot, looked up in the class layout.
    pub slot: &'static str,
    pub arity: Arity,
    pub enabled: bool,
}

impl FieldDescriptor {
    pub const fn scalar(name: &'static str, ty: DataType, slot: &'static str) -> Self {
        Self {
            name,
            ty,
            slot,
            arity: Arity::SCALAR,
            enabled: true,
        }
    }

    pub const fn array(name: &'static str, ty: DataType, slot: &'static str, arity: Arity) -> Self {
        Self {
            name,
            ty,
            slot,
            arity,
            enabled: true,
        }
    }

    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Writes a method body. The first emitted instruction becomes the entry.
pub type Emitter = fn(&mut BodyBuilder);

#[derive(Clone, Copy)]
pub struct FunctionDescriptor {
    pub name: &'static str,
    pub ret: DataType,
    pub params: &'static [DataType],
    pub enabled: bool,
    pub emit: Emitter,
}

impl FunctionDescriptor {
    pub const fn new(
        name: &'static str,
        ret: DataType,
        params: &'static [DataType],
        emit: Emitter,
    ) -> Self {
        Self {
            name,
            ret,
            params,
            enabled: true,
            emit,
        }
    }

    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl std::fmt::Debug for FunctionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionDescriptor")
            .field("name", &self.name)
            .field("ret", &self.ret)
            .field("params", &self.params)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
