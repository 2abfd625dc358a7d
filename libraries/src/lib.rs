pub mod binder;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod ffc;
pub mod layout;
pub mod library;
pub mod registrar;
pub mod scope;
pub mod types;

pub use binder::{BodyBuilder, BoundFunction, FunctionBinder, FunctionId};
pub use config::BinderConfig;
pub use error::{BindError, ScopeError};
pub use ffc::Ffc;
pub use library::{Bindings, Library};
pub use registrar::{Arity, BoundField, Registrar};
pub use scope::{Accessor, AccessorKind, Scope, SymbolTable};
pub use types::{ClassKind, DataType, Signature};
