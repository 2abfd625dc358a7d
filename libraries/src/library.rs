use bytecode::{Arena, LinkError, LinkedProgram};
use tracing::{debug, info};

use crate::binder::{BodyBuilder, BoundFunction, FunctionBinder};
use crate::config::BinderConfig;
use crate::descriptor::{FieldDescriptor, FunctionDescriptor};
use crate::error::{BindError, ScopeError};
use crate::layout::StorageSlot;
use crate::registrar::{BoundField, Registrar};
use crate::scope::Scope;
use crate::types::ClassKind;

/// The complete native surface of one built-in class.
#[derive(Debug, Clone)]
pub struct Bindings {
    class: ClassKind,
    fields: Vec<BoundField>,
    functions: Vec<BoundFunction>,
}

impl Bindings {
    /// Compile the enabled descriptors into fields and function bodies.
    pub fn build(
        class: ClassKind,
        layout: &'static [StorageSlot],
        fields: &[FieldDescriptor],
        functions: &[FunctionDescriptor],
        config: &BinderConfig,
    ) -> Result<Self, BindError> {
        let names = fields
            .iter()
            .map(|d| d.name)
            .chain(functions.iter().map(|d| d.name));
        config.check_names(class, names)?;

        let mut registrar = Registrar::new(class, layout).strict_arity(config.strict_arity);
        for desc in fields {
            if !config.is_enabled(desc.name, desc.enabled) {
                debug!(%class, field = desc.name, "field disabled, skipped");
                continue;
            }
            registrar.add_field(desc.name, desc.ty, desc.slot, desc.arity)?;
        }
        let fields = registrar.finish();

        let mut binder = FunctionBinder::new(class);
        for desc in functions {
            if !config.is_enabled(desc.name, desc.enabled) {
                debug!(%class, function = desc.name, "function disabled, skipped");
                continue;
            }
            if fields
                .iter()
                .any(|f| f.getter_name() == desc.name || f.setter_name() == desc.name)
            {
                return Err(BindError::MemberClash {
                    class,
                    name: desc.name.to_string(),
                });
            }
            let id = binder.declare(desc.name, desc.ret, desc.params)?;
            let mut code = BodyBuilder::new(binder.entry(id));
            (desc.emit)(&mut code);
            binder.attach_body(id, code.finish());
        }
        let functions = binder.finish();

        info!(
            %class,
            fields = fields.len(),
            functions = functions.len(),
            "library built"
        );
        Ok(Self {
            class,
            fields,
            functions,
        })
    }

    pub fn class(&self) -> ClassKind {
        self.class
    }

    pub fn fields(&self) -> &[BoundField] {
        &self.fields
    }

    pub fn functions(&self) -> &[BoundFunction] {
        &self.functions
    }

    pub fn field(&self, name: &str) -> Option<&BoundField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn function(&self, name: &str) -> Option<&BoundFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Script-visible names this library would add to a scope.
    pub fn member_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.fields.len() * 2 + self.functions.len());
        for field in &self.fields {
            names.push(field.getter_name());
            names.push(field.setter_name());
        }
        names.extend(self.functions.iter().map(|f| f.name.clone()));
        names
    }

    /// Install every field and function into `scope`.
    ///
    /// If any name is already taken the scope is left untouched.
    pub fn add_to(&self, scope: &mut dyn Scope) -> Result<(), ScopeError> {
        let class = self.class;
        if let Some(name) = self
            .member_names()
            .into_iter()
            .find(|name| scope.contains(class, name))
        {
            return Err(ScopeError::Duplicate { class, name });
        }

        for field in &self.fields {
            scope.declare_field(class, field)?;
        }
        for function in &self.functions {
            scope.declare_function(class, &function.name, &function.signature, function.entry)?;
        }
        info!(
            %class,
            fields = self.fields.len(),
            functions = self.functions.len(),
            "library installed"
        );
        Ok(())
    }

    /// Lay every body out back to back and resolve labels.
    pub fn link(&self) -> Result<LinkedProgram, LinkError> {
        let mut arena = Arena::new();
        for function in &self.functions {
            arena.push_segment(&function.name, function.body())?;
        }
        arena.link()
    }
}

/// A built-in class library.
pub trait Library {
    fn bindings(&self) -> &Bindings;

    fn class(&self) -> ClassKind {
        self.bindings().class()
    }

    fn add_to(&self, scope: &mut dyn Scope) -> Result<(), ScopeError> {
        self.bindings().add_to(scope)
    }
}
