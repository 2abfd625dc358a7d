use anyhow::{Context, Result};
use libraries::{BinderConfig, SymbolTable};
use tracing::info;

use super::build_library;

/// Build, install into an empty scope, then link.
pub fn check_command(class: &str, config: &BinderConfig) -> Result<String> {
    let library = build_library(class, config)?;
    let bindings = library.bindings();

    let mut scope = SymbolTable::new();
    library
        .add_to(&mut scope)
        .with_context(|| format!("Failed to install {} bindings", library.class()))?;
    let program = bindings
        .link()
        .with_context(|| format!("Failed to link {} bindings", library.class()))?;

    info!(members = scope.len(), labels = program.label_count(), "check passed");
    Ok(format!(
        "{}: ok ({} fields, {} functions, {} scope members, {} instructions)\n",
        library.class(),
        bindings.fields().len(),
        bindings.functions().len(),
        scope.len(),
        program.instructions().len()
    ))
}
