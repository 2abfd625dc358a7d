use anyhow::{Context, Result};
use libraries::BinderConfig;

use super::build_library;

pub fn disasm_command(class: &str, config: &BinderConfig) -> Result<String> {
    let library = build_library(class, config)?;
    let program = library
        .bindings()
        .link()
        .with_context(|| format!("Failed to link {} bindings", library.class()))?;

    Ok(format!(
        "== Disassembly of {} ==\n{program}",
        library.class()
    ))
}
