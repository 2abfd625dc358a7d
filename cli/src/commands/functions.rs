use std::fmt::Write;

use anyhow::Result;
use libraries::BinderConfig;

use super::build_library;

pub fn functions_command(class: &str, config: &BinderConfig) -> Result<String> {
    let library = build_library(class, config)?;
    let bindings = library.bindings();

    let mut out = String::new();
    writeln!(out, "== Functions of {} ==", bindings.class())?;
    for function in bindings.functions() {
        writeln!(
            out,
            "{:<6} {} ; {} instruction(s)",
            function.entry.to_string(),
            function.signature.render(&function.name),
            function.body().len()
        )?;
    }
    Ok(out)
}
