use std::fmt::Write;

use anyhow::Result;
use libraries::BinderConfig;

use super::build_library;

pub fn fields_command(class: &str, config: &BinderConfig) -> Result<String> {
    let library = build_library(class, config)?;
    let bindings = library.bindings();

    let mut out = String::new();
    writeln!(out, "== Fields of {} ==", bindings.class())?;
    for field in bindings.fields() {
        let storage = field.storage();
        let ty = if field.is_array() {
            format!("{}[{}]", field.ty, field.count)
        } else {
            field.ty.to_string()
        };
        writeln!(
            out,
            "{:<14} {:<10} {:<10} @{:02}..{:02}",
            field.name, ty, field.slot, storage.start, storage.end
        )?;
    }
    Ok(out)
}
