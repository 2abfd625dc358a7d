pub mod check;
pub mod disasm;
pub mod fields;
pub mod functions;

use anyhow::{bail, Context, Result};
use libraries::{BinderConfig, ClassKind, Ffc, Library};

pub fn parse_class(name: &str) -> Result<ClassKind> {
    match name.to_ascii_lowercase().as_str() {
        "ffc" => Ok(ClassKind::Ffc),
        other => bail!("No native library for class `{other}` (known: ffc)"),
    }
}

/// Build the library for `class` under `config`.
pub fn build_library(class: &str, config: &BinderConfig) -> Result<Box<dyn Library>> {
    match parse_class(class)? {
        ClassKind::Ffc => {
            let ffc = Ffc::build(config).context("Failed to build ffc bindings")?;
            Ok(Box::new(ffc))
        }
        other => bail!("No native library for class `{other}`"),
    }
}
