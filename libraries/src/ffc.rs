//! Bindings for the `ffc` class (freeform combos).

use std::sync::OnceLock;

use bytecode::{Immediate, Instruction, Register};

use crate::binder::BodyBuilder;
use crate::config::BinderConfig;
use crate::descriptor::{FieldDescriptor, FunctionDescriptor};
use crate::error::BindError;
use crate::layout::FFC_LAYOUT;
use crate::library::{Bindings, Library};
use crate::registrar::Arity;
use crate::types::ClassKind;
use crate::types::DataType::{Bool, Float, Void};

pub const FFC_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::scalar("Data", Float, "DATA"),
    FieldDescriptor::scalar("Script", Float, "FFSCRIPT"),
    FieldDescriptor::scalar("CSet", Float, "FCSET"),
    FieldDescriptor::scalar("Delay", Float, "DELAY"),
    FieldDescriptor::scalar("X", Float, "FX"),
    FieldDescriptor::scalar("Y", Float, "FY"),
    FieldDescriptor::scalar("Vx", Float, "XD"),
    FieldDescriptor::scalar("Vy", Float, "YD"),
    FieldDescriptor::scalar("Ax", Float, "XD2"),
    FieldDescriptor::scalar("Ay", Float, "YD2"),
    // Nobody has confirmed the engine exposes exactly two flags here.
    FieldDescriptor::array("Flags", Bool, "FFFLAGSD", Arity::Unverified(2)),
    FieldDescriptor::scalar("TileWidth", Float, "FFTWIDTH"),
    FieldDescriptor::scalar("TileHeight", Float, "FFTHEIGHT"),
    FieldDescriptor::scalar("EffectWidth", Float, "FFCWIDTH"),
    FieldDescriptor::scalar("EffectHeight", Float, "FFCHEIGHT"),
    FieldDescriptor::scalar("Link", Float, "FFLINK"),
    FieldDescriptor::array("Misc", Float, "FFMISCD", Arity::Verified(16)),
    FieldDescriptor::array("InitD", Float, "FFINITDD", Arity::Verified(8)),
    FieldDescriptor::array("D", Float, "FFDD", Arity::Verified(8)).disabled(),
    FieldDescriptor::scalar("ID", Float, "FFCID"),
];

pub const FFC_FUNCTIONS: &[FunctionDescriptor] = &[
    FunctionDescriptor::new("ChangeFFCScript", Void, &[Float], change_ffc_script),
    FunctionDescriptor::new("WasTriggered", Bool, &[], was_triggered).disabled(),
];

/// `void ChangeFFCScript(ffc this, float script)`
fn change_ffc_script(code: &mut BodyBuilder) {
    code.emit(Instruction::pop(Register::Exp1));
    // receiver is always the running ffc
    code.emit(Instruction::pop(Register::Nul));
    code.emit(Instruction::change_ffc_script(Register::Exp1));
    code.emit(Instruction::pop(Register::Exp2));
    code.emit(Instruction::goto_register(Register::Exp2));
}

/// `bool WasTriggered(ffc this)`
///
/// Only answers for the running ffc; any other receiver quits the script.
fn was_triggered(code: &mut BodyBuilder) {
    let this = code.label();
    let triggered = code.label();

    code.emit(Instruction::pop(Register::Exp2));
    // a receiver of -1 means "this"
    code.emit(Instruction::compare_immediate(Register::Exp2, Immediate::raw(-1)));
    code.emit(Instruction::goto_true(this));
    code.emit(Instruction::quit());

    code.bind(this);
    code.emit(Instruction::check_trigger());
    code.emit(Instruction::goto_true(triggered));
    code.emit(Instruction::set_immediate(Register::Exp1, Immediate::raw(0)));
    code.emit(Instruction::pop(Register::Exp2));
    code.emit(Instruction::goto_register(Register::Exp2));

    code.bind(triggered);
    code.emit(Instruction::set_immediate(Register::Exp1, Immediate::raw(1)));
    code.emit(Instruction::pop(Register::Exp2));
    code.emit(Instruction::goto_register(Register::Exp2));
}

/// Native surface of `ffc`.
#[derive(Debug, Clone)]
pub struct Ffc {
    bindings: Bindings,
}

impl Ffc {
    /// Build the library under `config`. Every call mints fresh labels.
    pub fn build(config: &BinderConfig) -> Result<Self, BindError> {
        let bindings = Bindings::build(
            ClassKind::Ffc,
            FFC_LAYOUT,
            FFC_FIELDS,
            FFC_FUNCTIONS,
            config,
        )?;
        Ok(Self { bindings })
    }

    /// The process-wide instance with the default configuration, built on
    /// first access.
    ///
    /// # Panics
    ///
    /// Panics if the built-in descriptor tables are inconsistent.
    pub fn singleton() -> &'static Ffc {
        static INSTANCE: OnceLock<Ffc> = OnceLock::new();
        INSTANCE.get_or_init(|| match Ffc::build(&BinderConfig::default()) {
            Ok(ffc) => ffc,
            Err(e) => panic!("built-in ffc bindings are invalid: {e}"),
        })
    }
}

impl Library for Ffc {
    fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;
    use bytecode::OpCode;

    #[test]
    fn test_default_build_skips_disabled() {
        let ffc = Ffc::build(&BinderConfig::default()).unwrap();
        let b = ffc.bindings();
        assert_eq!(b.fields().len(), FFC_FIELDS.len() - 1);
        assert!(b.field("D").is_none());
        assert!(b.function("WasTriggered").is_none());
        assert!(b.function("ChangeFFCScript").is_some());
    }

    #[test]
    fn test_change_ffc_script_body() {
        let ffc = Ffc::build(&BinderConfig::default()).unwrap();
        let f = ffc.bindings().function("ChangeFFCScript").unwrap();
        let ops: Vec<OpCode> = f.body().iter().map(Instruction::opcode).collect();
        assert_eq!(
            ops,
            vec![
                OpCode::PopRegister,
                OpCode::PopRegister,
                OpCode::ChangeFfcScript,
                OpCode::PopRegister,
                OpCode::GotoRegister,
            ]
        );
        assert_eq!(f.body()[0].label(), Some(f.entry));
        assert_eq!(f.body()[1].operands()[0].as_register(), Some(Register::Nul));
    }

    #[test]
    fn test_was_triggered_when_enabled() {
        let config = BinderConfig {
            enable: vec!["WasTriggered".into()],
            ..Default::default()
        };
        let ffc = Ffc::build(&config).unwrap();
        let f = ffc.bindings().function("WasTriggered").unwrap();
        assert_eq!(f.signature.ret, DataType::Bool);
        assert!(f.signature.params.is_empty());
        assert_eq!(f.body().len(), 12);
        assert_eq!(f.labels().count(), 3);
        assert!(f.body().last().unwrap().is_control_transfer());
        ffc.bindings().link().unwrap();
    }

    #[test]
    fn test_singleton_is_shared() {
        assert!(std::ptr::eq(Ffc::singleton(), Ffc::singleton()));
    }
}
