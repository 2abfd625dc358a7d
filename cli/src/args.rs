use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zbind")]
#[command(about = "Inspect built-in class bindings", long_about = None)]
pub struct Cli {
    /// Log binding construction at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Binding configuration (defaults to ./zbind.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List fields with their storage offsets
    Fields {
        /// Class name (e.g. "ffc")
        class: String,
    },
    /// List native methods with signatures and entry labels
    Functions {
        /// Class name (e.g. "ffc")
        class: String,
    },
    /// Disassemble native method bodies as one linked program
    Disasm {
        /// Class name (e.g. "ffc")
        class: String,
    },
    /// Build, install into a fresh scope and link; report problems
    Check {
        /// Class name (e.g. "ffc")
        class: String,
    },
}
