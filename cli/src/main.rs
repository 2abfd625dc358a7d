use anyhow::Result;
use clap::Parser;

mod args;

use args::{Cli, Commands};
use cli::commands::{check, disasm, fields, functions};
use cli::config::load_config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let output = match &cli.command {
        Commands::Fields { class } => fields::fields_command(class, &config)?,
        Commands::Functions { class } => functions::functions_command(class, &config)?,
        Commands::Disasm { class } => disasm::disasm_command(class, &config)?,
        Commands::Check { class } => check::check_command(class, &config)?,
    };
    print!("{output}");
    Ok(())
}
