pub mod commands;
pub mod config;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging.
///
/// `RUST_LOG` overrides the default filter, which is `warn`, or `debug` for
/// the binding crates when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,libraries=debug,bytecode=debug,cli=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
