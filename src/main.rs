use clap::Parser;
use tracing::debug;

use corpus_lint::cli::Cli;
use corpus_lint::commands::run_lint;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let exit_code = run_lint(&cli);
    std::process::exit(exit_code);
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the flag-derived level.
fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {level}");
}
