use std::io;

use clap::Parser;
use unicode_palette::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger with proper stderr output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(cli.log_level().into()),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting unicode-palette version {}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Debug logging enabled");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli::run(&cli, &mut out) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("{}", e);
            // Extra error details in debug mode
            if cli.debug {
                tracing::debug!("Error details: {:?}", e);
            }
            Err(e)
        }
    }
}
