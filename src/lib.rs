pub mod bootstrap;
pub mod cli;

use clap::Parser;

use crate::bootstrap::tracing::init_tracing_subscriber;
use crate::cli::Cli;

/// Parse arguments, install logging and run the requested command.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(err) = init_tracing_subscriber(cli.verbose, cli.log_file) {
        eprintln!("Failed to initialize tracing: {err}");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("clipwatch")
        .build()?;

    runtime.block_on(cli::execute(cli))
}
