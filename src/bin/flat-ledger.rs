use anyhow::Result;
use clap::Parser;
use flat_ledger::bin_utils::{Cli, Service};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let service = Service {
        config: cli.config(),
        output: &mut std::io::stdout(),
    };
    service.run(cli.command)
}
