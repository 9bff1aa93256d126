mod cli;

use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cli::{Cli, RunConfig};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse_args();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RunConfig::from_cli(args);
    tracing::debug!(?config, "resolved configuration");

    cli::run(&config)?;

    Ok(())
}
