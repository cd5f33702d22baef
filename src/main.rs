use anyhow::Result;
use clap::Parser;
use meeting_cost::cli::{self, Cli};
use meeting_cost::Config;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cfg = Config::load(&cli.config)?;

    info!("Meeting Cost v{}", env!("CARGO_PKG_VERSION"));
    debug!("Loaded config: {:?}", cfg);

    cli::run(cli, cfg).await
}
