// crates/render_snippets/src/main.rs

use anyhow::Result;
use clap::Parser;

use render_snippets::cli::Cli;
use render_snippets::config::AppConfig;
use render_snippets::{logging, run};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = AppConfig::from_cli(&cli)?;
    tracing::debug!(?config, "loaded configuration");
    run(&config)
}
