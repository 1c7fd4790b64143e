use rengeki::config::DEFAULT_CONFIG_FILE;
use rengeki::{Config, LoadTest};

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Do not draw the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stdout)
        .init();

    let config = Config::load(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;

    let test = LoadTest::new(config)
        .context("failed to build HTTP client")?
        .with_progress(!args.no_progress);

    let summary = test.run().await;
    println!("{summary}");

    Ok(())
}
