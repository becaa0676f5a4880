#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod config;
mod logging;
mod signals;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use prime_counter::{Service, ServiceConfig, build_router, serve};

use crate::config::AppConfig;

/// Prime Server - counts primes below a bound over HTTP
#[derive(Parser)]
#[command(name = "prime-server")]
#[command(about = "Prime Server - counts primes below a bound over HTTP")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port);

    if cli.print_config {
        println!("{}", config.to_pretty()?);
        return Ok(());
    }

    logging::init_logging(&config.logging, cli.verbose)?;
    tracing::info!("Prime Server starting");

    // Dispatch subcommands (default: run)
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.validate()?;
    println!("Configuration is valid");
    println!("{}", config.to_pretty()?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    config.validate()?;

    let service = Arc::new(Service::new(ServiceConfig::from(config.prime_counter)));
    tracing::info!(
        max_bound = %service.max_bound(),
        sync_max_bound = %service.sync_max_bound(),
        "prime counter ready"
    );

    let router = build_router(service, &config.server);
    let cancel = signals::shutdown_token();
    serve(router, &config.server, cancel).await?;

    tracing::info!("Prime Server stopped");
    Ok(())
}
