//! Parts CLI - search, serve, and seed the car-parts marketplace catalog.
//!
//! Commands:
//! - `parts serve` - Start the HTTP search API
//! - `parts search` - Run one search and print the ranked page
//! - `parts seed` - Create the schema and load the sample catalog
//! - `parts regions` - List Iraq provinces or the cities of one province
//! - `parts config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, RegionsArgs, SearchArgs, SeedArgs, ServeArgs};

/// Parts CLI - Location-aware search for the Iraq car-parts marketplace
#[derive(Parser)]
#[command(name = "parts")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP search API
    Serve(ServeArgs),

    /// Search the catalog
    Search(SearchArgs),

    /// Create the schema and load sample data
    Seed(SeedArgs),

    /// List provinces and cities
    Regions(RegionsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    logging::init(&ctx.config.logging, cli.verbose);

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run(args, &ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Seed(args) => commands::seed::run(args, &ctx).await,
        Commands::Regions(args) => commands::regions::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
