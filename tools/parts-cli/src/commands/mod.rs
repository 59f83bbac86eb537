//! CLI command implementations.

pub mod config;
pub mod regions;
pub mod search;
pub mod seed;
pub mod serve;

use clap::{Args, Subcommand};
use parts_market::search::SearchParams;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Bind address (overrides server.host).
    #[arg(long)]
    pub host: Option<String>,

    /// Port (overrides server.port).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Load the sample catalog before serving.
    #[arg(long)]
    pub seed: bool,
}

/// Arguments for the search command.
///
/// Values are validated exactly as the HTTP query string is.
#[derive(Args, Default)]
pub struct SearchArgs {
    /// Text to match in name, description, part number or OEM number.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Car brand id.
    #[arg(long)]
    pub brand: Option<String>,

    /// Car model id (takes precedence over --brand).
    #[arg(long)]
    pub model: Option<String>,

    /// Part category id.
    #[arg(long)]
    pub category: Option<String>,

    /// NEW, USED or REFURBISHED.
    #[arg(long)]
    pub condition: Option<String>,

    /// Minimum price in IQD.
    #[arg(long)]
    pub min_price: Option<String>,

    /// Maximum price in IQD.
    #[arg(long)]
    pub max_price: Option<String>,

    /// Requester province.
    #[arg(long)]
    pub province: Option<String>,

    /// Requester city.
    #[arg(long)]
    pub city: Option<String>,

    /// Page number (1-indexed).
    #[arg(long)]
    pub page: Option<String>,

    /// Page size.
    #[arg(short, long)]
    pub limit: Option<String>,

    /// location, price, rating or newest.
    #[arg(long)]
    pub sort: Option<String>,
}

impl From<SearchArgs> for SearchParams {
    fn from(args: SearchArgs) -> Self {
        SearchParams {
            search: args.search,
            brand_id: args.brand,
            model_id: args.model,
            category_id: args.category,
            condition: args.condition,
            min_price: args.min_price,
            max_price: args.max_price,
            customer_province: args.province,
            customer_city: args.city,
            page: args.page,
            limit: args.limit,
            sort_by: args.sort,
        }
    }
}

/// Arguments for the seed command.
#[derive(Args)]
pub struct SeedArgs {
    /// Only create the schema.
    #[arg(long)]
    pub schema_only: bool,
}

/// Arguments for the regions command.
#[derive(Args)]
pub struct RegionsArgs {
    /// Province to list cities for.
    pub province: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
