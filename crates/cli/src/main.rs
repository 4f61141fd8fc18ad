//! Chap Cash & Carry CLI - browse the catalog and exercise the storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! chap catalog list --category Grocery --in-stock --sort price-low
//! chap catalog show 1
//! chap catalog categories
//! chap catalog suggest tea
//!
//! # Inspect or clear the persisted session
//! chap session show
//! chap session clear
//!
//! # Run a scripted shopping flow (browse, sign in, checkout)
//! chap demo
//! ```
//!
//! # Commands
//!
//! - `catalog` - List, inspect, and search products
//! - `session` - Inspect or clear the persisted session
//! - `demo` - Run an end-to-end shopping flow against the simulated backend

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use chap_storefront::config::StorefrontConfig;
use chap_storefront::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "chap")]
#[command(author, version, about = "Chap Cash & Carry storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and search the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Inspect or clear the persisted session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Run a scripted shopping flow against the simulated backend
    Demo,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products matching the given filters
    List {
        /// Free-text query matched against name, description, and category
        #[arg(short, long)]
        query: Option<String>,

        /// Exact category filter (e.g. "Grocery")
        #[arg(short, long)]
        category: Option<String>,

        /// Minimum price in rands
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Maximum price in rands
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Minimum rating threshold
        #[arg(long)]
        min_rating: Option<f32>,

        /// Only show products that are in stock
        #[arg(long)]
        in_stock: bool,

        /// Sort order (`name`, `price-low`, `price-high`, `rating`, `newest`)
        #[arg(short, long, default_value = "name")]
        sort: String,
    },
    /// Show one product in full
    Show {
        /// Product id
        id: String,
    },
    /// List the catalog's categories
    Categories,
    /// Show search suggestions for a partial query
    Suggest {
        /// Partial query (two or more characters)
        query: String,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Show the persisted session, if any
    Show,
    /// Sign out and remove the persisted session
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let mut state = AppState::new(config)?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                query,
                category,
                min_price,
                max_price,
                min_rating,
                in_stock,
                sort,
            } => commands::catalog::list(
                &state,
                &commands::catalog::ListOptions {
                    query,
                    category,
                    min_price,
                    max_price,
                    min_rating,
                    in_stock,
                    sort,
                },
            ),
            CatalogAction::Show { id } => commands::catalog::show(&state, &id)?,
            CatalogAction::Categories => commands::catalog::categories(&state),
            CatalogAction::Suggest { query } => commands::catalog::suggest(&state, &query),
        },
        Commands::Session { action } => match action {
            SessionAction::Show => commands::session::show(&state),
            SessionAction::Clear => commands::session::clear(&mut state)?,
        },
        Commands::Demo => commands::demo::run(&mut state).await?,
    }
    Ok(())
}
