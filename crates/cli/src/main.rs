//! Kassa CLI - Catalog browser and cart client.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! kassa catalog list --available true
//! kassa catalog show 1
//! kassa brands
//!
//! # Work with the cart
//! kassa cart add 1 -s color=white -s power=9.5 -q 2
//! kassa cart show
//! kassa cart set '1-{"Color":"white","Power":9.5}' 1
//! kassa cart clear
//! ```
//!
//! # Environment Variables
//!
//! - `KASSA_CATALOG_PATH` - Inventory JSON file (default: data/inventory.json)
//! - `KASSA_DATA_DIR` - Directory the cart is stored in (default: .kassa)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod storage;

#[derive(Parser)]
#[command(name = "kassa")]
#[command(author, version, about = "Kassa catalog and cart client")]
struct Cli {
    /// Inventory JSON file
    #[arg(
        long,
        global = true,
        env = "KASSA_CATALOG_PATH",
        default_value = "data/inventory.json"
    )]
    catalog: PathBuf,

    /// Directory the cart is stored in
    #[arg(long, global = true, env = "KASSA_DATA_DIR", default_value = ".kassa")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// List brands with their product counts
    Brands,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Only available (true) or unavailable (false) products
        #[arg(long)]
        available: Option<bool>,

        /// Only products of this brand (case-insensitive)
        #[arg(long)]
        brand: Option<String>,
    },
    /// Show a product with its variants
    Show {
        /// Product ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart after checking it against current stock
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        product_id: i64,

        /// Attribute choice, e.g. `color=white` (repeatable, applied in order)
        #[arg(short = 's', long = "select", value_parser = commands::parse_selection)]
        selections: Vec<(String, String)>,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Take one unit off a line
    Decrease {
        /// Cart line ID
        cart_id: String,
    },
    /// Set the quantity of a line (0 removes it)
    Set {
        /// Cart line ID
        cart_id: String,

        /// New quantity
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Cart line ID
        cart_id: String,
    },
    /// Empty the cart
    Clear,
}

fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kassa=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context::new(cli.catalog, cli.data_dir);

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { available, brand } => {
                commands::catalog::list(&ctx, available, brand.as_deref())?;
            }
            CatalogAction::Show { id } => commands::catalog::show(&ctx, id)?,
        },
        Commands::Brands => commands::catalog::brands(&ctx)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx)?,
            CartAction::Add {
                product_id,
                selections,
                quantity,
            } => commands::cart::add(&ctx, product_id, &selections, quantity)?,
            CartAction::Decrease { cart_id } => commands::cart::decrease(&ctx, &cart_id.into()),
            CartAction::Set { cart_id, quantity } => {
                commands::cart::set(&ctx, &cart_id.into(), quantity);
            }
            CartAction::Remove { cart_id } => commands::cart::remove(&ctx, &cart_id.into()),
            CartAction::Clear => commands::cart::clear(&ctx),
        },
    }
    Ok(())
}
