//! Tressa CLI - Cart inspection and editing tools.
//!
//! # Usage
//!
//! ```bash
//! # Add a product
//! tressa cart add --id argan-serum --name "Argan Repair Serum" --price 24.99 \
//!     --original-price 29.99 --ingredient "argan oil" --ingredient "vitamin e" -q 2
//!
//! # Inspect the cart
//! tressa cart list
//! tressa cart total
//! tressa cart count
//! tressa cart summary
//! tressa cart summary --json
//!
//! # Edit the cart
//! tressa cart update argan-serum 3
//! tressa cart remove argan-serum
//! tressa cart clear
//! ```
//!
//! # Commands
//!
//! - `cart` - Read and mutate the file-backed cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;
use tressa_cart::CartConfig;
use tressa_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "tressa")]
#[command(author, version, about = "Tressa CLI tools")]
struct Cli {
    /// Directory holding the cart storage (overrides `TRESSA_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the line items as JSON
    List,
    /// Add a product to the cart
    Add {
        /// Product id
        #[arg(long)]
        id: ProductId,

        /// Display name
        #[arg(long)]
        name: String,

        /// Unit price
        #[arg(long, allow_negative_numbers = true)]
        price: Decimal,

        /// Pre-discount unit price
        #[arg(long, allow_negative_numbers = true)]
        original_price: Option<Decimal>,

        /// Image URL or path
        #[arg(long, default_value = "")]
        image: String,

        /// Ingredient (repeatable, kept in order)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,

        /// Number of units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Set a product's quantity (zero or less removes it)
    Update {
        /// Product id
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove everything from the cart
    Clear,
    /// Print the cart total
    Total,
    /// Print the number of units in the cart
    Count,
    /// Print subtotal, unit count, and savings
    Summary {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
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
    let config = CartConfig::from_env()?;
    execute(cli, config)
}

fn execute(cli: Cli, mut config: CartConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }

    tracing::debug!(
        storage_dir = %config.storage_dir.display(),
        key = %config.cart_key,
        "Opening cart"
    );
    let store = config.open_store();
    commands::cart::log_changes(&store);

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(&store)?,
            CartAction::Add {
                id,
                name,
                price,
                original_price,
                image,
                ingredients,
                quantity,
            } => commands::cart::add(
                &store,
                commands::cart::AddArgs {
                    id,
                    name,
                    image,
                    price,
                    original_price,
                    ingredients,
                    quantity,
                },
            )?,
            CartAction::Remove { id } => commands::cart::remove(&store, &id),
            CartAction::Update { id, quantity } => {
                commands::cart::update(&store, &id, quantity);
            }
            CartAction::Clear => commands::cart::clear(&store),
            CartAction::Total => commands::cart::total(&store, config.currency),
            CartAction::Count => commands::cart::count(&store),
            CartAction::Summary { json } => {
                commands::cart::summary(&store, config.currency, json)?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use clap::CommandFactory;
    use tressa_cart::CartStore;

    use super::*;

    fn cli(dir: &std::path::Path, args: &[&str]) -> Cli {
        let mut argv = vec!["tressa", "--storage-dir", dir.to_str().unwrap()];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    /// Defaults for every variable, ignoring the process environment and
    /// any `.env` file.
    fn config() -> CartConfig {
        CartConfig::from_lookup(|_| None).unwrap()
    }

    fn reopen(dir: &std::path::Path) -> CartStore {
        CartConfig {
            storage_dir: dir.to_path_buf(),
            ..config()
        }
        .open_store()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_and_update_persist_to_disk() {
        let dir = tempfile::TempDir::new().unwrap();

        execute(
            cli(
                dir.path(),
                &[
                    "cart", "add", "--id", "p1", "--name", "Shampoo", "--price", "10", "-q", "2",
                    "--ingredient", "aloe",
                ],
            ),
            config(),
        )
        .unwrap();
        execute(
            cli(
                dir.path(),
                &["cart", "add", "--id", "p1", "--name", "Shampoo", "--price", "10", "-q", "3"],
            ),
            config(),
        )
        .unwrap();

        let store = reopen(dir.path());
        let items = store.get_all();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
        assert_eq!(items[0].ingredients, vec!["aloe"]);

        execute(cli(dir.path(), &["cart", "update", "p1", "-1"]), config()).unwrap();
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_high_precision_price_is_stored_exactly() {
        let dir = tempfile::TempDir::new().unwrap();

        execute(
            cli(
                dir.path(),
                &[
                    "cart",
                    "add",
                    "--id",
                    "p1",
                    "--name",
                    "Shampoo",
                    "--price",
                    "1.23456789012345678",
                ],
            ),
            config(),
        )
        .unwrap();

        let items = reopen(dir.path()).get_all();
        assert_eq!(items[0].price.to_string(), "1.23456789012345678");
    }

    #[test]
    fn test_summary_json() {
        let dir = tempfile::TempDir::new().unwrap();
        execute(cli(dir.path(), &["cart", "summary", "--json"]), config()).unwrap();
    }

    #[test]
    fn test_rejects_empty_product_id() {
        let dir = tempfile::TempDir::new().unwrap();
        let argv = [
            "tressa",
            "--storage-dir",
            dir.path().to_str().unwrap(),
            "cart",
            "remove",
            "",
        ];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_negative_price_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = execute(
            cli(
                dir.path(),
                &["cart", "add", "--id", "p1", "--name", "Shampoo", "--price", "-1"],
            ),
            config(),
        );
        assert!(result.is_err());
    }
}
