//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of a product
//! tressa cart add --id argan-serum --name "Argan Repair Serum" --price 24.99 -q 2
//!
//! # Change a quantity (zero or less removes the line)
//! tressa cart update argan-serum 3
//!
//! # Show the cart
//! tressa cart list
//! tressa cart summary
//! ```
//!
//! # Environment Variables
//!
//! - `TRESSA_STORAGE_DIR` - Directory holding the cart file
//! - `TRESSA_CART_KEY` - Storage key the cart is persisted under
//! - `TRESSA_CURRENCY` - Currency used to format totals

use rust_decimal::Decimal;
use thiserror::Error;
use tressa_cart::{CartChange, CartStore};
use tressa_core::{CartProduct, CurrencyCode, Price, ProductId};

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Price arguments must not be negative.
    #[error("Invalid price for {field}: {value} (must not be negative)")]
    NegativePrice {
        /// Argument name.
        field: &'static str,
        /// Rejected value.
        value: Decimal,
    },

    /// The cart or its summary could not be rendered as JSON.
    #[error("Failed to render cart: {0}")]
    Render(#[from] serde_json::Error),
}

/// Arguments for `cart add`.
#[derive(Debug, Clone)]
pub struct AddArgs {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub ingredients: Vec<String>,
    pub quantity: u32,
}

impl AddArgs {
    /// Validate the arguments and build the product to add.
    ///
    /// # Errors
    ///
    /// Returns `CartCommandError::NegativePrice` if either price is negative.
    pub fn into_product(self) -> Result<(CartProduct, u32), CartCommandError> {
        if self.price.is_sign_negative() {
            return Err(CartCommandError::NegativePrice {
                field: "price",
                value: self.price,
            });
        }
        if let Some(original) = self.original_price.filter(Decimal::is_sign_negative) {
            return Err(CartCommandError::NegativePrice {
                field: "original-price",
                value: original,
            });
        }

        let mut product = CartProduct::new(self.id, self.name, self.image, self.price)
            .with_ingredients(self.ingredients);
        product.original_price = self.original_price;
        Ok((product, self.quantity))
    }
}

/// Log every change notification emitted by `store`.
pub fn log_changes(store: &CartStore) {
    store.subscribe(|change: &CartChange| {
        let count: u64 = change
            .items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum();
        tracing::info!(
            kind = %change.kind,
            lines = change.items.len(),
            items = count,
            "Cart updated"
        );
    });
}

/// Print the cart as pretty JSON.
///
/// # Errors
///
/// Returns an error if the items cannot be serialized.
pub fn list(store: &CartStore) -> Result<(), CartCommandError> {
    let rendered = serde_json::to_string_pretty(&store.get_all())?;

    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }
    Ok(())
}

/// Add a product to the cart.
///
/// # Errors
///
/// Returns an error if the arguments fail validation.
pub fn add(store: &CartStore, args: AddArgs) -> Result<(), CartCommandError> {
    let (product, quantity) = args.into_product()?;
    tracing::info!(product_id = %product.id, quantity, "Adding to cart");
    store.add(product, quantity);
    Ok(())
}

/// Remove a product from the cart.
pub fn remove(store: &CartStore, id: &ProductId) {
    tracing::info!(product_id = %id, "Removing from cart");
    store.remove(id);
}

/// Set a product's quantity.
pub fn update(store: &CartStore, id: &ProductId, quantity: i64) {
    tracing::info!(product_id = %id, quantity, "Updating cart quantity");
    store.update_quantity(id, quantity);
}

/// Remove everything from the cart.
pub fn clear(store: &CartStore) {
    tracing::info!("Clearing cart");
    store.clear();
}

/// Print the formatted cart total.
pub fn total(store: &CartStore, currency: CurrencyCode) {
    let total = Price::new(store.get_total(), currency);

    #[allow(clippy::print_stdout)]
    {
        println!("{total}");
    }
}

/// Print the number of units in the cart.
pub fn count(store: &CartStore) {
    let count = store.get_item_count();

    #[allow(clippy::print_stdout)]
    {
        println!("{count}");
    }
}

/// Print subtotal, unit count, and savings, as text or as JSON.
///
/// # Errors
///
/// Returns an error if `json` is set and the summary cannot be serialized.
pub fn summary(
    store: &CartStore,
    currency: CurrencyCode,
    json: bool,
) -> Result<(), CartCommandError> {
    let summary = store.summary(currency);

    if json {
        let rendered = serde_json::to_string_pretty(&summary)?;

        #[allow(clippy::print_stdout)]
        {
            println!("{rendered}");
        }
        return Ok(());
    }

    #[allow(clippy::print_stdout)]
    {
        println!("Lines:    {}", summary.items.len());
        println!("Items:    {}", summary.item_count);
        println!("Subtotal: {}", summary.subtotal);
        println!("Savings:  {}", summary.savings);
    }
    Ok(())
}
