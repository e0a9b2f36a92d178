//! Cart line items.
//!
//! The persisted cart is a JSON array of [`LineItem`] objects with camelCase
//! field names and prices written as exact JSON numbers (the decimal text of
//! the amount, never rounded through a float):
//!
//! ```json
//! [
//!   {
//!     "id": "argan-serum",
//!     "name": "Argan Repair Serum",
//!     "image": "/images/argan-serum.webp",
//!     "price": 24.99,
//!     "originalPrice": 29.99,
//!     "quantity": 2,
//!     "ingredients": ["argan oil", "vitamin e"]
//!   }
//! ]
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Descriptive product data added to a cart, without a quantity.
///
/// Everything except `id` and `price` is opaque to the cart store and is
/// carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    /// Stable product identifier, the merge key within a cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Image URL or path.
    pub image: String,
    /// Unit price in the cart's implied currency.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    /// Pre-discount unit price, for display only.
    #[serde(
        default,
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<Decimal>,
    /// Ingredient list, in display order.
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl CartProduct {
    /// Create a product with no discount and no ingredients.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        image: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
            price,
            original_price: None,
            ingredients: Vec::new(),
        }
    }

    /// Set the pre-discount price.
    #[must_use]
    pub fn with_original_price(mut self, original_price: Decimal) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Set the ingredient list.
    #[must_use]
    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }
}

/// One product and quantity held in a cart.
///
/// A persisted line item always has `quantity >= 1`; the cart store removes
/// items instead of storing a zero quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<Decimal>,
    pub quantity: u32,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl LineItem {
    /// Build a line item from a product and a quantity.
    #[must_use]
    pub fn from_product(product: CartProduct, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name,
            image: product.image,
            price: product.price,
            original_price: product.original_price,
            quantity,
            ingredients: product.ingredients,
        }
    }

    /// `price * quantity`, saturating at `Decimal::MAX`/`Decimal::MIN`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Discount across the whole line, or zero when there is no
    /// `original_price` or it is not above `price`. Saturates like
    /// [`line_total`](Self::line_total).
    #[must_use]
    pub fn line_savings(&self) -> Decimal {
        self.original_price
            .map(|original| original.saturating_sub(self.price).max(Decimal::ZERO))
            .map_or(Decimal::ZERO, |unit| {
                unit.saturating_mul(Decimal::from(self.quantity))
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn serum() -> CartProduct {
        CartProduct::new(
            ProductId::parse("argan-serum").unwrap(),
            "Argan Repair Serum",
            "/images/argan-serum.webp",
            Decimal::new(2499, 2),
        )
    }

    #[test]
    fn test_from_product_keeps_fields() {
        let product = serum()
            .with_original_price(Decimal::new(2999, 2))
            .with_ingredients(["argan oil", "vitamin e"]);
        let item = LineItem::from_product(product.clone(), 3);

        assert_eq!(item.id, product.id);
        assert_eq!(item.name, product.name);
        assert_eq!(item.original_price, Some(Decimal::new(2999, 2)));
        assert_eq!(item.quantity, 3);
        assert_eq!(item.ingredients, vec!["argan oil", "vitamin e"]);
    }

    #[test]
    fn test_line_total() {
        let item = LineItem::from_product(serum(), 3);
        assert_eq!(item.line_total(), Decimal::new(7497, 2));
    }

    #[test]
    fn test_line_savings() {
        let discounted =
            LineItem::from_product(serum().with_original_price(Decimal::new(2999, 2)), 2);
        assert_eq!(discounted.line_savings(), Decimal::new(1000, 2));

        let full_price = LineItem::from_product(serum(), 2);
        assert_eq!(full_price.line_savings(), Decimal::ZERO);

        let marked_up =
            LineItem::from_product(serum().with_original_price(Decimal::new(999, 2)), 2);
        assert_eq!(marked_up.line_savings(), Decimal::ZERO);
    }

    #[test]
    fn test_json_layout() {
        let item = LineItem::from_product(
            serum()
                .with_original_price(Decimal::new(2999, 2))
                .with_ingredients(["argan oil"]),
            2,
        );
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["id"], "argan-serum");
        assert_eq!(value["price"], 24.99);
        assert_eq!(value["originalPrice"], 29.99);
        assert_eq!(value["quantity"], 2);
        assert_eq!(value["ingredients"][0], "argan oil");
    }

    #[test]
    fn test_original_price_omitted_when_absent() {
        let item = LineItem::from_product(serum(), 1);
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("originalPrice").is_none());
    }

    #[test]
    fn test_parses_integer_prices_and_missing_optionals() {
        let json = r#"{"id":"p1","name":"Shampoo","image":"","price":10,"quantity":1}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.price, Decimal::new(10, 0));
        assert_eq!(item.original_price, None);
        assert!(item.ingredients.is_empty());
    }

    #[test]
    fn test_prices_round_trip_exactly() {
        for cents in [1, 99, 2499, 999_999, 123_456_789] {
            let item = LineItem::from_product(
                CartProduct::new(ProductId::parse("p1").unwrap(), "", "", Decimal::new(cents, 2)),
                1,
            );
            let json = serde_json::to_string(&item).unwrap();
            let parsed: LineItem = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed.price, item.price);
        }
    }

    #[test]
    fn test_high_precision_prices_round_trip_exactly() {
        let price = Decimal::from_str("1.23456789012345678").unwrap();
        let original = Decimal::from_str("79228162514264337593543950335").unwrap();
        let item = LineItem::from_product(
            CartProduct::new(ProductId::parse("p1").unwrap(), "", "", price)
                .with_original_price(original),
            1,
        );

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""price":1.23456789012345678"#));

        let parsed: LineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.price, price);
        assert_eq!(parsed.original_price, Some(original));
    }

    #[test]
    fn test_parses_exponent_prices() {
        let json = r#"{"id":"p1","name":"","image":"","price":1e28,"quantity":8}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price, Decimal::from_scientific("1e28").unwrap());
    }

    #[test]
    fn test_overflowing_line_saturates() {
        let item = LineItem::from_product(
            CartProduct::new(ProductId::parse("p1").unwrap(), "", "", Decimal::MAX)
                .with_original_price(Decimal::MAX),
            8,
        );
        assert_eq!(item.line_total(), Decimal::MAX);
        assert_eq!(item.line_savings(), Decimal::ZERO);

        let mut discounted = item;
        discounted.price = Decimal::MIN;
        assert_eq!(discounted.line_savings(), Decimal::MAX);
    }

    #[test]
    fn test_null_original_price_is_none() {
        let json = r#"{"id":"p1","name":"","image":"","price":1.5,"originalPrice":null,"quantity":1}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.original_price, None);
    }

    #[test]
    fn test_rejects_string_price() {
        let json = r#"{"id":"p1","name":"","image":"","price":"abc","quantity":1}"#;
        assert!(serde_json::from_str::<LineItem>(json).is_err());
    }

    #[test]
    fn test_rejects_negative_quantity() {
        let json = r#"{"id":"p1","name":"Shampoo","image":"","price":10,"quantity":-1}"#;
        assert!(serde_json::from_str::<LineItem>(json).is_err());
    }
}
