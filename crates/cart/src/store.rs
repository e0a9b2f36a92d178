//! The cart store.
//!
//! Every mutation is read → modify → write → notify against the persistence
//! adapter. The store keeps no copy of the list between calls; the
//! persisted value is the only state. A mutation whose write fails is logged
//! and dropped: the stored cart is unchanged and listeners are not notified.
//!
//! # Invariants
//!
//! - At most one line item per product id.
//! - Every persisted line item has `quantity >= 1`.
//! - Totals never panic: amounts past `Decimal::MAX` saturate.

use rust_decimal::Decimal;
use serde::Serialize;
use tressa_core::{CartProduct, CurrencyCode, LineItem, Price, ProductId};

use crate::events::{CartChange, CartEvents, ChangeKind, SubscriptionId};
use crate::persistence::CartPersistence;

/// Display-ready totals for a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub items: Vec<LineItem>,
    pub subtotal: Price,
    pub item_count: u64,
    /// Total discount against `original_price`, across all lines.
    pub savings: Price,
}

/// Shopping cart backed by a [`CartPersistence`] adapter.
#[derive(Debug)]
pub struct CartStore {
    persistence: CartPersistence,
    events: CartEvents,
}

impl CartStore {
    /// Create a store over `persistence` with no listeners.
    #[must_use]
    pub fn new(persistence: CartPersistence) -> Self {
        Self {
            persistence,
            events: CartEvents::new(),
        }
    }

    /// The persistence adapter backing this store.
    #[must_use]
    pub const fn persistence(&self) -> &CartPersistence {
        &self.persistence
    }

    /// Register a change listener.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&CartChange) + Send + Sync + 'static,
    {
        self.events.subscribe(listener)
    }

    /// Remove a change listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// The persisted line items, as stored.
    #[must_use]
    pub fn get_all(&self) -> Vec<LineItem> {
        self.persistence.load()
    }

    /// The line item for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<LineItem> {
        self.get_all().into_iter().find(|item| &item.id == id)
    }

    /// Whether the cart holds a line item for `id`.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Add `quantity` units of `product`.
    ///
    /// If the product is already in the cart its quantity is increased and
    /// its stored name, image, prices, and ingredients are kept; the fields
    /// on `product` are discarded. Otherwise a new line item is appended.
    ///
    /// A `quantity` of zero adds nothing, but the cart is still written and
    /// listeners are still notified.
    pub fn add(&self, product: CartProduct, quantity: u32) {
        let mut items = self.get_all();

        if quantity == 0 {
            tracing::debug!(product_id = %product.id, "Ignoring add with zero quantity");
        } else if let Some(existing) = items.iter_mut().find(|item| item.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            tracing::debug!(
                product_id = %product.id,
                quantity = existing.quantity,
                "Merged into existing cart line"
            );
        } else {
            tracing::debug!(product_id = %product.id, quantity, "Added cart line");
            items.push(LineItem::from_product(product, quantity));
        }

        self.commit(ChangeKind::Added, items);
    }

    /// Add a single unit of `product`.
    pub fn add_one(&self, product: CartProduct) {
        self.add(product, 1);
    }

    /// Remove the line item for `id`. Removing an absent id is not an error;
    /// the cart is still written and listeners are still notified.
    pub fn remove(&self, id: &ProductId) {
        let mut items = self.get_all();
        let before = items.len();
        items.retain(|item| &item.id != id);

        tracing::debug!(product_id = %id, removed = before != items.len(), "Removed cart line");

        self.commit(ChangeKind::Removed, items);
    }

    /// Set the quantity of the line item for `id`.
    ///
    /// A `quantity` of zero or less removes the item, exactly like
    /// [`remove`](Self::remove). An absent id is left absent: unlike
    /// [`add`](Self::add), this never creates a line item. Quantities above
    /// `u32::MAX` are clamped.
    pub fn update_quantity(&self, id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let mut items = self.get_all();

        match items.iter_mut().find(|item| &item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                tracing::debug!(product_id = %id, quantity, "Updated cart line quantity");
            }
            None => {
                tracing::debug!(product_id = %id, "Quantity update for product not in cart");
            }
        }

        self.commit(ChangeKind::QuantityUpdated, items);
    }

    /// Remove every line item.
    pub fn clear(&self) {
        if let Err(e) = self.persistence.clear() {
            tracing::error!(key = self.persistence.key(), error = %e, "Failed to clear cart");
            return;
        }

        tracing::debug!(key = self.persistence.key(), "Cleared cart");
        self.events.emit(&CartChange {
            kind: ChangeKind::Cleared,
            items: Vec::new(),
        });
    }

    /// Sum of `price * quantity` over all line items.
    #[must_use]
    pub fn get_total(&self) -> Decimal {
        saturating_sum(self.get_all().iter().map(LineItem::line_total))
    }

    /// Sum of quantities over all line items.
    #[must_use]
    pub fn get_item_count(&self) -> u64 {
        self.get_all()
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Items, subtotal, count, and savings from one read of the cart.
    #[must_use]
    pub fn summary(&self, currency_code: CurrencyCode) -> CartSummary {
        let items = self.get_all();
        let subtotal = saturating_sum(items.iter().map(LineItem::line_total));
        let savings = saturating_sum(items.iter().map(LineItem::line_savings));
        let item_count = items.iter().map(|item| u64::from(item.quantity)).sum();

        CartSummary {
            items,
            subtotal: Price::new(subtotal, currency_code),
            item_count,
            savings: Price::new(savings, currency_code),
        }
    }

    fn commit(&self, kind: ChangeKind, items: Vec<LineItem>) {
        if let Err(e) = self.persistence.save(&items) {
            tracing::error!(
                key = self.persistence.key(),
                %kind,
                error = %e,
                "Failed to save cart"
            );
            return;
        }

        self.events.emit(&CartChange { kind, items });
    }
}

fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}
