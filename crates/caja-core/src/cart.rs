//! # Cart Store
//!
//! The mutable shopping cart at the center of the POS screen.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action                Operation               Store Change          │
//! │  ─────────                ─────────               ────────────          │
//! │                                                                         │
//! │  Click catalog row ─────► add(item) ────────────► qty += 1 OR push      │
//! │                                                                         │
//! │  Edit quantity ─────────► update_quantity() ────► entry.quantity = n    │
//! │                                                                         │
//! │  Pick price tier ───────► update_price() ───────► amount/role/id        │
//! │                                                                         │
//! │  Click remove ──────────► remove() ─────────────► entries.retain(...)   │
//! │                                                                         │
//! │  Sale confirmed ────────► clear() ──────────────► entries.clear()       │
//! │                                                                         │
//! │  Derived (read-only): total(), reserved_quantity(), remaining_stock()   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Entries are unique by [`ItemKey`] (re-adding increments quantity)
//! - Insertion order is preserved (credit lines project in cart order)
//! - The selected price amount/role always corresponds to one entry of the
//!   retained price list, or keeps the previous price id when a tier change
//!   has no exact match (deployed-backend compatibility; see
//!   [`Cart::update_price`])
//! - The store is cleared only after a confirmed successful sale, never
//!   partially

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::round2;
use crate::types::{CatalogItem, CatalogSource, PriceEntry, PriceRole, StockLot};

// =============================================================================
// Item Key
// =============================================================================

/// Composite identity of a cart entry: source kind + catalog id.
///
/// A base product and a packaged presentation may share the same numeric id;
/// modeling the key as a value type with structural equality (instead of a
/// concatenated string) is what keeps them from colliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemKey {
    pub source: CatalogSource,
    pub id: i64,
}

impl ItemKey {
    #[inline]
    pub const fn new(source: CatalogSource, id: i64) -> Self {
        ItemKey { source, id }
    }

    /// The key a catalog item would occupy in the cart.
    #[inline]
    pub fn for_item(item: &CatalogItem) -> Self {
        ItemKey::new(item.source, item.id)
    }
}

// =============================================================================
// Cart Entry
// =============================================================================

/// One line item of the cart.
///
/// ## Design Notes
/// - `name` is a snapshot taken at add time; later catalog edits do not
///   retitle lines already in the cart.
/// - `prices` retains the item's full tier list so the cashier can switch
///   tiers later without re-fetching the catalog.
/// - `stock_lots` is retained for the advisory remaining-stock display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    /// Composite identity (source kind + catalog id).
    pub key: ItemKey,

    /// Display name at time of adding (frozen).
    #[serde(rename = "nombre")]
    pub name: String,

    /// Quantity in cart. Starts at 1, incremented on repeat-add.
    pub quantity: i64,

    /// Full tier list retained from the catalog item.
    #[serde(rename = "precios")]
    pub prices: Vec<PriceEntry>,

    /// Stock lots retained for remaining-stock display.
    #[serde(rename = "stock")]
    pub stock_lots: Vec<StockLot>,

    /// Currently selected price id (resolved against `prices`).
    pub selected_price_id: i64,

    /// Currently selected price amount.
    pub selected_price: f64,

    /// Currently selected price tier role.
    pub selected_price_role: PriceRole,
}

impl CartEntry {
    /// Creates a cart entry from a catalog item with quantity 1.
    ///
    /// Seeds the selection from the item's FIRST price entry. Items without
    /// any price entry get id 0, amount 0.0 and the Public role; the backend
    /// rejects such lines at sale time, so the cart does not have to.
    pub fn from_item(item: &CatalogItem) -> Self {
        let initial = item.prices.first();

        CartEntry {
            key: ItemKey::for_item(item),
            name: item.name.clone(),
            quantity: 1,
            prices: item.prices.clone(),
            stock_lots: item.stock_lots.clone(),
            selected_price_id: initial.map(|p| p.id).unwrap_or(0),
            selected_price: initial.map(|p| p.amount).unwrap_or(0.0),
            selected_price_role: initial.map(|p| p.role).unwrap_or_default(),
        }
    }

    /// Raw line extension (quantity × selected price), unrounded.
    ///
    /// The order total rounds once over the sum of these; per-line rounding
    /// is applied only where a line subtotal is itself a wire field
    /// (credit lines).
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.selected_price
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart store: an ordered collection of entries keyed by [`ItemKey`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            entries: Vec::new(),
        }
    }

    /// Adds a catalog item to the cart, or increments it if already present.
    ///
    /// ## Behavior
    /// - Entry with the same key exists: quantity += 1, no new entry
    /// - Otherwise: new entry seeded from the item's first price tier
    ///
    /// No side effects beyond the store mutation; stock is NOT checked here
    /// (the backend is authoritative, [`remaining_stock`] is advisory).
    pub fn add(&mut self, item: &CatalogItem) {
        let key = ItemKey::for_item(item);

        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.quantity += 1;
            return;
        }

        self.entries.push(CartEntry::from_item(item));
    }

    /// Replaces the quantity of the matching entry.
    ///
    /// No bounds checking is performed here - not against zero, not against
    /// stock. The caller decides what to allow, informed by
    /// [`remaining_stock`]; the backend rejects over-sells authoritatively.
    /// No matching entry ⇒ no-op.
    pub fn update_quantity(&mut self, key: &ItemKey, quantity: i64) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == *key) {
            entry.quantity = quantity;
        }
    }

    /// Sets the selected price amount and tier role of the matching entry.
    ///
    /// The selected price id is re-resolved by EXACT (amount, role) match
    /// against the entry's retained tier list. When no exact match exists
    /// the previous id is kept unchanged - the backend resolves lines by
    /// price id, and the deployed contract keeps the stale id rather than
    /// guessing. No matching entry ⇒ no-op.
    pub fn update_price(&mut self, key: &ItemKey, amount: f64, role: PriceRole) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == *key) {
            entry.selected_price = amount;
            entry.selected_price_role = role;

            if let Some(matched) = entry
                .prices
                .iter()
                .find(|p| p.amount == amount && p.role == role)
            {
                entry.selected_price_id = matched.id;
            }
        }
    }

    /// Removes the matching entry. Absent ⇒ no-op.
    pub fn remove(&mut self, key: &ItemKey) {
        self.entries.retain(|e| e.key != *key);
    }

    /// Empties the store. Invoked only after a confirmed successful sale.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The entries in insertion order.
    #[inline]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Number of distinct entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Quantity currently reserved in the cart under the given key
    /// (0 if not present).
    pub fn reserved_quantity(&self, key: &ItemKey) -> i64 {
        self.entries
            .iter()
            .find(|e| e.key == *key)
            .map(|e| e.quantity)
            .unwrap_or(0)
    }

    /// Order total: `round2(Σ quantity × selected price)`.
    ///
    /// Re-evaluated on every call; no memory between calls.
    pub fn total(&self) -> f64 {
        round2(self.entries.iter().map(|e| e.line_total()).sum())
    }
}

// =============================================================================
// Remaining Stock
// =============================================================================

/// Reconciles a catalog item's total stock against the cart reservation.
///
/// Result is floored at zero - an over-reserved cart never shows negative
/// availability. Advisory for UI display only; neither [`Cart::add`] nor
/// [`Cart::update_quantity`] consults it.
pub fn remaining_stock(item: &CatalogItem, cart: &Cart) -> i64 {
    let reserved = cart.reserved_quantity(&ItemKey::for_item(item));
    (item.total_stock() - reserved).max(0)
}

// =============================================================================
// Unit Tests
// =============================================================================
