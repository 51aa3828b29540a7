//! # caja-core: Pure Business Logic for Caja POS
//!
//! This crate is the **heart** of the Caja POS checkout screen. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Caja POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (TypeScript)                        │   │
//! │  │    Catalog UI ──► Cart UI ──► Confirm Dialog ──► Receipt UI     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    caja-terminal (session)                      │   │
//! │  │    Composer state, checkout orchestrator, debounced search      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ caja-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ checkout  │   │   │
//! │  │   │ Catalog   │  │  round2   │  │   Cart    │  │   gate    │   │   │
//! │  │   │ Payment   │  │  format   │  │ CartEntry │  │  payload  │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK READS • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    caja-api (REST layer)                        │   │
//! │  │       catalog query, customers, venta, credit requests          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, PaymentMethod, SalePayload, etc.)
//! - [`money`] - Two-decimal rounding policy for backend decimal amounts
//! - [`cart`] - Cart store: composite identity, mutations, derived totals
//! - [`credit`] - Credit-line projection and credit-request form
//! - [`checkout`] - Submission gate and sale-payload construction
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system, and clock access is FORBIDDEN here
//! 3. **Backend Decimals**: Monetary amounts arrive as decimal `f64` from the
//!    backend and are rounded once per aggregate with [`money::round2`]
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use caja_core::cart::Cart;
//! use caja_core::money::round2;
//!
//! let cart = Cart::new();
//! assert!(cart.is_empty());
//!
//! // The total rounds half away from zero, with an epsilon nudge that
//! // absorbs binary floating-point representation error first.
//! assert_eq!(round2(2.0 * 10.005 + 5.0), 25.01);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod credit;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use caja_core::Cart` instead of
// `use caja_core::cart::Cart`

pub use cart::{Cart, CartEntry, ItemKey};
pub use checkout::{CheckoutPhase, SaleContext, CUSTOMER_REQUIRED_THRESHOLD};
pub use credit::{CreditLine, CreditRequestForm};
pub use error::{CoreError, GateError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct entries allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
/// Can be made configurable per-branch in future versions.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single entry in the cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// The cart store itself does not enforce this - the backend remains the
/// authority on stock - but callers can opt in via
/// [`validation::validate_quantity`].
pub const MAX_ITEM_QUANTITY: i64 = 999;
