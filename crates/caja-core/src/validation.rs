//! # Validation Module
//!
//! Input validation utilities for Caja POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                         │
//! │  ├── Basic format checks (empty, length)                                │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE + the submission gate (checkout.rs)               │
//! │  ├── Precondition checks before any network call                        │
//! │  └── Typed errors, never strings                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend (authoritative)                                       │
//! │  ├── Stock availability                                                 │
//! │  ├── Price-id resolution                                                │
//! │  └── Business validation                                                │
//! │                                                                         │
//! │  Defense in depth: the backend is the source of truth; local checks     │
//! │  exist so obviously-bad requests never hit the network.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested special price.
///
/// ## Rules
/// - Must be strictly positive; a special-price request of 0 or less is
///   rejected before it reaches the price-request endpoint.
///
/// ## Example
/// ```rust
/// use caja_core::validation::validate_requested_price;
///
/// assert!(validate_requested_price(100.0).is_ok());
/// assert!(validate_requested_price(0.0).is_err());
/// assert!(validate_requested_price(-5.0).is_err());
/// ```
pub fn validate_requested_price(price: f64) -> ValidationResult<()> {
    if price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "precio solicitado".to_string(),
        });
    }

    Ok(())
}

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// The cart store itself does not call this (the backend is the stock
/// authority); UI callers use it to reject obvious typos early.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "cantidad".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "cantidad".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a payment reference (bank slip / transfer number).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Maximum 100 characters
pub fn validate_payment_reference(reference: &str) -> ValidationResult<()> {
    let reference = reference.trim();

    if reference.is_empty() {
        return Err(ValidationError::Required {
            field: "referencia de pago".to_string(),
        });
    }

    if reference.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "referencia de pago".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a catalog search query.
///
/// ## Rules
/// - Can be empty (returns the unfiltered catalog page)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "búsqueda".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size (number of distinct entries).
///
/// ## Rules
/// - Must not exceed MAX_CART_ITEMS (100)
pub fn validate_cart_size(current_entries: usize) -> ValidationResult<()> {
    if current_entries >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "artículos del carrito".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requested_price() {
        assert!(validate_requested_price(0.01).is_ok());
        assert!(validate_requested_price(1500.0).is_ok());

        assert!(validate_requested_price(0.0).is_err());
        assert!(validate_requested_price(-100.0).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_payment_reference() {
        assert!(validate_payment_reference("B-00123").is_ok());
        assert!(validate_payment_reference("").is_err());
        assert!(validate_payment_reference("   ").is_err());
        assert!(validate_payment_reference(&"X".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  cable utp ").unwrap(), "cable utp");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(99).is_ok());
        assert!(validate_cart_size(100).is_err());
    }
}
