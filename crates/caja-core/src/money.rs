//! # Money Module
//!
//! Two-decimal rounding policy for monetary amounts.
//!
//! ## Why f64 With Epsilon Correction?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE BACKEND CONTRACT                                                   │
//! │                                                                         │
//! │  The backend serves price tiers as decimal numbers, including           │
//! │  sub-cent amounts negotiated per customer class:                        │
//! │                                                                         │
//! │    { "id": 41, "precio": 10.005, "rol": "MAYORISTA" }                   │
//! │                                                                         │
//! │  Totals are rounded to 2 decimals ONCE, at the aggregate:               │
//! │                                                                         │
//! │    naive:    round(25.009999999999998 × 100) / 100                      │
//! │    problem:  1.005 × 100 = 100.49999999999999 → rounds DOWN (wrong)     │
//! │                                                                         │
//! │  OUR SOLUTION: nudge by machine epsilon BEFORE scaling, exactly the     │
//! │  rule the deployed backend applies, so client and server always agree   │
//! │  on the printed total.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use caja_core::money::round2;
//!
//! assert_eq!(round2(1.005), 1.01);   // not 1.00
//! assert_eq!(round2(25.0099999), 25.01);
//! ```

// =============================================================================
// Rounding
// =============================================================================

/// Rounds a monetary amount to 2 decimal places.
///
/// Round-half-away-from-zero semantics (`f64::round`), with a machine-epsilon
/// nudge applied before scaling so that values sitting one ulp below a
/// half-cent boundary (the classic `1.005` case) round up as a human would
/// expect.
///
/// Idempotent and referentially transparent: re-rounding an already rounded
/// value is a no-op.
///
/// ## Example
/// ```rust
/// use caja_core::money::round2;
///
/// assert_eq!(round2(2.0 * 10.005 + 5.0), 25.01);
/// assert_eq!(round2(round2(1.005)), 1.01);
/// ```
#[inline]
pub fn round2(amount: f64) -> f64 {
    ((amount + f64::EPSILON) * 100.0).round() / 100.0
}

/// Computes a line extension (quantity × unit price) rounded to 2 decimals.
///
/// Used for per-line subtotals (credit lines, receipt display). Note that
/// the order total does NOT sum pre-rounded lines: it rounds once over the
/// raw sum (see [`crate::cart::Cart::total`]), matching the backend.
#[inline]
pub fn line_extension(quantity: i64, unit_price: f64) -> f64 {
    round2(quantity as f64 * unit_price)
}

// =============================================================================
// Display
// =============================================================================

/// Formats an amount in quetzales for logs and receipts.
///
/// ## Note
/// This is for debugging and receipt text. Use frontend formatting
/// (`Intl.NumberFormat("es-GT")`) for actual UI display to handle
/// localization properly.
pub fn format_quetzales(amount: f64) -> String {
    if amount < 0.0 {
        format!("-Q{:.2}", amount.abs())
    } else {
        format!("Q{:.2}", amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_basic() {
        assert_eq!(round2(10.0), 10.0);
        assert_eq!(round2(10.004), 10.0);
        assert_eq!(round2(10.006), 10.01);
    }

    #[test]
    fn test_round2_epsilon_boundary() {
        // 1.005 is stored as 1.00499999999999989...; without the epsilon
        // nudge it would round down to 1.00.
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(2.675), 2.68);
    }

    #[test]
    fn test_round2_aggregate_total() {
        // cart = [{qty: 2, price: 10.005}, {qty: 1, price: 5}]
        let raw = 2.0 * 10.005 + 1.0 * 5.0;
        assert_eq!(round2(raw), 25.01);
    }

    #[test]
    fn test_round2_idempotent() {
        let once = round2(1.005);
        assert_eq!(round2(once), once);
    }

    #[test]
    fn test_round2_negative() {
        // Refund-style amounts round half away from zero
        assert_eq!(round2(-10.006), -10.01);
        assert_eq!(round2(-10.004), -10.0);
    }

    #[test]
    fn test_line_extension() {
        assert_eq!(line_extension(2, 10.005), 20.01);
        assert_eq!(line_extension(3, 5.0), 15.0);
        assert_eq!(line_extension(0, 99.99), 0.0);
    }

    #[test]
    fn test_format_quetzales() {
        assert_eq!(format_quetzales(1234.5), "Q1234.50");
        assert_eq!(format_quetzales(0.0), "Q0.00");
        assert_eq!(format_quetzales(-55.25), "-Q55.25");
    }
}
