//! # Submission Gate
//!
//! Validates checkout preconditions and builds the sale payload.
//!
//! ## Gate State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Gate                                        │
//! │                                                                         │
//! │  ┌──────────┐  checkout button   ┌────────────┐   gate passes           │
//! │  │ Editable │──────────────────► │ Confirming │─────────────► submit    │
//! │  │          │◄────────────────── │            │◄──┐                     │
//! │  └──────────┘  cancel / success  └────────────┘   │ gate rejects        │
//! │                                        │          │ (state untouched)   │
//! │                                        └──────────┘                     │
//! │                                                                         │
//! │  Gate checks, in order:                                                 │
//! │   1. cart not empty                                                     │
//! │   2. voucher type selected           → informational message            │
//! │   3. transfer reference present      → confirm control disabled         │
//! │   4. total > 1000 needs a customer   → warning message                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejection never mutates composer state and never reaches the network;
//! the dialog stays in Confirming and the same action can simply be retried.

use crate::cart::Cart;
use crate::error::GateError;
use crate::types::{
    CatalogSource, PaymentMethod, SaleLine, SalePayload, VoucherType, WalkInCustomer,
};

// =============================================================================
// Constants
// =============================================================================

/// Above this order total (in quetzales) a sale must carry either a
/// registered customer or a walk-in bundle with name and phone.
pub const CUSTOMER_REQUIRED_THRESHOLD: f64 = 1000.0;

// =============================================================================
// Checkout Phase
// =============================================================================

/// The two effective states of the checkout dialog.
///
/// `Editable → Confirming` is user-triggered and unconditional (opening the
/// confirmation dialog is always allowed); the gate only guards the
/// `Confirming → submit` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutPhase {
    /// Dialog closed; cart and payment fields freely mutable.
    #[default]
    Editable,
    /// Confirmation dialog open; submission enabled/disabled by gate checks.
    Confirming,
}

impl CheckoutPhase {
    #[inline]
    pub fn is_confirming(&self) -> bool {
        matches!(self, CheckoutPhase::Confirming)
    }
}

// =============================================================================
// Sale Context
// =============================================================================

/// Borrowed view of the composer state the gate needs.
#[derive(Debug, Clone, Copy)]
pub struct SaleContext<'a> {
    pub cart: &'a Cart,
    pub payment_method: PaymentMethod,
    pub voucher_type: Option<VoucherType>,
    pub payment_reference: &'a str,
    pub customer_id: Option<i64>,
    pub walk_in: &'a WalkInCustomer,
}

// =============================================================================
// Gate Checks
// =============================================================================

/// True while the confirm control must stay disabled: payment method is
/// Transfer and the reference field is still blank.
///
/// This is a control-state predicate, not a click-time rejection - the UI
/// disables the button instead of letting the click fail.
pub fn reference_required(method: PaymentMethod, reference: &str) -> bool {
    method == PaymentMethod::Transfer && reference.trim().is_empty()
}

/// Runs the ordered precondition checks of the submission gate.
///
/// Returns the first failing check; composer state is never touched.
pub fn validate_sale(ctx: &SaleContext<'_>) -> Result<(), GateError> {
    if ctx.cart.is_empty() {
        return Err(GateError::EmptyCart);
    }

    if ctx.voucher_type.is_none() {
        return Err(GateError::VoucherRequired);
    }

    if reference_required(ctx.payment_method, ctx.payment_reference) {
        return Err(GateError::ReferenceRequired);
    }

    let total = ctx.cart.total();
    if total > CUSTOMER_REQUIRED_THRESHOLD
        && ctx.customer_id.is_none()
        && !ctx.walk_in.has_contact_info()
    {
        return Err(GateError::CustomerRequired);
    }

    Ok(())
}

// =============================================================================
// Payload Construction
// =============================================================================

/// Builds the sale payload from current composer state.
///
/// Constructed fresh on every submission attempt; the caller is expected to
/// have passed [`validate_sale`] first. Walk-in strings are trimmed as sent
/// on the wire; the product/presentation id split follows each entry's
/// source kind.
pub fn build_sale_payload(
    ctx: &SaleContext<'_>,
    actor_role: &str,
    user_id: i64,
    branch_id: i64,
) -> SalePayload {
    let lines = ctx
        .cart
        .entries()
        .iter()
        .map(|entry| {
            let is_presentation = entry.key.source == CatalogSource::Presentation;
            SaleLine {
                quantity: entry.quantity,
                selected_price_id: entry.selected_price_id,
                product_id: (!is_presentation).then_some(entry.key.id),
                presentation_id: is_presentation.then_some(entry.key.id),
            }
        })
        .collect();

    SalePayload {
        actor_role: actor_role.to_string(),
        user_id,
        branch_id,
        customer_id: ctx.customer_id,
        lines,
        payment_method: ctx.payment_method,
        voucher_type: ctx.voucher_type.unwrap_or_default(),
        payment_reference: ctx.payment_reference.trim().to_string(),
        total: ctx.cart.total(),
        walk_in: ctx.walk_in.trimmed(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CatalogItem, PriceEntry, PriceRole};

    fn priced_item(id: i64, price: f64) -> CatalogItem {
        CatalogItem {
            id,
            source: CatalogSource::Product,
            name: format!("Item {}", id),
            description: String::new(),
            item_code: String::new(),
            stock_lots: vec![],
            prices: vec![PriceEntry {
                id: id * 10,
                amount: price,
                role: PriceRole::Public,
            }],
            images: vec![],
        }
    }

    fn cart_with_total(price: f64) -> Cart {
        let mut cart = Cart::new();
        cart.add(&priced_item(1, price));
        cart
    }

    fn ctx<'a>(
        cart: &'a Cart,
        method: PaymentMethod,
        voucher: Option<VoucherType>,
        reference: &'a str,
        customer_id: Option<i64>,
        walk_in: &'a WalkInCustomer,
    ) -> SaleContext<'a> {
        SaleContext {
            cart,
            payment_method: method,
            voucher_type: voucher,
            payment_reference: reference,
            customer_id,
            walk_in,
        }
    }

    #[test]
    fn test_empty_cart_rejected_first() {
        let cart = Cart::new();
        let walk_in = WalkInCustomer::default();
        let context = ctx(&cart, PaymentMethod::Cash, None, "", None, &walk_in);

        assert_eq!(validate_sale(&context), Err(GateError::EmptyCart));
    }

    #[test]
    fn test_voucher_required() {
        let cart = cart_with_total(10.0);
        let walk_in = WalkInCustomer::default();
        let context = ctx(&cart, PaymentMethod::Cash, None, "", None, &walk_in);

        assert_eq!(validate_sale(&context), Err(GateError::VoucherRequired));
    }

    #[test]
    fn test_transfer_requires_reference() {
        let cart = cart_with_total(10.0);
        let walk_in = WalkInCustomer::default();

        assert!(reference_required(PaymentMethod::Transfer, "  "));
        assert!(!reference_required(PaymentMethod::Transfer, "B-01"));
        assert!(!reference_required(PaymentMethod::Cash, ""));

        let context = ctx(
            &cart,
            PaymentMethod::Transfer,
            Some(VoucherType::Receipt),
            "",
            None,
            &walk_in,
        );
        assert_eq!(validate_sale(&context), Err(GateError::ReferenceRequired));
    }

    #[test]
    fn test_threshold_gate_rejects_anonymous_large_sale() {
        let cart = cart_with_total(1001.0);
        let walk_in = WalkInCustomer::default();
        let context = ctx(
            &cart,
            PaymentMethod::Cash,
            Some(VoucherType::Receipt),
            "",
            None,
            &walk_in,
        );

        assert_eq!(validate_sale(&context), Err(GateError::CustomerRequired));
    }

    #[test]
    fn test_threshold_gate_allows_walk_in_contact() {
        let cart = cart_with_total(1001.0);
        let walk_in = WalkInCustomer {
            name: "Ana".to_string(),
            phone: "555".to_string(),
            ..Default::default()
        };
        let context = ctx(
            &cart,
            PaymentMethod::Cash,
            Some(VoucherType::Receipt),
            "",
            None,
            &walk_in,
        );

        assert_eq!(validate_sale(&context), Ok(()));
    }

    #[test]
    fn test_threshold_gate_allows_registered_customer() {
        let cart = cart_with_total(1001.0);
        let walk_in = WalkInCustomer::default();
        let context = ctx(
            &cart,
            PaymentMethod::Cash,
            Some(VoucherType::Receipt),
            "",
            Some(42),
            &walk_in,
        );

        assert_eq!(validate_sale(&context), Ok(()));
    }

    #[test]
    fn test_exactly_threshold_passes_without_customer() {
        // the gate fires strictly above the threshold
        let cart = cart_with_total(1000.0);
        let walk_in = WalkInCustomer::default();
        let context = ctx(
            &cart,
            PaymentMethod::Cash,
            Some(VoucherType::Receipt),
            "",
            None,
            &walk_in,
        );

        assert_eq!(validate_sale(&context), Ok(()));
    }

    #[test]
    fn test_payload_construction() {
        let mut cart = Cart::new();
        cart.add(&priced_item(4, 10.005));
        cart.add(&priced_item(4, 10.005)); // qty 2
        let mut presentation = priced_item(9, 5.0);
        presentation.source = CatalogSource::Presentation;
        cart.add(&presentation);

        let walk_in = WalkInCustomer {
            name: "  Ana ".to_string(),
            phone: "555".to_string(),
            ..Default::default()
        };
        let context = ctx(
            &cart,
            PaymentMethod::Cash,
            Some(VoucherType::Invoice),
            " B-77 ",
            None,
            &walk_in,
        );

        let payload = build_sale_payload(&context, "VENDEDOR", 3, 1);

        assert_eq!(payload.actor_role, "VENDEDOR");
        assert_eq!(payload.user_id, 3);
        assert_eq!(payload.branch_id, 1);
        assert_eq!(payload.total, 25.01);
        assert_eq!(payload.payment_reference, "B-77");
        assert_eq!(payload.walk_in.name, "Ana");

        assert_eq!(payload.lines.len(), 2);
        assert_eq!(payload.lines[0].product_id, Some(4));
        assert_eq!(payload.lines[0].quantity, 2);
        assert_eq!(payload.lines[1].presentation_id, Some(9));
        assert_eq!(payload.lines[1].product_id, None);
    }
}
