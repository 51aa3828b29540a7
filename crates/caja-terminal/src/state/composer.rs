//! # Session Composer
//!
//! The mutable state of one sale being composed: cart, payment context,
//! customer attribution, credit proposal, and dialog phase.
//!
//! ## Derived-State Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Composer Mutation Flow                               │
//! │                                                                         │
//! │  UI event                Mutator                  Derived sync          │
//! │  ────────                ───────                  ────────────          │
//! │                                                                         │
//! │  Click item ───────────► add_item() ──────┐                             │
//! │  Change qty ───────────► set_quantity() ──┤                             │
//! │  Pick price ───────────► set_price() ─────┼──► recompute()              │
//! │  Pick customer ────────► select_customer()┤      │                      │
//! │  Remove line ──────────► remove_item() ───┘      ▼                      │
//! │                                            credit form re-synced        │
//! │                                            (context + projected lines)  │
//! │                                                                         │
//! │  Every mutator ends in recompute(); the credit proposal can never       │
//! │  show a total or line set the cart no longer has.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use tracing::debug;

use caja_core::{
    Cart, CatalogItem, CheckoutPhase, CreditRequestForm, Customer, ItemKey, PaymentMethod,
    PriceRole, SaleContext, SaleRecord, VoucherType, WalkInCustomer,
};

/// State of one sale being composed.
#[derive(Debug, Clone)]
pub struct Composer {
    pub cart: Cart,
    pub payment_method: PaymentMethod,
    /// `None` until the cashier picks Recibo or Factura - the first
    /// submission gate.
    pub voucher_type: Option<VoucherType>,
    pub payment_reference: String,
    pub selected_customer: Option<Customer>,
    pub walk_in: WalkInCustomer,
    pub credit_form: CreditRequestForm,
    pub phase: CheckoutPhase,
    /// Record of the last completed sale, shown in the success dialog.
    pub last_sale: Option<SaleRecord>,
    pub success_dialog_open: bool,

    branch_id: i64,
}

impl Composer {
    /// Fresh session for a branch and user. `today` anchors the credit
    /// form's first-installment default.
    pub fn new(branch_id: i64, user_id: i64, today: NaiveDate) -> Self {
        Composer {
            cart: Cart::new(),
            payment_method: PaymentMethod::default(),
            voucher_type: Some(VoucherType::default()),
            payment_reference: String::new(),
            selected_customer: None,
            walk_in: WalkInCustomer::default(),
            credit_form: CreditRequestForm::new(branch_id, user_id, today),
            phase: CheckoutPhase::Editable,
            last_sale: None,
            success_dialog_open: false,
            branch_id,
        }
    }

    // =========================================================================
    // Cart Mutators
    // =========================================================================

    pub fn add_item(&mut self, item: &CatalogItem) {
        self.cart.add(item);
        debug!(item = %item.name, "item added to cart");
        self.recompute();
    }

    pub fn set_quantity(&mut self, key: &ItemKey, quantity: i64) {
        self.cart.update_quantity(key, quantity);
        self.recompute();
    }

    pub fn set_price(&mut self, key: &ItemKey, amount: f64, role: PriceRole) {
        self.cart.update_price(key, amount, role);
        self.recompute();
    }

    pub fn remove_item(&mut self, key: &ItemKey) {
        self.cart.remove(key);
        self.recompute();
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.recompute();
    }

    // =========================================================================
    // Payment Context Mutators
    // =========================================================================

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
        self.recompute();
    }

    pub fn set_voucher_type(&mut self, voucher: Option<VoucherType>) {
        self.voucher_type = voucher;
    }

    pub fn set_payment_reference(&mut self, reference: impl Into<String>) {
        self.payment_reference = reference.into();
    }

    /// Picks (or clears) the registered customer. Walk-in fields are kept
    /// as typed; they only matter when no customer is selected.
    pub fn select_customer(&mut self, customer: Option<Customer>) {
        self.selected_customer = customer;
        self.recompute();
    }

    pub fn set_walk_in(&mut self, walk_in: WalkInCustomer) {
        self.walk_in = walk_in;
    }

    // =========================================================================
    // Checkout Phase
    // =========================================================================

    /// Opens the confirmation dialog. Unconditional; the gate only runs
    /// when the sale is actually submitted.
    pub fn begin_checkout(&mut self) {
        self.phase = CheckoutPhase::Confirming;
    }

    /// Closes the confirmation dialog without touching the sale.
    pub fn cancel_checkout(&mut self) {
        self.phase = CheckoutPhase::Editable;
    }

    /// Borrowed gate view of the current state.
    pub fn sale_context(&self) -> SaleContext<'_> {
        SaleContext {
            cart: &self.cart,
            payment_method: self.payment_method,
            voucher_type: self.voucher_type,
            payment_reference: &self.payment_reference,
            customer_id: self.selected_customer.as_ref().map(|c| c.id),
            walk_in: &self.walk_in,
        }
    }

    // =========================================================================
    // Derived State
    // =========================================================================

    /// Re-syncs the credit proposal with the cart and customer context.
    /// Called at the end of every mutator that can change either.
    fn recompute(&mut self) {
        let customer_id = self.selected_customer.as_ref().map(|c| c.id);
        self.credit_form
            .sync_context(self.branch_id, customer_id, self.cart.total());
        self.credit_form.sync_lines(&self.cart);
    }

    /// Clears the composed sale after a successful submission.
    ///
    /// All-or-nothing: cart, payment context, customer attribution, and
    /// dialog phase all return to their initial values so the next sale
    /// never inherits stale context. `last_sale` survives for the
    /// success dialog.
    pub fn reset_after_sale(&mut self, record: SaleRecord, today: NaiveDate) {
        let user_id = self.credit_form.requested_by_id;
        self.cart.clear();
        self.payment_method = PaymentMethod::default();
        self.voucher_type = Some(VoucherType::default());
        self.payment_reference.clear();
        self.selected_customer = None;
        self.walk_in = WalkInCustomer::default();
        self.credit_form = CreditRequestForm::new(self.branch_id, user_id, today);
        self.phase = CheckoutPhase::Editable;
        self.last_sale = Some(record);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
