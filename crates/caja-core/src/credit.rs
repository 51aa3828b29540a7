//! # Credit Projection
//!
//! Derives credit-authorization requests from the cart.
//!
//! When the payment method is Credit, the sale is not submitted directly;
//! instead a credit-authorization payload is built from the cart and sent
//! for asynchronous approval. The line items and the context fields
//! (branch, customer, total) are kept reactively consistent with the cart:
//! the session layer calls [`CreditRequestForm::sync_lines`] and
//! [`CreditRequestForm::sync_context`] at the end of every mutating cart or
//! context operation, so no explicit user action is needed to refresh the
//! form.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Credit Reactivity                                    │
//! │                                                                         │
//! │  Cart mutation ──────────┐                                              │
//! │  Customer selection ─────┤──► recompute() ──► sync_context()            │
//! │  Branch change ──────────┘                    sync_lines()              │
//! │                                                                         │
//! │  CreditRequestForm = { branch, requester, customer?, total,             │
//! │                        term fields, lineas: [CreditLine...] }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::round2;
use crate::types::CatalogSource;

// =============================================================================
// Credit Line
// =============================================================================

/// One cart entry projected into the credit-request line shape.
///
/// `product_id` and `presentation_id` are mutually exclusive, chosen by the
/// entry's source kind - never both populated. The name snapshot decouples
/// the request from future catalog edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreditLine {
    #[serde(rename = "productoId", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(rename = "presentacionId", skip_serializing_if = "Option::is_none")]
    pub presentation_id: Option<i64>,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "precioUnitario")]
    pub unit_price: f64,
    #[serde(rename = "precioSeleccionadoId")]
    pub selected_price_id: i64,
    /// Line subtotal, rounded with the same rule as the order total.
    pub subtotal: f64,
    #[serde(rename = "nombreProductoSnapshot")]
    pub product_name_snapshot: String,
    #[serde(
        rename = "presentacionNombreSnapshot",
        skip_serializing_if = "Option::is_none"
    )]
    pub presentation_name_snapshot: Option<String>,
    /// Reserved by the wire contract; the POS screen never fills it.
    #[serde(rename = "codigoBarrasSnapshot", skip_serializing_if = "Option::is_none")]
    pub barcode_snapshot: Option<String>,
}

/// Maps the ordered cart entries to credit lines.
///
/// Pure; recomputed whenever the cart changes (see module docs).
pub fn project_credit_lines(cart: &Cart) -> Vec<CreditLine> {
    cart.entries()
        .iter()
        .map(|entry| {
            let is_presentation = entry.key.source == CatalogSource::Presentation;

            CreditLine {
                product_id: (!is_presentation).then_some(entry.key.id),
                presentation_id: is_presentation.then_some(entry.key.id),
                quantity: entry.quantity,
                unit_price: entry.selected_price,
                selected_price_id: entry.selected_price_id,
                subtotal: round2(entry.quantity as f64 * entry.selected_price),
                product_name_snapshot: entry.name.clone(),
                presentation_name_snapshot: is_presentation.then(|| entry.name.clone()),
                barcode_snapshot: None,
            }
        })
        .collect()
}

// =============================================================================
// Term Enums
// =============================================================================

/// Interest mode of a proposed credit plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InterestMode {
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "PORCENTAJE")]
    Percent,
}

impl Default for InterestMode {
    fn default() -> Self {
        InterestMode::None
    }
}

/// How installments are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InstallmentPlan {
    /// Equal installments (`IGUALES`).
    #[serde(rename = "IGUALES")]
    Equal,
    /// Hand-edited installment amounts.
    #[serde(rename = "PERSONALIZADO")]
    Custom,
}

impl Default for InstallmentPlan {
    fn default() -> Self {
        InstallmentPlan::Equal
    }
}

// =============================================================================
// Credit Request Form
// =============================================================================

/// Days until the first installment when no date has been proposed.
const DEFAULT_FIRST_INSTALLMENT_DAYS: i64 = 30;

/// The credit-authorization payload under composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreditRequestForm {
    #[serde(rename = "sucursalId")]
    pub branch_id: i64,
    #[serde(rename = "solicitadoPorId")]
    pub requested_by_id: i64,
    #[serde(rename = "clienteId")]
    pub customer_id: Option<i64>,
    #[serde(rename = "nombreCliente")]
    pub customer_name: String,
    #[serde(rename = "telefonoCliente")]
    pub customer_phone: String,
    #[serde(rename = "direccionCliente")]
    pub customer_address: String,
    /// Proposed total, mirrored from the cart total on every recompute.
    #[serde(rename = "totalPropuesto")]
    pub proposed_total: f64,
    #[serde(rename = "cuotaInicialPropuesta")]
    pub down_payment: f64,
    #[serde(rename = "cuotasTotalesPropuestas")]
    pub installment_count: u32,
    #[serde(rename = "interesTipo")]
    pub interest_mode: InterestMode,
    #[serde(rename = "interesPorcentaje")]
    pub interest_percent: f64,
    #[serde(rename = "planCuotaModo")]
    pub installment_plan: InstallmentPlan,
    #[serde(rename = "diasEntrePagos")]
    pub days_between_payments: u32,
    #[serde(rename = "fechaPrimeraCuota")]
    #[ts(as = "String")]
    pub first_installment_date: NaiveDate,
    #[serde(rename = "comentario")]
    pub comment: String,
    #[serde(rename = "garantiaMeses")]
    pub warranty_months: u32,
    /// Hand-edited installment amounts when the plan is Custom.
    #[serde(rename = "cuotasPropuestas")]
    pub proposed_installments: Vec<f64>,
    #[serde(rename = "lineas")]
    pub lines: Vec<CreditLine>,
}

impl CreditRequestForm {
    /// Creates an empty form for the given branch and requesting user.
    ///
    /// `today` is passed in by the session layer; this crate never reads
    /// the clock.
    pub fn new(branch_id: i64, requested_by_id: i64, today: NaiveDate) -> Self {
        CreditRequestForm {
            branch_id,
            requested_by_id,
            customer_id: None,
            customer_name: String::new(),
            customer_phone: String::new(),
            customer_address: String::new(),
            proposed_total: 0.0,
            down_payment: 0.0,
            installment_count: 2,
            interest_mode: InterestMode::default(),
            interest_percent: 0.0,
            installment_plan: InstallmentPlan::default(),
            days_between_payments: 30,
            first_installment_date: today + Duration::days(DEFAULT_FIRST_INSTALLMENT_DAYS),
            comment: String::new(),
            warranty_months: 0,
            proposed_installments: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Re-syncs branch, customer and proposed total from composer context.
    pub fn sync_context(&mut self, branch_id: i64, customer_id: Option<i64>, cart_total: f64) {
        self.branch_id = branch_id;
        self.customer_id = customer_id;
        self.proposed_total = round2(cart_total);
    }

    /// Re-projects the line items from the cart.
    pub fn sync_lines(&mut self, cart: &Cart) {
        self.lines = project_credit_lines(cart);
    }

    /// Fills sensible term defaults when the payment method switches to
    /// Credit: 6 installments, 30 days apart, starting in 30 days.
    /// Values the cashier already set are left alone.
    pub fn apply_credit_defaults(&mut self, today: NaiveDate) {
        if self.installment_count == 0 {
            self.installment_count = 6;
        }
        if self.days_between_payments == 0 {
            self.days_between_payments = 30;
        }
        if self.first_installment_date <= today {
            self.first_installment_date = today + Duration::days(DEFAULT_FIRST_INSTALLMENT_DAYS);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
