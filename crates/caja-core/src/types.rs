//! # Domain Types
//!
//! Core domain types used throughout Caja POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │   CatalogItem   │   │   SalePayload   │   │   SaleRecord    │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id + source    │   │  actor/branch   │   │  id             │        │
//! │  │  stock lots     │   │  sale lines     │   │  date + time    │        │
//! │  │  price tiers    │   │  walk-in bundle │   │  total          │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    PriceRole    │   │  PaymentMethod  │   │   VoucherType   │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  PUBLICO        │   │  CONTADO        │   │  RECIBO         │        │
//! │  │  MAYORISTA ...  │   │  TARJETA ...    │   │  FACTURA        │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Naming
//! The backend speaks Spanish (`cantidad`, `sucursalId`, `metodoPago`, ...).
//! Rust field names stay English; `#[serde(rename = ...)]` pins the wire
//! contract so a backend round-trip is byte-compatible with the deployed
//! frontend.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Catalog Source
// =============================================================================

/// Which catalog a purchasable entity came from.
///
/// A base product and a packaged "presentation" variant may share the same
/// numeric id; the source tag is what keeps them distinct (see
/// [`crate::cart::ItemKey`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// A base product (`"producto"` on the wire).
    Product,
    /// A packaged presentation of a product (`"presentacion"` on the wire).
    Presentation,
}

impl Default for CatalogSource {
    fn default() -> Self {
        CatalogSource::Product
    }
}

// =============================================================================
// Price Tiers
// =============================================================================

/// Customer-class-based price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PriceRole {
    #[serde(rename = "PUBLICO")]
    Public,
    #[serde(rename = "MAYORISTA")]
    Wholesale,
    #[serde(rename = "ESPECIAL")]
    Special,
    #[serde(rename = "DISTRIBUIDOR")]
    Distributor,
    #[serde(rename = "PROMOCION")]
    Promotion,
    #[serde(rename = "CLIENTE_ESPECIAL")]
    SpecialCustomer,
}

impl Default for PriceRole {
    fn default() -> Self {
        PriceRole::Public
    }
}

/// One price tier of a catalog item.
///
/// The backend serves `precio` as a decimal number (sub-cent amounts are
/// legal for negotiated tiers); see [`crate::money`] for the rounding rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceEntry {
    pub id: i64,
    #[serde(rename = "precio")]
    pub amount: f64,
    #[serde(rename = "rol")]
    pub role: PriceRole,
}

// =============================================================================
// Stock
// =============================================================================

/// One stock lot of a catalog item.
///
/// Dates are ISO timestamps passed through for display; the core only
/// sums `quantity` (see [`crate::cart::remaining_stock`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockLot {
    pub id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "fechaIngreso", default)]
    pub intake_date: Option<String>,
    #[serde(rename = "fechaVencimiento", default)]
    pub expiry_date: Option<String>,
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A purchasable entity as browsed on the POS screen.
///
/// Read-only to this crate: the cart snapshots what it needs at add time
/// (name, price list, stock lots) and never mutates the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    pub id: i64,
    pub source: CatalogSource,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "codigoProducto", default)]
    pub item_code: String,
    #[serde(rename = "stock", default)]
    pub stock_lots: Vec<StockLot>,
    #[serde(rename = "precios", default)]
    pub prices: Vec<PriceEntry>,
    /// Image URLs, passed through for the image dialog.
    #[serde(rename = "imagenes", default)]
    pub images: Vec<String>,
}

impl CatalogItem {
    /// Total stock across all lots (before cart reservations).
    pub fn total_stock(&self) -> i64 {
        self.stock_lots.iter().map(|lot| lot.quantity).sum()
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellidos", default)]
    pub surname: String,
    #[serde(rename = "telefono", default)]
    pub phone: String,
    /// National identity document (DPI).
    #[serde(rename = "dpi", default)]
    pub national_id: String,
    /// Tax identification number (NIT).
    #[serde(rename = "nit", default)]
    pub tax_id: String,
    #[serde(rename = "direccion", default)]
    pub address: String,
    /// Internet service IP, shown in the customer picker label.
    #[serde(rename = "iPInternet", default)]
    pub internet_ip: Option<String>,
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    /// Cash at the counter (`CONTADO`). The reset default after every sale.
    #[serde(rename = "CONTADO")]
    Cash,
    /// Card on an external terminal.
    #[serde(rename = "TARJETA")]
    Card,
    /// Bank transfer. Requires a non-empty payment reference before the
    /// confirm control is enabled (see [`crate::checkout`]).
    #[serde(rename = "TRANSFERENCIA")]
    Transfer,
    /// Deferred payment via a credit-authorization request instead of an
    /// immediate sale (see [`crate::credit`]).
    #[serde(rename = "CREDITO")]
    Credit,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

// =============================================================================
// Voucher Type
// =============================================================================

/// The kind of proof-of-purchase document to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum VoucherType {
    #[serde(rename = "RECIBO")]
    Receipt,
    #[serde(rename = "FACTURA")]
    Invoice,
}

impl Default for VoucherType {
    fn default() -> Self {
        VoucherType::Receipt
    }
}

// =============================================================================
// Walk-in Customer
// =============================================================================

/// An unregistered buyer captured ad hoc at sale time.
///
/// Above the monetary threshold (see
/// [`crate::checkout::CUSTOMER_REQUIRED_THRESHOLD`]) a sale must carry
/// either a registered customer or at least the walk-in name and phone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WalkInCustomer {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellidos")]
    pub surname: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "dpi")]
    pub national_id: String,
    #[serde(rename = "nit")]
    pub tax_id: String,
    #[serde(rename = "observaciones")]
    pub notes: String,
    /// Device identifier for phone sales.
    #[serde(rename = "imei")]
    pub device_imei: String,
}

impl WalkInCustomer {
    /// True when both name and phone are present after trimming.
    pub fn has_contact_info(&self) -> bool {
        !self.name.trim().is_empty() && !self.phone.trim().is_empty()
    }

    /// Returns a copy with every field trimmed, as sent on the wire.
    pub fn trimmed(&self) -> WalkInCustomer {
        WalkInCustomer {
            name: self.name.trim().to_string(),
            surname: self.surname.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            national_id: self.national_id.trim().to_string(),
            tax_id: self.tax_id.trim().to_string(),
            notes: self.notes.trim().to_string(),
            device_imei: self.device_imei.trim().to_string(),
        }
    }
}

// =============================================================================
// Sale Payload
// =============================================================================

/// One `{quantity, selected price id, product-or-presentation id}` triple.
///
/// `product_id` and `presentation_id` are mutually exclusive; exactly one is
/// serialized, chosen by the cart entry's source kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleLine {
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "selectedPriceId")]
    pub selected_price_id: i64,
    #[serde(rename = "productoId", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(rename = "presentacionId", skip_serializing_if = "Option::is_none")]
    pub presentation_id: Option<i64>,
}

/// The terminal artifact submitted to the sale-creation endpoint.
///
/// Constructed fresh on each submission attempt and never persisted
/// client-side. Walk-in fields are flattened at the top level - that is the
/// backend contract, not a modeling choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalePayload {
    #[serde(rename = "actorRol")]
    pub actor_role: String,
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    #[serde(rename = "sucursalId")]
    pub branch_id: i64,
    #[serde(rename = "clienteId")]
    pub customer_id: Option<i64>,
    #[serde(rename = "productos")]
    pub lines: Vec<SaleLine>,
    #[serde(rename = "metodoPago")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "tipoComprobante")]
    pub voucher_type: VoucherType,
    #[serde(rename = "referenciaPago")]
    pub payment_reference: String,
    #[serde(rename = "monto")]
    pub total: f64,
    #[serde(flatten)]
    pub walk_in: WalkInCustomer,
}

// =============================================================================
// Sale Record
// =============================================================================

/// The created sale returned by the backend, kept for receipt display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleRecord {
    pub id: i64,
    #[serde(rename = "clienteId", default)]
    pub customer_id: Option<i64>,
    #[serde(rename = "fechaVenta")]
    pub sale_date: String,
    #[serde(rename = "horaVenta", default)]
    pub sale_time: String,
    #[serde(rename = "totalVenta")]
    pub total: f64,
    #[serde(rename = "sucursalId")]
    pub branch_id: i64,
    #[serde(rename = "nombreClienteFinal", default)]
    pub walk_in_name: Option<String>,
    #[serde(rename = "telefonoClienteFinal", default)]
    pub walk_in_phone: Option<String>,
    #[serde(rename = "direccionClienteFinal", default)]
    pub walk_in_address: Option<String>,
    #[serde(rename = "imei", default)]
    pub device_imei: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_role_wire_values() {
        assert_eq!(
            serde_json::to_string(&PriceRole::Wholesale).unwrap(),
            "\"MAYORISTA\""
        );
        assert_eq!(
            serde_json::from_str::<PriceRole>("\"CLIENTE_ESPECIAL\"").unwrap(),
            PriceRole::SpecialCustomer
        );
    }

    #[test]
    fn test_payment_method_default_is_cash() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cash).unwrap(),
            "\"CONTADO\""
        );
    }

    #[test]
    fn test_voucher_default_is_receipt() {
        assert_eq!(VoucherType::default(), VoucherType::Receipt);
    }

    #[test]
    fn test_sale_line_serializes_exactly_one_id() {
        let line = SaleLine {
            quantity: 2,
            selected_price_id: 7,
            product_id: Some(14),
            presentation_id: None,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["productoId"], 14);
        assert!(json.get("presentacionId").is_none());
    }

    #[test]
    fn test_walk_in_contact_info() {
        let mut walk_in = WalkInCustomer::default();
        assert!(!walk_in.has_contact_info());

        walk_in.name = "Ana".to_string();
        assert!(!walk_in.has_contact_info());

        walk_in.phone = "555".to_string();
        assert!(walk_in.has_contact_info());

        walk_in.name = "   ".to_string();
        assert!(!walk_in.has_contact_info());
    }

    #[test]
    fn test_catalog_item_total_stock() {
        let item = CatalogItem {
            id: 1,
            source: CatalogSource::Product,
            name: "Cable UTP".to_string(),
            description: String::new(),
            item_code: "UTP-05".to_string(),
            stock_lots: vec![
                StockLot {
                    id: 1,
                    quantity: 3,
                    intake_date: None,
                    expiry_date: None,
                },
                StockLot {
                    id: 2,
                    quantity: 4,
                    intake_date: None,
                    expiry_date: None,
                },
            ],
            prices: vec![],
            images: vec![],
        };
        assert_eq!(item.total_stock(), 7);
    }

    #[test]
    fn test_sale_payload_wire_names() {
        let payload = SalePayload {
            actor_role: "VENDEDOR".to_string(),
            user_id: 3,
            branch_id: 1,
            customer_id: None,
            lines: vec![],
            payment_method: PaymentMethod::Transfer,
            voucher_type: VoucherType::Invoice,
            payment_reference: "B-0012".to_string(),
            total: 150.0,
            walk_in: WalkInCustomer::default(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["metodoPago"], "TRANSFERENCIA");
        assert_eq!(json["tipoComprobante"], "FACTURA");
        assert_eq!(json["sucursalId"], 1);
        assert_eq!(json["monto"], 150.0);
        // walk-in bundle is flattened to the top level
        assert_eq!(json["nombre"], "");
        assert_eq!(json["imei"], "");
    }
}
