//! # Authorization Request Endpoints
//!
//! Two escalation paths out of the sale screen:
//!
//! - **Special price** - the cashier wants to sell below the listed
//!   prices and asks a supervisor to approve a one-off amount.
//! - **Credit authorization** - the cart is proposed as a credit sale;
//!   a back-office user reviews the projected lines and installment plan.
//!
//! Both are fire-and-forget from the terminal's perspective: the request
//! is recorded server-side and resolved elsewhere.

use serde::Serialize;
use tracing::info;

use caja_core::CreditRequestForm;

use crate::client::ApiClient;
use crate::error::ApiResult;

const PRICE_REQUEST_PATH: &str = "price-request";
const CREDIT_REQUEST_PATH: &str = "credito-authorization/create-authorization";

/// Body of a special-price request.
#[derive(Debug, Clone, Serialize)]
pub struct PriceRequestPayload {
    #[serde(rename = "productoId")]
    pub product_id: i64,
    #[serde(rename = "precioSolicitado")]
    pub requested_price: f64,
    #[serde(rename = "solicitadoPorId")]
    pub requested_by_id: i64,
}

impl ApiClient {
    /// Asks a supervisor to approve a one-off price for a product.
    pub async fn submit_price_request(&self, payload: &PriceRequestPayload) -> ApiResult<()> {
        let _: serde_json::Value = self.post_json(PRICE_REQUEST_PATH, payload).await?;
        info!(
            product_id = payload.product_id,
            requested_price = payload.requested_price,
            "price request submitted"
        );
        Ok(())
    }

    /// Submits the cart as a credit authorization proposal.
    pub async fn submit_credit_request(&self, form: &CreditRequestForm) -> ApiResult<()> {
        let _: serde_json::Value = self.post_json(CREDIT_REQUEST_PATH, form).await?;
        info!(
            customer_id = ?form.customer_id,
            total = form.proposed_total,
            "credit authorization requested"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_request_wire_names() {
        let payload = PriceRequestPayload {
            product_id: 12,
            requested_price: 8.5,
            requested_by_id: 3,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["productoId"], 12);
        assert_eq!(json["precioSolicitado"], 8.5);
        assert_eq!(json["solicitadoPorId"], 3);
    }
}
