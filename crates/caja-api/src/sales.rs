//! # Sale Endpoint
//!
//! Creates the sale server-side. Stock movement, receipt numbering, and
//! credit-balance effects all happen in the backend transaction; the
//! terminal only sends the composed payload and shows the outcome.

use tracing::info;

use caja_core::{SalePayload, SaleRecord};

use crate::client::ApiClient;
use crate::error::ApiResult;

const SALE_PATH: &str = "venta";

impl ApiClient {
    /// Submits a composed sale. The returned record carries the
    /// server-assigned id and timestamps used by the success dialog.
    pub async fn submit_sale(&self, payload: &SalePayload) -> ApiResult<SaleRecord> {
        let record: SaleRecord = self.post_json(SALE_PATH, payload).await?;
        info!(sale_id = record.id, total = record.total, "sale created");
        Ok(record)
    }
}
