//! # Customer Directory Endpoint
//!
//! Full registered-customer listing. The terminal filters the list
//! locally in the picker dialog, so there is no server-side search here.

use caja_core::Customer;

use crate::client::ApiClient;
use crate::error::ApiResult;

const CUSTOMERS_PATH: &str = "client/get-all-customers";

impl ApiClient {
    /// Fetches every registered customer.
    pub async fn fetch_all_customers(&self) -> ApiResult<Vec<Customer>> {
        self.get_json(CUSTOMERS_PATH).await
    }
}
