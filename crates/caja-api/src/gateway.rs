//! # SaleGateway Port
//!
//! The trait the terminal orchestrator depends on instead of a concrete
//! HTTP client. Production wires in [`ApiClient`]; orchestrator tests
//! hand-roll a double that records calls and scripts outcomes.

use async_trait::async_trait;

use caja_core::{CreditRequestForm, Customer, SalePayload, SaleRecord};

use crate::catalog::{CatalogPage, CatalogQuery};
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::requests::PriceRequestPayload;

/// Backend operations a point-of-sale session needs.
#[async_trait]
pub trait SaleGateway: Send + Sync {
    /// One page of the branch catalog.
    async fn fetch_catalog(&self, query: &CatalogQuery) -> ApiResult<CatalogPage>;

    /// Every registered customer.
    async fn fetch_customers(&self) -> ApiResult<Vec<Customer>>;

    /// Creates the sale server-side.
    async fn create_sale(&self, payload: &SalePayload) -> ApiResult<SaleRecord>;

    /// Records a special-price request for supervisor review.
    async fn create_price_request(&self, payload: &PriceRequestPayload) -> ApiResult<()>;

    /// Records a credit authorization proposal.
    async fn create_credit_request(&self, form: &CreditRequestForm) -> ApiResult<()>;
}

#[async_trait]
impl SaleGateway for ApiClient {
    async fn fetch_catalog(&self, query: &CatalogQuery) -> ApiResult<CatalogPage> {
        self.fetch_catalog_page(query).await
    }

    async fn fetch_customers(&self) -> ApiResult<Vec<Customer>> {
        self.fetch_all_customers().await
    }

    async fn create_sale(&self, payload: &SalePayload) -> ApiResult<SaleRecord> {
        self.submit_sale(payload).await
    }

    async fn create_price_request(&self, payload: &PriceRequestPayload) -> ApiResult<()> {
        self.submit_price_request(payload).await
    }

    async fn create_credit_request(&self, form: &CreditRequestForm) -> ApiResult<()> {
        self.submit_credit_request(form).await
    }
}
