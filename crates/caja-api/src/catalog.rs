//! # Catalog Endpoint
//!
//! Paginated product/presentation listing for the sale screen.
//!
//! ## Request Shape
//! ```text
//! GET products/get-products-presentations-for-pos
//!     ?sucursalId=1&page=1&limit=10&q=coca
//!     &cats=3&cats=7&tipoEmpaque=2&codigoProveedor=ACME&priceRange=10-50
//! ```
//!
//! Only the branch, page, and limit always travel; search text and the
//! orthogonal filters are added when present so the server applies the
//! same defaults as an unfiltered listing.

use serde::Deserialize;

use caja_core::CatalogItem;

use crate::client::ApiClient;
use crate::error::ApiResult;

const CATALOG_PATH: &str = "products/get-products-presentations-for-pos";

/// Default page size of the sale screen grid.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

// =============================================================================
// Query
// =============================================================================

/// Filter set for a catalog request.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    pub branch_id: i64,
    pub page: u32,
    pub limit: u32,
    /// Debounced search text; empty means unfiltered.
    pub search: String,
    pub category_ids: Vec<i64>,
    pub packaging_type_ids: Vec<i64>,
    pub supplier_code: String,
    /// Raw `min-max` range string, as the backend expects it.
    pub price_range: String,
}

impl CatalogQuery {
    /// An unfiltered first page for the given branch.
    pub fn for_branch(branch_id: i64) -> Self {
        CatalogQuery {
            branch_id,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            search: String::new(),
            category_ids: Vec::new(),
            packaging_type_ids: Vec::new(),
            supplier_code: String::new(),
            price_range: String::new(),
        }
    }

    /// Flattens the query into wire key/value pairs.
    ///
    /// Repeated keys encode the array filters. Built by hand because the
    /// optional-filter rule (absent, not empty-valued) is part of the
    /// server contract.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("sucursalId".to_string(), self.branch_id.to_string()),
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];

        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("q".to_string(), search.to_string()));
        }
        for id in &self.category_ids {
            pairs.push(("cats".to_string(), id.to_string()));
        }
        for id in &self.packaging_type_ids {
            pairs.push(("tipoEmpaque".to_string(), id.to_string()));
        }
        if !self.supplier_code.is_empty() {
            pairs.push(("codigoProveedor".to_string(), self.supplier_code.clone()));
        }
        if !self.price_range.is_empty() {
            pairs.push(("priceRange".to_string(), self.price_range.clone()));
        }

        pairs
    }
}

// =============================================================================
// Response
// =============================================================================

/// Per-kind counts in the page metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogTotals {
    #[serde(rename = "productos")]
    pub products: u64,
    #[serde(rename = "presentaciones")]
    pub presentations: u64,
}

/// Pagination metadata echoed by the catalog endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    #[serde(default)]
    pub totals: CatalogTotals,
}

impl Default for PageMeta {
    fn default() -> Self {
        PageMeta {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            total_count: 0,
            total_pages: 1,
            totals: CatalogTotals::default(),
        }
    }
}

/// One page of catalog items.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogPage {
    pub data: Vec<CatalogItem>,
    pub meta: PageMeta,
}

// =============================================================================
// Endpoint
// =============================================================================

impl ApiClient {
    /// Fetches one page of the branch catalog.
    pub async fn fetch_catalog_page(&self, query: &CatalogQuery) -> ApiResult<CatalogPage> {
        self.get_json_with_query(CATALOG_PATH, &query.to_query_pairs())
            .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
