//! # caja-api: Backend Client for Caja POS
//!
//! This crate binds the terminal to the central REST backend. Every
//! persistent effect of a point-of-sale session - catalog reads, sale
//! creation, special-price requests, credit authorizations - travels
//! through here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Caja POS Data Flow                               │
//! │                                                                         │
//! │  caja-terminal (orchestrator, session state)                            │
//! │       │                                                                 │
//! │       ▼   via the SaleGateway trait                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     caja-api (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌───────────────┐   ┌──────────────────┐ │   │
//! │  │   │  ApiClient   │   │  Endpoints    │   │  ApiError        │ │   │
//! │  │   │ (client.rs)  │   │ catalog.rs    │   │ (error.rs)       │ │   │
//! │  │   │              │   │ customers.rs  │   │                  │ │   │
//! │  │   │ reqwest +    │◄──│ sales.rs      │   │ Http / Network / │ │   │
//! │  │   │ base URL     │   │ requests.rs   │   │ Decode           │ │   │
//! │  │   └──────────────┘   └───────────────┘   └──────────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Central backend (NestJS)                                               │
//! │    GET  products/get-products-presentations-for-pos                     │
//! │    GET  client/get-all-customers                                        │
//! │    POST venta                                                           │
//! │    POST price-request                                                   │
//! │    POST credito-authorization/create-authorization                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - Shared HTTP client with get/post helpers
//! - [`error`] - API error types and user-facing message extraction
//! - [`catalog`] - Paginated catalog queries
//! - [`customers`] - Registered-customer directory
//! - [`sales`] - Sale creation
//! - [`requests`] - Special-price and credit authorization requests
//! - [`gateway`] - The `SaleGateway` port implemented by `ApiClient`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use caja_api::{ApiClient, CatalogQuery, SaleGateway};
//!
//! let client = ApiClient::new("https://pos.example.com/api")?;
//! let page = client.fetch_catalog(&CatalogQuery::for_branch(1)).await?;
//! let record = client.create_sale(&payload).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod client;
pub mod customers;
pub mod error;
pub mod gateway;
pub mod requests;
pub mod sales;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{CatalogPage, CatalogQuery, CatalogTotals, PageMeta};
pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use gateway::SaleGateway;
pub use requests::PriceRequestPayload;
