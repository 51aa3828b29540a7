//! # HTTP Client
//!
//! Shared client wrapper around `reqwest` with JSON get/post helpers.
//! Endpoint modules build on these; nothing else in the workspace
//! touches `reqwest` directly.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};

/// Client for the Caja POS backend.
///
/// Cheap to clone; the inner `reqwest::Client` already shares its
/// connection pool.
///
/// ## Usage
/// ```rust,ignore
/// let client = ApiClient::new("https://pos.example.com/api");
/// let customers: Vec<Customer> = client.get_json("client/get-all-customers").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for the given base URL. A trailing slash on the
    /// base is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        Self::decode(response).await
    }

    /// GET `path` with query parameters and decode the JSON body.
    pub async fn get_json_with_query<Q: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
    ) -> ApiResult<T> {
        let url = self.url(path);
        debug!(%url, "GET with query");
        let response = self.http.get(&url).query(query).send().await?;
        Self::decode(response).await
    }

    /// POST `body` as JSON to `path` and decode the JSON response.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self.http.post(&url).json(body).send().await?;
        Self::decode(response).await
    }

    /// Translates a response into a decoded value or an [`ApiError`].
    ///
    /// Non-success statuses keep the raw body so `user_message()` can
    /// extract the backend's text later.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
