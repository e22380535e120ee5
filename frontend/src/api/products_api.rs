//! Client for the product read endpoint.

use async_trait::async_trait;
use common::filter_state::FilterState;
use common::products_response::{AccessLevel, ErrorResponse, ProductsResponse, QueryResult, total_pages};
use common::url_codec::encode_request;
use reqwest::StatusCode;
use thiserror::Error;

pub const DAILY_PRODUCTS_PATH: &str = "/api/daily-products";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// How one fetch ended, as the session consumes it.
#[derive(Debug)]
pub enum FetchOutcome {
    Success(QueryResult),
    /// Caller lacks the entitlement; carries whatever preview the server sent.
    AccessDenied(QueryResult),
    Failed(FetchError),
}

#[async_trait]
pub trait ProductsApi: Send + Sync {
    async fn fetch_products(&self, state: &FilterState) -> FetchOutcome;
}

#[derive(Debug, Clone)]
pub struct HttpProductsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProductsApi {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn products_url(&self, state: &FilterState) -> String {
        format!("{}{DAILY_PRODUCTS_PATH}?{}", self.base_url, encode_request(state))
    }

    async fn _fetch_products(&self, state: &FilterState) -> Result<FetchOutcome, FetchError> {
        let response = self.client.get(self.products_url(state)).send().await?;
        let status = response.status();
        let body = response.text().await?;
        match status {
            StatusCode::OK => {
                let result = QueryResult::from(serde_json::from_str::<ProductsResponse>(&body)?);
                match result.access_level {
                    AccessLevel::Full => Ok(FetchOutcome::Success(result)),
                    AccessLevel::Restricted => Ok(FetchOutcome::AccessDenied(result)),
                }
            }
            StatusCode::FORBIDDEN => {
                let denied = match serde_json::from_str::<ErrorResponse>(&body) {
                    Ok(denied) => denied,
                    Err(e) => {
                        tracing::warn!("unreadable access denied body, showing no preview: {e}");
                        ErrorResponse::default()
                    }
                };
                Ok(FetchOutcome::AccessDenied(restricted_result(denied, state)))
            }
            _ => Err(FetchError::Status { status: status.as_u16(), body }),
        }
    }
}

fn restricted_result(denied: ErrorResponse, state: &FilterState) -> QueryResult {
    let items = denied.products.unwrap_or_default();
    let total_count = denied.total_count.unwrap_or(items.len() as u64);
    QueryResult {
        total_pages: denied.total_pages.unwrap_or_else(|| total_pages(total_count, state.page_size)),
        items,
        total_count,
        page: state.page,
        page_size: state.page_size,
        access_level: AccessLevel::Restricted,
    }
}

#[async_trait]
impl ProductsApi for HttpProductsApi {
    async fn fetch_products(&self, state: &FilterState) -> FetchOutcome {
        match self._fetch_products(state).await {
            Ok(outcome) => outcome,
            Err(e) => FetchOutcome::Failed(e),
        }
    }
}
