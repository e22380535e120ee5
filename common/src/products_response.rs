//! Wire bodies of the product read endpoint and the client-side result model.

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Successful body of `GET /api/daily-products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub products: Vec<Product>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub can_access_competitive: bool,
}

/// Error body. A 403 body may carry a restricted preview in the optional
/// fields; older servers sent the preview under `cards`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, alias = "cards", skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: Option<String>) -> Self {
        Self { error: error.into(), details, ..Self::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    #[default]
    Full,
    Restricted,
}

/// One page of results as the session renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryResult {
    pub items: Vec<Product>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub access_level: AccessLevel,
}

/// `ceil(total_count / page_size)`; zero page size yields zero pages.
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(total_count.div_ceil(page_size as u64)).unwrap_or(u32::MAX)
}

impl From<ProductsResponse> for QueryResult {
    fn from(response: ProductsResponse) -> Self {
        Self {
            items: response.products,
            total_count: response.total_count,
            page: response.page,
            page_size: response.page_size,
            total_pages: response.total_pages,
            access_level: if response.can_access_competitive { AccessLevel::Full } else { AccessLevel::Restricted },
        }
    }
}
