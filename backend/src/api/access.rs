//! Entitlement gate for the product endpoint.

use axum::http::HeaderMap;
use common::catalog_const::RESTRICTED_PREVIEW_SIZE;
use common::product::Product;
use common::products_response::ErrorResponse;

/// Feature name a caller's entitlement header must list.
pub const TRENDS_FEATURE: &str = "trends";

pub const ACCESS_DENIED_MESSAGE: &str = "Access to competitive features is not allowed";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AccessPolicy {
    #[default]
    Open,
    /// Requests must carry this header with `trends` among its comma-separated values.
    RequireHeader(String),
}

impl AccessPolicy {
    pub fn from_header_name(header: Option<String>) -> Self {
        match header {
            Some(name) => AccessPolicy::RequireHeader(name),
            None => AccessPolicy::Open,
        }
    }

    pub fn allows(&self, headers: &HeaderMap) -> bool {
        match self {
            AccessPolicy::Open => true,
            AccessPolicy::RequireHeader(name) => headers
                .get_all(name.as_str())
                .iter()
                .filter_map(|v| v.to_str().ok())
                .flat_map(|v| v.split(','))
                .any(|feature| feature.trim().eq_ignore_ascii_case(TRENDS_FEATURE)),
        }
    }
}

/// Body of the 403 answer: placeholder rows on a single page.
pub fn restricted_preview() -> ErrorResponse {
    let products = (0..RESTRICTED_PREVIEW_SIZE).map(Product::placeholder).collect::<Vec<_>>();
    ErrorResponse {
        error: ACCESS_DENIED_MESSAGE.to_string(),
        details: None,
        total_count: Some(products.len() as u64),
        total_pages: Some(1),
        products: Some(products),
    }
}
