//! HTTP read endpoints and their module exports.

pub mod access;

mod categories;
pub use categories::categories;

mod filter_options;
pub use filter_options::filter_options;

pub mod products;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::products_response::ErrorResponse;

pub(crate) fn error_response(status: StatusCode, error: &str, details: Option<String>) -> Response {
    (status, Json(ErrorResponse::new(error, details))).into_response()
}
