use axum::Json;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use common::url_codec::decode;

use crate::api::access::restricted_preview;
use crate::api::error_response;
use crate::api::products::load_products;
use crate::query_compiler::ValidationError;
use crate::server::AppState;

async fn _daily_products(state: &AppState, query: &str) -> anyhow::Result<Response> {
    let filter_state = decode(query);
    let response = load_products(state.store.as_ref(), &filter_state).await?;
    tracing::info!(
        "daily_products: page {}/{} ({} of {} products)",
        response.page,
        response.total_pages,
        response.products.len(),
        response.total_count
    );
    Ok(Json(response).into_response())
}

pub async fn daily_products(State(state): State<AppState>, headers: HeaderMap, RawQuery(query): RawQuery) -> Response {
    if !state.access.allows(&headers) {
        tracing::warn!("daily_products: caller lacks the trends entitlement, serving preview");
        return (StatusCode::FORBIDDEN, Json(restricted_preview())).into_response();
    }
    match _daily_products(&state, query.as_deref().unwrap_or_default()).await {
        Ok(response) => response,
        Err(e) => match e.downcast_ref::<ValidationError>() {
            Some(validation) => {
                tracing::warn!("daily_products: rejected query: {validation}");
                error_response(StatusCode::BAD_REQUEST, "Invalid query", Some(validation.to_string()))
            }
            None => {
                tracing::error!("daily_products: request failed: {:#?}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load products", None)
            }
        },
    }
}
