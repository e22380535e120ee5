use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::catalog_const::DEFAULT_CATEGORY_ID;
use common::facet_values::{CategoryId, FilterOptions};
use serde::Deserialize;

use crate::api::error_response;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct FilterOptionsParams {
    category: Option<String>,
}

async fn _filter_options(state: &AppState, category: CategoryId) -> anyhow::Result<FilterOptions> {
    state.facets.filter_options(category).await
}

pub async fn filter_options(State(state): State<AppState>, Query(params): Query<FilterOptionsParams>) -> Response {
    // unparseable ids fall back like the product endpoint does
    let category = params
        .category
        .and_then(|c| c.trim().parse::<CategoryId>().ok())
        .unwrap_or(DEFAULT_CATEGORY_ID);
    match _filter_options(&state, category).await {
        Ok(options) => Json(options).into_response(),
        Err(e) => {
            tracing::error!("filter_options: request failed: {:#?}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load filter options", None)
        }
    }
}
