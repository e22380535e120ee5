use anyhow::Context;
use common::filter_state::FilterState;
use common::products_response::{ProductsResponse, total_pages};

use crate::catalog_store::CatalogStore;
use crate::query_compiler::compile;

/// Runs one filter state against the store. A [`crate::query_compiler::ValidationError`]
/// stays downcastable from the returned error.
pub async fn load_products(store: &dyn CatalogStore, state: &FilterState) -> anyhow::Result<ProductsResponse> {
    let query = compile(state)?;
    tracing::info!("load_products: {query}");
    let page = store.query(&query).await.context("catalog store query failed")?;
    Ok(ProductsResponse {
        total_pages: total_pages(page.total_count, state.page_size),
        products: page.items,
        total_count: page.total_count,
        page: state.page,
        page_size: state.page_size,
        can_access_competitive: true,
    })
}
