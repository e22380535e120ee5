use axum::Json;
use axum::extract::State;
use common::facet_values::CategoryCatalog;

use crate::server::AppState;

/// Every category with the product types selectable in it.
pub async fn categories(State(state): State<AppState>) -> Json<Vec<CategoryCatalog>> {
    let catalog = state
        .facets
        .list_categories()
        .into_iter()
        .map(|category| CategoryCatalog { types: state.facets.list_types(category.category_id), category })
        .collect();
    Json(catalog)
}
