//! Router assembly and shared request state.

use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::get;

use crate::api::access::AccessPolicy;
use crate::api::{categories, filter_options, products::daily_products};
use crate::catalog_store::{CachedCatalogStore, CatalogStore, ClickhouseCatalogStore, MemoryCatalogStore};
use crate::config::{BackendConfig, CatalogBackend};
use crate::facet_catalog::{FacetCatalog, FacetSource};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub facets: Arc<FacetCatalog>,
    pub access: AccessPolicy,
}

impl AppState {
    /// Wires a store that also serves facets, with both caches in `config.cache_mode`.
    pub fn new<S>(source: Arc<S>, config: &BackendConfig) -> Self
    where
        S: CatalogStore + FacetSource + 'static,
    {
        let store: Arc<dyn CatalogStore> = Arc::new(CachedCatalogStore::new(source.clone(), config.cache_mode));
        let facets = Arc::new(FacetCatalog::new(source, config.cache_mode));
        Self { store, facets, access: AccessPolicy::from_header_name(config.entitlement_header.clone()) }
    }
}

pub async fn build_state(config: &BackendConfig) -> anyhow::Result<AppState> {
    let state = match &config.catalog_backend {
        CatalogBackend::Clickhouse => {
            tracing::info!("catalog backend: clickhouse at {}", config.clickhouse.url);
            AppState::new(Arc::new(ClickhouseCatalogStore::new(&config.clickhouse)), config)
        }
        CatalogBackend::Memory { seed_path: Some(path) } => {
            tracing::info!("catalog backend: memory seeded from {}", path.display());
            AppState::new(Arc::new(MemoryCatalogStore::from_seed_file(path).await?), config)
        }
        CatalogBackend::Memory { seed_path: None } => {
            tracing::warn!("catalog backend: empty memory catalog");
            AppState::new(Arc::new(MemoryCatalogStore::default()), config)
        }
    };
    Ok(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let t0 = std::time::Instant::now();
    let response = next.run(request).await;
    tracing::info!("{} {} -> {} in {}ms", method, uri, response.status(), t0.elapsed().as_millis());
    response
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/daily-products", get(daily_products))
        .route("/api/filter-options", get(filter_options))
        .route("/api/categories", get(categories))
        .layer(axum::middleware::from_fn(log_requests))
        .with_state(state)
}
