//! Catalog store boundary: runs compiled queries and returns one page of items.

use async_trait::async_trait;
use common::product::Product;

use crate::query_compiler::StoreQuery;

mod cached_store;
pub use cached_store::CachedCatalogStore;

mod clickhouse_store;
pub use clickhouse_store::ClickhouseCatalogStore;

mod memory_store;
pub use memory_store::{CatalogSeed, MemoryCatalogStore};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StorePage {
    pub items: Vec<Product>,
    pub total_count: u64,
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn query(&self, query: &StoreQuery) -> anyhow::Result<StorePage>;
}
