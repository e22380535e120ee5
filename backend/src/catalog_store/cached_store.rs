use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog_store::{CatalogStore, StorePage};
use crate::db_utils::ttl_cache::{CacheMode, TtlCache};
use crate::query_compiler::StoreQuery;

/// Result cache in front of another store, keyed by the canonical query text.
pub struct CachedCatalogStore {
    inner: Arc<dyn CatalogStore>,
    cache: TtlCache<String, StorePage>,
}

impl CachedCatalogStore {
    pub fn new(inner: Arc<dyn CatalogStore>, mode: CacheMode) -> Self {
        Self { inner, cache: TtlCache::new(mode) }
    }
}

#[async_trait]
impl CatalogStore for CachedCatalogStore {
    async fn query(&self, query: &StoreQuery) -> anyhow::Result<StorePage> {
        let query_text = query.to_string();
        let key = sha256::digest(query_text.as_str());
        let (page, hit) = self.cache.get_or_try_load(key, || self.inner.query(query)).await?;
        if hit {
            tracing::info!("catalog cache hit: {query_text}");
        } else {
            tracing::info!("catalog cache miss: {query_text}");
        }
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::catalog_store::memory_store::tests::sample_store;
    use crate::query_compiler::compile;
    use common::url_codec::decode;

    struct CountingStore {
        inner: crate::catalog_store::MemoryCatalogStore,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogStore for CountingStore {
        async fn query(&self, query: &StoreQuery) -> anyhow::Result<StorePage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.query(query).await
        }
    }

    fn counting() -> Arc<CountingStore> {
        Arc::new(CountingStore { inner: sample_store(), calls: AtomicUsize::new(0) })
    }

    #[tokio::test(start_paused = true)]
    async fn identical_queries_hit_until_expiry() {
        let source = counting();
        let store = CachedCatalogStore::new(source.clone(), CacheMode::with_ttl(Duration::from_secs(3600)));
        let query = compile(&decode("category=3")).expect("valid");

        let first = store.query(&query).await.expect("query");
        let second = store.query(&query).await.expect("query");
        assert_eq!(first, second);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        let other = compile(&decode("category=3&page=2")).expect("valid");
        store.query(&other).await.expect("query");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);

        tokio::time::advance(Duration::from_secs(3601)).await;
        store.query(&query).await.expect("query");
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn disabled_mode_always_queries() {
        let source = counting();
        let store = CachedCatalogStore::new(source.clone(), CacheMode::Disabled);
        let query = compile(&decode("category=3")).expect("valid");
        store.query(&query).await.expect("query");
        store.query(&query).await.expect("query");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
