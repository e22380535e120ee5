use std::sync::Arc;

use common::catalog_const::{self, TOP_TIER_RARITIES};
use common::facet_values::{CategoryId, CategoryOption, FacetKey, FacetValue, FilterOptions, SetEraOption};

use crate::db_utils::ttl_cache::{CacheMode, TtlCache};
use crate::facet_catalog::facet_source::FacetSource;
use crate::facet_catalog::rarity_order::order_rarities;

/// Facet lookups for one process, cached per category.
pub struct FacetCatalog {
    source: Arc<dyn FacetSource>,
    cache: TtlCache<CategoryId, FilterOptions>,
}

impl FacetCatalog {
    pub fn new(source: Arc<dyn FacetSource>, mode: CacheMode) -> Self {
        Self { source, cache: TtlCache::new(mode) }
    }

    pub fn list_categories(&self) -> Vec<CategoryOption> {
        catalog_const::list_categories()
    }

    pub fn list_types(&self, category: CategoryId) -> Vec<FacetValue> {
        catalog_const::list_types(category)
    }

    pub async fn list_rarities(&self, category: CategoryId) -> anyhow::Result<Vec<FacetValue>> {
        Ok(self.filter_options(category).await?.rarities)
    }

    pub async fn list_set_eras(&self, category: CategoryId) -> anyhow::Result<Vec<SetEraOption>> {
        Ok(self.filter_options(category).await?.set_eras)
    }

    pub async fn filter_options(&self, category: CategoryId) -> anyhow::Result<FilterOptions> {
        if !catalog_const::is_selectable_category(category) {
            return Ok(FilterOptions::default());
        }
        let (options, hit) = self.cache.get_or_try_load(category, || self.load_filter_options(category)).await?;
        if !hit {
            tracing::info!(
                "loaded filter options for category {category}: {} rarities, {} set eras",
                options.rarities.len(),
                options.set_eras.len()
            );
        }
        Ok(options)
    }

    async fn load_filter_options(&self, category: CategoryId) -> anyhow::Result<FilterOptions> {
        let (rarities, groups) = futures::try_join!(self.source.rarities(category), self.source.groups(category))?;
        let set_eras = groups
            .into_iter()
            .map(|g| SetEraOption { label: g.name, value: FacetKey::Id(g.group_id), subgroups: Vec::new() })
            .collect();
        Ok(FilterOptions { rarities: order_rarities(rarities, &TOP_TIER_RARITIES), set_eras })
    }
}
