//! Facet source boundary: raw facet data per category.

use async_trait::async_trait;
use common::facet_values::{CategoryId, GroupId};
use serde::{Deserialize, Serialize};

/// A set/era grouping of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductGroup {
    pub group_id: GroupId,
    pub name: String,
    pub category_id: CategoryId,
    /// Unix seconds.
    #[serde(default)]
    pub published_on: u64,
}

#[async_trait]
pub trait FacetSource: Send + Sync {
    /// Distinct non-empty rarities present in the category, in any order.
    async fn rarities(&self, category: CategoryId) -> anyhow::Result<Vec<String>>;

    /// Groups of the category, newest publication first.
    async fn groups(&self, category: CategoryId) -> anyhow::Result<Vec<ProductGroup>>;
}
