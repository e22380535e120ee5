//! In-process catalog evaluating compiled predicates directly.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use common::facet_values::{CategoryId, GroupId, SortColumn, SortDirection};
use common::product::Product;
use serde::{Deserialize, Serialize};

use crate::catalog_store::{CatalogStore, StorePage};
use crate::facet_catalog::{FacetSource, ProductGroup};
use crate::query_compiler::{Literal, OrderBy, Predicate, StoreField, StoreQuery};

/// Seed file layout for the in-memory catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogSeed {
    pub groups: Vec<ProductGroup>,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogStore {
    groups: Vec<ProductGroup>,
    products: Vec<Product>,
    group_categories: HashMap<GroupId, CategoryId>,
}

impl MemoryCatalogStore {
    pub fn new(seed: CatalogSeed) -> Self {
        let group_categories = seed.groups.iter().map(|g| (g.group_id, g.category_id)).collect();
        Self { groups: seed.groups, products: seed.products, group_categories }
    }

    pub async fn from_seed_file(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Cannot read catalog seed {}", path.display()))?;
        let seed: CatalogSeed =
            serde_json::from_str(&raw).with_context(|| format!("Invalid catalog seed {}", path.display()))?;
        tracing::info!("Loaded catalog seed: {} groups, {} products", seed.groups.len(), seed.products.len());
        Ok(Self::new(seed))
    }

    /// Category through the group relation, falling back to the denormalized column.
    fn category_of(&self, product: &Product) -> CategoryId {
        self.group_categories.get(&product.group_id).copied().unwrap_or(product.category_id)
    }

    fn matches(&self, predicate: &Predicate, product: &Product) -> bool {
        match predicate {
            Predicate::And(clauses) => clauses.iter().all(|c| self.matches(c, product)),
            Predicate::Eq(field, value) => self.field_literal(*field, product).is_some_and(|v| &v == value),
            Predicate::In(field, values) => {
                self.field_literal(*field, product).is_some_and(|v| values.contains(&v))
            }
            Predicate::Contains(field, needle) => self
                .field_text(*field, product)
                .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase())),
            Predicate::Gte(field, bound) => number_field(*field, product).is_some_and(|v| v >= *bound),
            Predicate::Lt(field, bound) => number_field(*field, product).is_some_and(|v| v < *bound),
            Predicate::IsNotNull(field) => match number_field(*field, product) {
                Some(_) => true,
                None => self.field_text(*field, product).is_some(),
            },
        }
    }

    fn field_literal(&self, field: StoreField, product: &Product) -> Option<Literal> {
        match field {
            StoreField::Category => Some(Literal::Int(self.category_of(product) as u64)),
            StoreField::GroupId => Some(Literal::Int(product.group_id as u64)),
            StoreField::UpdatedAt => Some(Literal::Int(product.updated_at)),
            _ => self.field_text(field, product).map(|s| Literal::Text(s.to_string())),
        }
    }

    fn field_text<'a>(&self, field: StoreField, product: &'a Product) -> Option<&'a str> {
        match field {
            StoreField::ProductType => Some(&product.product_type),
            StoreField::Rarity => product.rarity.as_deref(),
            StoreField::Name => Some(&product.name),
            StoreField::SetName => product.set_name.as_deref(),
            _ => None,
        }
    }
}

fn number_field(field: StoreField, product: &Product) -> Option<f64> {
    match field {
        StoreField::MarketPrice => product.market_price,
        StoreField::PrevMarketPrice => product.prev_market_price,
        StoreField::DiffMarketPrice => product.diff_market_price,
        StoreField::DollarDiffMarketPrice => product.dollar_diff_market_price,
        StoreField::UpdatedAt => Some(product.updated_at as f64),
        _ => None,
    }
}

fn sort_column_of(field: StoreField) -> Option<SortColumn> {
    SortColumn::ALL.into_iter().find(|c| StoreField::from(*c) == field)
}

/// Nulls last in both directions; equal keys keep insertion order.
fn compare_products(a: &Product, b: &Product, order_by: &OrderBy) -> Ordering {
    let Some(column) = sort_column_of(order_by.field) else { return Ordering::Equal };
    match (a.sort_value(column), b.sort_value(column)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ordering = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            match order_by.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn query(&self, query: &StoreQuery) -> anyhow::Result<StorePage> {
        let mut matching = self.products.iter().filter(|p| self.matches(&query.predicate, p)).collect::<Vec<_>>();
        matching.sort_by(|a, b| compare_products(a, b, &query.order_by));
        let total_count = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(query.offset).unwrap_or(usize::MAX))
            .take(query.limit as usize)
            .cloned()
            .collect();
        Ok(StorePage { items, total_count })
    }
}

#[async_trait]
impl FacetSource for MemoryCatalogStore {
    async fn rarities(&self, category: CategoryId) -> anyhow::Result<Vec<String>> {
        let rarities = self
            .products
            .iter()
            .filter(|p| self.category_of(p) == category)
            .filter_map(|p| p.rarity.clone())
            .filter(|r| !r.is_empty())
            .collect::<BTreeSet<_>>();
        Ok(rarities.into_iter().collect())
    }

    async fn groups(&self, category: CategoryId) -> anyhow::Result<Vec<ProductGroup>> {
        let mut groups = self.groups.iter().filter(|g| g.category_id == category).cloned().collect::<Vec<_>>();
        groups.sort_by(|a, b| b.published_on.cmp(&a.published_on));
        Ok(groups)
    }
}
