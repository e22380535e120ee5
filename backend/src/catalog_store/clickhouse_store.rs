//! ClickHouse-backed catalog store and facet source.
//!
//! Expected schema:
//! - `product_groups(group_id UInt32, name String, category_id UInt32, published_on DateTime)`
//! - `products(id UInt64, product_id UInt64, name String, clean_name Nullable(String),
//!   sub_type_name Nullable(String), set_name Nullable(String), image_url Nullable(String),
//!   url Nullable(String), rarity Nullable(String), product_type String, group_id UInt32,
//!   market_price Nullable(Float64), prev_market_price Nullable(Float64),
//!   diff_market_price Nullable(Float64), dollar_diff_market_price Nullable(Float64),
//!   updated_at DateTime)`

use anyhow::Context;
use async_trait::async_trait;
use common::facet_values::CategoryId;
use common::product::Product;
use serde::Deserialize;

use crate::catalog_store::{CatalogStore, StorePage};
use crate::config::ClickhouseConfig;
use crate::db_utils::clickhouse_utils::{bind_all, get_clickhouse_client};
use crate::facet_catalog::{FacetSource, ProductGroup};
use crate::query_compiler::StoreQuery;
use crate::query_compiler::sql::{SQL_FROM_CLAUSE, build_count_sql, build_select_sql};

#[derive(Debug, Clone, clickhouse::Row, Deserialize)]
struct ProductRow {
    id: u64,
    product_id: u64,
    name: String,
    clean_name: Option<String>,
    sub_type_name: Option<String>,
    set_name: Option<String>,
    image_url: Option<String>,
    url: Option<String>,
    rarity: Option<String>,
    product_type: String,
    group_id: u32,
    category_id: u32,
    market_price: Option<f64>,
    prev_market_price: Option<f64>,
    diff_market_price: Option<f64>,
    dollar_diff_market_price: Option<f64>,
    updated_at: u32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            product_id: row.product_id,
            name: row.name,
            clean_name: row.clean_name,
            sub_type_name: row.sub_type_name,
            set_name: row.set_name,
            image_url: row.image_url,
            url: row.url,
            rarity: row.rarity,
            product_type: row.product_type,
            group_id: row.group_id,
            category_id: row.category_id,
            market_price: row.market_price,
            prev_market_price: row.prev_market_price,
            diff_market_price: row.diff_market_price,
            dollar_diff_market_price: row.dollar_diff_market_price,
            updated_at: row.updated_at as u64,
        }
    }
}

#[derive(Debug, Clone, clickhouse::Row, Deserialize)]
struct GroupRow {
    group_id: u32,
    name: String,
    category_id: u32,
    published_on: u32,
}

#[derive(Clone)]
pub struct ClickhouseCatalogStore {
    client: clickhouse::Client,
}

impl ClickhouseCatalogStore {
    pub fn new(config: &ClickhouseConfig) -> Self {
        Self { client: get_clickhouse_client(config) }
    }
}

#[async_trait]
impl CatalogStore for ClickhouseCatalogStore {
    async fn query(&self, query: &StoreQuery) -> anyhow::Result<StorePage> {
        let select = build_select_sql(query);
        let count = build_count_sql(query);

        let t0 = std::time::Instant::now();
        let items = bind_all(self.client.query(&select.sql), &select.binds).fetch_all::<ProductRow>();
        let total_count = bind_all(self.client.query(&count.sql), &count.binds).fetch_one::<u64>();
        let (items, total_count) = futures::try_join!(items, total_count).context("catalog query failed")?;
        tracing::info!("catalog query: {} rows of {} in {}ms", items.len(), total_count, t0.elapsed().as_millis());

        Ok(StorePage { items: items.into_iter().map(Product::from).collect(), total_count })
    }
}

#[async_trait]
impl FacetSource for ClickhouseCatalogStore {
    async fn rarities(&self, category: CategoryId) -> anyhow::Result<Vec<String>> {
        let sql = format!(
            "
        SELECT DISTINCT assumeNotNull(p.rarity) AS rarity
        {SQL_FROM_CLAUSE}
        WHERE g.category_id = ?
          AND p.rarity IS NOT NULL
          AND p.rarity != ''
          AND position(p.rarity, ',') = 0
        ORDER BY rarity ASC
        "
        );
        let rarities = self
            .client
            .query(&sql)
            .bind(category)
            .fetch_all::<String>()
            .await
            .with_context(|| format!("Failed to list rarities for category {category}"))?;
        Ok(rarities)
    }

    async fn groups(&self, category: CategoryId) -> anyhow::Result<Vec<ProductGroup>> {
        let sql = "
        SELECT group_id, name, category_id, toUInt32(published_on) AS published_on
        FROM product_groups
        WHERE category_id = ?
        ORDER BY published_on DESC
        ";
        let rows = self
            .client
            .query(sql)
            .bind(category)
            .fetch_all::<GroupRow>()
            .await
            .with_context(|| format!("Failed to list groups for category {category}"))?;
        Ok(rows
            .into_iter()
            .map(|row| ProductGroup {
                group_id: row.group_id,
                name: row.name,
                category_id: row.category_id,
                published_on: row.published_on as u64,
            })
            .collect())
    }
}
