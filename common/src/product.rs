//! Catalog item model as served to clients.

use serde::{Deserialize, Serialize};

use crate::facet_values::{CategoryId, GroupId, SortColumn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub id: u64,
    pub product_id: u64,
    pub name: String,
    pub clean_name: Option<String>,
    pub sub_type_name: Option<String>,
    pub set_name: Option<String>,
    pub image_url: Option<String>,
    pub url: Option<String>,
    pub rarity: Option<String>,
    pub product_type: String,
    pub group_id: GroupId,
    pub category_id: CategoryId,
    pub market_price: Option<f64>,
    pub prev_market_price: Option<f64>,
    pub diff_market_price: Option<f64>,
    pub dollar_diff_market_price: Option<f64>,
    /// Unix seconds of the last price refresh.
    pub updated_at: u64,
}

/// Value of a sortable column, used when ordering in process.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum SortValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl Product {
    /// `None` for a null column.
    pub fn sort_value(&self, column: SortColumn) -> Option<SortValue<'_>> {
        match column {
            SortColumn::Name => Some(SortValue::Text(&self.name)),
            SortColumn::SetName => self.set_name.as_deref().map(SortValue::Text),
            SortColumn::MarketPrice => self.market_price.map(SortValue::Number),
            SortColumn::PrevMarketPrice => self.prev_market_price.map(SortValue::Number),
            SortColumn::DiffMarketPrice => self.diff_market_price.map(SortValue::Number),
            SortColumn::DollarDiffMarketPrice => self.dollar_diff_market_price.map(SortValue::Number),
            SortColumn::UpdatedAt => Some(SortValue::Number(self.updated_at as f64)),
        }
    }

    /// Price-derived field by name, for predicate evaluation.
    pub fn price_field(&self, column: SortColumn) -> Option<f64> {
        match column {
            SortColumn::MarketPrice => self.market_price,
            SortColumn::PrevMarketPrice => self.prev_market_price,
            SortColumn::DiffMarketPrice => self.diff_market_price,
            SortColumn::DollarDiffMarketPrice => self.dollar_diff_market_price,
            _ => None,
        }
    }

    /// Placeholder row shown behind the access-denied banner.
    pub fn placeholder(index: usize) -> Self {
        let n = index as u64 + 1;
        // deterministic spread of prices in [0, 100)
        let market_price = ((n * 37) % 100) as f64 + 0.99;
        let prev_market_price = ((n * 53) % 100) as f64 + 0.49;
        let dollar_diff = market_price - prev_market_price;
        let diff = dollar_diff / prev_market_price * 100.0;
        Self {
            id: n,
            product_id: n,
            name: format!("Dummy Card {n}"),
            clean_name: Some(format!("Dummy Card {n}")),
            set_name: Some("Dummy Set".to_string()),
            image_url: Some("/images/pkmn-card-back.png".to_string()),
            product_type: "card".to_string(),
            market_price: Some(round_cents(market_price)),
            prev_market_price: Some(round_cents(prev_market_price)),
            diff_market_price: Some(round_cents(diff)),
            dollar_diff_market_price: Some(round_cents(dollar_diff)),
            ..Self::default()
        }
    }
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
