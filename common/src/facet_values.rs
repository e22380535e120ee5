//! Facet value models shared between frontend and backend.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub type CategoryId = u32;
pub type GroupId = u32;

#[derive(Debug, Clone, Serialize, Deserialize, PartialOrd, Ord, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum FacetKey {
    Id(u32),
    Text(String),
}

impl Display for FacetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacetKey::Id(id) => write!(f, "{id}"),
            FacetKey::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One selectable option of a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub value: FacetKey,
    pub label: String,
}

impl FacetValue {
    pub fn text(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: FacetKey::Text(value.into()), label: label.into() }
    }
    pub fn id(value: u32, label: impl Into<String>) -> Self {
        Self { value: FacetKey::Id(value), label: label.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOption {
    pub value: CategoryId,
    pub label: String,
    pub category_id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

/// A set/era grouping and its (currently always empty) sub-groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEraOption {
    pub label: String,
    pub value: FacetKey,
    #[serde(default)]
    pub subgroups: Vec<FacetValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    pub rarities: Vec<FacetValue>,
    pub set_eras: Vec<SetEraOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCatalog {
    pub category: CategoryOption,
    pub types: Vec<FacetValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriceRange {
    #[default]
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "0-5")]
    UpTo5,
    #[serde(rename = "5-20")]
    From5To20,
    #[serde(rename = "20+")]
    Over20,
}

impl PriceRange {
    pub const ALL: [PriceRange; 4] = [PriceRange::Any, PriceRange::UpTo5, PriceRange::From5To20, PriceRange::Over20];

    /// Unrecognized buckets (including "any") map to `Any`.
    pub fn from_param(s: &str) -> Self {
        match s.trim() {
            "0-5" => PriceRange::UpTo5,
            "5-20" => PriceRange::From5To20,
            "20+" => PriceRange::Over20,
            _ => PriceRange::Any,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            PriceRange::Any => "any",
            PriceRange::UpTo5 => "0-5",
            PriceRange::From5To20 => "5-20",
            PriceRange::Over20 => "20+",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceRange::Any => "Any",
            PriceRange::UpTo5 => "Under $5",
            PriceRange::From5To20 => "$5 - $20",
            PriceRange::Over20 => "Over $20",
        }
    }

    /// Half-open `[min, max)` bounds on market price; `None` for `Any`.
    pub fn bounds(&self) -> Option<(f64, Option<f64>)> {
        match self {
            PriceRange::Any => None,
            PriceRange::UpTo5 => Some((0.0, Some(5.0))),
            PriceRange::From5To20 => Some((5.0, Some(20.0))),
            PriceRange::Over20 => Some((20.0, None)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Name,
    SetName,
    MarketPrice,
    PrevMarketPrice,
    #[default]
    DiffMarketPrice,
    DollarDiffMarketPrice,
    UpdatedAt,
}

impl SortColumn {
    pub const ALL: [SortColumn; 7] = [
        SortColumn::Name,
        SortColumn::SetName,
        SortColumn::MarketPrice,
        SortColumn::PrevMarketPrice,
        SortColumn::DiffMarketPrice,
        SortColumn::DollarDiffMarketPrice,
        SortColumn::UpdatedAt,
    ];

    /// Accepts the snake_case URL form and the legacy camelCase field form.
    pub fn from_param(s: &str) -> Option<Self> {
        let s = s.trim();
        SortColumn::ALL.into_iter().find(|c| c.as_param() == s || c.field_name() == s)
    }

    /// Falls back to the default column for anything outside the allow-list.
    pub fn from_param_or_default(s: &str) -> Self {
        Self::from_param(s).unwrap_or_default()
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::SetName => "set_name",
            SortColumn::MarketPrice => "market_price",
            SortColumn::PrevMarketPrice => "prev_market_price",
            SortColumn::DiffMarketPrice => "diff_market_price",
            SortColumn::DollarDiffMarketPrice => "dollar_diff_market_price",
            SortColumn::UpdatedAt => "updated_at",
        }
    }

    /// Catalog field the column orders by.
    pub fn field_name(&self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::SetName => "setName",
            SortColumn::MarketPrice => "marketPrice",
            SortColumn::PrevMarketPrice => "prevMarketPrice",
            SortColumn::DiffMarketPrice => "diffMarketPrice",
            SortColumn::DollarDiffMarketPrice => "dollarDiffMarketPrice",
            SortColumn::UpdatedAt => "updatedAt",
        }
    }

    pub fn is_price_derived(&self) -> bool {
        matches!(
            self,
            SortColumn::MarketPrice | SortColumn::PrevMarketPrice | SortColumn::DiffMarketPrice | SortColumn::DollarDiffMarketPrice
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn from_param(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => SortDirection::default(),
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_column_accepts_both_spellings() {
        assert_eq!(SortColumn::from_param("diff_market_price"), Some(SortColumn::DiffMarketPrice));
        assert_eq!(SortColumn::from_param("diffMarketPrice"), Some(SortColumn::DiffMarketPrice));
        assert_eq!(SortColumn::from_param("setName"), Some(SortColumn::SetName));
        assert_eq!(SortColumn::from_param("bogus_field"), None);
        assert_eq!(SortColumn::from_param_or_default("bogus_field"), SortColumn::DiffMarketPrice);
    }

    #[test]
    fn only_price_columns_are_price_derived() {
        let derived = SortColumn::ALL.into_iter().filter(|c| c.is_price_derived()).collect::<Vec<_>>();
        assert_eq!(
            derived,
            vec![SortColumn::MarketPrice, SortColumn::PrevMarketPrice, SortColumn::DiffMarketPrice, SortColumn::DollarDiffMarketPrice]
        );
    }

    #[test]
    fn unknown_price_bucket_is_any() {
        assert_eq!(PriceRange::from_param("5-20"), PriceRange::From5To20);
        assert_eq!(PriceRange::from_param("any"), PriceRange::Any);
        assert_eq!(PriceRange::from_param("100-200"), PriceRange::Any);
        assert_eq!(PriceRange::Over20.bounds(), Some((20.0, None)));
    }

    #[test]
    fn facet_key_serializes_untagged() {
        let v = FacetValue::id(42, "Base Set");
        assert_eq!(serde_json::to_string(&v).ok().as_deref(), Some(r#"{"value":42,"label":"Base Set"}"#));
        let t: FacetValue = serde_json::from_str(r#"{"value":"Rare","label":"Rare"}"#).expect("parse");
        assert_eq!(t, FacetValue::text("Rare", "Rare"));
    }
}
