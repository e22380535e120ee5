//! Compiles a [`FilterState`] into a [`StoreQuery`].

use common::catalog_const::all_product_types;
use common::facet_values::{SortColumn, SortDirection};
use common::filter_state::FilterState;
use thiserror::Error;

use crate::query_compiler::store_query::{Literal, OrderBy, Predicate, StoreField, StoreQuery};

/// Contract violations that make a query impossible to run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid product type provided in {0}")]
    UnknownProductType(String),
}

/// Resolves a raw `sort_by` value against the allow-list, falling back to the default column.
pub fn resolve_sort_column(raw: &str) -> SortColumn {
    SortColumn::from_param_or_default(raw)
}

pub fn compile(state: &FilterState) -> Result<StoreQuery, ValidationError> {
    let allowed = all_product_types();
    if state.product_types.iter().any(|t| !allowed.contains(t)) {
        let requested = state.product_types.iter().cloned().collect::<Vec<_>>().join(", ");
        return Err(ValidationError::UnknownProductType(requested));
    }

    let mut clauses = vec![Predicate::Eq(StoreField::Category, Literal::Int(state.category as u64))];

    if !state.product_types.is_empty() {
        clauses.push(Predicate::In(
            StoreField::ProductType,
            state.product_types.iter().map(|t| Literal::Text(t.clone())).collect(),
        ));
    }

    if !state.rarities.is_empty() {
        clauses.push(Predicate::In(StoreField::Rarity, state.rarities.iter().map(|r| Literal::Text(r.clone())).collect()));
    }

    let search_term = state.search_term.trim();
    if !search_term.is_empty() {
        clauses.push(Predicate::Contains(StoreField::Name, search_term.to_string()));
    }

    if !state.groups.is_empty() {
        clauses.push(Predicate::In(StoreField::GroupId, state.groups.iter().map(|g| Literal::Int(*g as u64)).collect()));
    }

    if let Some((min, max)) = state.price_range.bounds() {
        clauses.push(Predicate::Gte(StoreField::MarketPrice, min));
        if let Some(max) = max {
            clauses.push(Predicate::Lt(StoreField::MarketPrice, max));
        }
    }

    // nulls sort ambiguously at the tail of a descending price order
    if state.sort_column.is_price_derived() && state.sort_direction == SortDirection::Desc {
        clauses.push(Predicate::IsNotNull(state.sort_column.into()));
    }

    let page = state.page.max(1) as u64;
    Ok(StoreQuery {
        predicate: Predicate::And(clauses),
        order_by: OrderBy { field: state.sort_column.into(), direction: state.sort_direction },
        offset: (page - 1) * state.page_size as u64,
        limit: state.page_size,
    })
}
