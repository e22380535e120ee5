//! SQL builder helpers for compiled catalog queries.
//!
//! Values never get spliced into the statement; every literal becomes a `?`
//! placeholder bound by the ClickHouse client in order.

use serde::Serialize;

use common::facet_values::SortDirection;

use crate::query_compiler::store_query::{Literal, OrderBy, Predicate, StoreField, StoreQuery};

pub const SQL_FROM_CLAUSE: &'static str = "
    FROM products AS p
    INNER JOIN product_groups AS g
    ON p.group_id = g.group_id
";

pub const SQL_PRODUCT_COLUMNS: &'static str = "
    p.id AS id,
    p.product_id AS product_id,
    p.name AS name,
    p.clean_name AS clean_name,
    p.sub_type_name AS sub_type_name,
    p.set_name AS set_name,
    p.image_url AS image_url,
    p.url AS url,
    p.rarity AS rarity,
    p.product_type AS product_type,
    p.group_id AS group_id,
    g.category_id AS category_id,
    p.market_price AS market_price,
    p.prev_market_price AS prev_market_price,
    p.diff_market_price AS diff_market_price,
    p.dollar_diff_market_price AS dollar_diff_market_price,
    p.updated_at AS updated_at
";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlBind {
    UInt(u64),
    Float(f64),
    Text(String),
}

impl From<&Literal> for SqlBind {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Int(i) => SqlBind::UInt(*i),
            Literal::Text(s) => SqlBind::Text(s.clone()),
        }
    }
}

/// Statement text plus its positional bind values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlFragment {
    pub sql: String,
    pub binds: Vec<SqlBind>,
}

pub fn sql_column(field: StoreField) -> &'static str {
    match field {
        StoreField::Category => "g.category_id",
        StoreField::ProductType => "p.product_type",
        StoreField::Rarity => "p.rarity",
        StoreField::Name => "p.name",
        StoreField::GroupId => "p.group_id",
        StoreField::SetName => "p.set_name",
        StoreField::MarketPrice => "p.market_price",
        StoreField::PrevMarketPrice => "p.prev_market_price",
        StoreField::DiffMarketPrice => "p.diff_market_price",
        StoreField::DollarDiffMarketPrice => "p.dollar_diff_market_price",
        StoreField::UpdatedAt => "p.updated_at",
    }
}

fn build_condition(predicate: &Predicate, binds: &mut Vec<SqlBind>) -> String {
    match predicate {
        Predicate::And(clauses) if clauses.is_empty() => "1 = 1".to_string(),
        Predicate::And(clauses) => clauses
            .iter()
            .map(|c| build_condition(c, binds))
            .collect::<Vec<_>>()
            .join("
        AND "),
        Predicate::Eq(field, value) => {
            binds.push(value.into());
            format!("{} = ?", sql_column(*field))
        }
        Predicate::In(field, values) => {
            binds.extend(values.iter().map(SqlBind::from));
            let placeholders = vec!["?"; values.len()].join(", ");
            format!("{} IN ({placeholders})", sql_column(*field))
        }
        Predicate::Contains(field, needle) => {
            binds.push(SqlBind::Text(needle.clone()));
            format!("positionCaseInsensitiveUTF8({}, ?) > 0", sql_column(*field))
        }
        Predicate::Gte(field, bound) => {
            binds.push(SqlBind::Float(*bound));
            format!("{} >= ?", sql_column(*field))
        }
        Predicate::Lt(field, bound) => {
            binds.push(SqlBind::Float(*bound));
            format!("{} < ?", sql_column(*field))
        }
        Predicate::IsNotNull(field) => format!("{} IS NOT NULL", sql_column(*field)),
    }
}

pub fn build_sql_where_clause(predicate: &Predicate) -> SqlFragment {
    let mut binds = Vec::new();
    let condition = build_condition(predicate, &mut binds);
    SqlFragment { sql: format!("
        WHERE {condition}
    "), binds }
}

pub fn build_sql_order_clause(order_by: &OrderBy) -> String {
    let direction = match order_by.direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    };
    format!("ORDER BY {} {direction} NULLS LAST", sql_column(order_by.field))
}

pub fn build_select_sql(query: &StoreQuery) -> SqlFragment {
    let where_clause = build_sql_where_clause(&query.predicate);
    let order_clause = build_sql_order_clause(&query.order_by);
    let limit = query.limit;
    let offset = query.offset;
    SqlFragment {
        sql: format!(
            "
    SELECT {SQL_PRODUCT_COLUMNS}
    {SQL_FROM_CLAUSE}
    {}
    {order_clause}
    LIMIT {limit} OFFSET {offset}
    ",
            where_clause.sql
        ),
        binds: where_clause.binds,
    }
}

pub fn build_count_sql(query: &StoreQuery) -> SqlFragment {
    let where_clause = build_sql_where_clause(&query.predicate);
    SqlFragment {
        sql: format!(
            "
    SELECT count() AS total_count
    {SQL_FROM_CLAUSE}
    {}
    ",
            where_clause.sql
        ),
        binds: where_clause.binds,
    }
}
