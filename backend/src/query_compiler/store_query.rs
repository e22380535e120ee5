//! Store-agnostic query representation produced by the compiler.

use std::fmt::{Display, Formatter};

use common::facet_values::{SortColumn, SortDirection};

/// Fields of the catalog schema a query may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreField {
    Category,
    ProductType,
    Rarity,
    Name,
    GroupId,
    SetName,
    MarketPrice,
    PrevMarketPrice,
    DiffMarketPrice,
    DollarDiffMarketPrice,
    UpdatedAt,
}

impl StoreField {
    pub fn name(&self) -> &'static str {
        match self {
            StoreField::Category => "category",
            StoreField::ProductType => "productType",
            StoreField::Rarity => "rarity",
            StoreField::Name => "name",
            StoreField::GroupId => "groupId",
            StoreField::SetName => "setName",
            StoreField::MarketPrice => "marketPrice",
            StoreField::PrevMarketPrice => "prevMarketPrice",
            StoreField::DiffMarketPrice => "diffMarketPrice",
            StoreField::DollarDiffMarketPrice => "dollarDiffMarketPrice",
            StoreField::UpdatedAt => "updatedAt",
        }
    }
}

impl From<SortColumn> for StoreField {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Name => StoreField::Name,
            SortColumn::SetName => StoreField::SetName,
            SortColumn::MarketPrice => StoreField::MarketPrice,
            SortColumn::PrevMarketPrice => StoreField::PrevMarketPrice,
            SortColumn::DiffMarketPrice => StoreField::DiffMarketPrice,
            SortColumn::DollarDiffMarketPrice => StoreField::DollarDiffMarketPrice,
            SortColumn::UpdatedAt => StoreField::UpdatedAt,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(u64),
    Text(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Text(s) => write!(f, "\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        }
    }
}

/// Boolean predicate over one catalog item.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    And(Vec<Predicate>),
    Eq(StoreField, Literal),
    In(StoreField, Vec<Literal>),
    /// Case-insensitive substring match.
    Contains(StoreField, String),
    Gte(StoreField, f64),
    Lt(StoreField, f64),
    IsNotNull(StoreField),
}

impl Predicate {
    /// Top-level clauses when the predicate is a conjunction.
    pub fn clauses(&self) -> &[Predicate] {
        match self {
            Predicate::And(clauses) => clauses,
            other => std::slice::from_ref(other),
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::And(clauses) if clauses.is_empty() => write!(f, "TRUE"),
            Predicate::And(clauses) => {
                let parts = clauses.iter().map(|c| c.to_string()).collect::<Vec<_>>();
                write!(f, "{}", parts.join(" AND "))
            }
            Predicate::Eq(field, value) => write!(f, "{}={}", field.name(), value),
            Predicate::In(field, values) => {
                let values = values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
                write!(f, "{} IN ({})", field.name(), values.join(", "))
            }
            Predicate::Contains(field, needle) => write!(f, "{} ILIKE {}", field.name(), Literal::Text(format!("%{needle}%"))),
            Predicate::Gte(field, bound) => write!(f, "{}>={}", field.name(), bound),
            Predicate::Lt(field, bound) => write!(f, "{}<{}", field.name(), bound),
            Predicate::IsNotNull(field) => write!(f, "{} IS NOT NULL", field.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderBy {
    pub field: StoreField,
    pub direction: SortDirection,
}

impl Display for OrderBy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        };
        write!(f, "{} {}", self.field.name(), direction)
    }
}

/// Compiled query: predicate, single-column ordering and a page window.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreQuery {
    pub predicate: Predicate,
    pub order_by: OrderBy,
    pub offset: u64,
    pub limit: u32,
}

impl Display for StoreQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "WHERE {} ORDER BY {} OFFSET {} LIMIT {}", self.predicate, self.order_by, self.offset, self.limit)
    }
}
