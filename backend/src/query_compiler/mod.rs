//! Query compilation: filter state to store query, and store query to SQL.

mod compile;
pub use compile::{ValidationError, compile, resolve_sort_column};

mod store_query;
pub use store_query::{Literal, OrderBy, Predicate, StoreField, StoreQuery};

pub mod sql;
