//! Facet Catalog: selectable facet values per category.

mod catalog;
pub use catalog::FacetCatalog;

mod facet_source;
pub use facet_source::{FacetSource, ProductGroup};

pub mod rarity_order;
