//! Models shared between the trends backend and its browsing client.

pub mod catalog_const;
pub mod facet_values;
pub mod filter_state;
pub mod product;
pub mod products_response;
pub mod url_codec;
