//! Market trends backend: facet catalog, query compiler, catalog stores and
//! the HTTP read endpoints.

pub mod api;
pub mod catalog_store;
pub mod config;
pub mod db_utils;
pub mod facet_catalog;
pub mod query_compiler;
pub mod server;
