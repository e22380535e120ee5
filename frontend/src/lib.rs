//! Browsing client for the market trends read endpoint.

pub mod api;
pub mod data_definitions;
pub mod session;
