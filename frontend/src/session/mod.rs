//! Browsing session: filter state, URL sync, fetch lifecycle and the driver loop.

pub mod browsing_session;
pub mod driver;
pub mod fetch_orchestrator;
pub mod search_debounce;
