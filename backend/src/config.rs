//! Backend configuration read from the environment.

use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use crate::db_utils::ttl_cache::{CacheMode, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickhouseConfig {
    pub url: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogBackend {
    Clickhouse,
    /// In-process catalog loaded from a JSON seed file (or empty).
    Memory { seed_path: Option<PathBuf> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub bind_addr: SocketAddr,
    pub catalog_backend: CatalogBackend,
    pub clickhouse: ClickhouseConfig,
    pub cache_mode: CacheMode,
    /// When set, requests must carry this header listing the `trends` feature.
    pub entitlement_header: Option<String>,
}

impl BackendConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).filter(|v| !v.trim().is_empty()).unwrap_or(default.to_string());

        let bind_addr = var("TRENDS_BIND_ADDR", "127.0.0.1:8080")
            .parse::<SocketAddr>()
            .context("TRENDS_BIND_ADDR is not a socket address")?;

        let catalog_backend = match var("CATALOG_BACKEND", "clickhouse").to_ascii_lowercase().as_str() {
            "clickhouse" => CatalogBackend::Clickhouse,
            "memory" => CatalogBackend::Memory { seed_path: lookup("CATALOG_SEED_JSON").map(PathBuf::from) },
            other => anyhow::bail!("CATALOG_BACKEND must be clickhouse or memory, got {other:?}"),
        };

        let clickhouse = ClickhouseConfig {
            url: var("CLICKHOUSE_URL", "http://localhost:8123"),
            user: var("CLICKHOUSE_USER", "trends"),
            password: var("CLICKHOUSE_PASSWORD", "trends"),
            database: var("CLICKHOUSE_DATABASE", "market_trends"),
        };

        let cache_mode = match var("CATALOG_CACHE", "on").to_ascii_lowercase().as_str() {
            "off" | "0" | "false" => CacheMode::Disabled,
            _ => {
                let ttl = match lookup("CATALOG_CACHE_TTL_SECS") {
                    Some(secs) => Duration::from_secs(
                        secs.trim().parse::<u64>().context("CATALOG_CACHE_TTL_SECS is not a number")?,
                    ),
                    None => DEFAULT_CACHE_TTL,
                };
                let capacity = match lookup("CATALOG_CACHE_CAPACITY") {
                    Some(entries) => entries
                        .trim()
                        .parse::<NonZeroUsize>()
                        .context("CATALOG_CACHE_CAPACITY is not a positive number")?,
                    None => DEFAULT_CACHE_CAPACITY,
                };
                CacheMode::Enabled { ttl, capacity }
            }
        };

        let entitlement_header = lookup("TRENDS_ENTITLEMENT_HEADER").filter(|h| !h.trim().is_empty());

        Ok(Self { bind_addr, catalog_backend, clickhouse, cache_mode, entitlement_header })
    }
}
