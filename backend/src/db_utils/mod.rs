pub mod clickhouse_utils;
pub mod ttl_cache;
