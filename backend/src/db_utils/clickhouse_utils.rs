use crate::config::ClickhouseConfig;

pub fn get_clickhouse_client(config: &ClickhouseConfig) -> clickhouse::Client {
    clickhouse::Client::default()
        .with_url(&config.url)
        .with_user(&config.user)
        .with_password(&config.password)
        .with_database(&config.database)
}

/// Binds positional values in statement order.
pub fn bind_all(mut query: clickhouse::query::Query, binds: &[crate::query_compiler::sql::SqlBind]) -> clickhouse::query::Query {
    for bind in binds {
        query = query.bind(bind);
    }
    query
}
