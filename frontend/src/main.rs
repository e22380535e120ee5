//! `trends-browse`: runs one browsing session against a backend and prints the page.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use frontend::api::products_api::HttpProductsApi;
use frontend::data_definitions::url_sync::MemoryNavigator;
use frontend::session::driver::spawn_session;
use frontend::session::fetch_orchestrator::FetchStatus;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "trends-browse", about = "Browse daily price trends from the command line")]
struct Args {
    /// Backend base URL.
    #[arg(long, env = "TRENDS_BASE_URL", default_value = "http://127.0.0.1:8080")]
    base_url: String,

    /// Query string to start from, e.g. `category=3&price=5-20&sort_by=name`.
    #[arg(long, default_value = "")]
    query: String,

    #[arg(long, default_value_t = 300)]
    search_debounce_ms: u64,
}

fn format_price(price: Option<f64>) -> String {
    price.map(|p| format!("{p:.2}")).unwrap_or_else(|| "-".to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let api = Arc::new(HttpProductsApi::new(&args.base_url).context("Cannot build HTTP client")?);
    let mut handle = spawn_session(
        MemoryNavigator::new(&args.query),
        api,
        Duration::from_millis(args.search_debounce_ms),
    );

    let view = handle
        .view
        .wait_for(|v| !matches!(v.status, FetchStatus::Idle | FetchStatus::Loading))
        .await
        .context("session ended before the first page arrived")?
        .clone();

    println!("?{}", view.url);
    match view.status {
        FetchStatus::AccessDenied => println!("access denied: showing a preview"),
        FetchStatus::Error => println!("{}", view.error_message.unwrap_or_default()),
        _ => {}
    }
    println!(
        "page {}/{} ({} products)",
        view.result.page, view.result.total_pages, view.result.total_count
    );
    for product in &view.result.items {
        println!(
            "{:>10}  {:>8}  {:>8}  {}",
            product.product_id,
            format_price(product.market_price),
            format_price(product.diff_market_price),
            product.name
        );
    }

    handle.shutdown().await
}
