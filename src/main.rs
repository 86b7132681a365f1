use anyhow::Context;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vantage::config::Config;
use vantage::services::{FileCache, HistoryService, Ledger, PriceResolver};
use vantage::sources::{BinanceClient, FinnhubClient, YahooFinanceClient};
use vantage::{api, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vantage=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting Vantage server on {}:{}", config.host, config.port);

    // Trade ledger (SQLite). Owned by the state, dropped on shutdown.
    let ledger = Arc::new(Ledger::open(&config.database_path).context("open trade ledger")?);

    // Upstream clients. The Yahoo client is shared between the price
    // resolver and the history service.
    let yahoo = Arc::new(YahooFinanceClient::new());
    let resolver = Arc::new(PriceResolver::new(
        FinnhubClient::new(),
        yahoo.clone(),
        BinanceClient::new(),
    ));
    let history = Arc::new(HistoryService::new(yahoo, FileCache::new(&config.cache_dir)));

    let state = AppState {
        config: config.clone(),
        resolver,
        history,
        ledger,
    };

    // Allow CORS for the local HTML frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Vantage server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
