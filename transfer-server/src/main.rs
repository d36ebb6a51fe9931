use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transfer_server::cache::CachedTraClient;
use transfer_server::config::ServerConfig;
use transfer_server::tra::TraClient;
use transfer_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env().inspect_err(|e| error!(error = %e, "bad configuration"))?;

    let client = TraClient::new(config.tra.clone())?;
    let tra = CachedTraClient::new(client, &config.cache);
    let state = AppState::new(tra, config.settings, config.cache.ttl);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, tra = %config.tra.base_url, "transfer server listening");
    info!("  GET       /health    - health check");
    info!("  GET       /board     - today's options in both directions, with tiers");
    info!("  GET|POST  /TRA2THSR  - TRA then THSR");
    info!("  GET|POST  /THSR2TRA  - THSR then TRA");

    axum::serve(listener, app).await?;
    Ok(())
}
