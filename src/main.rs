mod address;
mod aggregator;
mod api;
mod chain;
mod config;
mod error;
mod models;
mod upstream;
mod usd;

use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // RUST_LOG wins; plain INFO otherwise
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stdout)
        .with_target(false)
        .init();

    info!("DEX volume API starting...");

    let cfg = config::load()?;
    info!("  Provider: {}", cfg.provider);
    info!("  Listen: {}:{}", cfg.bind_addr, cfg.port);
    info!("  Upstream timeout: {:?}", cfg.upstream_timeout);

    let api_handle = tokio::spawn(api::serve(cfg));

    tokio::select! {
        res = api_handle => match res {
            Ok(Ok(_)) => info!("API exited cleanly"),
            Ok(Err(e)) => error!("API error: {:?}", e),
            Err(e) => error!("API task panicked: {:?}", e),
        },
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received, stopping...");
        }
    }

    info!("DEX volume API stopped.");
    Ok(())
}
