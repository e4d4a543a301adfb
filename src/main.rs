use clap::Parser;
use tokio::net::TcpListener;

use cors_shim::config::{validate_config, ConfigError, ShimArgs};
use cors_shim::observability::{init_logging, logging::DEFAULT_FILTER};
use cors_shim::{HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(DEFAULT_FILTER);

    let config = ShimArgs::parse().into_config();
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_in_flight = config.listener.max_in_flight,
        upstream_timeout_secs = ?config.upstream.timeout_secs,
        relay_error_body = config.upstream.relay_error_body,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    for route in &config.routes {
        tracing::info!(
            address = %local_addr,
            "Proxying {}/* to {}/*",
            route.path_prefix,
            route.upstream
        );
    }

    let shutdown = Shutdown::new();
    let _signals = shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
