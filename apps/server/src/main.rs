use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use userproxy_server::config::ServerConfig;
use userproxy_server::directory::HttpDirectoryClient;
use userproxy_server::router::build_router;
use userproxy_server::shutdown::shutdown_signal;
use userproxy_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let directory = HttpDirectoryClient::new(&config.directory)?;
    tracing::info!(
        api_base_url = %config.directory.api_base_url,
        "directory client ready"
    );

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState {
        config: Arc::new(config),
        directory: Arc::new(directory),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
