use std::sync::Arc;

use anyhow::Context as _;
use askgate::store::JsonFileStore;
use askgate::{handlers, microsvc, App, Config, SystemClock};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    info!(path = %config.users_file.display(), "using account store");

    let client = config
        .completion_client()
        .context("failed to build completion client")?;
    info!(endpoint = client.endpoint(), model = client.model(), "completion API configured");

    let app = App::new(
        JsonFileStore::new(config.users_file.clone()),
        Arc::new(SystemClock),
        Arc::new(client),
    );
    let service = Arc::new(handlers::service(app));

    microsvc::serve(service, &config.bind_addr(), shutdown_signal())
        .await
        .with_context(|| format!("server on {} failed", config.bind_addr()))?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
