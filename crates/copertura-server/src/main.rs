mod api;
mod middleware;

use std::sync::Arc;

use copertura_lookup::{CoveragePipeline, HttpTransport};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = copertura_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, upstream = %config.upstream_base_url, "starting copertura-server");

    let vocabulary = copertura_core::load_vocabulary(config.prefixes_path.as_deref())?;
    tracing::info!(prefixes = vocabulary.len(), "street prefix vocabulary loaded");

    let transport = HttpTransport::from_app_config(&config)?;
    let pipeline = CoveragePipeline::new(Arc::new(transport), Arc::new(vocabulary));

    let app = build_app(AppState { pipeline }, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
