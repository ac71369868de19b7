mod api;
mod middleware;

use std::sync::Arc;

use intown_core::{Catalog, FixedCodeOtp, MockGateway};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = intown_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting intown-server");

    let catalog = Arc::new(Catalog::load_or_builtin(config.catalog_path.as_deref())?);

    // The pool connects lazily so catalog routes keep serving while the
    // database is down; database-backed routes fail per request instead.
    let pool_config = intown_db::PoolConfig::from_app_config(&config);
    let pool = intown_db::connect_pool_lazy(&config.database_url, pool_config)?;
    if let Err(e) = intown_db::run_migrations(&pool).await {
        tracing::warn!(error = %e, "migrations failed; continuing without a database");
    }

    let state = AppState {
        pool,
        catalog,
        otp: Arc::new(FixedCodeOtp::new(config.otp_code.clone())),
        payments: Arc::new(MockGateway::new(config.payment_savings_rate)),
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
