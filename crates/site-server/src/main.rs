//! # Landing Server
//!
//! Local static file server with a mock payments API.
//!
//! ## Usage
//!
//! ```bash
//! # Optional: put settings in .env (existing variables win)
//! export PORT=3000
//! export STATIC_ROOT=./public
//! export PAYMENTS_DEFAULT_CURRENCY=RUB
//!
//! # Run the server
//! landing-server
//! ```

use anyhow::Context;
use site_server::{config, routes, state::AppState};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    let env_file = config::load_env_file();

    init_tracing();

    match env_file {
        Ok(Some(path)) => info!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => warn!("Ignoring malformed env file: {}", e),
    }

    let state = AppState::from_env()?;
    let addr = state.config.bind_addr();

    info!("Static root: {}", state.static_root.path().display());
    info!("Payment provider: {}", state.config.payments.provider);
    info!("Registered providers: {:?}", state.providers.providers());

    let public_url = state.config.public_url();
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!("Локальный сервер запущен: {}", public_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` filtering, `LOG_FORMAT=json` for machine-readable output
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, stopping server");
}
