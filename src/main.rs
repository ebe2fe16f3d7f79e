use mapnotes::backend::BackendRegistry;
use mapnotes::config::Config;
use mapnotes::server::router::NotesState;
use mapnotes::server::serve_until;
use mimalloc::MiMalloc;
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let figment = Config::figment();
    let cfg = Config::from_figment(&figment)?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        loglevel = %cfg.basic.loglevel,
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        datadir = %cfg.basic.datadir.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<none>".to_string()),
        max_connections = cfg.pool.max_connections,
        acquire_timeout_secs = cfg.pool.acquire_timeout_secs,
        login_header = %cfg.identity.login_header,
        debug_form = cfg.basic.debug_form
    );

    let source = cfg.backend_source(figment);
    let registry = Arc::new(BackendRegistry::build(&source, &cfg.pool)?);
    if registry.is_empty() {
        warn!("No note backend declared (expected `note.0.id`); every store request will be rejected.");
    }

    let state = NotesState::from_config(registry, &cfg)?;

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    serve_until(listener, state, shutdown_signal()).await?;
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
