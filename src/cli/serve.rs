//! Serve command - runs the HTTP API

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::create_router;
use crate::config::AppConfig;
use crate::infrastructure::observability::init_metrics;
use crate::infrastructure::services::RebuildOutcome;

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let metrics = init_metrics(&config.metrics);
    let services = crate::build_services(&config)?;

    match services.knowledge_base.index().restore().await {
        Ok(true) => {}
        Ok(false) => info!("No usable persisted index"),
        Err(e) => warn!(error = %e, "Could not read persisted index"),
    }

    if config.knowledge.rebuild_on_start {
        match services.knowledge_base.rebuild().await {
            Ok(RebuildOutcome::Rebuilt(stats)) => {
                info!(chunks = stats.chunks, "Startup rebuild finished")
            }
            Ok(outcome) => info!(outcome = outcome.label(), "Startup rebuild finished"),
            Err(e) => warn!(error = %e, "Startup rebuild failed, serving the previous index"),
        }
    }

    let state = crate::create_app_state(&config, &services, metrics);
    let app = create_router(state, &config);

    let addr = build_socket_addr(&config)?;
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}
