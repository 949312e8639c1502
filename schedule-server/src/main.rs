use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use schedule_server::config::ServerConfig;
use schedule_server::shutdown::ShutdownSignal;
use schedule_server::store::{ScheduleStore, SnapshotFile};
use schedule_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides; default to info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::parse();

    let store = match &config.data_file {
        Some(path) => ScheduleStore::open(SnapshotFile::new(path))
            .with_context(|| format!("failed to open schedule data {}", path.display()))?,
        None => {
            info!("no data file configured; schedule data will not be persisted");
            ScheduleStore::in_memory()
        }
    };

    let segments = config.segment_table();
    info!(
        outbound = %config.outbound_segments,
        return_trip = %config.return_segments,
        "segment table loaded"
    );

    let state = AppState::new(store, segments);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    let addr = listener.local_addr().context("failed to read bound address")?;
    info!(%addr, "bus schedule server listening");
    info!("  GET  /health");
    info!("  GET  /lines, /routes, /timetable   (POST to create)");
    info!("  GET  /lines/:id, /routes/:id, /timetable/:id   (PUT, DELETE)");
    info!("  GET  /connections?day_type=..&direction=..");

    let shutdown = ShutdownSignal::install();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.recv())
        .await
        .context("server error")?;

    info!("shut down");
    Ok(())
}
