//! Volt Telemetry Monitor - Main Entry Point

mod settings;

use anyhow::Result;
use pid_catalog::PidCatalog;
use poller::{AlertSink, MockTransport, Poller, SampleSink, SystemClock};
use std::sync::{Arc, PoisonError};
use storage::TelemetryLog;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Initialize logging
fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    info!("=== Volt Telemetry Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let settings = settings::load()?;
    let catalog = Arc::new(PidCatalog::builtin());
    let stats = catalog.stats();
    info!(
        "PID catalog loaded: {} definitions ({} Volt, {} standard)",
        stats.total, stats.volt, stats.standard
    );

    let log = Arc::new(TelemetryLog::with_retention(
        settings.sample_retention,
        settings.alert_retention,
    ));

    // The Bluetooth/ELM327 layer is an external collaborator; the mock
    // transport stands in behind the same seam.
    let transport = MockTransport::new(Arc::clone(&catalog));
    let mut poller = Poller::new(
        Arc::clone(&catalog),
        transport,
        SystemClock,
        settings.poller_config(),
    )
    .with_sample_sink(Arc::clone(&log) as Arc<dyn SampleSink>)
    .with_alert_sink(Arc::clone(&log) as Arc<dyn AlertSink>);

    let handle = poller.handle();
    let live = poller.live();
    let history = poller.history();
    let alerts = poller.alerts();

    let task = tokio::spawn(async move {
        poller.run().await;
    });

    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");
    handle.stop();
    task.await?;

    let summary = serde_json::json!({
        "live_pids": live.read().unwrap_or_else(PoisonError::into_inner).len(),
        "history_points": history.read().unwrap_or_else(PoisonError::into_inner).len(),
        "alerts": alerts.read().unwrap_or_else(PoisonError::into_inner).len(),
        "stored_samples": log.sample_count(),
        "stored_alerts": log.alert_count(),
    });
    info!("session summary: {summary}");

    Ok(())
}
