//! Polling Loop Implementation

use crate::clock::Clock;
use crate::config::PollerConfig;
use crate::sink::{AlertSink, SampleSink};
use crate::transport::Transport;
use alerting::{AlertLog, ThresholdEngine};
use history_buffer::{HistoryBuffer, HistorySnapshot};
use live_store::LiveValueStore;
use pid_catalog::{PidCatalog, PidCode};
use response_decoder::CatalogDecoder;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Per-tick outcome counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Samples decoded and stored
    pub decoded: usize,
    /// PIDs that failed at the transport
    pub transport_errors: usize,
    /// PIDs whose responses failed to decode
    pub decode_errors: usize,
    /// Alerts emitted
    pub alerts: usize,
}

/// Handle for stopping a running poller from another task
#[derive(Clone)]
pub struct PollerHandle {
    shutdown: Arc<Notify>,
    running: Arc<AtomicBool>,
}

impl PollerHandle {
    /// Request an immediate stop.
    ///
    /// Takes effect at the next await point; a tick already past its
    /// transport read still runs to completion.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.shutdown.notify_one();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// The polling driver.
///
/// Owns the pipeline state and mutates it only from its own task; the
/// shared store/history/alert handles give external readers eventually
/// consistent snapshots.
pub struct Poller<T: Transport, C: Clock> {
    catalog: Arc<PidCatalog>,
    transport: T,
    clock: C,
    config: Arc<RwLock<PollerConfig>>,
    live: Arc<RwLock<LiveValueStore>>,
    history: Arc<RwLock<HistoryBuffer>>,
    alerts: Arc<RwLock<AlertLog>>,
    engine: ThresholdEngine,
    sample_sink: Option<Arc<dyn SampleSink>>,
    alert_sink: Option<Arc<dyn AlertSink>>,
    shutdown: Arc<Notify>,
    running: Arc<AtomicBool>,
}

impl<T: Transport, C: Clock> Poller<T, C> {
    pub fn new(catalog: Arc<PidCatalog>, transport: T, clock: C, config: PollerConfig) -> Self {
        let history = HistoryBuffer::new(config.max_history_points);
        Self {
            catalog,
            transport,
            clock,
            config: Arc::new(RwLock::new(config)),
            live: Arc::new(RwLock::new(LiveValueStore::new())),
            history: Arc::new(RwLock::new(history)),
            alerts: Arc::new(RwLock::new(AlertLog::new())),
            engine: ThresholdEngine::new(),
            sample_sink: None,
            alert_sink: None,
            shutdown: Arc::new(Notify::new()),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Attach a durable sample sink
    pub fn with_sample_sink(mut self, sink: Arc<dyn SampleSink>) -> Self {
        self.sample_sink = Some(sink);
        self
    }

    /// Attach a durable alert sink
    pub fn with_alert_sink(mut self, sink: Arc<dyn AlertSink>) -> Self {
        self.alert_sink = Some(sink);
        self
    }

    /// Shared configuration handle; writes apply from the next tick
    pub fn config(&self) -> Arc<RwLock<PollerConfig>> {
        Arc::clone(&self.config)
    }

    /// Shared live value store handle (read-only for external readers)
    pub fn live(&self) -> Arc<RwLock<LiveValueStore>> {
        Arc::clone(&self.live)
    }

    /// Shared history buffer handle
    pub fn history(&self) -> Arc<RwLock<HistoryBuffer>> {
        Arc::clone(&self.history)
    }

    /// Shared alert log handle
    pub fn alerts(&self) -> Arc<RwLock<AlertLog>> {
        Arc::clone(&self.alerts)
    }

    /// Handle for stopping the loop
    pub fn handle(&self) -> PollerHandle {
        PollerHandle {
            shutdown: Arc::clone(&self.shutdown),
            running: Arc::clone(&self.running),
        }
    }

    /// Run the polling loop until stopped
    pub async fn run(&mut self) {
        self.running.store(true, Ordering::SeqCst);
        info!("polling loop started");

        while self.running.load(Ordering::SeqCst) {
            let started = Instant::now();
            let report = self.run_once().await;
            debug!(
                "tick: {} decoded, {} transport errors, {} decode errors, {} alerts",
                report.decoded, report.transport_errors, report.decode_errors, report.alerts
            );

            let interval = {
                let cfg = self.config.read().unwrap_or_else(PoisonError::into_inner);
                Duration::from_millis(cfg.update_interval_ms)
            };
            let wait = interval.saturating_sub(started.elapsed());
            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = self.shutdown.notified() => break,
            }
        }

        self.running.store(false, Ordering::SeqCst);
        info!("polling loop stopped");
    }

    /// Execute exactly one tick of the pipeline.
    ///
    /// Snapshots the configuration first, so concurrent config writes
    /// never take effect mid-tick.
    pub async fn run_once(&mut self) -> TickReport {
        let cfg = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        self.history
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set_capacity(cfg.max_history_points);

        let codes: Vec<PidCode> = if cfg.poll_codes.is_empty() {
            self.catalog
                .recommended()
                .iter()
                .map(|d| d.code.clone())
                .collect()
        } else {
            cfg.poll_codes.clone()
        };

        let now = self.clock.now_ms();
        let responses = self.transport.request_pids(&codes).await;

        let decoder = CatalogDecoder::new(&self.catalog);
        let mut snapshot = HistorySnapshot::new(now);
        let mut report = TickReport::default();

        for (code, result) in responses {
            let raw = match result {
                Ok(raw) => raw,
                Err(e) => {
                    // Previous live value stays; stale-but-present beats absent.
                    warn!("transport error for PID {code}: {e}");
                    report.transport_errors += 1;
                    continue;
                }
            };

            let sample = match decoder.decode_response(code.as_str(), &raw, now) {
                Ok(sample) => sample,
                Err(e) => {
                    warn!("decode error: {e}");
                    report.decode_errors += 1;
                    continue;
                }
            };
            if sample.out_of_range {
                debug!(
                    "PID {} value {} {} outside declared range",
                    sample.pid, sample.value, sample.unit
                );
            }

            snapshot.insert(sample.pid.clone(), sample.value);
            if let Some(sink) = &self.sample_sink {
                if let Err(e) = sink.record_sample(&sample) {
                    warn!("sample sink failed: {e}");
                }
            }

            if cfg.enable_alerts {
                if let Some(alert) = self.engine.evaluate(&sample, &cfg.alert_thresholds) {
                    if let Some(sink) = &self.alert_sink {
                        if let Err(e) = sink.record_alert(&alert) {
                            warn!("alert sink failed: {e}");
                        }
                    }
                    self.alerts
                        .write()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(alert);
                    report.alerts += 1;
                }
            }

            self.live
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .update(sample);
            report.decoded += 1;
        }

        if !snapshot.is_empty() {
            self.history
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .append(snapshot);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::sink::SinkError;
    use crate::transport::MockTransport;
    use alerting::AlertThreshold;
    use response_decoder::DecodedSample;
    use std::sync::Mutex;

    fn poller(config: PollerConfig) -> (Poller<MockTransport, ManualClock>, ManualClock) {
        let catalog = Arc::new(PidCatalog::builtin());
        let transport = MockTransport::new(Arc::clone(&catalog));
        let clock = ManualClock::new(1_000_000);
        (
            Poller::new(catalog, transport, clock.clone(), config),
            clock,
        )
    }

    #[tokio::test]
    async fn test_tick_populates_store_and_history() {
        let (mut p, _clock) = poller(PollerConfig::default());
        let report = p.run_once().await;

        // The default poll set is the 10-PID recommended set.
        assert_eq!(report.decoded, 10);
        assert_eq!(report.transport_errors, 0);

        let live = p.live();
        let live = live.read().unwrap();
        assert_eq!(live.len(), 10);
        assert_eq!(live.get("0C").unwrap().timestamp_ms, 1_000_000);

        let history = p.history();
        let history = history.read().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().unwrap().values.len(), 10);
    }

    #[tokio::test]
    async fn test_failed_pid_preserves_previous_value() {
        let catalog = Arc::new(PidCatalog::builtin());
        let mut transport = MockTransport::new(Arc::clone(&catalog));
        let clock = ManualClock::new(1_000_000);
        let mut p = Poller::new(
            Arc::clone(&catalog),
            MockTransport::new(Arc::clone(&catalog)),
            clock.clone(),
            PollerConfig::default(),
        );

        p.run_once().await;
        let first_rpm = p.live().read().unwrap().get("0C").cloned().unwrap();

        // Swap in a transport that fails 0C, then tick again.
        transport.fail_code("0C");
        p.transport = transport;
        clock.advance(1000);
        let report = p.run_once().await;

        assert_eq!(report.transport_errors, 1);
        assert_eq!(report.decoded, 9);
        let live = p.live();
        let live = live.read().unwrap();
        // 0C kept its previous sample and old timestamp.
        assert_eq!(live.get("0C"), Some(&first_rpm));
        assert!(live.is_stale("0C", 500, clock.now_ms()));
        assert_eq!(live.get("0D").unwrap().timestamp_ms, 1_001_000);
    }

    #[tokio::test]
    async fn test_alerts_fire_against_thresholds() {
        let mut cfg = PollerConfig::default();
        // Coolant always decodes inside -40..215; force a violation band.
        cfg.alert_thresholds.insert(
            "05".into(),
            AlertThreshold {
                min: None,
                max: Some(-300.0),
                enabled: true,
            },
        );
        let (mut p, _clock) = poller(cfg);
        let report = p.run_once().await;

        assert_eq!(report.alerts, 1);
        let alerts = p.alerts();
        let alerts = alerts.read().unwrap();
        assert_eq!(alerts.unread(), 1);
        assert_eq!(alerts.iter().next().unwrap().pid_code.as_str(), "05");
    }

    #[tokio::test]
    async fn test_enable_alerts_false_suppresses_engine() {
        let mut cfg = PollerConfig::default();
        cfg.enable_alerts = false;
        cfg.alert_thresholds.insert(
            "05".into(),
            AlertThreshold {
                min: None,
                max: Some(-300.0),
                enabled: true,
            },
        );
        let (mut p, _clock) = poller(cfg);
        let report = p.run_once().await;

        assert_eq!(report.alerts, 0);
        assert!(p.alerts().read().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_config_changes_apply_next_tick() {
        let (mut p, _clock) = poller(PollerConfig::default());
        p.run_once().await;

        {
            let config = p.config();
            let mut cfg = config.write().unwrap();
            cfg.poll_codes = vec![PidCode::new("0C")];
        }
        let report = p.run_once().await;
        assert_eq!(report.decoded, 1);
    }

    #[derive(Default)]
    struct RecordingSink {
        samples: Mutex<Vec<DecodedSample>>,
    }

    impl SampleSink for RecordingSink {
        fn record_sample(&self, sample: &DecodedSample) -> Result<(), SinkError> {
            self.samples.lock().map_err(|e| SinkError(e.to_string()))?.push(sample.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_sample_sink_receives_every_decoded_sample() {
        let sink = Arc::new(RecordingSink::default());
        let catalog = Arc::new(PidCatalog::builtin());
        let mut p = Poller::new(
            Arc::clone(&catalog),
            MockTransport::new(Arc::clone(&catalog)),
            ManualClock::new(0),
            PollerConfig::default(),
        )
        .with_sample_sink(Arc::clone(&sink) as Arc<dyn SampleSink>);

        p.run_once().await;
        assert_eq!(sink.samples.lock().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_run_stops_on_handle() {
        let mut cfg = PollerConfig::default();
        cfg.update_interval_ms = 10;
        let (mut p, _clock) = poller(cfg);
        let handle = p.handle();

        let task = tokio::spawn(async move {
            p.run().await;
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.stop();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("poller did not stop")
            .unwrap();
        assert!(!handle.is_running());
    }
}
