use crate::report::ConsoleSink;
use crate::workflow::config::ScanConfig;
use anyhow::Context;
use log::{error, info};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use sweepcore::interface::{open_source, ByteSource};
use sweepcore::scheduler::{FrameScheduler, MonotonicClock};
use sweepcore::telemetry::MetricsSnapshot;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub elapsed_seconds: f64,
    pub frames: u64,
    pub hits_stored: usize,
    pub metrics: MetricsSnapshot,
}

#[derive(Clone)]
pub struct Runner {
    config: ScanConfig,
}

impl Runner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Opens the configured source and runs until `shutdown` is raised or
    /// `limit` elapses.
    pub fn execute(
        &self,
        shutdown: &AtomicBool,
        limit: Option<Duration>,
    ) -> anyhow::Result<RunSummary> {
        let source = open_source(&self.config.source).context("opening sensor source")?;
        self.execute_with(source, shutdown, limit)
    }

    pub fn execute_with<B: ByteSource>(
        &self,
        source: B,
        shutdown: &AtomicBool,
        limit: Option<Duration>,
    ) -> anyhow::Result<RunSummary> {
        let sink = ConsoleSink::new(self.config.report_every);
        let mut scheduler = FrameScheduler::new(source, sink, &self.config.display)
            .context("initializing frame scheduler")?;
        let idle = Duration::from_millis(self.config.idle_sleep_ms);
        let limit = limit.map(|d| d.as_secs_f64());
        let clock = MonotonicClock::new();

        info!("scanning; press Ctrl+C to stop");
        while !shutdown.load(Ordering::Relaxed) {
            let now = clock.now();
            if limit.is_some_and(|limit| now >= limit) {
                break;
            }
            let outcome = scheduler.tick(now).map_err(|err| {
                error!("sensor link failed: {}", err);
                err
            })?;
            if outcome.bytes_read == 0 && !idle.is_zero() {
                thread::sleep(idle);
            }
        }

        let summary = RunSummary {
            elapsed_seconds: clock.now(),
            frames: scheduler.sink().frames(),
            hits_stored: scheduler.store().len(),
            metrics: scheduler.metrics().snapshot(),
        };
        info!("{}", scheduler.sink().summary());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweepcore::interface::MemorySource;

    #[test]
    fn runner_drains_source_until_limit() {
        let runner = Runner::new(ScanConfig::default());
        let source = MemorySource::from_chunks(["10,20\n20,NA\n", "30,", "40\nbad\n"]);
        let shutdown = AtomicBool::new(false);
        let summary = runner
            .execute_with(source, &shutdown, Some(Duration::from_millis(50)))
            .unwrap();
        assert_eq!(summary.metrics.lines_accepted, 3);
        assert_eq!(summary.metrics.lines_rejected, 1);
        assert_eq!(summary.hits_stored, 2);
        assert!(summary.frames >= 1);
    }

    #[test]
    fn raised_shutdown_stops_before_first_tick() {
        let runner = Runner::new(ScanConfig::default());
        let shutdown = AtomicBool::new(true);
        let summary = runner
            .execute_with(MemorySource::from_chunks(["1,1\n"]), &shutdown, None)
            .unwrap();
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.metrics.lines_accepted, 0);
    }

    #[test]
    fn transport_failure_ends_the_run() {
        let runner = Runner::new(ScanConfig::default());
        let mut source = MemorySource::new();
        source.disconnect_when_drained();
        let shutdown = AtomicBool::new(false);
        assert!(runner
            .execute_with(source, &shutdown, Some(Duration::from_secs(5)))
            .is_err());
    }
}
