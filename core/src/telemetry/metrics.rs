use serde::Serialize;
use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

/// Counters accumulated since the scheduler started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub lines_accepted: u64,
    pub lines_rejected: u64,
    pub hits_recorded: u64,
    pub hits_evicted: u64,
    pub frames_rendered: u64,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut MetricsSnapshot)) {
        if let Ok(mut metrics) = self.inner.lock() {
            apply(&mut metrics);
        }
    }

    pub fn record_accepted(&self) {
        self.update(|m| m.lines_accepted += 1);
    }

    pub fn record_rejected(&self) {
        self.update(|m| m.lines_rejected += 1);
    }

    pub fn record_hit(&self, evicted: bool) {
        self.update(|m| {
            m.hits_recorded += 1;
            if evicted {
                m.hits_evicted += 1;
            }
        });
    }

    pub fn record_frame(&self) {
        self.update(|m| m.frames_rendered += 1);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
