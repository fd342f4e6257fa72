use log::info;
use sweepcore::render::{LabelPlacement, RenderSink, SweepLine, TrailSet};

/// Sink for headless runs: keeps the latest frame's counts and logs a
/// summary every `report_every` frames.
pub struct ConsoleSink {
    report_every: u64,
    frames: u64,
    sweep_deg: Option<f64>,
    trails: usize,
    labels: usize,
    nearest: Option<f64>,
}

impl ConsoleSink {
    pub fn new(report_every: u64) -> Self {
        Self {
            report_every,
            frames: 0,
            sweep_deg: None,
            trails: 0,
            labels: 0,
            nearest: None,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn visible_trails(&self) -> usize {
        self.trails
    }

    pub fn visible_labels(&self) -> usize {
        self.labels
    }

    pub fn summary(&self) -> String {
        let sweep = self
            .sweep_deg
            .map(|deg| format!("{:.0} deg", deg))
            .unwrap_or_else(|| "none".into());
        let nearest = self
            .nearest
            .map(|cm| format!("{:.1} cm", cm))
            .unwrap_or_else(|| "n/a".into());
        format!(
            "frame {} sweep {} trails {} labels {} nearest {}",
            self.frames,
            sweep,
            self.visible_trails(),
            self.visible_labels(),
            nearest
        )
    }
}

impl RenderSink for ConsoleSink {
    fn set_sweep(&mut self, sweep: SweepLine) {
        self.sweep_deg = Some(sweep.angle_rad.to_degrees());
    }

    fn replace_trails(&mut self, trails: &TrailSet) {
        self.frames += 1;
        self.trails = trails.len();
        self.nearest = trails
            .segments
            .iter()
            .map(|segment| segment.end_cm)
            .reduce(f64::min);
        if self.report_every > 0 && self.frames % self.report_every == 0 {
            info!("{}", self.summary());
        }
    }

    fn replace_labels(&mut self, labels: &[LabelPlacement]) {
        self.labels = labels.len();
    }

    fn clear_labels(&mut self) {
        self.labels = 0;
    }
}
