use crate::controls::{ControlSurface, UiParameters};
use crate::interface::line::{parse_line, Distance, Sample};
use crate::interface::source::ByteSource;
use crate::prelude::{DisplayConfig, SweepResult};
use crate::processing::{HitStore, LabelSelector, TrailBuilder};
use crate::render::{LabelPlacement, RenderSink, SweepLine, TrailSet};
use crate::scheduler::lines::LineAssembler;
use crate::telemetry::{LogManager, MetricsRecorder};
use log::trace;
use std::sync::Arc;

/// What a single scheduler tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub bytes_read: usize,
    pub lines: usize,
    pub rendered: bool,
}

/// Latest derived frame. Rebuilt from the hit store on every render.
#[derive(Debug, Clone, Default)]
struct RenderState {
    sweep_rad: Option<f64>,
    trails: TrailSet,
    labels: Vec<LabelPlacement>,
}

/// Single-threaded loop body: drain bytes every tick, redraw at a capped rate.
pub struct FrameScheduler<B, S> {
    source: B,
    sink: S,
    store: HitStore,
    lines: LineAssembler,
    trails: TrailBuilder,
    labels: LabelSelector,
    params: Arc<UiParameters>,
    render_interval: f64,
    last_render: Option<f64>,
    state: RenderState,
    read_buf: Vec<u8>,
    overflow_seen: u64,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl<B: ByteSource, S: RenderSink> FrameScheduler<B, S> {
    pub fn new(source: B, sink: S, config: &DisplayConfig) -> SweepResult<Self> {
        config.validate()?;
        let params = Arc::new(UiParameters::new(&config.labels));
        Ok(Self {
            source,
            sink,
            store: HitStore::with_capacity(config.max_hits),
            lines: LineAssembler::default(),
            trails: TrailBuilder::from_config(config),
            labels: LabelSelector::from_config(config),
            params,
            render_interval: config.render_interval(),
            last_render: None,
            state: RenderState {
                trails: TrailSet::empty(config.hit_rgb),
                ..Default::default()
            },
            read_buf: Vec::new(),
            overflow_seen: 0,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("scheduler"),
        })
    }

    /// Handle for the widget layer; setters take effect on the next tick.
    pub fn controls(&self) -> ControlSurface {
        ControlSurface::new(Arc::clone(&self.params))
    }

    /// Runs one loop iteration at time `now` (monotonic seconds).
    ///
    /// Only transport failures are returned; bad lines are dropped in place.
    pub fn tick(&mut self, now: f64) -> SweepResult<TickOutcome> {
        if self.params.take_clear_request() {
            self.state.labels.clear();
            self.sink.clear_labels();
        }

        let (bytes_read, lines) = self.drain(now)?;

        let due = self
            .last_render
            .map_or(true, |last| now - last >= self.render_interval);
        if due {
            self.render(now);
            self.last_render = Some(now);
        }

        Ok(TickOutcome {
            bytes_read,
            lines,
            rendered: due,
        })
    }

    fn drain(&mut self, now: f64) -> SweepResult<(usize, usize)> {
        self.read_buf.clear();
        let bytes_read = self.source.read_available(&mut self.read_buf)?;
        if bytes_read == 0 {
            return Ok((0, 0));
        }

        let complete = self.lines.push(&self.read_buf);
        if self.lines.overflowed() != self.overflow_seen {
            self.overflow_seen = self.lines.overflowed();
            self.metrics.record_rejected();
            self.logger.detail("dropped unterminated input past pending limit");
        }

        for line in &complete {
            self.feed_line(line, now);
        }
        Ok((bytes_read, complete.len()))
    }

    /// Applies one complete line: moves the sweep and records a hit when the
    /// reading carries a distance.
    pub fn feed_line(&mut self, line: &str, now: f64) -> Option<Sample> {
        let Some(sample) = parse_line(line) else {
            trace!("discarding line {:?}", line);
            self.metrics.record_rejected();
            return None;
        };
        self.metrics.record_accepted();

        let angle_rad = sample.angle_rad();
        if self.state.sweep_rad.is_none() {
            self.logger
                .record(&format!("first reading at {} deg", sample.angle_deg));
        }
        self.state.sweep_rad = Some(angle_rad);
        self.sink.set_sweep(SweepLine::at(angle_rad));

        if let Distance::Present(cm) = sample.distance {
            let evicted_before = self.store.evicted();
            self.store.record(angle_rad, cm, now);
            self.metrics
                .record_hit(self.store.evicted() != evicted_before);
        }
        Some(sample)
    }

    fn render(&mut self, now: f64) {
        let snapshot = self.store.snapshot();
        self.state.trails = self.trails.build(snapshot, now);
        self.state.labels = self
            .labels
            .select(snapshot, now, self.params.label_params());

        self.sink.replace_trails(&self.state.trails);
        self.sink.replace_labels(&self.state.labels);
        self.metrics.record_frame();
    }

    pub fn sweep_angle(&self) -> Option<f64> {
        self.state.sweep_rad
    }

    pub fn store(&self) -> &HitStore {
        &self.store
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn pending_input(&self) -> &str {
        self.lines.pending()
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }
}
