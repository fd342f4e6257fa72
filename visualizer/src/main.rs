use anyhow::Context;
use clap::Parser;
use iced::{
    alignment, mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, row, slider, text, Container,
    },
    Alignment, Color, Element, Length, Pixels, Point, Rectangle, Renderer, Subscription, Task,
    Theme,
};
use log::error;
use std::{sync::Mutex, time::Duration};
use sweepcore::{
    controls::{MAX_FONTSIZE, MIN_FONTSIZE},
    interface::{open_source, ByteSource, SerialSettings, SourceConfig, SyntheticSettings},
    math::PolarProjection,
    prelude::{DisplayConfig, Rgba, MAX_RANGE_CM},
    render::{HorizontalAnchor, SceneBuffer, VerticalAnchor},
    scheduler::{FrameScheduler, MonotonicClock},
    ControlSurface,
};

type Scheduler = FrameScheduler<Box<dyn ByteSource + Send>, SceneBuffer>;

const FIELD_BACKGROUND: Color = Color::from_rgb(0.157, 0.522, 0.149);
const GRID_COLOR: Color = Color::from_rgba(0.459, 0.851, 0.314, 0.5);
const SWEEP_COLOR: Color = Color::from_rgba(0.475, 0.941, 0.482, 0.85);
const LABEL_EVERY_MAX: u8 = 10;

#[derive(Parser)]
#[command(author, version, about = "Polar sweep display for a rotating range sensor")]
struct Args {
    /// Serial port the sensor is attached to; the synthetic sensor is used when omitted
    #[arg(long)]
    port: Option<String>,
    #[arg(long, default_value_t = sweepcore::interface::serial::DEFAULT_BAUD)]
    baud: u32,
    /// Delay after opening the port before buffered input is discarded
    #[arg(long, default_value_t = sweepcore::interface::serial::DEFAULT_SETTLE_MS)]
    settle_ms: u64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Start with distance labels enabled
    #[arg(long, default_value_t = false)]
    labels: bool,
    #[arg(long, default_value_t = 10)]
    label_fontsize: u32,
    #[arg(long, default_value_t = 1)]
    label_every: u32,
}

impl Args {
    fn source_config(&self) -> SourceConfig {
        match &self.port {
            Some(port) => SourceConfig::Serial(SerialSettings {
                port: port.clone(),
                baud: self.baud,
                settle_ms: self.settle_ms,
            }),
            None => SourceConfig::Synthetic(SyntheticSettings {
                seed: self.seed,
                ..Default::default()
            }),
        }
    }

    fn display_config(&self) -> DisplayConfig {
        let mut config = DisplayConfig::default();
        config.labels.show_labels = self.labels;
        config.labels.label_fontsize = self.label_fontsize;
        config.labels.label_every = self.label_every;
        config
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let source = open_source(&args.source_config()).context("opening sensor source")?;
    let scheduler = FrameScheduler::new(source, SceneBuffer::new(), &args.display_config())
        .context("initializing frame scheduler")?;
    let slot = Mutex::new(Some(scheduler));

    iced::application(
        move || Visualizer::boot(slot.lock().ok().and_then(|mut s| s.take())),
        Visualizer::update,
        Visualizer::view,
    )
    .title(application_title)
    .subscription(application_subscription)
    .theme(application_theme)
    .run()
    .context("running visualizer window")
}

fn application_title(_: &Visualizer) -> String {
    "Sweep Radar Scanner".into()
}

fn application_subscription(_: &Visualizer) -> Subscription<Message> {
    time::every(Duration::from_millis(2)).map(|_| Message::Tick)
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

struct Visualizer {
    scheduler: Option<Scheduler>,
    controls: Option<ControlSurface>,
    clock: MonotonicClock,
    status: String,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    ToggleLabels,
    FontSizeChanged(u8),
    SpacingChanged(u8),
}

impl Visualizer {
    fn boot(scheduler: Option<Scheduler>) -> (Self, Task<Message>) {
        let controls = scheduler.as_ref().map(|s| s.controls());
        let status = if scheduler.is_some() {
            "Reading from sensor...".into()
        } else {
            "No sensor source available".into()
        };
        (
            Visualizer {
                scheduler,
                controls,
                clock: MonotonicClock::new(),
                status,
            },
            Task::none(),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                let Some(scheduler) = state.scheduler.as_mut() else {
                    return Task::none();
                };
                match scheduler.tick(state.clock.now()) {
                    Ok(outcome) if outcome.rendered => {
                        let m = scheduler.metrics().snapshot();
                        state.status = format!(
                            "hits {} stored / {} evicted | lines {} ok / {} rejected",
                            scheduler.store().len(),
                            m.hits_evicted,
                            m.lines_accepted,
                            m.lines_rejected
                        );
                        Task::none()
                    }
                    Ok(_) => Task::none(),
                    Err(err) => {
                        error!("sensor link failed: {}", err);
                        state.status = format!("Sensor error: {err}");
                        state.scheduler = None;
                        iced::exit()
                    }
                }
            }
            Message::ToggleLabels => {
                if let Some(controls) = &state.controls {
                    controls.toggle_labels();
                }
                Task::none()
            }
            Message::FontSizeChanged(size) => {
                if let Some(controls) = &state.controls {
                    controls.set_label_fontsize(i64::from(size));
                }
                Task::none()
            }
            Message::SpacingChanged(every) => {
                if let Some(controls) = &state.controls {
                    controls.set_label_every(i64::from(every));
                }
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let (shown, fontsize, every) = state
            .controls
            .as_ref()
            .map(|c| {
                let p = c.params();
                (p.show_labels(), p.label_fontsize(), p.label_every())
            })
            .unwrap_or((false, 10, 1));

        let field: Element<'_, Message> = match &state.scheduler {
            Some(scheduler) => Canvas::new(RadarField {
                scene: scheduler.sink(),
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
            None => Container::new(text("Sensor disconnected").size(18))
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
        };

        let controls_column = column![
            button(if shown { "Hide Length Text" } else { "Toggle Length Text" })
                .on_press(Message::ToggleLabels)
                .padding(10),
            text(format!("Text Size: {fontsize}")).size(14),
            slider(
                MIN_FONTSIZE as u8..=MAX_FONTSIZE as u8,
                fontsize.clamp(MIN_FONTSIZE, MAX_FONTSIZE) as u8,
                Message::FontSizeChanged
            ),
            text(format!("Label Every N: {every}")).size(14),
            slider(
                1..=LABEL_EVERY_MAX,
                every.clamp(1, u32::from(LABEL_EVERY_MAX)) as u8,
                Message::SpacingChanged
            ),
            text(&state.status).size(12),
        ]
        .spacing(12)
        .padding(16)
        .width(Length::Fixed(240.0));

        let layout = row![field, controls_column]
            .spacing(12)
            .align_y(Alignment::Start)
            .padding(12);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn color(rgba: Rgba) -> Color {
    Color::from_rgba(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn horizontal(anchor: HorizontalAnchor) -> alignment::Horizontal {
    match anchor {
        HorizontalAnchor::Left => alignment::Horizontal::Left,
        HorizontalAnchor::Center => alignment::Horizontal::Center,
        HorizontalAnchor::Right => alignment::Horizontal::Right,
    }
}

fn vertical(anchor: VerticalAnchor) -> alignment::Vertical {
    match anchor {
        VerticalAnchor::Top => alignment::Vertical::Top,
        VerticalAnchor::Center => alignment::Vertical::Center,
        VerticalAnchor::Bottom => alignment::Vertical::Bottom,
    }
}

/// Polar half-disc: field, grid, fading trails, labels and the live sweep.
struct RadarField<'a> {
    scene: &'a SceneBuffer,
}

impl RadarField<'_> {
    fn radial(proj: &PolarProjection, angle_rad: f64, from_cm: f64, to_cm: f64) -> Path {
        let (x0, y0) = proj.to_screen(angle_rad, from_cm);
        let (x1, y1) = proj.to_screen(angle_rad, to_cm);
        Path::line(Point::new(x0, y0), Point::new(x1, y1))
    }

    fn ring(proj: &PolarProjection, distance_cm: f64) -> Path {
        Path::new(|builder| {
            for step in 0..=90 {
                let angle = (step as f64 * 2.0).to_radians();
                let (x, y) = proj.to_screen(angle, distance_cm);
                if step == 0 {
                    builder.move_to(Point::new(x, y));
                } else {
                    builder.line_to(Point::new(x, y));
                }
            }
        })
    }
}

impl canvas::Program<Message> for RadarField<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::BLACK);

        let proj = PolarProjection::fit(bounds.width, bounds.height, 36.0);
        let outline = Path::new(|builder| {
            builder.move_to(Point::new(proj.origin_x, proj.origin_y));
            for step in 0..=90 {
                let (x, y) = proj.to_screen((step as f64 * 2.0).to_radians(), MAX_RANGE_CM);
                builder.line_to(Point::new(x, y));
            }
            builder.close();
        });
        frame.fill(&outline, FIELD_BACKGROUND);

        let grid = || Stroke::default().with_width(1.0).with_color(GRID_COLOR);
        for ring in 1..=5 {
            frame.stroke(&Self::ring(&proj, ring as f64 * 20.0), grid());
        }
        for deg in (0..=180).step_by(30) {
            let angle = (deg as f64).to_radians();
            frame.stroke(&Self::radial(&proj, angle, 0.0, MAX_RANGE_CM), grid());
            let (x, y) = proj.to_screen(angle, MAX_RANGE_CM * 1.12);
            frame.fill_text(canvas::Text {
                content: format!("{deg}°"),
                position: Point::new(x, y),
                color: Color::WHITE,
                size: Pixels(12.0),
                align_x: alignment::Horizontal::Center.into(),
                align_y: alignment::Vertical::Center,
                ..canvas::Text::default()
            });
        }

        for segment in &self.scene.trails.segments {
            frame.stroke(
                &Self::radial(&proj, segment.angle_rad, segment.start_cm, segment.end_cm),
                Stroke::default()
                    .with_width(2.2)
                    .with_color(color(segment.color)),
            );
        }

        // Placements arrive newest first; draw oldest first so the newest sits on top.
        for label in self.scene.labels.iter().rev() {
            let (x, y) = proj.to_screen(label.angle_rad, label.distance_cm);
            frame.fill_text(canvas::Text {
                content: label.text.clone(),
                position: Point::new(x, y),
                color: color(label.color),
                size: Pixels(label.fontsize as f32),
                align_x: horizontal(label.h_anchor).into(),
                align_y: vertical(label.v_anchor),
                ..canvas::Text::default()
            });
        }

        if let Some(sweep) = self.scene.sweep {
            frame.stroke(
                &Self::radial(&proj, sweep.angle_rad, sweep.start_cm, sweep.end_cm),
                Stroke::default().with_width(3.0).with_color(SWEEP_COLOR),
            );
        }

        vec![frame.into_geometry()]
    }
}
