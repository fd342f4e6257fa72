use serde::{Deserialize, Serialize};

/// Upper edge of the polar field, in centimeters.
pub const MAX_RANGE_CM: f64 = 100.0;
/// Upper edge of the sweep, in degrees.
pub const MAX_ANGLE_DEG: i32 = 180;

/// Tunables shared by the decay, labeling and pacing stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub trail_max_seconds: f64,
    pub half_life: f64,
    pub alpha_min: f64,
    pub max_hits: usize,
    pub hit_rgb: [f32; 3],
    pub render_interval_ms: u64,
    pub labels: LabelDefaults,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            trail_max_seconds: 5.0,
            half_life: 1.0,
            alpha_min: 0.03,
            max_hits: 4000,
            hit_rgb: [0.49, 1.0, 0.49],
            render_interval_ms: 10,
            labels: LabelDefaults::default(),
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> SweepResult<()> {
        if !(self.half_life > 0.0) {
            return Err(SweepError::InvalidConfig(format!(
                "half_life must be positive, got {}",
                self.half_life
            )));
        }
        if !(self.trail_max_seconds > 0.0) {
            return Err(SweepError::InvalidConfig(format!(
                "trail_max_seconds must be positive, got {}",
                self.trail_max_seconds
            )));
        }
        if !(self.alpha_min > 0.0 && self.alpha_min < 1.0) {
            return Err(SweepError::InvalidConfig(format!(
                "alpha_min must lie in (0, 1), got {}",
                self.alpha_min
            )));
        }
        if self.max_hits == 0 {
            return Err(SweepError::InvalidConfig("max_hits must be at least 1".into()));
        }
        if self.render_interval_ms == 0 {
            return Err(SweepError::InvalidConfig(
                "render_interval_ms must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Minimum spacing between two rendered frames, in seconds.
    pub fn render_interval(&self) -> f64 {
        self.render_interval_ms as f64 / 1000.0
    }
}

/// Initial values for the label controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelDefaults {
    pub show_labels: bool,
    pub label_fontsize: u32,
    pub label_every: u32,
}

impl Default for LabelDefaults {
    fn default() -> Self {
        Self {
            show_labels: false,
            label_fontsize: 10,
            label_every: 1,
        }
    }
}

/// Straight RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub fn from_rgb(rgb: [f32; 3], alpha: f32) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a: alpha,
        }
    }
}

/// Common error type for the sweep pipeline.
///
/// Only transport and configuration problems surface here; malformed lines
/// and capacity overflow are handled where they occur.
#[derive(thiserror::Error, Debug)]
pub enum SweepError {
    #[error("cannot open serial port {port}: {source}")]
    PortOpen {
        port: String,
        #[source]
        source: serialport::Error,
    },
    #[error("transport failure: {0}")]
    Transport(#[from] std::io::Error),
    #[error("transport disconnected: {0}")]
    Disconnected(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type SweepResult<T> = Result<T, SweepError>;
