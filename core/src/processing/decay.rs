use crate::prelude::DisplayConfig;

/// Exponential fade shared by trails and labels so both expire together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayRule {
    pub trail_max_seconds: f64,
    pub half_life: f64,
    pub alpha_min: f64,
}

impl Default for DecayRule {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}

impl DecayRule {
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            trail_max_seconds: config.trail_max_seconds,
            half_life: config.half_life,
            alpha_min: config.alpha_min,
        }
    }

    /// Opacity of something created at `created_at`, or `None` once it has
    /// reached the end of the window or faded below the floor.
    pub fn alpha(&self, created_at: f64, now: f64) -> Option<f64> {
        let age = (now - created_at).max(0.0);
        if age >= self.trail_max_seconds {
            return None;
        }
        let alpha = (-age / self.half_life).exp();
        if alpha < self.alpha_min {
            return None;
        }
        Some(alpha)
    }
}
