use crate::interface::source::ByteSource;
use crate::prelude::{SweepResult, MAX_ANGLE_DEG};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Upper bound on lines produced by a single read, so a stalled caller does
/// not receive one giant burst.
const MAX_LINES_PER_READ: u64 = 512;

/// A fixed object the synthetic beam can echo off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reflector {
    pub from_deg: i32,
    pub to_deg: i32,
    pub distance_cm: f64,
}

/// Configuration for generating synthetic sensor traffic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticSettings {
    pub seed: u64,
    pub lines_per_second: f64,
    pub step_deg: i32,
    /// Peak jitter added to each echo distance, in centimeters.
    pub jitter_cm: f64,
    /// Share of emitted lines that are deliberately malformed.
    pub garbage_rate: f64,
    pub reflectors: Vec<Reflector>,
}

impl Default for SyntheticSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            lines_per_second: 180.0,
            step_deg: 1,
            jitter_cm: 0.8,
            garbage_rate: 0.02,
            reflectors: vec![
                Reflector {
                    from_deg: 25,
                    to_deg: 40,
                    distance_cm: 62.0,
                },
                Reflector {
                    from_deg: 80,
                    to_deg: 95,
                    distance_cm: 35.0,
                },
                Reflector {
                    from_deg: 140,
                    to_deg: 170,
                    distance_cm: 88.0,
                },
            ],
        }
    }
}

/// Stand-in for the physical sensor: a beam sweeping 0→180→0 degrees.
pub struct SyntheticSensor {
    settings: SyntheticSettings,
    rng: StdRng,
    angle: i32,
    direction: i32,
    started: Option<Instant>,
    emitted: u64,
}

impl SyntheticSensor {
    pub fn new(settings: SyntheticSettings) -> Self {
        let rng = StdRng::seed_from_u64(settings.seed);
        Self {
            settings,
            rng,
            angle: 0,
            direction: 1,
            started: None,
            emitted: 0,
        }
    }

    /// Produces the next `count` lines, newline-terminated.
    pub fn emit(&mut self, count: usize) -> String {
        let mut out = String::new();
        for _ in 0..count {
            out.push_str(&self.next_line());
            out.push('\n');
        }
        out
    }

    fn next_line(&mut self) -> String {
        let angle = self.angle;
        self.advance();

        let garbage_rate = self.settings.garbage_rate.min(1.0);
        if garbage_rate > 0.0 && self.rng.gen_bool(garbage_rate) {
            return match self.rng.gen_range(0..4) {
                0 => "ERR".to_string(),
                1 => format!("{};{}", angle, 50),
                2 => format!("{},", MAX_ANGLE_DEG + 20),
                _ => format!("{},{}", angle, 250.0),
            };
        }

        let echo = self
            .settings
            .reflectors
            .iter()
            .find(|r| (r.from_deg..=r.to_deg).contains(&angle))
            .map(|r| r.distance_cm);

        match echo {
            Some(distance) => {
                let jitter = if self.settings.jitter_cm > 0.0 {
                    self.rng
                        .gen_range(-self.settings.jitter_cm..self.settings.jitter_cm)
                } else {
                    0.0
                };
                format!("{},{:.1}", angle, (distance + jitter).max(0.0))
            }
            None => format!("{},NA", angle),
        }
    }

    fn advance(&mut self) {
        let step = self.settings.step_deg.max(1);
        let mut next = self.angle + self.direction * step;
        if !(0..=MAX_ANGLE_DEG).contains(&next) {
            self.direction = -self.direction;
            next = self.angle + self.direction * step;
        }
        self.angle = next.clamp(0, MAX_ANGLE_DEG);
    }
}

impl ByteSource for SyntheticSensor {
    fn read_available(&mut self, buf: &mut Vec<u8>) -> SweepResult<usize> {
        let started = *self.started.get_or_insert_with(Instant::now);
        let rate = self.settings.lines_per_second.max(0.0);
        let due = (started.elapsed().as_secs_f64() * rate) as u64;
        let pending = due.saturating_sub(self.emitted).min(MAX_LINES_PER_READ);
        if pending == 0 {
            return Ok(0);
        }
        // Lines beyond the per-read cap are dropped rather than queued.
        self.emitted = due;

        let text = self.emit(pending as usize);
        buf.extend_from_slice(text.as_bytes());
        Ok(text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::line::{parse_line, Distance};

    fn quiet_settings() -> SyntheticSettings {
        SyntheticSettings {
            garbage_rate: 0.0,
            jitter_cm: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn sweep_bounces_between_field_edges() {
        let mut sensor = SyntheticSensor::new(quiet_settings());
        let text = sensor.emit(400);
        let angles: Vec<i32> = text
            .lines()
            .map(|l| parse_line(l).unwrap().angle_deg)
            .collect();
        assert_eq!(angles[0], 0);
        assert_eq!(angles[180], 180);
        assert_eq!(angles[181], 179);
        assert_eq!(angles[360], 0);
        assert!(angles.iter().all(|a| (0..=180).contains(a)));
    }

    #[test]
    fn reflectors_produce_echoes_and_gaps_produce_na() {
        let mut sensor = SyntheticSensor::new(quiet_settings());
        let text = sensor.emit(181);
        let samples: Vec<_> = text.lines().filter_map(parse_line).collect();
        assert_eq!(samples[30].distance, Distance::Present(62.0));
        assert_eq!(samples[10].distance, Distance::Absent);
    }

    #[test]
    fn same_seed_yields_same_stream() {
        let settings = SyntheticSettings {
            seed: 7,
            garbage_rate: 0.3,
            ..Default::default()
        };
        let mut a = SyntheticSensor::new(settings.clone());
        let mut b = SyntheticSensor::new(settings);
        assert_eq!(a.emit(200), b.emit(200));
    }

    #[test]
    fn garbage_lines_are_mixed_in() {
        let settings = SyntheticSettings {
            garbage_rate: 1.0,
            ..Default::default()
        };
        let mut sensor = SyntheticSensor::new(settings);
        let text = sensor.emit(50);
        assert!(text
            .lines()
            .filter_map(parse_line)
            .all(|s| s.distance == Distance::Absent));
    }
}
