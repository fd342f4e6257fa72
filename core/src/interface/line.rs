use crate::prelude::{MAX_ANGLE_DEG, MAX_RANGE_CM};
use serde::{Deserialize, Serialize};

/// Echo distance of a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Distance {
    Present(f64),
    Absent,
}

/// One validated `<angle>,<distance-or-NA>` reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub angle_deg: i32,
    pub distance: Distance,
}

impl Sample {
    pub fn angle_rad(&self) -> f64 {
        (self.angle_deg as f64).to_radians()
    }
}

/// Parses one sensor line, returning `None` for anything that is not a reading.
///
/// An out-of-range or non-finite distance keeps the angle and degrades to
/// [`Distance::Absent`]; an unparseable distance rejects the whole line.
pub fn parse_line(line: &str) -> Option<Sample> {
    let line = line.trim();
    let (angle_str, distance_str) = line.split_once(',')?;

    let angle = angle_str.trim().parse::<f64>().ok()?;
    if !angle.is_finite() {
        return None;
    }
    let angle = angle.trunc();
    if !(0.0..=MAX_ANGLE_DEG as f64).contains(&angle) {
        return None;
    }
    let angle_deg = angle as i32;

    let distance_str = distance_str.trim();
    let distance = if distance_str.eq_ignore_ascii_case("NA") {
        Distance::Absent
    } else {
        let cm = distance_str.parse::<f64>().ok()?;
        if cm.is_finite() && (0.0..=MAX_RANGE_CM).contains(&cm) {
            Distance::Present(cm)
        } else {
            Distance::Absent
        }
    };

    Some(Sample {
        angle_deg,
        distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_without_separator_is_rejected() {
        for line in ["", "   ", "90", "90 37.5", "NA", "hello"] {
            assert_eq!(parse_line(line), None, "{line:?}");
        }
    }

    #[test]
    fn angle_outside_field_is_rejected() {
        assert_eq!(parse_line("181,20"), None);
        assert_eq!(parse_line("-1,20"), None);
        assert_eq!(parse_line("999,NA"), None);
        assert_eq!(parse_line("abc,20"), None);
        assert_eq!(parse_line("nan,20"), None);
    }

    #[test]
    fn float_angle_is_truncated() {
        let sample = parse_line("180.9,10").unwrap();
        assert_eq!(sample.angle_deg, 180);
        let sample = parse_line("-0.5,10").unwrap();
        assert_eq!(sample.angle_deg, 0);
    }

    #[test]
    fn na_maps_to_absent_distance() {
        let sample = parse_line("90,NA").unwrap();
        assert_eq!(sample.angle_deg, 90);
        assert_eq!(sample.distance, Distance::Absent);
        assert_eq!(parse_line(" 90 , na \r").unwrap().distance, Distance::Absent);
    }

    #[test]
    fn out_of_range_distance_keeps_angle() {
        let sample = parse_line("45,150").unwrap();
        assert_eq!(sample.angle_deg, 45);
        assert_eq!(sample.distance, Distance::Absent);
        assert_eq!(parse_line("45,-0.1").unwrap().distance, Distance::Absent);
        assert_eq!(parse_line("45,inf").unwrap().distance, Distance::Absent);
    }

    #[test]
    fn valid_reading_carries_distance() {
        let sample = parse_line("45,37.5").unwrap();
        assert_eq!(sample.angle_deg, 45);
        assert_eq!(sample.distance, Distance::Present(37.5));
        assert!((sample.angle_rad() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert_eq!(parse_line("0,100").unwrap().distance, Distance::Present(100.0));
    }

    #[test]
    fn garbage_distance_rejects_line() {
        assert_eq!(parse_line("45,far"), None);
        assert_eq!(parse_line("45,"), None);
        assert_eq!(parse_line("45,12,13"), None);
    }
}
