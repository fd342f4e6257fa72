use crate::prelude::MAX_RANGE_CM;

/// Maps the half-disc field onto a screen rectangle: 0° at the left edge,
/// 90° straight up, 180° at the right edge, range growing outwards from the
/// bottom-center origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarProjection {
    pub origin_x: f32,
    pub origin_y: f32,
    /// Screen length of `MAX_RANGE_CM`.
    pub radius: f32,
}

impl PolarProjection {
    /// Largest half-disc that fits in `width` x `height` with `margin` on
    /// every side.
    pub fn fit(width: f32, height: f32, margin: f32) -> Self {
        let radius = ((width - 2.0 * margin) / 2.0)
            .min(height - 2.0 * margin)
            .max(1.0);
        Self {
            origin_x: width / 2.0,
            origin_y: height - margin,
            radius,
        }
    }

    pub fn to_screen(&self, angle_rad: f64, distance_cm: f64) -> (f32, f32) {
        let r = (distance_cm / MAX_RANGE_CM) as f32 * self.radius;
        let (sin, cos) = (angle_rad as f32).sin_cos();
        (self.origin_x - r * cos, self.origin_y - r * sin)
    }
}
