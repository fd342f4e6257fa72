//! Contract between the pipeline and whatever draws it.
//!
//! Every rendered frame replaces the full trail and label sets. Labels are an
//! overlay that is recomputed from scratch, never patched incrementally.

pub mod scene;

pub use scene::SceneBuffer;

use crate::prelude::{Rgba, MAX_RANGE_CM};
use serde::{Deserialize, Serialize};

/// Live beam position: from the origin out to the edge of the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepLine {
    pub angle_rad: f64,
    pub start_cm: f64,
    pub end_cm: f64,
}

impl SweepLine {
    pub fn at(angle_rad: f64) -> Self {
        Self {
            angle_rad,
            start_cm: 0.0,
            end_cm: MAX_RANGE_CM,
        }
    }
}

/// Radial line drawn for one hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailSegment {
    pub angle_rad: f64,
    pub start_cm: f64,
    pub end_cm: f64,
    pub color: Rgba,
}

/// All trails of one frame. An empty set still carries a transparent
/// placeholder color for sinks that need one to clear old geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailSet {
    pub segments: Vec<TrailSegment>,
    pub placeholder: Rgba,
}

impl TrailSet {
    pub fn empty(rgb: [f32; 3]) -> Self {
        Self {
            segments: Vec::new(),
            placeholder: Rgba::from_rgb(rgb, 0.0),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Default for TrailSet {
    fn default() -> Self {
        Self::empty([0.0; 3])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalAnchor {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAnchor {
    Top,
    Center,
    Bottom,
}

/// Distance text anchored at the end of a trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    pub angle_rad: f64,
    pub distance_cm: f64,
    pub text: String,
    pub fontsize: u32,
    pub color: Rgba,
    pub sequence: u64,
    pub h_anchor: HorizontalAnchor,
    pub v_anchor: VerticalAnchor,
}

/// Receiver of render output.
pub trait RenderSink {
    fn set_sweep(&mut self, sweep: SweepLine);
    fn replace_trails(&mut self, trails: &TrailSet);
    /// Drops every previously drawn label, then draws `labels`. Labels arrive
    /// newest first; the newest one must end up on top.
    fn replace_labels(&mut self, labels: &[LabelPlacement]);
    fn clear_labels(&mut self);
}
