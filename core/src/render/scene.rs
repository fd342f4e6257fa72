use super::{LabelPlacement, RenderSink, SweepLine, TrailSet};
use serde::Serialize;

/// Sink that keeps the latest frame in memory for a GUI to draw from.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SceneBuffer {
    pub sweep: Option<SweepLine>,
    pub trails: TrailSet,
    pub labels: Vec<LabelPlacement>,
    /// Bumped on every change so drawing code can skip redundant repaints.
    pub revision: u64,
}

impl SceneBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl RenderSink for SceneBuffer {
    fn set_sweep(&mut self, sweep: SweepLine) {
        self.sweep = Some(sweep);
        self.touch();
    }

    fn replace_trails(&mut self, trails: &TrailSet) {
        self.trails.clone_from(trails);
        self.touch();
    }

    fn replace_labels(&mut self, labels: &[LabelPlacement]) {
        self.labels.clear();
        self.labels.extend_from_slice(labels);
        self.touch();
    }

    fn clear_labels(&mut self) {
        if !self.labels.is_empty() {
            self.labels.clear();
            self.touch();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::Rgba;
    use crate::render::{HorizontalAnchor, VerticalAnchor};

    fn label(text: &str) -> LabelPlacement {
        LabelPlacement {
            angle_rad: 0.0,
            distance_cm: 10.0,
            text: text.into(),
            fontsize: 10,
            color: Rgba::from_rgb([1.0; 3], 1.0),
            sequence: 1,
            h_anchor: HorizontalAnchor::Left,
            v_anchor: VerticalAnchor::Center,
        }
    }

    #[test]
    fn replacing_labels_discards_previous_set() {
        let mut scene = SceneBuffer::new();
        scene.replace_labels(&[label("a"), label("b")]);
        scene.replace_labels(&[label("c")]);
        assert_eq!(scene.labels.len(), 1);
        assert_eq!(scene.labels[0].text, "c");
    }

    #[test]
    fn clearing_empty_labels_keeps_revision() {
        let mut scene = SceneBuffer::new();
        scene.clear_labels();
        assert_eq!(scene.revision, 0);
        scene.set_sweep(SweepLine::at(1.0));
        assert_eq!(scene.revision, 1);
        assert_eq!(scene.sweep.unwrap().end_cm, 100.0);
    }

    #[test]
    fn scene_serializes_for_inspection() {
        let scene = SceneBuffer::new();
        let json = serde_json::to_value(&scene).unwrap();
        assert!(json["sweep"].is_null());
        assert_eq!(json["trails"]["segments"].as_array().unwrap().len(), 0);
    }
}
