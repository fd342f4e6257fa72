use crate::prelude::{DisplayConfig, Rgba};
use crate::processing::decay::DecayRule;
use crate::processing::hit_store::HitSnapshot;
use crate::render::{HorizontalAnchor, LabelPlacement, VerticalAnchor};

/// Label controls as read at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelParams {
    pub show_labels: bool,
    pub label_fontsize: u32,
    pub label_every: u32,
}

/// Picks which hits get a distance label.
///
/// Selection is keyed to the absolute hit sequence, so the labeled set does
/// not shift as older hits slide out of the window.
#[derive(Debug, Clone)]
pub struct LabelSelector {
    rule: DecayRule,
    rgb: [f32; 3],
}

impl LabelSelector {
    pub fn new(rule: DecayRule, rgb: [f32; 3]) -> Self {
        Self { rule, rgb }
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(DecayRule::from_config(config), config.hit_rgb)
    }

    /// Returns placements newest first. Sinks draw them in reverse so the
    /// freshest label ends up on top.
    pub fn select(
        &self,
        snapshot: HitSnapshot<'_>,
        now: f64,
        params: LabelParams,
    ) -> Vec<LabelPlacement> {
        if !params.show_labels {
            return Vec::new();
        }
        let every = u64::from(params.label_every.max(1));

        snapshot
            .iter()
            .rev()
            .filter_map(|hit| {
                let alpha = self.rule.alpha(hit.created_at, now)?;
                if hit.sequence % every != 0 {
                    return None;
                }
                Some(LabelPlacement {
                    angle_rad: hit.angle_rad,
                    distance_cm: hit.distance_cm,
                    text: format!("{:.0} cm", hit.distance_cm),
                    fontsize: params.label_fontsize,
                    color: Rgba::from_rgb(self.rgb, alpha as f32),
                    sequence: hit.sequence,
                    h_anchor: HorizontalAnchor::Left,
                    v_anchor: VerticalAnchor::Center,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::hit_store::HitStore;
    use crate::processing::trail::TrailBuilder;

    fn params(every: u32) -> LabelParams {
        LabelParams {
            show_labels: true,
            label_fontsize: 12,
            label_every: every,
        }
    }

    fn selector() -> LabelSelector {
        LabelSelector::from_config(&DisplayConfig::default())
    }

    #[test]
    fn hidden_labels_produce_nothing() {
        let mut store = HitStore::with_capacity(4);
        store.record(0.0, 10.0, 0.0);
        let hidden = LabelParams {
            show_labels: false,
            ..params(1)
        };
        assert!(selector().select(store.snapshot(), 0.0, hidden).is_empty());
    }

    #[test]
    fn labels_come_newest_first_with_rounded_text() {
        let mut store = HitStore::with_capacity(8);
        store.record(0.1, 37.4, 0.0);
        store.record(0.2, 37.6, 0.5);

        let labels = selector().select(store.snapshot(), 0.5, params(1));
        let texts: Vec<&str> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["38 cm", "37 cm"]);
        assert_eq!(labels[0].sequence, 2);
        assert_eq!(labels[0].fontsize, 12);
        assert_eq!(labels[0].h_anchor, HorizontalAnchor::Left);
        assert_eq!(labels[0].v_anchor, VerticalAnchor::Center);
        assert_eq!((labels[0].angle_rad, labels[0].distance_cm), (0.2, 37.6));
    }

    #[test]
    fn spacing_is_keyed_to_absolute_sequence() {
        let mut store = HitStore::with_capacity(5);
        for i in 0..20 {
            store.record(0.0, 10.0, i as f64 * 0.1);
            let labels = selector().select(store.snapshot(), i as f64 * 0.1, params(3));
            assert!(labels.iter().all(|l| l.sequence % 3 == 0));
        }
        let labels = selector().select(store.snapshot(), 1.9, params(3));
        let seqs: Vec<u64> = labels.iter().map(|l| l.sequence).collect();
        assert_eq!(seqs, vec![18]);
    }

    #[test]
    fn label_alpha_matches_trail_and_expires_with_it() {
        let config = DisplayConfig::default();
        let mut store = HitStore::with_capacity(8);
        store.record(0.0, 10.0, 0.0);
        store.record(0.0, 20.0, 4.5);

        let trails = TrailBuilder::from_config(&config).build(store.snapshot(), 5.0);
        let labels = selector().select(store.snapshot(), 5.0, params(1));
        assert_eq!(trails.len(), 1);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].color, trails.segments[0].color);
    }

    #[test]
    fn zero_spacing_behaves_like_one() {
        let mut store = HitStore::with_capacity(8);
        store.record(0.0, 10.0, 0.0);
        store.record(0.0, 10.0, 0.0);
        assert_eq!(selector().select(store.snapshot(), 0.0, params(0)).len(), 2);
    }
}
