use crate::prelude::{DisplayConfig, Rgba};
use crate::processing::decay::DecayRule;
use crate::processing::hit_store::HitSnapshot;
use crate::render::{TrailSegment, TrailSet};

/// Turns stored hits into full-length radial lines that fade with age.
#[derive(Debug, Clone)]
pub struct TrailBuilder {
    rule: DecayRule,
    rgb: [f32; 3],
}

impl TrailBuilder {
    pub fn new(rule: DecayRule, rgb: [f32; 3]) -> Self {
        Self { rule, rgb }
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(DecayRule::from_config(config), config.hit_rgb)
    }

    pub fn build(&self, snapshot: HitSnapshot<'_>, now: f64) -> TrailSet {
        let mut trails = TrailSet::empty(self.rgb);
        trails.segments.extend(snapshot.iter().filter_map(|hit| {
            let alpha = self.rule.alpha(hit.created_at, now)?;
            Some(TrailSegment {
                angle_rad: hit.angle_rad,
                start_cm: 0.0,
                end_cm: hit.distance_cm,
                color: Rgba::from_rgb(self.rgb, alpha as f32),
            })
        }));
        trails
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::hit_store::HitStore;

    #[test]
    fn each_live_hit_yields_radial_segment_from_origin() {
        let mut store = HitStore::with_capacity(16);
        store.record(0.5, 42.0, 10.0);
        store.record(1.0, 12.5, 10.0);

        let trails = TrailBuilder::from_config(&DisplayConfig::default())
            .build(store.snapshot(), 10.0);
        assert_eq!(trails.len(), 2);
        let first = trails.segments[0];
        assert_eq!(first.start_cm, 0.0);
        assert_eq!(first.end_cm, 42.0);
        assert_eq!(first.angle_rad, 0.5);
        assert_eq!(first.color, Rgba::from_rgb([0.49, 1.0, 0.49], 1.0));
    }

    #[test]
    fn only_alpha_varies_with_age() {
        let mut store = HitStore::with_capacity(16);
        store.record(0.0, 10.0, 0.0);
        store.record(0.0, 10.0, 1.0);

        let trails = TrailBuilder::from_config(&DisplayConfig::default())
            .build(store.snapshot(), 2.0);
        let [old, new] = [trails.segments[0].color, trails.segments[1].color];
        assert_eq!((old.r, old.g, old.b), (new.r, new.g, new.b));
        assert!((new.a - (-1.0f32).exp()).abs() < 1e-6);
        assert!(old.a < new.a);
    }

    #[test]
    fn expired_hits_stay_in_store_but_leave_the_view() {
        let mut store = HitStore::with_capacity(16);
        store.record(0.0, 10.0, 0.0);
        store.record(0.0, 20.0, 7.0);

        let trails = TrailBuilder::from_config(&DisplayConfig::default())
            .build(store.snapshot(), 7.5);
        assert_eq!(trails.len(), 1);
        assert_eq!(trails.segments[0].end_cm, 20.0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn nothing_visible_gives_transparent_empty_set() {
        let store = HitStore::with_capacity(4);
        let trails = TrailBuilder::from_config(&DisplayConfig::default())
            .build(store.snapshot(), 0.0);
        assert!(trails.is_empty());
        assert_eq!(trails.placeholder.a, 0.0);
    }
}
