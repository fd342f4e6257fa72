pub mod decay;
pub mod hit_store;
pub mod labels;
pub mod trail;

pub use decay::DecayRule;
pub use hit_store::{Hit, HitSnapshot, HitStore};
pub use labels::{LabelParams, LabelSelector};
pub use trail::TrailBuilder;
