pub mod line;
pub mod serial;
pub mod source;
pub mod synthetic;

pub use line::{parse_line, Distance, Sample};
pub use serial::{SerialSettings, SerialSource};
pub use source::{ByteSource, MemorySource};
pub use synthetic::{Reflector, SyntheticSensor, SyntheticSettings};

use crate::prelude::SweepResult;
use serde::{Deserialize, Serialize};

/// Where sensor bytes come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    Serial(SerialSettings),
    Synthetic(SyntheticSettings),
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Synthetic(SyntheticSettings::default())
    }
}

pub fn open_source(config: &SourceConfig) -> SweepResult<Box<dyn ByteSource + Send>> {
    match config {
        SourceConfig::Serial(settings) => Ok(Box::new(SerialSource::open(settings)?)),
        SourceConfig::Synthetic(settings) => Ok(Box::new(SyntheticSensor::new(settings.clone()))),
    }
}
