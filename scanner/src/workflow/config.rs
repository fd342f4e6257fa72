use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use sweepcore::interface::{SerialSettings, SourceConfig, SyntheticSettings};
use sweepcore::prelude::DisplayConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub display: DisplayConfig,
    pub source: SourceConfig,
    /// Log a frame summary every this many rendered frames.
    pub report_every: u64,
    /// Sleep after a tick that read nothing, in milliseconds.
    pub idle_sleep_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            source: SourceConfig::default(),
            report_every: 100,
            idle_sleep_ms: 1,
        }
    }
}

/// Command-line values that take precedence over the loaded config.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub port: Option<String>,
    pub baud: Option<u32>,
    pub synthetic: bool,
    pub seed: Option<u64>,
    pub show_labels: bool,
    pub label_fontsize: Option<u32>,
    pub label_every: Option<u32>,
}

impl ScanConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scan config {}", path_ref.display()))?;
        let config: ScanConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing scan config {}", path_ref.display()))?;
        config
            .display
            .validate()
            .with_context(|| format!("validating scan config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn apply(mut self, overrides: &Overrides) -> Self {
        if overrides.synthetic {
            let mut settings = match self.source {
                SourceConfig::Synthetic(settings) => settings,
                SourceConfig::Serial(_) => SyntheticSettings::default(),
            };
            if let Some(seed) = overrides.seed {
                settings.seed = seed;
            }
            self.source = SourceConfig::Synthetic(settings);
        } else if let Some(port) = &overrides.port {
            let mut settings = match self.source {
                SourceConfig::Serial(settings) => SerialSettings {
                    port: port.clone(),
                    ..settings
                },
                SourceConfig::Synthetic(_) => SerialSettings::new(port.clone()),
            };
            if let Some(baud) = overrides.baud {
                settings.baud = baud;
            }
            self.source = SourceConfig::Serial(settings);
        }

        let labels = &mut self.display.labels;
        labels.show_labels |= overrides.show_labels;
        if let Some(size) = overrides.label_fontsize {
            labels.label_fontsize = size;
        }
        if let Some(every) = overrides.label_every {
            labels.label_every = every;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        let yaml = "\
display:
  max_hits: 500
  labels:
    label_every: 2
source:
  kind: serial
  port: /dev/ttyUSB0
report_every: 10
";
        temp.write_all(yaml.as_bytes()).unwrap();
        let path = temp.into_temp_path();
        let cfg = ScanConfig::load(&path).unwrap();
        assert_eq!(cfg.display.max_hits, 500);
        assert_eq!(cfg.display.labels.label_every, 2);
        assert_eq!(cfg.display.half_life, 1.0);
        assert_eq!(cfg.report_every, 10);
        assert_eq!(cfg.source, SourceConfig::Serial(SerialSettings::new("/dev/ttyUSB0")));
    }

    #[test]
    fn config_load_rejects_invalid_display() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"display:\n  half_life: -1.0\n").unwrap();
        let path = temp.into_temp_path();
        assert!(ScanConfig::load(&path).is_err());
    }

    #[test]
    fn port_override_switches_to_serial() {
        let overrides = Overrides {
            port: Some("COM3".into()),
            baud: Some(9600),
            label_every: Some(4),
            ..Default::default()
        };
        let cfg = ScanConfig::default().apply(&overrides);
        match cfg.source {
            SourceConfig::Serial(settings) => {
                assert_eq!(settings.port, "COM3");
                assert_eq!(settings.baud, 9600);
            }
            other => panic!("unexpected source {other:?}"),
        }
        assert_eq!(cfg.display.labels.label_every, 4);
    }

    #[test]
    fn synthetic_flag_wins_over_port() {
        let overrides = Overrides {
            port: Some("COM3".into()),
            synthetic: true,
            seed: Some(9),
            ..Default::default()
        };
        let cfg = ScanConfig::default().apply(&overrides);
        match cfg.source {
            SourceConfig::Synthetic(settings) => assert_eq!(settings.seed, 9),
            other => panic!("unexpected source {other:?}"),
        }
    }
}
