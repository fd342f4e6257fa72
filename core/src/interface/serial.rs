use crate::interface::source::ByteSource;
use crate::prelude::{SweepError, SweepResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serialport::{ClearBuffer, SerialPort};
use std::io::{ErrorKind, Read};
use std::thread;
use std::time::Duration;

pub const DEFAULT_BAUD: u32 = 115_200;
pub const DEFAULT_SETTLE_MS: u64 = 2_000;

/// Port settings for the sensor link. The port is always named explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerialSettings {
    pub port: String,
    #[serde(default = "default_baud")]
    pub baud: u32,
    /// Wait after opening before discarding buffered input; most boards reset
    /// when the port opens and print boot noise.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

fn default_baud() -> u32 {
    DEFAULT_BAUD
}

fn default_settle_ms() -> u64 {
    DEFAULT_SETTLE_MS
}

impl SerialSettings {
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud: DEFAULT_BAUD,
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }
}

/// Serial port configured for immediate return.
pub struct SerialSource {
    port: Box<dyn SerialPort>,
    name: String,
    scratch: Vec<u8>,
}

impl SerialSource {
    pub fn open(settings: &SerialSettings) -> SweepResult<Self> {
        info!("opening {} @ {} baud", settings.port, settings.baud);
        let port = serialport::new(&settings.port, settings.baud)
            .timeout(Duration::ZERO)
            .open()
            .map_err(|source| SweepError::PortOpen {
                port: settings.port.clone(),
                source,
            })?;

        if settings.settle_ms > 0 {
            thread::sleep(Duration::from_millis(settings.settle_ms));
        }
        port.clear(ClearBuffer::Input)
            .map_err(|source| SweepError::PortOpen {
                port: settings.port.clone(),
                source,
            })?;

        Ok(Self {
            port,
            name: settings.port.clone(),
            scratch: Vec::new(),
        })
    }
}

impl ByteSource for SerialSource {
    fn read_available(&mut self, buf: &mut Vec<u8>) -> SweepResult<usize> {
        let waiting = self
            .port
            .bytes_to_read()
            .map_err(|e| SweepError::Disconnected(format!("{}: {}", self.name, e)))?
            as usize;
        if waiting == 0 {
            return Ok(0);
        }

        self.scratch.resize(waiting, 0);
        match self.port.read(&mut self.scratch) {
            Ok(0) => Ok(0),
            Ok(n) => {
                buf.extend_from_slice(&self.scratch[..n]);
                Ok(n)
            }
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                debug!("{}: read returned {:?} with {} waiting", self.name, e.kind(), waiting);
                Ok(0)
            }
            Err(e) => Err(SweepError::Transport(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_fill_defaults_when_omitted() {
        let settings: SerialSettings = serde_json::from_str(r#"{"port": "/dev/ttyACM0"}"#).unwrap();
        assert_eq!(settings.baud, DEFAULT_BAUD);
        assert_eq!(settings.settle_ms, DEFAULT_SETTLE_MS);
        assert_eq!(settings, SerialSettings::new("/dev/ttyACM0"));
    }

    #[test]
    fn opening_missing_port_is_a_port_error() {
        let settings = SerialSettings {
            port: "/definitely/not/a/serial/port".into(),
            baud: DEFAULT_BAUD,
            settle_ms: 0,
        };
        match SerialSource::open(&settings) {
            Err(SweepError::PortOpen { port, .. }) => assert_eq!(port, settings.port),
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("port unexpectedly opened"),
        }
    }
}
