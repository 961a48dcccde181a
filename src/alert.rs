//! Audible alert capability

use crate::config::AlarmConfig;
use std::io::Write;
use tracing::{debug, warn};

/// Nominal alarm tone, carried from configuration to the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmTone {
    pub frequency_hz: u32,
    pub duration_ms: u64,
}

impl From<&AlarmConfig> for AlarmTone {
    fn from(config: &AlarmConfig) -> Self {
        Self {
            frequency_hz: config.frequency_hz,
            duration_ms: config.duration_ms,
        }
    }
}

/// Capability interface for raising the failure alarm.
///
/// The tone parameters travel with the call so a platform-specific sink can
/// honor them; sinks without tone control may ignore them.
pub trait AlertSink: Send + Sync {
    fn alarm(&self, tone: AlarmTone);
}

/// Cross-platform sink: ASCII BEL on stderr plus a structured warning log.
pub struct TerminalBellSink;

impl AlertSink for TerminalBellSink {
    fn alarm(&self, tone: AlarmTone) {
        let mut stderr = std::io::stderr();
        let _ = stderr.write_all(b"\x07");
        let _ = stderr.flush();

        warn!(
            frequency_hz = tone.frequency_hz,
            duration_ms = tone.duration_ms,
            "Machine failure alarm"
        );
    }
}

/// Silent sink for headless runs and tests
pub struct NoopAlertSink;

impl AlertSink for NoopAlertSink {
    fn alarm(&self, tone: AlarmTone) {
        debug!(
            frequency_hz = tone.frequency_hz,
            duration_ms = tone.duration_ms,
            "Alarm suppressed (no-op sink)"
        );
    }
}

/// Pick the sink for the configured alarm settings
pub fn sink_from_config(config: &AlarmConfig) -> Box<dyn AlertSink> {
    if config.enabled {
        Box::new(TerminalBellSink)
    } else {
        Box::new(NoopAlertSink)
    }
}
