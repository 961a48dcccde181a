//! Configuration management for the prediction desk

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub models: ModelsConfig,
    pub detection: DetectionConfig,
    pub alarm: AlarmConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Model artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Directory containing the model artifacts
    pub models_dir: String,
    /// Sequence classifier (LSTM exported to ONNX)
    #[serde(default = "default_sequence_model")]
    pub sequence_model: String,
    /// Tree-ensemble classifier (LightGBM exported to ONNX)
    #[serde(default = "default_tree_model")]
    pub tree_model: String,
    /// Fitted feature scaler (JSON, mean/scale per feature)
    #[serde(default = "default_scaler")]
    pub scaler: String,
    /// Number of threads for ONNX inference per model (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

impl ModelsConfig {
    /// Path to the sequence model artifact
    pub fn sequence_model_path(&self) -> PathBuf {
        Path::new(&self.models_dir).join(&self.sequence_model)
    }

    /// Path to the tree-ensemble model artifact
    pub fn tree_model_path(&self) -> PathBuf {
        Path::new(&self.models_dir).join(&self.tree_model)
    }

    /// Path to the scaler artifact
    pub fn scaler_path(&self) -> PathBuf {
        Path::new(&self.models_dir).join(&self.scaler)
    }
}

fn default_sequence_model() -> String {
    "lstm.onnx".to_string()
}

fn default_tree_model() -> String {
    "lightgbm.onnx".to_string()
}

fn default_scaler() -> String {
    "scaler.json".to_string()
}

fn default_onnx_threads() -> usize {
    1
}

/// Detection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    /// Probability above this value counts as a failure vote (strict comparison)
    #[serde(default = "default_decision_threshold")]
    pub decision_threshold: f64,
}

fn default_decision_threshold() -> f64 {
    0.5
}

/// Alarm configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AlarmConfig {
    /// Whether the audible alert is active
    #[serde(default = "default_alarm_enabled")]
    pub enabled: bool,
    /// Nominal tone frequency in Hz
    #[serde(default = "default_alarm_frequency")]
    pub frequency_hz: u32,
    /// Nominal tone duration in milliseconds
    #[serde(default = "default_alarm_duration")]
    pub duration_ms: u64,
}

fn default_alarm_enabled() -> bool {
    true
}

fn default_alarm_frequency() -> u32 {
    2000
}

fn default_alarm_duration() -> u64 {
    1000
}

/// Window configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
}

fn default_window_width() -> f32 {
    460.0
}

fn default_window_height() -> f32 {
    720.0
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from the default file location
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from the default location, falling back to
    /// built-in defaults when the file does not exist.
    pub fn load_or_default() -> Result<Self> {
        let path = Path::new("config/config.toml");
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models: ModelsConfig {
                models_dir: "models".to_string(),
                sequence_model: default_sequence_model(),
                tree_model: default_tree_model(),
                scaler: default_scaler(),
                onnx_threads: default_onnx_threads(),
            },
            detection: DetectionConfig {
                decision_threshold: default_decision_threshold(),
            },
            alarm: AlarmConfig {
                enabled: default_alarm_enabled(),
                frequency_hz: default_alarm_frequency(),
                duration_ms: default_alarm_duration(),
            },
            ui: UiConfig {
                window_width: default_window_width(),
                window_height: default_window_height(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.detection.decision_threshold, 0.5);
        assert_eq!(config.alarm.frequency_hz, 2000);
        assert_eq!(config.alarm.duration_ms, 1000);
        assert!(config.alarm.enabled);
        assert_eq!(config.models.sequence_model, "lstm.onnx");
        assert_eq!(config.models.tree_model, "lightgbm.onnx");
    }

    #[test]
    fn test_artifact_paths() {
        let config = AppConfig::default();
        assert_eq!(
            config.models.sequence_model_path(),
            Path::new("models").join("lstm.onnx")
        );
        assert_eq!(
            config.models.scaler_path(),
            Path::new("models").join("scaler.json")
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
[models]
models_dir = "artifacts"
onnx_threads = 2

[detection]
decision_threshold = 0.5

[alarm]
enabled = false

[ui]

[logging]
level = "debug"
format = "json"
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.models.models_dir, "artifacts");
        assert_eq!(config.models.onnx_threads, 2);
        // Defaulted artifact names still apply
        assert_eq!(config.models.sequence_model, "lstm.onnx");
        assert!(!config.alarm.enabled);
        assert_eq!(config.logging.level, "debug");
    }
}
