//! Fitted feature scaler loaded from training output

use crate::types::reading::FEATURE_COUNT;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Per-feature standardization fitted during training.
///
/// Immutable after load; applied identically to every inference input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    /// Per-feature mean
    mean: Vec<f64>,
    /// Per-feature scale (standard deviation)
    scale: Vec<f64>,
}

impl Scaler {
    /// Load the scaler from a JSON artifact and validate it against the
    /// feature schema.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scaler from {:?}", path))?;
        let scaler: Scaler = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse scaler from {:?}", path))?;
        scaler.validate()?;

        info!(path = %path.display(), features = scaler.mean.len(), "Scaler loaded");

        Ok(scaler)
    }

    /// Build a scaler from raw parameter arrays.
    pub fn from_params(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Pass-through scaler (zero mean, unit scale).
    pub fn identity() -> Self {
        Self {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        }
    }

    fn validate(&self) -> Result<()> {
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            bail!(
                "scaler expects {} features, artifact has mean={} scale={}",
                FEATURE_COUNT,
                self.mean.len(),
                self.scale.len()
            );
        }
        Ok(())
    }

    /// Standardize a raw feature vector.
    pub fn transform(&self, features: &[f32; FEATURE_COUNT]) -> [f32; FEATURE_COUNT] {
        let mut scaled = [0.0f32; FEATURE_COUNT];

        for i in 0..FEATURE_COUNT {
            // Degenerate scale from a constant training column
            let scale = if self.scale[i].abs() < 1e-12 {
                1.0
            } else {
                self.scale[i]
            };
            scaled[i] = ((features[i] as f64 - self.mean[i]) / scale) as f32;
        }

        scaled
    }
}
