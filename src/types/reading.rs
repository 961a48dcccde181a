//! Sensor reading schema for machine failure prediction

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Number of features consumed by both classifiers
pub const FEATURE_COUNT: usize = 11;

/// Form/display labels, in the exact order the models were trained on
pub const FIELD_LABELS: [&str; FEATURE_COUNT] = [
    "Type",
    "Air_temp",
    "Process_temp",
    "Rotational_speed",
    "Torque",
    "Tool_wear",
    "TWF",
    "HDF",
    "PWF",
    "OSF",
    "RNF",
];

/// One manually entered set of sensor readings for a machine.
///
/// Field order matches the training-data schema; every field is numeric,
/// including the encoded type code and the four failure-mode flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineReading {
    /// Machine type code (encoded L/M/H quality variant)
    #[serde(alias = "Type")]
    pub machine_type: f64,

    /// Air temperature [K]
    #[serde(alias = "Air_temp")]
    pub air_temperature: f64,

    /// Process temperature [K]
    #[serde(alias = "Process_temp")]
    pub process_temperature: f64,

    /// Rotational speed [rpm]
    #[serde(alias = "Rotational_speed")]
    pub rotational_speed: f64,

    /// Torque [Nm]
    #[serde(alias = "Torque")]
    pub torque: f64,

    /// Tool wear [min]
    #[serde(alias = "Tool_wear")]
    pub tool_wear: f64,

    /// Tool wear failure flag
    #[serde(alias = "TWF")]
    pub twf: f64,

    /// Heat dissipation failure flag
    #[serde(alias = "HDF")]
    pub hdf: f64,

    /// Power failure flag
    #[serde(alias = "PWF")]
    pub pwf: f64,

    /// Overstrain failure flag
    #[serde(alias = "OSF")]
    pub osf: f64,

    /// Random failure flag
    #[serde(alias = "RNF")]
    pub rnf: f64,
}

impl MachineReading {
    /// Build a reading from an ordered value array (field order of
    /// [`FIELD_LABELS`]).
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            machine_type: values[0],
            air_temperature: values[1],
            process_temperature: values[2],
            rotational_speed: values[3],
            torque: values[4],
            tool_wear: values[5],
            twf: values[6],
            hdf: values[7],
            pwf: values[8],
            osf: values[9],
            rnf: values[10],
        }
    }

    /// Parse raw form fields into a reading.
    ///
    /// Every field must parse as a floating-point number, otherwise the whole
    /// reading is rejected and no prediction runs.
    pub fn parse_fields(fields: &[String]) -> Result<Self> {
        if fields.len() != FEATURE_COUNT {
            bail!(
                "expected {} fields, got {}",
                FEATURE_COUNT,
                fields.len()
            );
        }

        let mut values = [0.0; FEATURE_COUNT];
        for (i, raw) in fields.iter().enumerate() {
            values[i] = raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("field '{}' is not a number: '{}'", FIELD_LABELS[i], raw))?;
        }

        Ok(Self::from_values(values))
    }

    /// Feature vector in model input order.
    pub fn features(&self) -> [f32; FEATURE_COUNT] {
        [
            self.machine_type as f32,
            self.air_temperature as f32,
            self.process_temperature as f32,
            self.rotational_speed as f32,
            self.torque as f32,
            self.tool_wear as f32,
            self.twf as f32,
            self.hdf as f32,
            self.pwf as f32,
            self.osf as f32,
            self.rnf as f32,
        ]
    }
}
