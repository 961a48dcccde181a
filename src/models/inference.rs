//! Dual-model inference engine for machine failure prediction

use crate::config::AppConfig;
use crate::models::combiner::VerdictCombiner;
use crate::models::loader::{LoadedModel, ModelLoader};
use crate::models::scaler::Scaler;
use crate::types::outcome::Prediction;
use crate::types::reading::{MachineReading, FEATURE_COUNT};
use anyhow::{Context, Result};
use ort::memory::Allocator;
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType, Tensor};
use std::sync::RwLock;
use tracing::{debug, info};

pub const SEQUENCE_MODEL: &str = "lstm";
pub const TREE_MODEL: &str = "lightgbm";

/// A binary failure classifier producing a probability for a scaled
/// feature vector.
///
/// The engine is built against this seam so tests can substitute
/// fixed-probability stubs for the ONNX sessions.
pub trait FailureClassifier: Send {
    fn name(&self) -> &str;

    /// Probability of the failure class (0.0 - 1.0) for one scaled reading.
    fn probability(&mut self, scaled: &[f32; FEATURE_COUNT]) -> Result<f64>;
}

/// Sequence classifier: the scaled vector is reshaped into a single-step
/// sequence, tensor shape `[1, 1, features]`, as the LSTM was trained.
pub struct SequenceClassifier {
    model: LoadedModel,
}

impl SequenceClassifier {
    pub fn new(model: LoadedModel) -> Self {
        Self { model }
    }
}

impl FailureClassifier for SequenceClassifier {
    fn name(&self) -> &str {
        &self.model.name
    }

    fn probability(&mut self, scaled: &[f32; FEATURE_COUNT]) -> Result<f64> {
        let shape = vec![1_i64, 1, FEATURE_COUNT as i64];
        let input_tensor = Tensor::from_array((shape, scaled.to_vec()))
            .context("Failed to create sequence input tensor")?;

        let outputs = self
            .model
            .session
            .run(ort::inputs![&self.model.input_name => input_tensor])?;

        // Sigmoid head: a single probability, shape [1, 1]
        let output = outputs
            .get(&self.model.output_name)
            .context("Sequence model produced no output")?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .context("Sequence model output is not an f32 tensor")?;
        let probability = data
            .first()
            .copied()
            .context("Sequence model output tensor is empty")? as f64;

        debug!(model = %self.model.name, probability, "Sequence inference complete");

        Ok(probability)
    }
}

/// Tree-ensemble classifier: the scaled vector is consumed directly,
/// tensor shape `[1, features]`.
pub struct TreeClassifier {
    model: LoadedModel,
}

impl TreeClassifier {
    pub fn new(model: LoadedModel) -> Self {
        Self { model }
    }

    /// Extract the failure-class probability from the model output.
    ///
    /// LightGBM ONNX exports emit either a plain `[batch, classes]` tensor
    /// or the seq(map(int64, float)) format of the converter toolchain;
    /// both are handled.
    fn extract_probability(
        model_name: &str,
        output_name: &str,
        outputs: &ort::session::SessionOutputs,
    ) -> Result<f64> {
        if let Some(output) = outputs.get(output_name) {
            if let Ok(tensor) = output.try_extract_tensor::<f32>() {
                let (shape, data) = tensor;
                return Ok(Self::probability_from_tensor(&shape, data));
            }

            if DynSequenceValueType::can_downcast(&output.dtype()) {
                return Self::probability_from_sequence_map(model_name, output);
            }
        }

        // Fallback: scan the remaining outputs, skipping the class label
        for (name, output) in outputs.iter() {
            if name.contains("label") {
                continue;
            }

            if let Ok(tensor) = output.try_extract_tensor::<f32>() {
                let (shape, data) = tensor;
                return Ok(Self::probability_from_tensor(&shape, data));
            }

            if DynSequenceValueType::can_downcast(&output.dtype()) {
                return Self::probability_from_sequence_map(model_name, &output);
            }
        }

        anyhow::bail!(
            "no probability output found in model '{}'",
            model_name
        )
    }

    fn probability_from_tensor(shape: &ort::tensor::Shape, data: &[f32]) -> f64 {
        let dims: Vec<i64> = shape.iter().copied().collect();

        let classes = match dims.as_slice() {
            [_, classes] => *classes as usize,
            [classes] => *classes as usize,
            _ => data.len(),
        };

        if classes >= 2 {
            // [batch, classes]: probability of the failure class (index 1)
            data.get(1).copied().unwrap_or(0.0) as f64
        } else {
            data.first().copied().unwrap_or(0.0) as f64
        }
    }

    /// seq(map(int64, float)): one map of class id to probability per row
    fn probability_from_sequence_map(model_name: &str, output: &ort::value::DynValue) -> Result<f64> {
        let allocator = Allocator::default();

        let sequence = output
            .downcast_ref::<DynSequenceValueType>()
            .map_err(|e| anyhow::anyhow!("Failed to downcast to sequence: {}", e))?;

        let maps = sequence.try_extract_sequence::<DynMapValueType>(&allocator)?;
        let map_value = maps
            .first()
            .context("Empty probability sequence in model output")?;

        let kv_pairs = map_value.try_extract_key_values::<i64, f32>()?;

        // Failure class is class 1
        for (class_id, probability) in &kv_pairs {
            if *class_id == 1 {
                return Ok(*probability as f64);
            }
        }
        for (class_id, probability) in &kv_pairs {
            if *class_id == 0 {
                return Ok(1.0 - *probability as f64);
            }
        }

        anyhow::bail!("no class probability found in model '{}'", model_name)
    }
}

impl FailureClassifier for TreeClassifier {
    fn name(&self) -> &str {
        &self.model.name
    }

    fn probability(&mut self, scaled: &[f32; FEATURE_COUNT]) -> Result<f64> {
        let shape = vec![1_i64, FEATURE_COUNT as i64];
        let input_tensor = Tensor::from_array((shape, scaled.to_vec()))
            .context("Failed to create tree input tensor")?;

        let outputs = self
            .model
            .session
            .run(ort::inputs![&self.model.input_name => input_tensor])?;

        let probability =
            Self::extract_probability(&self.model.name, &self.model.output_name, &outputs)?;

        debug!(model = %self.model.name, probability, "Tree inference complete");

        Ok(probability)
    }
}

/// The prediction engine: scaler plus both classifiers plus the
/// combination rule.
///
/// Models and scaler are loaded once at startup and never reloaded; the
/// `RwLock`s exist only because ONNX sessions need mutable access to run.
/// `predict` is a pure function of the reading and the loaded state.
pub struct PredictionEngine {
    scaler: Scaler,
    sequence: RwLock<Box<dyn FailureClassifier>>,
    tree: RwLock<Box<dyn FailureClassifier>>,
    combiner: VerdictCombiner,
}

impl PredictionEngine {
    /// Load the full model store from configuration.
    ///
    /// Any missing or unreadable artifact is an error; the caller treats it
    /// as a fatal startup fault.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let loader = ModelLoader::with_threads(config.models.onnx_threads)?;

        let scaler = Scaler::load(config.models.scaler_path())?;
        let sequence = SequenceClassifier::new(
            loader.load_model(config.models.sequence_model_path(), SEQUENCE_MODEL)?,
        );
        let tree =
            TreeClassifier::new(loader.load_model(config.models.tree_model_path(), TREE_MODEL)?);

        info!(
            decision_threshold = config.detection.decision_threshold,
            "Prediction engine initialized"
        );

        Ok(Self::with_classifiers(
            scaler,
            Box::new(sequence),
            Box::new(tree),
            config.detection.decision_threshold,
        ))
    }

    /// Build an engine from explicit parts. The seam used by tests to
    /// inject stub classifiers.
    pub fn with_classifiers(
        scaler: Scaler,
        sequence: Box<dyn FailureClassifier>,
        tree: Box<dyn FailureClassifier>,
        decision_threshold: f64,
    ) -> Self {
        Self {
            scaler,
            sequence: RwLock::new(sequence),
            tree: RwLock::new(tree),
            combiner: VerdictCombiner::new(decision_threshold),
        }
    }

    /// Names of the loaded classifiers
    pub fn model_names(&self) -> Vec<String> {
        [&self.sequence, &self.tree]
            .iter()
            .filter_map(|m| m.read().ok().map(|m| m.name().to_string()))
            .collect()
    }

    /// Run one prediction: scale the reading, query both classifiers,
    /// combine the verdicts. No side effects.
    pub fn predict(&self, reading: &MachineReading) -> Result<Prediction> {
        let scaled = self.scaler.transform(&reading.features());

        let sequence_probability = {
            let mut model = self
                .sequence
                .write()
                .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;
            model.probability(&scaled)?
        };

        let tree_probability = {
            let mut model = self
                .tree
                .write()
                .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;
            model.probability(&scaled)?
        };

        let verdicts = self.combiner.combine(sequence_probability, tree_probability);

        debug!(
            sequence_probability,
            tree_probability,
            combined = verdicts.combined,
            category = verdicts.category.label(),
            "Prediction complete"
        );

        Ok(Prediction::new(
            sequence_probability,
            tree_probability,
            verdicts.sequence_failure,
            verdicts.tree_failure,
            verdicts.combined,
            verdicts.category,
        ))
    }
}
