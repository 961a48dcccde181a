//! End-to-end predictor contract, exercised with stub classifiers injected
//! through the engine's classifier seam.

use anyhow::Result;
use machine_failure_predictor::models::scaler::Scaler;
use machine_failure_predictor::types::reading::FEATURE_COUNT;
use machine_failure_predictor::{
    FailureClassifier, MachineReading, OutcomeCategory, PredictionEngine,
};
use std::sync::{Arc, Mutex};

struct StubClassifier {
    name: &'static str,
    probability: f64,
}

impl StubClassifier {
    fn new(name: &'static str, probability: f64) -> Self {
        Self { name, probability }
    }
}

impl FailureClassifier for StubClassifier {
    fn name(&self) -> &str {
        self.name
    }

    fn probability(&mut self, _scaled: &[f32; FEATURE_COUNT]) -> Result<f64> {
        Ok(self.probability)
    }
}

fn engine(sequence_probability: f64, tree_probability: f64) -> PredictionEngine {
    PredictionEngine::with_classifiers(
        Scaler::identity(),
        Box::new(StubClassifier::new("lstm", sequence_probability)),
        Box::new(StubClassifier::new("lightgbm", tree_probability)),
        0.5,
    )
}

fn sample_reading() -> MachineReading {
    MachineReading::from_values([0.0, 25.0, 36.0, 1500.0, 40.0, 10.0, 0.0, 0.0, 0.0, 0.0, 0.0])
}

#[test]
fn both_models_quiet_is_optimal() {
    let prediction = engine(0.2, 0.3).predict(&sample_reading()).unwrap();

    assert!(!prediction.sequence_failure);
    assert!(!prediction.tree_failure);
    assert!(!prediction.combined);
    assert_eq!(prediction.category, OutcomeCategory::Optimal);
    assert!(!prediction.requires_alarm());
    assert!(!prediction.summary().contains("Suggested Measures"));
}

#[test]
fn both_models_failing_is_failure_with_remediation() {
    let prediction = engine(0.9, 0.8).predict(&sample_reading()).unwrap();

    assert!(prediction.sequence_failure);
    assert!(prediction.tree_failure);
    assert!(prediction.combined);
    assert_eq!(prediction.category, OutcomeCategory::Failure);
    assert!(prediction.requires_alarm());

    let summary = prediction.summary();
    assert!(summary.contains("LSTM Prediction: Failure"));
    assert!(summary.contains("LightGBM Prediction: Failure"));
    assert!(summary.contains("Combined Prediction: Failure"));
    assert!(summary.contains("Suggested Measures"));
}

#[test]
fn split_vote_is_moderate_without_combined_flag() {
    let prediction = engine(0.9, 0.1).predict(&sample_reading()).unwrap();

    assert!(prediction.sequence_failure);
    assert!(!prediction.tree_failure);
    assert!(!prediction.combined);
    assert_eq!(prediction.category, OutcomeCategory::Moderate);
    assert!(!prediction.requires_alarm());
}

#[test]
fn probability_exactly_at_threshold_is_not_a_failure_vote() {
    let prediction = engine(0.5, 0.5).predict(&sample_reading()).unwrap();

    assert!(!prediction.sequence_failure);
    assert!(!prediction.tree_failure);
    assert_eq!(prediction.category, OutcomeCategory::Optimal);
}

#[test]
fn prediction_is_idempotent() {
    let engine = engine(0.7, 0.2);
    let reading = sample_reading();

    let first = engine.predict(&reading).unwrap();
    let second = engine.predict(&reading).unwrap();

    assert_eq!(first.sequence_failure, second.sequence_failure);
    assert_eq!(first.tree_failure, second.tree_failure);
    assert_eq!(first.combined, second.combined);
    assert_eq!(first.category, second.category);
    assert_eq!(first.sequence_probability, second.sequence_probability);
}

#[test]
fn classifiers_receive_the_scaled_vector() {
    struct RecordingClassifier {
        seen: Arc<Mutex<Option<[f32; FEATURE_COUNT]>>>,
    }

    impl FailureClassifier for RecordingClassifier {
        fn name(&self) -> &str {
            "recording"
        }

        fn probability(&mut self, scaled: &[f32; FEATURE_COUNT]) -> Result<f64> {
            *self.seen.lock().unwrap() = Some(*scaled);
            Ok(0.0)
        }
    }

    // Standardize Air_temp (index 1) around 25 with scale 5
    let mut mean = vec![0.0; FEATURE_COUNT];
    let mut scale = vec![1.0; FEATURE_COUNT];
    mean[1] = 25.0;
    scale[1] = 5.0;

    let seen = Arc::new(Mutex::new(None));
    let engine = PredictionEngine::with_classifiers(
        Scaler::from_params(mean, scale).unwrap(),
        Box::new(RecordingClassifier { seen: seen.clone() }),
        Box::new(StubClassifier::new("lightgbm", 0.0)),
        0.5,
    );

    let mut values = [0.0; FEATURE_COUNT];
    values[1] = 35.0;
    engine
        .predict(&MachineReading::from_values(values))
        .unwrap();

    let scaled = seen.lock().unwrap().expect("classifier was not invoked");
    assert!((scaled[1] - 2.0).abs() < 1e-6);
    assert_eq!(scaled[0], 0.0);
}

#[test]
fn malformed_fields_never_reach_the_engine() {
    let fields: Vec<String> = ["0", "25.0", "abc", "1500", "40.0", "10", "0", "0", "0", "0", "0"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let err = MachineReading::parse_fields(&fields).unwrap_err();
    assert!(err.to_string().contains("Process_temp"));
}
