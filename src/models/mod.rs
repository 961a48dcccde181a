//! Model store and inference components

pub mod combiner;
pub mod inference;
pub mod loader;
pub mod scaler;

pub use combiner::VerdictCombiner;
pub use inference::{FailureClassifier, PredictionEngine};
pub use loader::ModelLoader;
pub use scaler::Scaler;
