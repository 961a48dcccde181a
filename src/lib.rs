//! Machine Failure Prediction Desk
//!
//! A desktop tool that runs eleven manually entered sensor readings through
//! two pre-trained binary classifiers (an LSTM sequence model and a LightGBM
//! tree ensemble, both consumed as ONNX exports), combines their verdicts,
//! and presents the outcome with a result dialog, an alarm, and a schematic
//! curve.

pub mod alert;
pub mod config;
pub mod metrics;
pub mod models;
pub mod types;
pub mod ui;

pub use alert::AlertSink;
pub use config::AppConfig;
pub use metrics::SessionMetrics;
pub use models::inference::{FailureClassifier, PredictionEngine};
pub use types::{MachineReading, OutcomeCategory, Prediction};
