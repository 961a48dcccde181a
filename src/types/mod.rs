//! Type definitions for the prediction desk

pub mod outcome;
pub mod reading;

pub use outcome::{OutcomeCategory, Prediction};
pub use reading::{MachineReading, FEATURE_COUNT, FIELD_LABELS};
