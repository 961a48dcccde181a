//! Prediction outcome data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Remediation advice appended to the result dialog on a Failure outcome
pub const REMEDIATION_ADVICE: &str = "Suggested Measures: Check machine components, reduce load, \
     perform maintenance, and inspect temperature and torque levels.";

/// Three-way outcome classification derived from the per-model failure votes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeCategory {
    Optimal,
    Failure,
    Moderate,
}

impl OutcomeCategory {
    /// Derive the category from the number of models voting failure
    pub fn from_failure_count(failure_count: u8) -> Self {
        if failure_count > 1 {
            OutcomeCategory::Failure
        } else if failure_count == 1 {
            OutcomeCategory::Moderate
        } else {
            OutcomeCategory::Optimal
        }
    }

    /// Fixed presentation code (Optimal = 0, Failure = 1, Moderate = 2)
    pub fn code(&self) -> u8 {
        match self {
            OutcomeCategory::Optimal => 0,
            OutcomeCategory::Failure => 1,
            OutcomeCategory::Moderate => 2,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeCategory::Optimal => "Optimal",
            OutcomeCategory::Failure => "Failure",
            OutcomeCategory::Moderate => "Moderate",
        }
    }
}

/// Result of one user-initiated prediction request.
///
/// Transient: created per request, rendered, then discarded. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Unique prediction identifier
    pub prediction_id: String,

    /// Prediction timestamp
    pub timestamp: DateTime<Utc>,

    /// Raw probability from the sequence classifier
    pub sequence_probability: f64,

    /// Raw probability from the tree-ensemble classifier
    pub tree_probability: f64,

    /// Sequence classifier failure verdict
    pub sequence_failure: bool,

    /// Tree-ensemble classifier failure verdict
    pub tree_failure: bool,

    /// Combined verdict: true only when both classifiers vote failure
    pub combined: bool,

    /// Outcome category derived from the failure-vote count
    pub category: OutcomeCategory,
}

impl Prediction {
    pub fn new(
        sequence_probability: f64,
        tree_probability: f64,
        sequence_failure: bool,
        tree_failure: bool,
        combined: bool,
        category: OutcomeCategory,
    ) -> Self {
        Self {
            prediction_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            sequence_probability,
            tree_probability,
            sequence_failure,
            tree_failure,
            combined,
            category,
        }
    }

    /// Whether the audible alert should fire for this prediction.
    ///
    /// Only the Failure category alarms; a single dissenting model
    /// (Moderate) stays silent.
    pub fn requires_alarm(&self) -> bool {
        self.category == OutcomeCategory::Failure
    }

    /// Human-readable summary for the result dialog, one verdict per line,
    /// with remediation advice appended on a Failure outcome.
    pub fn summary(&self) -> String {
        let verdict = |failure: bool| if failure { "Failure" } else { "Optimal" };

        let mut text = format!(
            "LSTM Prediction: {}\nLightGBM Prediction: {}\nCombined Prediction: {}",
            verdict(self.sequence_failure),
            verdict(self.tree_failure),
            verdict(self.combined),
        );

        if self.category == OutcomeCategory::Failure {
            text.push('\n');
            text.push_str(REMEDIATION_ADVICE);
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_failure_count() {
        assert_eq!(
            OutcomeCategory::from_failure_count(0),
            OutcomeCategory::Optimal
        );
        assert_eq!(
            OutcomeCategory::from_failure_count(1),
            OutcomeCategory::Moderate
        );
        assert_eq!(
            OutcomeCategory::from_failure_count(2),
            OutcomeCategory::Failure
        );
    }

    #[test]
    fn test_category_codes() {
        assert_eq!(OutcomeCategory::Optimal.code(), 0);
        assert_eq!(OutcomeCategory::Failure.code(), 1);
        assert_eq!(OutcomeCategory::Moderate.code(), 2);
    }

    #[test]
    fn test_summary_reports_each_verdict() {
        let prediction =
            Prediction::new(0.2, 0.3, false, false, false, OutcomeCategory::Optimal);
        let summary = prediction.summary();

        assert!(summary.contains("LSTM Prediction: Optimal"));
        assert!(summary.contains("LightGBM Prediction: Optimal"));
        assert!(summary.contains("Combined Prediction: Optimal"));
        assert!(!summary.contains("Suggested Measures"));
    }

    #[test]
    fn test_summary_appends_remediation_on_failure() {
        let prediction = Prediction::new(0.9, 0.8, true, true, true, OutcomeCategory::Failure);
        let summary = prediction.summary();

        assert!(summary.contains("LSTM Prediction: Failure"));
        assert!(summary.contains("Combined Prediction: Failure"));
        assert!(summary.contains("Suggested Measures"));
    }

    #[test]
    fn test_alarm_only_on_failure() {
        let failure = Prediction::new(0.9, 0.8, true, true, true, OutcomeCategory::Failure);
        let moderate =
            Prediction::new(0.9, 0.1, true, false, false, OutcomeCategory::Moderate);
        let optimal =
            Prediction::new(0.2, 0.3, false, false, false, OutcomeCategory::Optimal);

        assert!(failure.requires_alarm());
        assert!(!moderate.requires_alarm());
        assert!(!optimal.requires_alarm());
    }

    #[test]
    fn test_prediction_serialization() {
        let prediction = Prediction::new(0.9, 0.1, true, false, false, OutcomeCategory::Moderate);

        let json = serde_json::to_string(&prediction).unwrap();
        let deserialized: Prediction = serde_json::from_str(&json).unwrap();

        assert_eq!(prediction.prediction_id, deserialized.prediction_id);
        assert_eq!(prediction.category, deserialized.category);
        assert_eq!(prediction.combined, deserialized.combined);
    }
}
