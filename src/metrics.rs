//! Session statistics for the prediction desk.
//!
//! In-memory only; a summary is logged when the tool exits. Nothing is
//! persisted.

use crate::types::outcome::Prediction;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;
use tracing::info;

/// Metrics collector for one desk session
pub struct SessionMetrics {
    /// Total predictions served
    pub predictions_total: AtomicU64,
    /// Alarms raised (Failure outcomes)
    pub alarms_raised: AtomicU64,
    /// Predictions where both classifiers cast the same vote
    agreements: AtomicU64,
    /// Outcomes by category label
    by_category: RwLock<HashMap<String, u64>>,
    /// Prediction latencies (in microseconds)
    prediction_times: RwLock<Vec<u64>>,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            predictions_total: AtomicU64::new(0),
            alarms_raised: AtomicU64::new(0),
            agreements: AtomicU64::new(0),
            by_category: RwLock::new(HashMap::new()),
            prediction_times: RwLock::new(Vec::with_capacity(64)),
        }
    }

    /// Record a served prediction
    pub fn record_prediction(&self, prediction: &Prediction, elapsed: Duration) {
        self.predictions_total.fetch_add(1, Ordering::Relaxed);

        if prediction.sequence_failure == prediction.tree_failure {
            self.agreements.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut by_category) = self.by_category.write() {
            *by_category
                .entry(prediction.category.label().to_string())
                .or_insert(0) += 1;
        }

        if let Ok(mut times) = self.prediction_times.write() {
            times.push(elapsed.as_micros() as u64);
        }
    }

    /// Record a raised alarm
    pub fn record_alarm(&self) {
        self.alarms_raised.fetch_add(1, Ordering::Relaxed);
    }

    /// Fraction of predictions where both classifiers agreed
    pub fn agreement_rate(&self) -> f64 {
        let total = self.predictions_total.load(Ordering::Relaxed);
        if total == 0 {
            return 0.0;
        }
        self.agreements.load(Ordering::Relaxed) as f64 / total as f64
    }

    /// Outcome counts by category label
    pub fn outcomes_by_category(&self) -> HashMap<String, u64> {
        self.by_category
            .read()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Mean prediction latency in microseconds
    pub fn mean_latency_us(&self) -> u64 {
        let times = match self.prediction_times.read() {
            Ok(times) => times,
            Err(_) => return 0,
        };
        if times.is_empty() {
            return 0;
        }
        times.iter().sum::<u64>() / times.len() as u64
    }

    /// Log the session summary
    pub fn print_summary(&self) {
        let total = self.predictions_total.load(Ordering::Relaxed);
        let alarms = self.alarms_raised.load(Ordering::Relaxed);

        info!(
            predictions = total,
            alarms = alarms,
            agreement_rate = format!("{:.1}%", self.agreement_rate() * 100.0),
            mean_latency_us = self.mean_latency_us(),
            "Session summary"
        );

        for (category, count) in self.outcomes_by_category() {
            info!(category = %category, count = count, "Outcomes");
        }
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::outcome::OutcomeCategory;

    fn prediction(
        sequence_failure: bool,
        tree_failure: bool,
        category: OutcomeCategory,
    ) -> Prediction {
        Prediction::new(
            if sequence_failure { 0.9 } else { 0.1 },
            if tree_failure { 0.9 } else { 0.1 },
            sequence_failure,
            tree_failure,
            sequence_failure && tree_failure,
            category,
        )
    }

    #[test]
    fn test_record_predictions() {
        let metrics = SessionMetrics::new();

        metrics.record_prediction(
            &prediction(false, false, OutcomeCategory::Optimal),
            Duration::from_micros(150),
        );
        metrics.record_prediction(
            &prediction(true, true, OutcomeCategory::Failure),
            Duration::from_micros(250),
        );
        metrics.record_alarm();

        assert_eq!(metrics.predictions_total.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.alarms_raised.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.mean_latency_us(), 200);

        let by_category = metrics.outcomes_by_category();
        assert_eq!(by_category.get("Optimal"), Some(&1));
        assert_eq!(by_category.get("Failure"), Some(&1));
    }

    #[test]
    fn test_agreement_rate() {
        let metrics = SessionMetrics::new();
        assert_eq!(metrics.agreement_rate(), 0.0);

        metrics.record_prediction(
            &prediction(true, true, OutcomeCategory::Failure),
            Duration::from_micros(100),
        );
        metrics.record_prediction(
            &prediction(true, false, OutcomeCategory::Moderate),
            Duration::from_micros(100),
        );

        assert!((metrics.agreement_rate() - 0.5).abs() < 1e-9);
    }
}
