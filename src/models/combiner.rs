//! Verdict combination for the two-classifier ensemble

use crate::types::outcome::OutcomeCategory;

/// Per-model verdicts and their combination
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedVerdicts {
    /// Sequence classifier failure vote
    pub sequence_failure: bool,
    /// Tree-ensemble classifier failure vote
    pub tree_failure: bool,
    /// True only when both classifiers vote failure
    pub combined: bool,
    /// Category derived from the failure-vote count
    pub category: OutcomeCategory,
}

/// Combines the two classifier probabilities into verdicts and a category.
///
/// The combined flag requires unanimity while a single dissenting model
/// still yields the Moderate category. The asymmetry is deliberate: the
/// combined flag is conservative, the category is informative.
#[derive(Debug, Clone, Copy)]
pub struct VerdictCombiner {
    /// Probability above this value counts as a failure vote
    decision_threshold: f64,
}

impl VerdictCombiner {
    pub fn new(decision_threshold: f64) -> Self {
        Self { decision_threshold }
    }

    /// Threshold a single probability into a failure vote (strict comparison).
    pub fn vote(&self, probability: f64) -> bool {
        probability > self.decision_threshold
    }

    /// Combine the two raw probabilities.
    pub fn combine(&self, sequence_probability: f64, tree_probability: f64) -> CombinedVerdicts {
        let sequence_failure = self.vote(sequence_probability);
        let tree_failure = self.vote(tree_probability);

        let failure_count = sequence_failure as u8 + tree_failure as u8;

        CombinedVerdicts {
            sequence_failure,
            tree_failure,
            combined: failure_count > 1,
            category: OutcomeCategory::from_failure_count(failure_count),
        }
    }
}

impl Default for VerdictCombiner {
    fn default() -> Self {
        Self {
            decision_threshold: 0.5,
        }
    }
}
