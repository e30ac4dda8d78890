//! Per-arm success/failure tallies derived from historical outcomes.

use serde::{Deserialize, Serialize};

use crate::error::{AssignError, Result};

/// Observed Bernoulli outcomes for a single arm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArmCounts {
    /// Number of positive outcomes
    pub successes: u64,
    /// Number of negative outcomes
    pub failures: u64,
}

impl ArmCounts {
    pub fn new(successes: u64, failures: u64) -> Self {
        Self {
            successes,
            failures,
        }
    }

    /// Total number of observations for this arm
    pub fn observations(&self) -> u64 {
        self.successes + self.failures
    }

    /// Raw success rate, or `None` for an arm that was never observed
    pub fn observed_rate(&self) -> Option<f64> {
        match self.observations() {
            0 => None,
            n => Some(self.successes as f64 / n as f64),
        }
    }

    fn record(&mut self, outcome: u8) {
        if outcome == 1 {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
    }
}

/// Tally successes and failures per arm.
///
/// `assignments[i]` is the arm unit `i` received and `outcomes[i]` its binary
/// outcome. The returned vector has one entry per arm in index order; arms
/// with no history get zero counts.
///
/// # Errors
/// - `InvalidParameter` if `num_treatments` is zero or an outcome is not 0/1
/// - `DimensionMismatch` if the two sequences differ in length
/// - `ArmOutOfRange` if an assignment is not below `num_treatments`
pub fn tally(
    num_treatments: usize,
    assignments: &[usize],
    outcomes: &[u8],
) -> Result<Vec<ArmCounts>> {
    if num_treatments == 0 {
        return Err(AssignError::invalid("num_treatments must be positive"));
    }

    if assignments.len() != outcomes.len() {
        return Err(AssignError::DimensionMismatch {
            message: format!(
                "Mismatched dimensions: assignments={}, outcomes={}",
                assignments.len(),
                outcomes.len()
            ),
        });
    }

    let mut counts = vec![ArmCounts::default(); num_treatments];
    for (&arm, &outcome) in assignments.iter().zip(outcomes) {
        if outcome > 1 {
            return Err(AssignError::invalid(format!(
                "outcomes must be 0 or 1, got {outcome}"
            )));
        }

        let stats = counts.get_mut(arm).ok_or(AssignError::ArmOutOfRange {
            arm,
            num_treatments,
        })?;
        stats.record(outcome);
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_per_arm() {
        let counts = tally(2, &[0, 0, 0, 0, 1, 1, 1, 1], &[1, 1, 0, 0, 0, 1, 1, 1]).unwrap();
        assert_eq!(counts, vec![ArmCounts::new(2, 2), ArmCounts::new(3, 1)]);
    }

    #[test]
    fn test_tally_unobserved_arm_is_zero() {
        let counts = tally(3, &[0, 2], &[1, 0]).unwrap();
        assert_eq!(counts[1], ArmCounts::default());
        assert_eq!(counts[1].observed_rate(), None);
        assert_eq!(counts[2].observations(), 1);
    }

    #[test]
    fn test_tally_empty_history() {
        let counts = tally(4, &[], &[]).unwrap();
        assert_eq!(counts.len(), 4);
        assert!(counts.iter().all(|c| c.observations() == 0));
    }

    #[test]
    fn test_tally_rejects_bad_input() {
        assert!(matches!(
            tally(0, &[], &[]),
            Err(AssignError::InvalidParameter { .. })
        ));
        assert!(matches!(
            tally(2, &[0, 1], &[1]),
            Err(AssignError::DimensionMismatch { .. })
        ));
        assert_eq!(
            tally(2, &[0, 2], &[1, 1]),
            Err(AssignError::ArmOutOfRange {
                arm: 2,
                num_treatments: 2
            })
        );
        assert!(matches!(
            tally(2, &[0, 1], &[1, 2]),
            Err(AssignError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_observed_rate() {
        assert_eq!(ArmCounts::new(3, 1).observed_rate(), Some(0.75));
    }
}
