//! ε-bounded Thompson Sampling assignment.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::AssignmentConfig;
use crate::error::Result;
use crate::history::{ArmCounts, tally};
use crate::stream::StreamSource;
use crate::theta::ThetaMatrix;

/// Arm choices for a batch of units.
///
/// `by_uniform_rule[i]` records whether unit `i` was placed by the
/// exploration gate instead of the Thompson rule, which is what unbiased
/// effect estimation later filters on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub arm_choice: Vec<usize>,
    pub by_uniform_rule: Vec<bool>,
}

impl AssignmentResult {
    pub fn len(&self) -> usize {
        self.arm_choice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arm_choice.is_empty()
    }

    /// Iterate `(arm, by_uniform_rule)` pairs in unit order
    pub fn iter(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.arm_choice
            .iter()
            .copied()
            .zip(self.by_uniform_rule.iter().copied())
    }

    /// Number of units assigned to each arm
    pub fn arm_counts(&self, num_treatments: usize) -> Vec<usize> {
        let mut counts = vec![0; num_treatments];
        for &arm in &self.arm_choice {
            if let Some(count) = counts.get_mut(arm) {
                *count += 1;
            }
        }
        counts
    }

    /// Number of units placed by the exploration gate
    pub fn uniform_count(&self) -> usize {
        self.by_uniform_rule.iter().filter(|&&uniform| uniform).count()
    }
}

/// ε-bounded Thompson Sampling policy.
///
/// Follows the Thompson-greedy arm with probability `1 - ε` and picks an arm
/// uniformly at random with probability `ε`. The policy holds no learned
/// state: every call re-derives the posterior from the history it is given.
#[derive(Clone, Debug, PartialEq)]
pub struct EpsilonThompson {
    config: AssignmentConfig,
}

impl EpsilonThompson {
    /// Creates a policy from a config, validating it first
    pub fn new(config: AssignmentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates a policy with the default prior
    pub fn with_epsilon(epsilon: f64, num_draws: usize) -> Result<Self> {
        Self::new(AssignmentConfig::new(epsilon, num_draws)?)
    }

    pub fn config(&self) -> &AssignmentConfig {
        &self.config
    }

    /// Gets the epsilon value
    pub fn epsilon(&self) -> f64 {
        self.config.epsilon()
    }

    /// Draw the configured number of posterior samples for one arm
    pub fn draw_posterior<R: Rng + ?Sized>(
        &self,
        counts: ArmCounts,
        rng: &mut R,
    ) -> Result<Vec<f64>> {
        self.config
            .prior()
            .sample(counts, self.config.num_draws(), rng)
    }

    /// Build the theta matrix for the given history
    pub fn build_theta_matrix<R: Rng + ?Sized>(
        &self,
        num_treatments: usize,
        assignments: &[usize],
        outcomes: &[u8],
        rng: &mut R,
    ) -> Result<ThetaMatrix> {
        let counts = tally(num_treatments, assignments, outcomes)?;
        ThetaMatrix::draw(self.config.prior(), &counts, self.config.num_draws(), rng)
    }

    /// Assign one arm per posterior row of the history's theta matrix
    pub fn assign<R: Rng + ?Sized>(
        &self,
        num_treatments: usize,
        assignments: &[usize],
        outcomes: &[u8],
        rng: &mut R,
    ) -> Result<AssignmentResult> {
        let theta = self.build_theta_matrix(num_treatments, assignments, outcomes, rng)?;
        Ok(self.assign_from_theta(&theta, rng))
    }

    /// Mix Thompson-greedy and uniform choices over an existing theta matrix.
    ///
    /// Draws one uniform pick per row, then one gate per row, in that order.
    pub fn assign_from_theta<R: Rng + ?Sized>(
        &self,
        theta: &ThetaMatrix,
        rng: &mut R,
    ) -> AssignmentResult {
        let num_treatments = theta.num_treatments();
        let model_choice = theta.thompson_choices();

        let uniform_choice: Vec<usize> = (0..theta.num_draws())
            .map(|_| {
                let u: f64 = rng.random();
                ((u * num_treatments as f64) as usize).min(num_treatments - 1)
            })
            .collect();

        let by_uniform_rule: Vec<bool> = (0..theta.num_draws())
            .map(|_| rng.random::<f64>() < self.config.epsilon())
            .collect();

        let arm_choice = model_choice
            .into_iter()
            .zip(&uniform_choice)
            .zip(&by_uniform_rule)
            .map(|((model, &uniform), &gate)| if gate { uniform } else { model })
            .collect();

        let result = AssignmentResult {
            arm_choice,
            by_uniform_rule,
        };
        tracing::debug!(
            units = result.len(),
            uniform = result.uniform_count(),
            "assigned arms"
        );
        result
    }
}

/// Assign `num_draws` units to arms with ε-bounded Thompson Sampling.
///
/// # Examples
///
/// ```
/// use bounded_thompson::{StreamSource, assign};
///
/// let assignments = [0, 0, 0, 0, 1, 1, 1, 1];
/// let outcomes = [1, 1, 0, 0, 0, 1, 1, 1];
///
/// let run = |seed| assign(2, &assignments, &outcomes, 20, 0.25, StreamSource::FromSeed(seed));
/// assert_eq!(run(239102).unwrap(), run(239102).unwrap());
/// ```
///
/// # Errors
/// - `InvalidParameter` if `epsilon` is outside `[0, 1]`, or any failure of
///   [`build_theta_matrix`](crate::build_theta_matrix)
/// - `DimensionMismatch` / `ArmOutOfRange` for inconsistent history
#[tracing::instrument(
    level = "debug",
    skip(assignments, outcomes, source),
    fields(observations = assignments.len())
)]
pub fn assign<'a>(
    num_treatments: usize,
    assignments: &[usize],
    outcomes: &[u8],
    num_draws: usize,
    epsilon: f64,
    source: impl Into<StreamSource<'a>>,
) -> Result<AssignmentResult> {
    let policy = EpsilonThompson::with_epsilon(epsilon, num_draws)?;
    let mut stream = source.into().resolve();
    policy.assign(num_treatments, assignments, outcomes, &mut *stream)
}
