//! Posterior sampling of an arm's success probability.
//!
//! The prior sits on the Beta hyperparameters rather than on the success
//! probability itself:
//!
//! ```text
//! π(α, β) ∝ (α + β)^(-2.5)
//! p ~ Beta(α, β)
//! x ~ Bernoulli(p)
//! ```
//!
//! It is realized by drawing the sum `s = α + β` from a Pareto distribution
//! (scale 1, shape 1.5) and a split fraction `u` uniformly, then setting
//! `α = s·u` and `β = s·(1 - u)`. Given the arm's counts the posterior draw is
//! `Beta(α + successes, β + failures)`.

use rand::Rng;
use rand::distr::Open01;
use rand_distr::{Beta, Distribution, Pareto};
use serde::{Deserialize, Serialize};

use crate::error::{AssignError, Result};
use crate::history::ArmCounts;
use crate::stream::StreamSource;

/// Pareto shape giving the `(α + β)^(-2.5)` hyperprior density.
pub const DEFAULT_PARETO_SHAPE: f64 = 1.5;

/// Heavy-tailed hyperprior over the Beta distribution's parameters.
///
/// The same prior applies to every arm, observed or not.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParetoBetaPrior {
    shape: f64,
}

impl ParetoBetaPrior {
    /// Creates a prior with the given Pareto shape for `α + β`
    ///
    /// # Arguments
    /// * `shape` - Pareto shape parameter (must be finite and positive)
    pub fn new(shape: f64) -> Result<Self> {
        let prior = Self { shape };
        prior.validate()?;
        Ok(prior)
    }

    /// Gets the Pareto shape parameter
    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.shape.is_finite() || self.shape <= 0.0 {
            return Err(AssignError::invalid(format!(
                "prior shape must be finite and positive, got {}",
                self.shape
            )));
        }
        Ok(())
    }

    /// Draw `num_draws` success probabilities from the arm's posterior.
    ///
    /// Consumes the stream in three batches: all Pareto sums, then all split
    /// fractions, then all Beta samples.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        counts: ArmCounts,
        num_draws: usize,
        rng: &mut R,
    ) -> Result<Vec<f64>> {
        self.validate()?;
        if num_draws == 0 {
            return Err(AssignError::invalid("num_draws must be positive"));
        }

        let pareto = Pareto::new(1.0, self.shape).map_err(|e| AssignError::NumericalError {
            message: format!("pareto hyperprior: {e}"),
        })?;

        let sums: Vec<f64> = (0..num_draws).map(|_| pareto.sample(rng)).collect();
        // Open interval keeps both Beta parameters strictly positive
        let splits: Vec<f64> = (0..num_draws).map(|_| rng.sample(Open01)).collect();

        let successes = counts.successes as f64;
        let failures = counts.failures as f64;

        sums.iter()
            .zip(&splits)
            .map(|(&sum, &split)| {
                let alpha = sum * split + successes;
                let beta = sum * (1.0 - split) + failures;
                Beta::new(alpha, beta)
                    .map(|dist| dist.sample(rng))
                    .map_err(|e| AssignError::NumericalError {
                        message: format!("posterior Beta({alpha}, {beta}): {e}"),
                    })
            })
            .collect()
    }
}

impl Default for ParetoBetaPrior {
    fn default() -> Self {
        Self {
            shape: DEFAULT_PARETO_SHAPE,
        }
    }
}

/// Draw `num_draws` samples of one arm's success probability.
///
/// Values lie in `[0, 1]`. A draw can underflow to exactly `0.0` (or round to
/// `1.0`) when the arm has no failures or no successes and the sampled split
/// leaves one Beta parameter tiny; such values are returned unchanged.
///
/// # Examples
///
/// ```
/// use bounded_thompson::{StreamSource, draw_posterior};
///
/// let draws = draw_posterior(8, 2, 100, StreamSource::FromSeed(42)).unwrap();
/// assert_eq!(draws.len(), 100);
/// ```
///
/// # Errors
/// `InvalidParameter` if `num_draws` is zero.
#[tracing::instrument(level = "debug", skip(source))]
pub fn draw_posterior<'a>(
    successes: u64,
    failures: u64,
    num_draws: usize,
    source: impl Into<StreamSource<'a>>,
) -> Result<Vec<f64>> {
    let counts = ArmCounts::new(successes, failures);
    let mut stream = source.into().resolve();
    ParetoBetaPrior::default().sample(counts, num_draws, &mut *stream)
}
