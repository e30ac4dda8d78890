//! The draws × arms matrix of posterior success probabilities.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;

use crate::error::{AssignError, Result};
use crate::history::{ArmCounts, tally};
use crate::posterior::ParetoBetaPrior;
use crate::stream::StreamSource;

/// Posterior draws for every arm, one row per simulated replicate.
///
/// Row `i` is one complete hypothetical world across all arms, so comparing
/// values within a row is a fair Thompson comparison. Column `j` holds arm
/// `j`'s draws.
#[derive(Clone, Debug, PartialEq)]
pub struct ThetaMatrix {
    draws: Array2<f64>,
}

impl ThetaMatrix {
    /// Draw one posterior column per arm, in ascending arm order, from a
    /// single stream.
    pub fn draw<R: Rng + ?Sized>(
        prior: &ParetoBetaPrior,
        counts: &[ArmCounts],
        num_draws: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if counts.is_empty() {
            return Err(AssignError::NoArmsAvailable);
        }
        if num_draws == 0 {
            return Err(AssignError::invalid("num_draws must be positive"));
        }

        let mut draws = Array2::zeros((num_draws, counts.len()));
        for (arm, &arm_counts) in counts.iter().enumerate() {
            tracing::debug!(
                arm,
                successes = arm_counts.successes,
                failures = arm_counts.failures,
                "drawing arm posterior"
            );
            let column = prior.sample(arm_counts, num_draws, rng)?;
            draws.column_mut(arm).assign(&Array1::from(column));
        }
        Ok(Self { draws })
    }

    /// Wrap precomputed draws, rows as replicates and columns as arms
    pub fn from_array(draws: Array2<f64>) -> Result<Self> {
        if draws.ncols() == 0 {
            return Err(AssignError::NoArmsAvailable);
        }
        if draws.nrows() == 0 {
            return Err(AssignError::invalid("num_draws must be positive"));
        }
        Ok(Self { draws })
    }

    /// Number of rows (simulated replicates)
    pub fn num_draws(&self) -> usize {
        self.draws.nrows()
    }

    /// Number of columns (arms)
    pub fn num_treatments(&self) -> usize {
        self.draws.ncols()
    }

    /// `(num_draws, num_treatments)`
    pub fn shape(&self) -> (usize, usize) {
        self.draws.dim()
    }

    /// Posterior draws for one arm, or `None` if the arm does not exist
    pub fn arm(&self, arm: usize) -> Option<ArrayView1<'_, f64>> {
        (arm < self.num_treatments()).then(|| self.draws.column(arm))
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.draws.view()
    }

    pub fn into_array(self) -> Array2<f64> {
        self.draws
    }

    /// The Thompson-greedy arm of every row.
    ///
    /// Ties go to the lowest arm index.
    pub fn thompson_choices(&self) -> Vec<usize> {
        self.draws.rows().into_iter().map(argmax).collect()
    }

    /// Share of rows in which each arm is the Thompson-greedy choice.
    ///
    /// This is the Monte Carlo estimate of the probability that each arm is
    /// optimal, which is also the allocation Thompson Sampling targets.
    pub fn win_probabilities(&self) -> Vec<f64> {
        let mut wins = vec![0usize; self.num_treatments()];
        for choice in self.thompson_choices() {
            wins[choice] += 1;
        }

        let total = self.num_draws() as f64;
        wins.into_iter().map(|w| w as f64 / total).collect()
    }

    /// Posterior mean success probability per arm
    pub fn arm_means(&self) -> Vec<f64> {
        self.draws
            .mean_axis(Axis(0))
            .map(|means| means.to_vec())
            .unwrap_or_default()
    }
}

fn argmax(row: ArrayView1<'_, f64>) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (arm, &value) in row.iter().enumerate() {
        // Strict comparison keeps the first of equal values
        if value > best_value {
            best = arm;
            best_value = value;
        }
    }
    best
}

/// Build the `num_draws × num_treatments` matrix of posterior draws from
/// historical assignments and outcomes.
///
/// Arms without history still get a prior-only column.
///
/// # Errors
/// - `InvalidParameter` if `num_treatments` or `num_draws` is zero, or an
///   outcome is not 0/1
/// - `DimensionMismatch` if `assignments` and `outcomes` differ in length
/// - `ArmOutOfRange` if an assignment is not below `num_treatments`
#[tracing::instrument(
    level = "debug",
    skip(assignments, outcomes, source),
    fields(observations = assignments.len())
)]
pub fn build_theta_matrix<'a>(
    num_treatments: usize,
    assignments: &[usize],
    outcomes: &[u8],
    num_draws: usize,
    source: impl Into<StreamSource<'a>>,
) -> Result<ThetaMatrix> {
    let counts = tally(num_treatments, assignments, outcomes)?;
    let prior = ParetoBetaPrior::default();
    let mut stream = source.into().resolve();
    ThetaMatrix::draw(&prior, &counts, num_draws, &mut *stream)
}
