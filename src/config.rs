//! Configuration for ε-bounded Thompson assignment.

use serde::{Deserialize, Serialize};

use crate::error::{AssignError, Result};
use crate::posterior::ParetoBetaPrior;

/// Default exploration rate
pub const DEFAULT_EPSILON: f64 = 0.1;

/// Parameters of one assignment batch.
///
/// Deserialized configs are not trusted; [`AssignmentConfig::validate`] runs
/// whenever a config is turned into a policy.
///
/// # Examples
///
/// ```
/// use bounded_thompson::AssignmentConfig;
///
/// let config = AssignmentConfig::builder()
///     .epsilon(0.25)
///     .num_draws(20)
///     .build()
///     .unwrap();
/// assert_eq!(config.num_draws(), 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentConfig {
    /// Probability that a unit is assigned uniformly at random
    epsilon: f64,
    /// Number of units to assign (one posterior replicate per unit)
    num_draws: usize,
    /// Hyperprior over the Beta parameters
    #[serde(rename = "prior_shape")]
    prior: ParetoBetaPrior,
}

impl AssignmentConfig {
    /// Creates a validated config with the default prior
    pub fn new(epsilon: f64, num_draws: usize) -> Result<Self> {
        Self::builder().epsilon(epsilon).num_draws(num_draws).build()
    }

    pub fn builder() -> AssignmentConfigBuilder {
        AssignmentConfigBuilder::default()
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn num_draws(&self) -> usize {
        self.num_draws
    }

    pub fn prior(&self) -> &ParetoBetaPrior {
        &self.prior
    }

    /// Check every parameter is in range
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(AssignError::invalid(format!(
                "epsilon must be between 0 and 1, got {}",
                self.epsilon
            )));
        }
        if self.num_draws == 0 {
            return Err(AssignError::invalid("num_draws must be positive"));
        }
        self.prior.validate()
    }
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            num_draws: 1,
            prior: ParetoBetaPrior::default(),
        }
    }
}

/// Builder for [`AssignmentConfig`]; unset fields keep their defaults
#[derive(Clone, Debug, Default)]
pub struct AssignmentConfigBuilder {
    config: AssignmentConfig,
}

impl AssignmentConfigBuilder {
    /// Set the exploration rate
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.config.epsilon = epsilon;
        self
    }

    /// Set the number of units to assign
    pub fn num_draws(mut self, num_draws: usize) -> Self {
        self.config.num_draws = num_draws;
        self
    }

    /// Use a different hyperprior
    pub fn prior(mut self, prior: ParetoBetaPrior) -> Self {
        self.config.prior = prior;
        self
    }

    /// Build the config
    pub fn build(self) -> Result<AssignmentConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl From<AssignmentConfig> for AssignmentConfigBuilder {
    fn from(config: AssignmentConfig) -> Self {
        Self { config }
    }
}
