use crate::config::{AssignmentConfig, AssignmentConfigBuilder};
use crate::error::{AssignError, Result};
use crate::policy::EpsilonThompson;
use crate::stream::StreamSource;
use crate::theta::ThetaMatrix;
use indexmap::IndexSet;
use std::hash::Hash;

/// Group identifier for an arm, as written into the contact export.
///
/// Arm 0 is the control group, `message_0`.
pub fn group_label(arm: usize) -> String {
    format!("message_{arm}")
}

/// One unit's assignment, with the treatment label resolved
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment<A> {
    pub treatment: A,
    pub arm: usize,
    pub by_uniform_rule: bool,
}

impl<A> Assignment<A> {
    /// Group identifier of the assigned arm
    pub fn group_label(&self) -> String {
        group_label(self.arm)
    }

    pub fn is_control(&self) -> bool {
        self.arm == 0
    }
}

/// An outreach campaign over a fixed, ordered set of treatments
///
/// Treatments keep their insertion order, so the first treatment is arm 0
/// (the control) and the position of a label is its arm index.
#[derive(Clone, Debug)]
pub struct Campaign<A> {
    treatments: IndexSet<A>,
    policy: EpsilonThompson,
}

impl<A> Campaign<A>
where
    A: Clone + Eq + Hash,
{
    /// Creates a new campaign with the given treatments and config
    pub fn new<I>(treatments: I, config: AssignmentConfig) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
    {
        let mut set = IndexSet::new();
        for treatment in treatments {
            if !set.insert(treatment) {
                return Err(AssignError::ArmAlreadyExists);
            }
        }

        if set.is_empty() {
            return Err(AssignError::NoArmsAvailable);
        }

        Ok(Self {
            treatments: set,
            policy: EpsilonThompson::new(config)?,
        })
    }

    /// Create a new builder for constructing a campaign
    pub fn builder() -> CampaignBuilder<A> {
        CampaignBuilder::default()
    }

    /// Gets the treatments in arm order
    pub fn treatments(&self) -> &IndexSet<A> {
        &self.treatments
    }

    pub fn num_treatments(&self) -> usize {
        self.treatments.len()
    }

    /// Check if a treatment exists in the campaign
    pub fn has_treatment(&self, treatment: &A) -> bool {
        self.treatments.contains(treatment)
    }

    /// The control treatment (arm 0)
    pub fn control(&self) -> Option<&A> {
        self.treatments.first()
    }

    /// Arm index of a treatment label
    pub fn index_of(&self, treatment: &A) -> Result<usize> {
        self.treatments
            .get_index_of(treatment)
            .ok_or(AssignError::ArmNotFound)
    }

    /// Treatment label of an arm index
    pub fn treatment(&self, arm: usize) -> Option<&A> {
        self.treatments.get_index(arm)
    }

    /// Gets a reference to the policy
    pub fn policy(&self) -> &EpsilonThompson {
        &self.policy
    }

    pub fn config(&self) -> &AssignmentConfig {
        self.policy.config()
    }

    /// Translate historical decisions into arm indices
    pub fn encode(&self, decisions: &[A]) -> Result<Vec<usize>> {
        decisions.iter().map(|d| self.index_of(d)).collect()
    }

    /// Posterior draws for every treatment given the campaign's history
    pub fn theta<'a>(
        &self,
        decisions: &[A],
        outcomes: &[u8],
        source: impl Into<StreamSource<'a>>,
    ) -> Result<ThetaMatrix> {
        let assignments = self.encode(decisions)?;
        let mut stream = source.into().resolve();
        self.policy
            .build_theta_matrix(self.num_treatments(), &assignments, outcomes, &mut *stream)
    }

    /// Assign the configured number of units given the campaign's history
    pub fn assign<'a>(
        &self,
        decisions: &[A],
        outcomes: &[u8],
        source: impl Into<StreamSource<'a>>,
    ) -> Result<Vec<Assignment<A>>> {
        let assignments = self.encode(decisions)?;
        let mut stream = source.into().resolve();
        let result = self
            .policy
            .assign(self.num_treatments(), &assignments, outcomes, &mut *stream)?;

        result
            .iter()
            .map(|(arm, by_uniform_rule)| {
                self.treatment(arm)
                    .cloned()
                    .map(|treatment| Assignment {
                        treatment,
                        arm,
                        by_uniform_rule,
                    })
                    .ok_or(AssignError::ArmOutOfRange {
                        arm,
                        num_treatments: self.num_treatments(),
                    })
            })
            .collect()
    }
}

/// Builder for creating campaigns with a fluent API
pub struct CampaignBuilder<A> {
    treatments: Option<Vec<A>>,
    config: AssignmentConfigBuilder,
}

impl<A> Default for CampaignBuilder<A> {
    fn default() -> Self {
        Self {
            treatments: None,
            config: AssignmentConfig::builder(),
        }
    }
}

impl<A> CampaignBuilder<A>
where
    A: Clone + Eq + Hash,
{
    /// Set the treatments for the campaign
    pub fn treatments<I>(mut self, treatments: I) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        self.treatments = Some(treatments.into_iter().collect());
        self
    }

    /// Start from an existing config, replacing earlier settings
    pub fn config(mut self, config: AssignmentConfig) -> Self {
        self.config = config.into();
        self
    }

    /// Set the exploration rate
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.config = self.config.epsilon(epsilon);
        self
    }

    /// Set the number of units per batch
    pub fn num_draws(mut self, num_draws: usize) -> Self {
        self.config = self.config.num_draws(num_draws);
        self
    }

    /// Build the campaign
    pub fn build(self) -> Result<Campaign<A>> {
        let treatments = self.treatments.ok_or(AssignError::BuilderError {
            message: "Treatments not specified".into(),
        })?;

        Campaign::new(treatments, self.config.build()?)
    }
}
