//! bounded-thompson: ε-bounded Thompson Sampling for outreach campaigns.
//!
//! Assigns experimental units to treatment arms given past Bernoulli
//! outcomes. Each arm's success probability gets a posterior under a
//! heavy-tailed hyperprior; units follow the arm that wins their posterior
//! draw, except with probability ε, where they are assigned uniformly at
//! random so effects can still be estimated without bias.
//!
//! Every call is a fresh batch computation. All randomness comes from a single
//! stream, resolved once per call from a [`StreamSource`], so a seed fully
//! determines the output.
//!
//! # Quick Start
//!
//! ```
//! use bounded_thompson::{StreamSource, assign};
//!
//! // Historical arm of each recipient and whether they responded
//! let assignments = [0, 0, 0, 0, 1, 1, 1, 1];
//! let outcomes = [1, 1, 0, 0, 0, 1, 1, 1];
//!
//! let seed = StreamSource::FromSeed(239102);
//! let result = assign(2, &assignments, &outcomes, 20, 0.25, seed).unwrap();
//! assert_eq!(result.len(), 20);
//! assert!(result.arm_choice.iter().all(|&arm| arm < 2));
//! ```
//!
//! Campaigns with named treatments:
//!
//! ```
//! use bounded_thompson::prelude::*;
//!
//! let campaign = Campaign::builder()
//!     .treatments(vec!["control", "reminder", "incentive"])
//!     .epsilon(0.1)
//!     .num_draws(5)
//!     .build()
//!     .unwrap();
//!
//! let history = ["control", "reminder", "incentive", "reminder"];
//! let outcomes = [0, 1, 0, 1];
//! let batch = campaign.assign(&history, &outcomes, StreamSource::FromSeed(7)).unwrap();
//! assert_eq!(batch.len(), 5);
//! ```

mod campaign;
mod config;
mod error;
mod history;
mod policy;
mod posterior;
mod stream;
mod theta;

pub use campaign::{Assignment, Campaign, CampaignBuilder, group_label};
pub use config::{AssignmentConfig, AssignmentConfigBuilder, DEFAULT_EPSILON};
pub use error::{AssignError, Result};
pub use history::{ArmCounts, tally};
pub use policy::{AssignmentResult, EpsilonThompson, assign};
pub use posterior::{DEFAULT_PARETO_SHAPE, ParetoBetaPrior, draw_posterior};
pub use stream::{RandomStream, ResolvedStream, StreamSource};
pub use theta::{ThetaMatrix, build_theta_matrix};

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use bounded_thompson::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        AssignError, AssignmentConfig, AssignmentResult, Campaign, EpsilonThompson,
        RandomStream, Result, StreamSource, ThetaMatrix, assign, build_theta_matrix,
        draw_posterior,
    };
}
