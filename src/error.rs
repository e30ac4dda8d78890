//! Error types for the bounded-thompson library.

use thiserror::Error;

/// Result type alias for assignment operations.
pub type Result<T> = std::result::Result<T, AssignError>;

/// Errors that can occur while drawing posteriors or assigning arms.
///
/// Every variant is raised before any draw is taken, so a failed call never
/// consumes the caller's random stream.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssignError {
    /// Invalid parameter value.
    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Mismatch in the lengths of parallel input sequences.
    #[error("dimension mismatch: {message}")]
    DimensionMismatch { message: String },

    /// A historical assignment refers to an arm that does not exist.
    #[error("arm {arm} out of range: expected an index below {num_treatments}")]
    ArmOutOfRange { arm: usize, num_treatments: usize },

    /// The specified treatment label was not found in the campaign.
    #[error("treatment not found")]
    ArmNotFound,

    /// The specified treatment label already exists in the campaign.
    #[error("treatment already exists")]
    ArmAlreadyExists,

    /// No treatments are available.
    #[error("no treatments available")]
    NoArmsAvailable,

    /// Numerical computation error.
    #[error("numerical error: {message}")]
    NumericalError { message: String },

    /// Builder configuration error.
    #[error("builder error: {message}")]
    BuilderError { message: String },
}

impl AssignError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        AssignError::InvalidParameter {
            message: message.into(),
        }
    }
}
