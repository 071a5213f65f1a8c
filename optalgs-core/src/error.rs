//! Error types for optalgs

use thiserror::Error;

/// Caller contract violations detected by the solvers.
///
/// Non-convergence is not an error: it is reported through
/// [`DescentOutcome::NotConverged`](crate::solvers::gd::DescentOutcome).
#[derive(Error, Clone, Debug, PartialEq)]
pub enum DescentError {
    #[error("dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl DescentError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DescentError>;
