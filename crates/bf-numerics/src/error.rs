//! Error types for numerics operations.

use bf_core::BfError;
use thiserror::Error;

/// Errors raised while building or running numerical kernels.
///
/// Non-convergence is deliberately absent: solvers report it through
/// `RootSolution::converged` and a warning, never as an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericsError {
    #[error("Configuration error: {0}")]
    Core(#[from] BfError),

    #[error("Invalid table: {what}")]
    InvalidTable { what: String },

    #[error("Dimension mismatch: {what}")]
    Dimension { what: String },

    #[error("Singular Jacobian at iteration {iteration}")]
    SingularJacobian { iteration: usize },
}

pub type NumericsResult<T> = Result<T, NumericsError>;

impl From<NumericsError> for BfError {
    fn from(e: NumericsError) -> Self {
        match e {
            NumericsError::Core(inner) => inner,
            NumericsError::InvalidTable { .. } => BfError::InvalidArg { what: "table" },
            NumericsError::Dimension { .. } => BfError::InvalidArg { what: "dimension" },
            NumericsError::SingularJacobian { .. } => BfError::InvalidArg { what: "jacobian" },
        }
    }
}
