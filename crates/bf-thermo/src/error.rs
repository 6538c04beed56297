//! Thermodynamic model errors.

use bf_core::BfError;
use bf_numerics::NumericsError;
use thiserror::Error;

/// Result type for thermo operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors raised by equations of state and thermo closures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// Bad or incomplete configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] BfError),

    /// Table or solver construction failure.
    #[error("Numerics error: {0}")]
    Numerics(#[from] NumericsError),

    /// Capability missing from a specific model.
    #[error("{what} is not implemented for {model}")]
    NotImplemented {
        what: &'static str,
        model: &'static str,
    },

    /// Parameter sets of different model kinds cannot be mixed.
    #[error("Cannot mix {left} with {right}")]
    IncompatibleMix {
        left: &'static str,
        right: &'static str,
    },

    /// Non-physical configuration value (negative molecular weight, ...).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}
