//! Error module for the spike-field phase analysis library.
use std::error::Error;
use std::fmt;

use crate::units::Unit;

/// Error types for the library.
#[derive(Debug, PartialEq, Clone)]
pub enum PhaseError {
    /// Error for invalid call arguments, e.g., the numbers of signals and spike trains cannot be paired.
    InvalidArgument(String),
    /// Error for invalid parameters, e.g., a non-positive sampling period or non-finite firing times.
    InvalidParameter(String),
    /// Error for invalid phase values, e.g., NaN or infinite phases.
    InvalidPhases(String),
    /// Unrecognized method identifier.
    UnknownMethod(String),
    /// Not implemented operation.
    NotImplemented(String),
    /// Error for a conversion between units of different physical dimensions.
    IncompatibleUnits { from: Unit, to: Unit },
}

impl fmt::Display for PhaseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhaseError::InvalidArgument(e) => write!(f, "Invalid argument: {}", e),
            PhaseError::InvalidParameter(e) => write!(f, "Invalid parameters: {}", e),
            PhaseError::InvalidPhases(e) => write!(f, "Invalid phases: {}", e),
            PhaseError::UnknownMethod(e) => write!(f, "Unknown method: {}", e),
            PhaseError::NotImplemented(e) => write!(f, "Not implemented: {}", e),
            PhaseError::IncompatibleUnits { from, to } => {
                write!(f, "Incompatible units: cannot convert {} to {}", from, to)
            }
        }
    }
}

impl Error for PhaseError {}
