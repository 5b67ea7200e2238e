// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by fallible geometry operations.

use thiserror::Error;

/// Errors reported by curve, path and shape operations.
///
/// Numerical degeneracy (parallel chords, tangential contact, a solver that
/// runs out of depth) is not an error: those cases resolve locally to "no
/// intersection" or "no root".
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GeomError {
    /// A caller contract was violated, such as mixing curve orders.
    #[error("logic error: {0}")]
    Logic(&'static str),

    /// The requested operation exists but has no implementation for this input.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// An argument lies outside its valid domain.
    #[error("range error: {0}")]
    Range(&'static str),

    /// A time parameter lies outside `[min, max]`.
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        /// Name of the offending argument.
        parameter: &'static str,
        /// The value supplied.
        value: f64,
        /// Lower bound of the valid domain.
        min: f64,
        /// Upper bound of the valid domain.
        max: f64,
    },

    /// A path edit would leave consecutive curves disconnected.
    #[error("path continuity broken at curve {index}: endpoints are {gap} apart")]
    Continuity {
        /// Index, in the edited path, of the curve whose start does not meet
        /// its predecessor's end.
        index: usize,
        /// Distance between the two endpoints.
        gap: f64,
    },
}

impl GeomError {
    /// Whether this error reports an argument outside its domain.
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            GeomError::Range(_) | GeomError::ParameterOutOfRange { .. }
        )
    }

    pub(crate) fn check_time(parameter: &'static str, value: f64, min: f64, max: f64) -> GeomResult<()> {
        if value >= min && value <= max {
            Ok(())
        } else {
            Err(GeomError::ParameterOutOfRange {
                parameter,
                value,
                min,
                max,
            })
        }
    }
}

/// Result alias for fallible geometry operations.
pub type GeomResult<T> = Result<T, GeomError>;
