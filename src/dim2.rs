// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::{GeomError, Point};

/// A coordinate dimension in the plane.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dim2 {
    /// The x axis.
    X,
    /// The y axis.
    Y,
}

impl Dim2 {
    /// Both dimensions, in index order.
    pub const ALL: [Dim2; 2] = [Dim2::X, Dim2::Y];

    /// Get the dimension perpendicular to this one.
    #[inline]
    pub const fn cross(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// The index of this dimension, 0 for x and 1 for y.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }

    /// Create a new [`Point`] by arranging the given magnitudes.
    ///
    /// The axis value is the one matching the dimension (e.g. `y` for [`Self::Y`]).
    /// The cross value is the other one.
    #[inline]
    pub const fn pack_point(self, axis_value: f64, cross_value: f64) -> Point {
        match self {
            Self::X => Point::new(axis_value, cross_value),
            Self::Y => Point::new(cross_value, axis_value),
        }
    }
}

impl TryFrom<usize> for Dim2 {
    type Error = GeomError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Dim2::X),
            1 => Ok(Dim2::Y),
            _ => Err(GeomError::Range("dimension index must be 0 or 1")),
        }
    }
}

impl fmt::Display for Dim2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("X"),
            Self::Y => f.write_str("Y"),
        }
    }
}
