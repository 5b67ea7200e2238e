// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear segments, the terms of a symmetric power basis expansion.

use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::Interval;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// An affine function over `[0, 1]`, `(1 - t) * v0 + t * v1`.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Linear {
    /// The value at `t = 0`.
    pub v0: f64,
    /// The value at `t = 1`.
    pub v1: f64,
}

impl Linear {
    /// The zero function.
    pub const ZERO: Linear = Linear::new(0.0, 0.0);

    /// Create a linear function from its endpoint values.
    #[inline]
    pub const fn new(v0: f64, v1: f64) -> Linear {
        Linear { v0, v1 }
    }

    /// The constant function `c`.
    #[inline]
    pub const fn constant(c: f64) -> Linear {
        Linear { v0: c, v1: c }
    }

    /// Evaluate at `t`.
    #[inline]
    pub fn value_at(self, t: f64) -> f64 {
        (1.0 - t) * self.v0 + t * self.v1
    }

    /// The difference `v1 - v0`, the slope of the function.
    #[inline]
    pub fn tri(self) -> f64 {
        self.v1 - self.v0
    }

    /// The mean `(v0 + v1) / 2`.
    #[inline]
    pub fn hat(self) -> f64 {
        0.5 * (self.v0 + self.v1)
    }

    /// The same function traversed from `t = 1` to `t = 0`.
    #[inline]
    pub fn reverse(self) -> Linear {
        Linear::new(self.v1, self.v0)
    }

    /// Whether both endpoint values are within `eps` of zero.
    #[inline]
    pub fn is_zero(self, eps: f64) -> bool {
        self.v0.abs() <= eps && self.v1.abs() <= eps
    }

    /// Whether the endpoint values agree to within `eps`.
    #[inline]
    pub fn is_constant(self, eps: f64) -> bool {
        (self.v0 - self.v1).abs() <= eps
    }

    /// The range of values over `[0, 1]`.
    #[inline]
    pub fn bounds(self) -> Interval {
        Interval::new(self.v0, self.v1)
    }
}

impl Add for Linear {
    type Output = Linear;

    #[inline]
    fn add(self, rhs: Linear) -> Linear {
        Linear::new(self.v0 + rhs.v0, self.v1 + rhs.v1)
    }
}

impl AddAssign for Linear {
    #[inline]
    fn add_assign(&mut self, rhs: Linear) {
        *self = *self + rhs;
    }
}

impl Sub for Linear {
    type Output = Linear;

    #[inline]
    fn sub(self, rhs: Linear) -> Linear {
        Linear::new(self.v0 - rhs.v0, self.v1 - rhs.v1)
    }
}

impl SubAssign for Linear {
    #[inline]
    fn sub_assign(&mut self, rhs: Linear) {
        *self = *self - rhs;
    }
}

impl Add<f64> for Linear {
    type Output = Linear;

    #[inline]
    fn add(self, rhs: f64) -> Linear {
        Linear::new(self.v0 + rhs, self.v1 + rhs)
    }
}

impl Sub<f64> for Linear {
    type Output = Linear;

    #[inline]
    fn sub(self, rhs: f64) -> Linear {
        Linear::new(self.v0 - rhs, self.v1 - rhs)
    }
}

impl Mul<f64> for Linear {
    type Output = Linear;

    #[inline]
    fn mul(self, rhs: f64) -> Linear {
        Linear::new(self.v0 * rhs, self.v1 * rhs)
    }
}

impl Div<f64> for Linear {
    type Output = Linear;

    #[inline]
    fn div(self, rhs: f64) -> Linear {
        Linear::new(self.v0 / rhs, self.v1 / rhs)
    }
}

impl Neg for Linear {
    type Output = Linear;

    #[inline]
    fn neg(self) -> Linear {
        Linear::new(-self.v0, -self.v1)
    }
}
