// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A closed interval of the real line.

use core::fmt;
use core::ops::{Add, Mul, Sub};

/// A closed interval `[min, max]`.
///
/// The constructor orders its endpoints, so `min <= max` always holds for
/// intervals built from finite values.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    min: f64,
    max: f64,
}

impl Interval {
    /// The unit interval `[0, 1]`, the domain of every curve.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Create an interval spanning `a` and `b`, in either order.
    #[inline]
    pub fn new(a: f64, b: f64) -> Interval {
        if a <= b {
            Interval { min: a, max: b }
        } else {
            Interval { min: b, max: a }
        }
    }

    /// The degenerate interval containing only `v`.
    #[inline]
    pub const fn from_value(v: f64) -> Interval {
        Interval { min: v, max: v }
    }

    /// The smallest interval containing every value, or `None` when empty.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Interval> {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        let mut result = Interval::from_value(first);
        for v in iter {
            result.expand_to(v);
        }
        Some(result)
    }

    /// The lower bound.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The upper bound.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// The length of the interval.
    #[inline]
    pub fn extent(&self) -> f64 {
        self.max - self.min
    }

    /// The midpoint of the interval.
    #[inline]
    pub fn middle(&self) -> f64 {
        0.5 * (self.min + self.max)
    }

    /// Whether the interval contains exactly one value.
    #[inline]
    pub fn is_singular(&self) -> bool {
        self.min == self.max
    }

    /// The value at fraction `t` of the way from `min` to `max`.
    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        self.min + (self.max - self.min) * t
    }

    /// Whether `v` lies in `[min, max]`.
    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    /// Whether `v` lies in the half-open `[min, max)`.
    ///
    /// Winding computations count the low end of a curve's span but not the
    /// high end, so that a vertex shared by two curves is counted once.
    #[inline]
    pub fn lower_contains(&self, v: f64) -> bool {
        self.min <= v && v < self.max
    }

    /// Whether `other` lies entirely within this interval.
    #[inline]
    pub fn contains_interval(&self, other: &Interval) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    /// Whether the two intervals share at least one value.
    ///
    /// Touching endpoints count as intersecting.
    #[inline]
    pub fn intersects(&self, other: &Interval) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// The overlap of two intervals, or `None` when they are disjoint.
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min <= max {
            Some(Interval { min, max })
        } else {
            None
        }
    }

    /// The smallest interval containing both.
    #[inline]
    pub fn union(&self, other: &Interval) -> Interval {
        Interval {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow the interval to include `v`.
    #[inline]
    pub fn expand_to(&mut self, v: f64) {
        if v < self.min {
            self.min = v;
        }
        if v > self.max {
            self.max = v;
        }
    }

    /// Grow the interval by `amount` at both ends.
    #[inline]
    pub fn inflate(&self, amount: f64) -> Interval {
        Interval::new(self.min - amount, self.max + amount)
    }
}

impl Add<f64> for Interval {
    type Output = Interval;

    #[inline]
    fn add(self, rhs: f64) -> Interval {
        Interval {
            min: self.min + rhs,
            max: self.max + rhs,
        }
    }
}

impl Sub<f64> for Interval {
    type Output = Interval;

    #[inline]
    fn sub(self, rhs: f64) -> Interval {
        self + -rhs
    }
}

impl Add for Interval {
    type Output = Interval;

    /// Interval sum: every `a + b` with `a` and `b` drawn from the operands.
    #[inline]
    fn add(self, rhs: Interval) -> Interval {
        Interval {
            min: self.min + rhs.min,
            max: self.max + rhs.max,
        }
    }
}

impl Mul<f64> for Interval {
    type Output = Interval;

    #[inline]
    fn mul(self, rhs: f64) -> Interval {
        Interval::new(self.min * rhs, self.max * rhs)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
