// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar polynomials in Bernstein form.

use core::ops::Index;

use alloc::vec::Vec;
use smallvec::{smallvec, SmallVec};

use crate::sbasis_to_bezier::bezier_to_sbasis;
use crate::solver::{deflate_end, deflate_start, find_bernstein_roots};
use crate::{GeomError, GeomResult, Interval, SBasis};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

pub(crate) type Coeffs = SmallVec<[f64; 8]>;

/// A scalar Bezier polynomial of any order.
///
/// The order (one less than the number of coefficients) is fixed at
/// construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bezier {
    c: Coeffs,
}

impl Bezier {
    /// Create a polynomial from its Bernstein coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::Logic`] when `coeffs` is empty.
    pub fn new(coeffs: impl IntoIterator<Item = f64>) -> GeomResult<Bezier> {
        let c: Coeffs = coeffs.into_iter().collect();
        if c.is_empty() {
            return Err(GeomError::Logic("a Bezier needs at least one coefficient"));
        }
        Ok(Bezier { c })
    }

    /// The constant polynomial of order zero.
    pub fn constant(v: f64) -> Bezier {
        Bezier { c: smallvec![v] }
    }

    pub(crate) fn from_coeffs(c: Coeffs) -> Bezier {
        debug_assert!(!c.is_empty(), "Bezier coefficients must not be empty");
        Bezier { c }
    }

    /// The order, one less than the number of coefficients.
    #[inline]
    pub fn order(&self) -> usize {
        self.c.len() - 1
    }

    /// The Bernstein coefficients.
    #[inline]
    pub fn coeffs(&self) -> &[f64] {
        &self.c
    }

    /// The value at `t = 0`.
    #[inline]
    pub fn at0(&self) -> f64 {
        self.c[0]
    }

    /// The value at `t = 1`.
    #[inline]
    pub fn at1(&self) -> f64 {
        self.c[self.c.len() - 1]
    }

    /// Evaluate at `t` by de Casteljau's algorithm.
    pub fn value_at(&self, t: f64) -> f64 {
        let mut row = self.c.clone();
        let n = row.len();
        for i in 1..n {
            for j in 0..n - i {
                row[j] = lerp(row[j], row[j + 1], t);
            }
        }
        row[0]
    }

    /// Split at `t` into two polynomials of the same order.
    pub fn subdivide(&self, t: f64) -> (Bezier, Bezier) {
        let (left, right) = casteljau_split(&self.c, t);
        (Bezier { c: left }, Bezier { c: right })
    }

    /// The restriction to `[from, to]`, reparameterized over `[0, 1]`.
    #[must_use]
    pub fn portion(&self, from: f64, to: f64) -> Bezier {
        if from == 0.0 && to == 1.0 {
            return self.clone();
        }
        if from > to {
            return self.portion(to, from).reverse();
        }
        let (left, _) = casteljau_split(&self.c, to);
        if to == 0.0 {
            return Bezier { c: left };
        }
        let (_, right) = casteljau_split(&left, from / to);
        Bezier { c: right }
    }

    /// The polynomial traversed backwards, `f(1 - t)`.
    #[must_use]
    pub fn reverse(&self) -> Bezier {
        Bezier {
            c: self.c.iter().rev().copied().collect(),
        }
    }

    /// The derivative, one order lower (order zero stays zero).
    #[must_use]
    pub fn derivative(&self) -> Bezier {
        let n = self.order();
        if n == 0 {
            return Bezier::constant(0.0);
        }
        Bezier {
            c: self
                .c
                .windows(2)
                .map(|w| n as f64 * (w[1] - w[0]))
                .collect(),
        }
    }

    /// The same polynomial expressed with one more coefficient.
    #[must_use]
    pub fn elevate_degree(&self) -> Bezier {
        let n = self.c.len();
        let mut c = Coeffs::with_capacity(n + 1);
        c.push(self.c[0]);
        for i in 1..n {
            let a = i as f64 / n as f64;
            c.push(a * self.c[i - 1] + (1.0 - a) * self.c[i]);
        }
        c.push(self.c[n - 1]);
        Bezier { c }
    }

    /// Whether every coefficient is within `eps` of the first.
    pub fn is_constant(&self, eps: f64) -> bool {
        self.c.iter().all(|&v| (v - self.c[0]).abs() <= eps)
    }

    /// Whether every coefficient is within `eps` of zero.
    pub fn is_zero(&self, eps: f64) -> bool {
        self.c.iter().all(|v| v.abs() <= eps)
    }

    /// The range of the control values, which encloses the range of the
    /// polynomial.
    pub fn bounds_fast(&self) -> Interval {
        Interval::from_values(self.c.iter().copied()).unwrap_or_default()
    }

    /// The exact range over `[0, 1]`.
    pub fn bounds_exact(&self) -> Interval {
        let mut result = Interval::new(self.at0(), self.at1());
        for t in self.derivative().roots() {
            result.expand_to(self.value_at(t));
        }
        result
    }

    /// An enclosure of the range over `i`.
    pub fn bounds_local(&self, i: Interval) -> Interval {
        self.portion(i.min(), i.max()).bounds_fast()
    }

    /// The roots in `[0, 1]`, sorted ascending.
    ///
    /// A constant polynomial, even an identically zero one, has no roots.
    pub fn roots(&self) -> Vec<f64> {
        let mut solutions = Vec::new();
        if self.is_constant(0.0) {
            return solutions;
        }
        let mut c = self.c.clone();
        // Deflate exact zeros at the ends so they are reported exactly.
        while c.len() > 1 && c[0] == 0.0 {
            solutions.push(0.0);
            c = deflate_start(&c);
        }
        let mut at_end = false;
        while c.len() > 1 && c[c.len() - 1] == 0.0 {
            at_end = true;
            c = deflate_end(&c);
        }
        solutions.extend(find_bernstein_roots(&c, 0.0, 1.0));
        if at_end {
            solutions.push(1.0);
        }
        solutions.sort_by(f64::total_cmp);
        solutions.dedup();
        solutions
    }

    /// Convert to the symmetric power basis.
    pub fn to_sbasis(&self) -> SBasis {
        bezier_to_sbasis(self)
    }
}

impl Index<usize> for Bezier {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.c[i]
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Split a Bernstein coefficient list at `t` by de Casteljau's algorithm.
pub(crate) fn casteljau_split(c: &[f64], t: f64) -> (Coeffs, Coeffs) {
    let n = c.len();
    let mut row: Coeffs = c.iter().copied().collect();
    let mut left = Coeffs::with_capacity(n);
    let mut right: Coeffs = SmallVec::from_elem(0.0, n);
    left.push(row[0]);
    right[n - 1] = row[n - 1];
    for i in 1..n {
        for j in 0..n - i {
            row[j] = lerp(row[j], row[j + 1], t);
        }
        left.push(row[0]);
        right[n - 1 - i] = row[n - 1 - i];
    }
    (left, right)
}
