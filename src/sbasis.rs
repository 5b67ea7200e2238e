// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polynomials in the symmetric power basis.
//!
//! An [`SBasis`] is a sum `Σ s^k L_k(t)` where `s = t (1 - t)` and each
//! `L_k` is a [`Linear`]. A function with `k` terms is a polynomial of
//! degree at most `2k - 1`. The basis is symmetric under `t -> 1 - t`,
//! products and compositions stay in the basis exactly, and a truncated
//! expansion interpolates the endpoint values of the full one.

use core::ops::{Add, AddAssign, Index, Mul, Neg, Sub, SubAssign};

use alloc::vec::Vec;
use smallvec::{smallvec, SmallVec};

use crate::sbasis_to_bezier::sbasis_to_bezier_natural;
use crate::{Interval, Linear};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A scalar polynomial over `[0, 1]` in the symmetric power basis.
///
/// There is always at least one term; the zero function is a single zero
/// [`Linear`]. Trailing zero terms are allowed and are removed by
/// [`SBasis::normalize`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SBasis {
    terms: SmallVec<[Linear; 4]>,
}

impl SBasis {
    /// Create a function from its terms, lowest degree first.
    ///
    /// An empty iterator yields the zero function.
    pub fn new(terms: impl IntoIterator<Item = Linear>) -> SBasis {
        let mut terms: SmallVec<[Linear; 4]> = terms.into_iter().collect();
        if terms.is_empty() {
            terms.push(Linear::ZERO);
        }
        SBasis { terms }
    }

    /// The zero function.
    #[inline]
    pub fn zero() -> SBasis {
        SBasis::from_linear(Linear::ZERO)
    }

    /// The constant function `c`.
    #[inline]
    pub fn constant(c: f64) -> SBasis {
        SBasis::from_linear(Linear::constant(c))
    }

    /// A one-term function.
    #[inline]
    pub fn from_linear(l: Linear) -> SBasis {
        SBasis {
            terms: smallvec![l],
        }
    }

    /// The number of terms.
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Always false; an `SBasis` has at least one term.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The terms, lowest degree first.
    #[inline]
    pub fn terms(&self) -> &[Linear] {
        &self.terms
    }

    /// Term `i`, or zero past the end.
    #[inline]
    pub fn term(&self, i: usize) -> Linear {
        self.terms.get(i).copied().unwrap_or(Linear::ZERO)
    }

    /// Overwrite the endpoint values, leaving the higher terms alone.
    pub(crate) fn pin_ends(&mut self, v0: f64, v1: f64) {
        self.terms[0] = Linear::new(v0, v1);
    }

    /// The value at `t = 0`.
    #[inline]
    pub fn at0(&self) -> f64 {
        self.terms[0].v0
    }

    /// The value at `t = 1`.
    #[inline]
    pub fn at1(&self) -> f64 {
        self.terms[0].v1
    }

    /// The degrees of freedom, two per term.
    #[inline]
    pub fn degrees_of_freedom(&self) -> usize {
        2 * self.terms.len()
    }

    /// Evaluate at `t`.
    pub fn value_at(&self, t: f64) -> f64 {
        let s = t * (1.0 - t);
        let mut p0 = 0.0;
        let mut p1 = 0.0;
        let mut sk = 1.0;
        for term in &self.terms {
            p0 += sk * term.v0;
            p1 += sk * term.v1;
            sk *= s;
        }
        (1.0 - t) * p0 + t * p1
    }

    /// The value and the first `n` derivatives at `t`.
    pub fn value_and_derivatives(&self, t: f64, n: usize) -> Vec<f64> {
        let mut result = Vec::with_capacity(n + 1);
        result.push(self.value_at(t));
        let mut deriv = self.clone();
        for _ in 0..n {
            deriv = deriv.derivative();
            result.push(deriv.value_at(t));
        }
        result
    }

    /// Whether every term is within `eps` of zero.
    pub fn is_zero(&self, eps: f64) -> bool {
        self.terms.iter().all(|l| l.is_zero(eps))
    }

    /// Whether the function is constant to within `eps`.
    pub fn is_constant(&self, eps: f64) -> bool {
        self.terms[0].is_constant(eps) && self.terms[1..].iter().all(|l| l.is_zero(eps))
    }

    /// Whether all coefficients are finite.
    pub fn is_finite(&self) -> bool {
        self.terms
            .iter()
            .all(|l| l.v0.is_finite() && l.v1.is_finite())
    }

    /// Remove trailing zero terms.
    pub fn normalize(&mut self) {
        while self.terms.len() > 1 && self.terms.last().is_some_and(|l| l.is_zero(0.0)) {
            self.terms.pop();
        }
    }

    /// Keep only the first `n` terms (at least one).
    ///
    /// The endpoint values are unchanged; the result approximates the
    /// function with an error bounded by [`SBasis::tail_error`].
    #[must_use]
    pub fn truncate(&self, n: usize) -> SBasis {
        let n = n.clamp(1, self.terms.len());
        SBasis {
            terms: self.terms[..n].iter().copied().collect(),
        }
    }

    /// A bound on the magnitude of the terms from `tail` onwards.
    pub fn tail_error(&self, tail: usize) -> f64 {
        let b = self.bounds_fast(tail);
        b.min().abs().max(b.max().abs())
    }

    /// The derivative with respect to `t`.
    #[must_use]
    pub fn derivative(&self) -> SBasis {
        let a = &self.terms;
        let n = a.len();
        let mut c: SmallVec<[Linear; 4]> = SmallVec::from_elem(Linear::ZERO, n);
        if self.is_zero(0.0) {
            return SBasis { terms: c };
        }
        for k in 0..n - 1 {
            let d = (2 * k + 1) as f64 * a[k].tri();
            c[k] = Linear::new(
                d + (k + 1) as f64 * a[k + 1].v0,
                d - (k + 1) as f64 * a[k + 1].v1,
            );
        }
        let k = n - 1;
        let d = (2 * k + 1) as f64 * a[k].tri();
        if d == 0.0 && k > 0 {
            c.pop();
        } else {
            c[k] = Linear::constant(d);
        }
        SBasis { terms: c }
    }

    /// An antiderivative, with value `-I/2` at 0 and `I/2` at 1 where `I`
    /// is the integral over `[0, 1]`.
    #[must_use]
    pub fn integral(&self) -> SBasis {
        let c = &self.terms;
        let mut a: SmallVec<[Linear; 4]> = SmallVec::from_elem(Linear::ZERO, c.len() + 1);
        for k in 1..=c.len() {
            let ahat = -c[k - 1].tri() / (2 * k) as f64;
            a[k] = Linear::constant(ahat);
        }
        let mut a_tri = 0.0;
        for k in (0..c.len()).rev() {
            a_tri = (c[k].hat() + (k + 1) as f64 * a_tri / 2.0) / (2 * k + 1) as f64;
            a[k].v0 -= a_tri / 2.0;
            a[k].v1 += a_tri / 2.0;
        }
        let mut result = SBasis { terms: a };
        result.normalize();
        result
    }

    /// The exact product of two functions.
    ///
    /// ```
    /// use sbgeom::{Linear, SBasis};
    ///
    /// let f = SBasis::from_linear(Linear::new(-0.5, 0.5));
    /// let sq = f.multiply(&f);
    /// assert!((sq.value_at(0.25) - 0.0625).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn multiply(&self, other: &SBasis) -> SBasis {
        if self.is_zero(0.0) || other.is_zero(0.0) {
            return SBasis::zero();
        }
        let a = &self.terms;
        let b = &other.terms;
        let mut c: SmallVec<[Linear; 4]> = SmallVec::from_elem(Linear::ZERO, a.len() + b.len());
        for (j, bj) in b.iter().enumerate() {
            for (i, ai) in a.iter().enumerate() {
                let tri = bj.tri() * ai.tri();
                c[i + j + 1] -= Linear::constant(tri);
                c[i + j] += Linear::new(bj.v0 * ai.v0, bj.v1 * ai.v1);
            }
        }
        let mut result = SBasis { terms: c };
        result.normalize();
        result
    }

    /// Compute `self * b + c`.
    #[must_use]
    pub fn multiply_add(&self, b: &SBasis, c: &SBasis) -> SBasis {
        self.multiply(b) + c.clone()
    }

    /// The composition `self(g(t))`.
    ///
    /// Exact for polynomial `g`: the result is evaluated by Horner's rule in
    /// powers of `g (1 - g)`.
    #[must_use]
    pub fn compose(&self, g: &SBasis) -> SBasis {
        let one_minus_g = SBasis::constant(1.0) - g.clone();
        let s = one_minus_g.multiply(g);
        let mut r = SBasis::zero();
        for term in self.terms.iter().rev() {
            let lin = SBasis::constant(term.v0) - g.clone() * term.v0 + g.clone() * term.v1;
            r = r.multiply_add(&s, &lin);
        }
        r
    }

    /// The restriction to `[from, to]`, reparameterized over `[0, 1]`.
    ///
    /// `from > to` yields the reversed restriction.
    #[must_use]
    pub fn portion(&self, from: f64, to: f64) -> SBasis {
        if from == 0.0 && to == 1.0 {
            return self.clone();
        }
        self.compose(&SBasis::from_linear(Linear::new(from, to)))
    }

    /// The function traversed backwards, `f(1 - t)`.
    #[must_use]
    pub fn reverse(&self) -> SBasis {
        SBasis {
            terms: self.terms.iter().map(|l| l.reverse()).collect(),
        }
    }

    /// A cheap enclosure of the range over `[0, 1]`, considering only the
    /// terms from `order` onwards.
    pub fn bounds_fast(&self, order: usize) -> Interval {
        let mut lo: f64 = 0.0;
        let mut hi: f64 = 0.0;
        for term in self.terms.iter().skip(order).rev() {
            let (a, b) = (term.v0, term.v1);
            let mut t = 0.0;
            if lo < 0.0 {
                t = ((b - a) / lo + 1.0) * 0.5;
            }
            lo = if lo >= 0.0 || !(0.0..=1.0).contains(&t) {
                a.min(b)
            } else {
                lerp(t, a + lo * t, b)
            };

            if hi > 0.0 {
                t = ((b - a) / hi + 1.0) * 0.5;
            }
            hi = if hi <= 0.0 || !(0.0..=1.0).contains(&t) {
                a.max(b)
            } else {
                lerp(t, a + hi * t, b)
            };
        }
        let res = Interval::new(lo, hi);
        if order > 0 {
            res * 0.25_f64.powi(order as i32)
        } else {
            res
        }
    }

    /// An enclosure of the range over the sub-interval `i` of `[0, 1]`.
    pub fn bounds_local(&self, i: Interval, order: usize) -> Interval {
        let (t0, t1) = (i.min(), i.max());
        let mut lo: f64 = 0.0;
        let mut hi: f64 = 0.0;
        let at = |a: f64, b: f64, c: f64, t: f64| a * (1.0 - t) + b * t + c * t * (1.0 - t);
        for term in self.terms.iter().skip(order).rev() {
            let (a, b) = (term.v0, term.v1);
            let mut t = 0.0;
            if lo < 0.0 {
                t = ((b - a) / lo + 1.0) * 0.5;
            }
            lo = if lo >= 0.0 || t < t0 || t > t1 {
                at(a, b, lo, t0).min(at(a, b, lo, t1))
            } else {
                lerp(t, a + lo * t, b)
            };

            if hi > 0.0 {
                t = ((b - a) / hi + 1.0) * 0.5;
            }
            hi = if hi <= 0.0 || t < t0 || t > t1 {
                at(a, b, hi, t0).max(at(a, b, hi, t1))
            } else {
                lerp(t, a + hi * t, b)
            };
        }
        let res = Interval::new(lo, hi);
        if order > 0 {
            res * 0.25_f64.powi(order as i32)
        } else {
            res
        }
    }

    /// The exact range over `[0, 1]`, from the endpoints and the critical
    /// points.
    pub fn bounds_exact(&self) -> Interval {
        let mut result = Interval::new(self.at0(), self.at1());
        for t in self.derivative().roots() {
            result.expand_to(self.value_at(t));
        }
        result
    }

    /// The roots in `[0, 1]`, sorted ascending.
    ///
    /// A function that is identically zero has no isolated roots and
    /// yields an empty list.
    pub fn roots(&self) -> Vec<f64> {
        if self.terms.len() == 1 {
            let l = self.terms[0];
            let d = l.v0 - l.v1;
            let mut result = Vec::new();
            if d != 0.0 {
                let r = l.v0 / d;
                if (0.0..=1.0).contains(&r) {
                    result.push(r);
                }
            }
            return result;
        }
        sbasis_to_bezier_natural(self).roots()
    }

    /// The roots within the sub-interval `i` of `[0, 1]`, sorted ascending.
    pub fn roots_in(&self, i: Interval) -> Vec<f64> {
        self.portion(i.min(), i.max())
            .roots()
            .into_iter()
            .map(|t| i.value_at(t))
            .collect()
    }
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    (1.0 - t) * a + t * b
}

/// An approximation of `sin(b(t))` with `k + 2` terms.
///
/// The endpoint values are exact; the error shrinks rapidly with `k` for
/// arguments spanning less than a half turn.
pub fn sin_linear(b: Linear, k: usize) -> SBasis {
    let mut s: SmallVec<[Linear; 4]> = SmallVec::from_elem(Linear::ZERO, k + 2);
    s[0] = Linear::new(b.v0.sin(), b.v1.sin());
    let tr = s[0].tri();
    let mut t2 = b.tri();
    s[1] = Linear::new(b.v0.cos() * t2 - tr, -b.v1.cos() * t2 + tr);

    t2 *= t2;
    for i in 0..k {
        let n = (i + 1) as f64;
        let bo = Linear::new(
            4.0 * n * s[i + 1].v0 - 2.0 * s[i + 1].v1,
            -2.0 * s[i + 1].v0 + 4.0 * n * s[i + 1].v1,
        ) - s[i] * (t2 / n);
        s[i + 2] = bo / (i + 2) as f64;
    }
    SBasis { terms: s }
}

/// An approximation of `cos(b(t))` with `k + 2` terms.
pub fn cos_linear(b: Linear, k: usize) -> SBasis {
    sin_linear(b + core::f64::consts::FRAC_PI_2, k)
}

impl From<Linear> for SBasis {
    fn from(l: Linear) -> SBasis {
        SBasis::from_linear(l)
    }
}

impl Index<usize> for SBasis {
    type Output = Linear;

    fn index(&self, i: usize) -> &Linear {
        &self.terms[i]
    }
}

impl Add for SBasis {
    type Output = SBasis;

    fn add(mut self, rhs: SBasis) -> SBasis {
        self += rhs;
        self
    }
}

impl AddAssign for SBasis {
    fn add_assign(&mut self, rhs: SBasis) {
        if rhs.terms.len() > self.terms.len() {
            self.terms.resize(rhs.terms.len(), Linear::ZERO);
        }
        for (a, b) in self.terms.iter_mut().zip(rhs.terms) {
            *a += b;
        }
    }
}

impl Sub for SBasis {
    type Output = SBasis;

    fn sub(mut self, rhs: SBasis) -> SBasis {
        self -= rhs;
        self
    }
}

impl SubAssign for SBasis {
    fn sub_assign(&mut self, rhs: SBasis) {
        if rhs.terms.len() > self.terms.len() {
            self.terms.resize(rhs.terms.len(), Linear::ZERO);
        }
        for (a, b) in self.terms.iter_mut().zip(rhs.terms) {
            *a -= b;
        }
    }
}

impl Add<f64> for SBasis {
    type Output = SBasis;

    fn add(mut self, rhs: f64) -> SBasis {
        self.terms[0] = self.terms[0] + rhs;
        self
    }
}

impl Sub<f64> for SBasis {
    type Output = SBasis;

    fn sub(mut self, rhs: f64) -> SBasis {
        self.terms[0] = self.terms[0] - rhs;
        self
    }
}

impl Mul<f64> for SBasis {
    type Output = SBasis;

    fn mul(mut self, rhs: f64) -> SBasis {
        for l in &mut self.terms {
            *l = *l * rhs;
        }
        self
    }
}

impl Mul for &SBasis {
    type Output = SBasis;

    fn mul(self, rhs: &SBasis) -> SBasis {
        self.multiply(rhs)
    }
}

impl Neg for SBasis {
    type Output = SBasis;

    fn neg(self) -> SBasis {
        self * -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "{a} != {b}");
    }

    fn poly() -> SBasis {
        SBasis::new([Linear::new(1.0, -2.0), Linear::new(3.0, 0.5), Linear::new(-1.0, 2.0)])
    }

    #[test]
    fn evaluation_matches_basis() {
        let f = poly();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let s = t * (1.0 - t);
            let expected = f[0].value_at(t) + s * f[1].value_at(t) + s * s * f[2].value_at(t);
            assert_near(f.value_at(t), expected, 1e-12);
        }
        assert_eq!(f.at0(), 1.0);
        assert_eq!(f.at1(), -2.0);
    }

    #[test]
    fn multiply_is_exact() {
        let f = poly();
        let g = SBasis::new([Linear::new(0.5, 4.0), Linear::new(-2.0, 1.0)]);
        let fg = f.multiply(&g);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert_near(fg.value_at(t), f.value_at(t) * g.value_at(t), 1e-12);
        }
        assert!(f.multiply(&SBasis::zero()).is_zero(0.0));
    }

    #[test]
    fn compose_substitutes() {
        let f = poly();
        let g = SBasis::new([Linear::new(0.2, 0.9), Linear::new(0.3, 0.3)]);
        let fg = f.compose(&g);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert_near(fg.value_at(t), f.value_at(g.value_at(t)), 1e-12);
        }
    }

    #[test]
    fn derivative_and_integral() {
        let f = poly();
        let df = f.derivative();
        let h = 1e-6;
        for i in 1..10 {
            let t = i as f64 / 10.0;
            let numeric = (f.value_at(t + h) - f.value_at(t - h)) / (2.0 * h);
            assert_near(df.value_at(t), numeric, 1e-6);
        }
        let back = f.integral().derivative();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert_near(back.value_at(t), f.value_at(t), 1e-12);
        }
        let derivs = f.value_and_derivatives(0.3, 2);
        assert_eq!(derivs.len(), 3);
        assert_near(derivs[1], df.value_at(0.3), 1e-12);
    }

    #[test]
    fn portion_and_reverse() {
        let f = poly();
        let p = f.portion(0.25, 0.75);
        let r = f.reverse();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert_near(p.value_at(t), f.value_at(0.25 + 0.5 * t), 1e-12);
            assert_near(r.value_at(t), f.value_at(1.0 - t), 1e-12);
        }
    }

    #[test]
    fn bounds_enclose_samples() {
        let f = poly();
        let fast = f.bounds_fast(0);
        let exact = f.bounds_exact();
        let local = f.bounds_local(Interval::new(0.2, 0.6), 0);
        for i in 0..=100 {
            let t = i as f64 / 100.0;
            let v = f.value_at(t);
            assert!(fast.inflate(1e-12).contains(v), "{v} outside {fast}");
            assert!(exact.inflate(1e-9).contains(v), "{v} outside {exact}");
            if (0.2..=0.6).contains(&t) {
                assert!(local.inflate(1e-12).contains(v), "{v} outside {local}");
            }
        }
        assert!(fast.contains_interval(&exact.inflate(-1e-9)));
    }

    #[test]
    fn roots_of_product() {
        let f = SBasis::from_linear(Linear::new(-0.3, 0.7))
            .multiply(&SBasis::from_linear(Linear::new(-0.7, 0.3)));
        let roots = f.roots();
        assert_eq!(roots.len(), 2, "{roots:?}");
        assert_near(roots[0], 0.3, 1e-9);
        assert_near(roots[1], 0.7, 1e-9);
        let local = f.roots_in(Interval::new(0.5, 1.0));
        assert_eq!(local.len(), 1);
        assert_near(local[0], 0.7, 1e-9);
        assert_eq!(SBasis::from_linear(Linear::new(-1.0, 1.0)).roots(), [0.5]);
        assert!(SBasis::zero().roots().is_empty());
    }

    #[test]
    fn truncation_error_bound() {
        let f = poly();
        let t = f.truncate(2);
        assert_eq!(t.len(), 2);
        let err = f.tail_error(2);
        for i in 0..=20 {
            let x = i as f64 / 20.0;
            assert!((f.value_at(x) - t.value_at(x)).abs() <= err + 1e-12);
        }
    }

    #[test]
    fn sin_series_accuracy() {
        let b = Linear::new(0.3, 2.0);
        let s = sin_linear(b, 4);
        let c = cos_linear(b, 4);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert_near(s.value_at(t), b.value_at(t).sin(), 1e-6);
            assert_near(c.value_at(t), b.value_at(t).cos(), 1e-6);
        }
        assert_near(s.at0(), 0.3_f64.sin(), 1e-15);
    }

    #[test]
    fn arithmetic() {
        let f = poly();
        let z = f.clone() - f.clone();
        assert!(z.is_zero(0.0));
        let mut n = z;
        n.normalize();
        assert_eq!(n.len(), 1);
        let g = (f.clone() + 1.0) * 2.0;
        assert_near(g.value_at(0.4), 2.0 * (f.value_at(0.4) + 1.0), 1e-12);
        assert!(SBasis::constant(3.0).is_constant(0.0));
        assert!(!f.is_constant(1e-9));
    }
}
