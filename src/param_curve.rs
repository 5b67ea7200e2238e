// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The query contract shared by every curve type.

use core::ops::Range;

use alloc::vec::Vec;

use crate::common::{
    integrate_gauss_with, EPSILON, GAUSS_LEGENDRE_COEFFS_16, GAUSS_LEGENDRE_COEFFS_8,
};
use crate::{Affine, Curve, Dim2, Interval, Point, Rect, SBasis, Vec2, D2};

/// Default accuracy for arc length and other adaptive computations.
pub const DEFAULT_ACCURACY: f64 = 1e-6;

/// Maximum subdivision depth of the adaptive arc length quadrature.
const ARCLEN_MAX_DEPTH: usize = 16;

/// The nearest position on a curve to some point.
///
/// This is returned by [`ParamCurve::nearest`].
#[derive(Debug, Clone, Copy)]
pub struct Nearest {
    /// The square of the distance from the nearest position on the curve
    /// to the given point.
    pub distance_sq: f64,
    /// The position on the curve of the nearest point, as a parameter.
    pub t: f64,
}

/// A curve parametrized by a scalar `t` in `[0, 1]`.
///
/// Every curve type implements this trait, and [`Curve`] implements it by
/// delegating to the variant it holds. The provided methods work through
/// the polynomial form returned by [`ParamCurve::to_sbasis`]; curve types
/// with a closed form override them.
pub trait ParamCurve: Sized {
    /// Evaluate the curve at parameter `t`.
    fn eval(&self, t: f64) -> Point;

    /// Get a subsegment of the curve for the given parameter range.
    ///
    /// A range running backwards yields a reversed subsegment.
    fn subsegment(&self, range: Range<f64>) -> Self;

    /// The curve traversed from end to start.
    #[must_use]
    fn reverse(&self) -> Self;

    /// The image of the curve under an affine transform.
    #[must_use]
    fn transform(&self, affine: Affine) -> Self;

    /// The curve as a pair of polynomials in the symmetric power basis.
    ///
    /// Exact for polynomial curves; an approximation with exact endpoints
    /// otherwise.
    fn to_sbasis(&self) -> D2<SBasis>;

    /// The derivative, as a curve of velocity vectors.
    fn derivative(&self) -> Curve;

    /// The number of scalar parameters that define the curve.
    fn degrees_of_freedom(&self) -> usize;

    /// The start point.
    fn start(&self) -> Point {
        self.eval(0.0)
    }

    /// The end point.
    fn end(&self) -> Point {
        self.eval(1.0)
    }

    /// Split at `t` into two curves meeting at `eval(t)`.
    fn subdivide(&self, t: f64) -> (Self, Self) {
        (self.subsegment(0.0..t), self.subsegment(t..1.0))
    }

    /// One coordinate of the point at `t`.
    fn value_at(&self, t: f64, dim: Dim2) -> f64 {
        self.eval(t)[dim]
    }

    /// The point at `t` and the first `n` derivative vectors.
    fn point_and_derivatives(&self, t: f64, n: usize) -> (Point, Vec<Vec2>) {
        self.to_sbasis().point_and_derivatives(t, n)
    }

    /// The unit tangent at `t`.
    ///
    /// Where the first derivative vanishes the first non-vanishing higher
    /// derivative gives the direction; a constant curve yields zero.
    fn unit_tangent_at(&self, t: f64) -> Vec2 {
        let (_, derivs) = self.point_and_derivatives(t, 3);
        derivs
            .into_iter()
            .find(|d| d.hypot() > EPSILON)
            .map(Vec2::normalize)
            .unwrap_or(Vec2::ZERO)
    }

    /// The parameters at which coordinate `dim` equals `v`, ascending.
    fn roots(&self, v: f64, dim: Dim2) -> Vec<f64> {
        (self.to_sbasis()[dim].clone() - v).roots()
    }

    /// A bounding box that may be loose but is cheap to compute.
    fn bounds_fast(&self) -> Rect {
        self.to_sbasis().bounds_fast()
    }

    /// The tight bounding box.
    fn bounds_exact(&self) -> Rect {
        self.to_sbasis().bounds_exact()
    }

    /// A bounding box of the part of the curve over `i`.
    fn bounds_local(&self, i: Interval) -> Rect {
        self.to_sbasis().bounds_local(i)
    }

    /// The nearest position to `p` with `t` in `range`.
    fn nearest(&self, p: Point, range: Range<f64>) -> Nearest {
        nearest_by_sbasis(&self.to_sbasis(), p, range)
    }

    /// Every parameter in `range` at which the distance to `p` is minimal.
    fn all_nearest_times(&self, p: Point, range: Range<f64>) -> Vec<f64> {
        all_nearest_by_sbasis(&self.to_sbasis(), p, range)
    }

    /// The winding contribution of this curve around `p`.
    ///
    /// Counts the signed crossings of the horizontal ray from `p` towards
    /// `+x`: upwards crossings count `+1`, downwards `-1`. An endpoint on
    /// the ray counts only where the curve leaves upwards from its start or
    /// arrives downwards at its end, so a vertex shared by two curves is
    /// counted once. Returns `None` when the curve runs along the ray's
    /// line, where no contribution can be determined.
    fn winding(&self, p: Point) -> Option<i32> {
        let sb = self.to_sbasis();
        if (sb.y.clone() - p.y).is_zero(0.0) {
            return None;
        }
        Some(winding_by_roots(self, p))
    }

    /// The arc length, accurate to within `accuracy`.
    fn length(&self, accuracy: f64) -> f64 {
        let d = self.to_sbasis().derivative();
        arclen_by_quadrature(|t| d.value_at(t).to_vec2().hypot(), accuracy)
    }

    /// Whether the curve collapses to a single point.
    fn is_degenerate(&self) -> bool {
        self.to_sbasis().is_constant(0.0)
    }
}

/// Sum the signed crossings of the ray from `p` towards `+x`, found by
/// solving for `y = p.y`.
pub(crate) fn winding_by_roots<C: ParamCurve>(c: &C, p: Point) -> i32 {
    let ts = c.roots(p.y, Dim2::Y);
    if ts.is_empty() {
        return 0;
    }
    let ignore_0 = c.unit_tangent_at(0.0).y <= 0.0;
    let ignore_1 = c.unit_tangent_at(1.0).y >= 0.0;
    let mut wind = 0;
    for t in ts {
        if (t == 0.0 && ignore_0) || (t == 1.0 && ignore_1) {
            continue;
        }
        if c.value_at(t, Dim2::X) > p.x {
            let tangent = c.unit_tangent_at(t);
            if tangent.y > 0.0 {
                wind += 1;
            } else if tangent.y < 0.0 {
                wind -= 1;
            }
        }
    }
    wind
}

/// Integrate a speed function over `[0, 1]`, subdividing until 8 and 16
/// point Gauss-Legendre estimates agree.
pub(crate) fn arclen_by_quadrature(speed: impl Fn(f64) -> f64, accuracy: f64) -> f64 {
    arclen_rec(&speed, 0.0, 1.0, accuracy, 0)
}

fn arclen_rec(speed: &impl Fn(f64) -> f64, a: f64, b: f64, accuracy: f64, depth: usize) -> f64 {
    let coarse = integrate_gauss_with(GAUSS_LEGENDRE_COEFFS_8, a, b, speed);
    let fine = integrate_gauss_with(GAUSS_LEGENDRE_COEFFS_16, a, b, speed);
    if (fine - coarse).abs() <= accuracy || depth >= ARCLEN_MAX_DEPTH {
        return fine;
    }
    let mid = 0.5 * (a + b);
    arclen_rec(speed, a, mid, 0.5 * accuracy, depth + 1)
        + arclen_rec(speed, mid, b, 0.5 * accuracy, depth + 1)
}

/// Candidates for the nearest parameter: interior stationary points of the
/// squared distance plus the ends of the range.
fn nearest_candidates(c: &D2<SBasis>, p: Point, range: &Range<f64>) -> Vec<(f64, f64)> {
    let (from, to) = (range.start, range.end);
    let diff = c.offset_by(p);
    let dd = diff.dot(&c.derivative());
    let mut ts = dd.roots_in(Interval::new(from, to));
    ts.push(from);
    ts.push(to);
    ts.into_iter()
        .map(|t| (t, c.value_at(t).distance_squared(p)))
        .collect()
}

pub(crate) fn nearest_by_sbasis(c: &D2<SBasis>, p: Point, range: Range<f64>) -> Nearest {
    let mut best = Nearest {
        distance_sq: f64::INFINITY,
        t: range.start,
    };
    for (t, distance_sq) in nearest_candidates(c, p, &range) {
        if distance_sq < best.distance_sq {
            best = Nearest { distance_sq, t };
        }
    }
    best
}

pub(crate) fn all_nearest_by_sbasis(c: &D2<SBasis>, p: Point, range: Range<f64>) -> Vec<f64> {
    let candidates = nearest_candidates(c, p, &range);
    let min = candidates
        .iter()
        .map(|&(_, d)| d)
        .fold(f64::INFINITY, f64::min);
    let mut result: Vec<f64> = candidates
        .into_iter()
        .filter(|&(_, d)| d <= min)
        .map(|(t, _)| t)
        .collect();
    result.sort_by(f64::total_cmp);
    result.dedup();
    result
}
