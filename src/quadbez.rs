// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadratic Bézier segments.

use core::ops::Range;

use alloc::vec::Vec;
use arrayvec::ArrayVec;

use crate::bezier_curve::{coord_bezier, hull_bounds};
use crate::sbasis_to_bezier::bezier_points_to_sbasis;
use crate::{Affine, Curve, Dim2, LineSegment, ParamCurve, Point, Rect, SBasis, D2};

/// A single quadratic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct QuadBez {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
}

impl QuadBez {
    /// Create a new quadratic Bézier segment.
    #[inline]
    pub fn new<V: Into<Point>>(p0: V, p1: V, p2: V) -> QuadBez {
        QuadBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
        }
    }

    /// The control points.
    #[inline]
    pub fn points(&self) -> [Point; 3] {
        [self.p0, self.p1, self.p2]
    }

    /// Parameters in `(0, 1)` where one coordinate of the tangent vanishes,
    /// ascending.
    pub fn extrema(&self) -> ArrayVec<f64, 2> {
        let mut result = ArrayVec::new();
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let dd = d1 - d0;
        if dd.x != 0.0 {
            let t = -d0.x / dd.x;
            if t > 0.0 && t < 1.0 {
                result.push(t);
            }
        }
        if dd.y != 0.0 {
            let t = -d0.y / dd.y;
            if t > 0.0 && t < 1.0 {
                result.push(t);
                if result.len() == 2 && result[0] > t {
                    result.swap(0, 1);
                }
            }
        }
        result
    }

    /// Is this curve finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite()
    }
}

impl ParamCurve for QuadBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        (self.p0.to_vec2() * (mt * mt)
            + (self.p1.to_vec2() * (mt * 2.0) + self.p2.to_vec2() * t) * t)
            .to_point()
    }

    fn subsegment(&self, range: Range<f64>) -> QuadBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p2 = self.eval(t1);
        let p1 = p0 + (self.p1 - self.p0).lerp(self.p2 - self.p1, t0) * (t1 - t0);
        QuadBez { p0, p1, p2 }
    }

    /// Subdivide using de Casteljau.
    fn subdivide(&self, t: f64) -> (QuadBez, QuadBez) {
        let a = self.p0.lerp(self.p1, t);
        let b = self.p1.lerp(self.p2, t);
        let pm = a.lerp(b, t);
        (QuadBez::new(self.p0, a, pm), QuadBez::new(pm, b, self.p2))
    }

    #[inline]
    fn reverse(&self) -> QuadBez {
        QuadBez::new(self.p2, self.p1, self.p0)
    }

    #[inline]
    fn transform(&self, affine: Affine) -> QuadBez {
        QuadBez::new(affine * self.p0, affine * self.p1, affine * self.p2)
    }

    fn to_sbasis(&self) -> D2<SBasis> {
        bezier_points_to_sbasis(&self.points())
    }

    fn derivative(&self) -> Curve {
        Curve::Line(LineSegment::new(
            (2.0 * (self.p1 - self.p0)).to_point(),
            (2.0 * (self.p2 - self.p1)).to_point(),
        ))
    }

    #[inline(always)]
    fn degrees_of_freedom(&self) -> usize {
        6
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p2
    }

    fn roots(&self, v: f64, dim: Dim2) -> Vec<f64> {
        coord_bezier(&self.points(), dim, v).roots()
    }

    fn bounds_fast(&self) -> Rect {
        hull_bounds(&self.points())
    }

    fn bounds_exact(&self) -> Rect {
        self.extrema()
            .iter()
            .fold(Rect::from_points(self.p0, self.p2), |r, &t| {
                r.union_pt(self.eval(t))
            })
    }

    fn is_degenerate(&self) -> bool {
        self.p0 == self.p1 && self.p1 == self.p2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Interval, Vec2};

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{p0:?} != {p1:?}");
    }

    #[test]
    fn quadbez_deriv() {
        let q = QuadBez::new((0.0, 0.0), (0.0, 0.5), (1.0, 1.0));
        let deriv = q.derivative();

        let n = 10;
        for i in 0..=n {
            let t = (i as f64) * (n as f64).recip();
            let delta = 1e-6;
            let p = q.eval(t);
            let p1 = q.eval(t + delta);
            let d_approx = (p1 - p) * delta.recip();
            let d = deriv.eval(t).to_vec2();
            assert!((d - d_approx).hypot() < delta * 2.0);
        }
    }

    #[test]
    fn quadbez_arclen() {
        let q = QuadBez::new((0.0, 0.0), (0.0, 0.5), (1.0, 1.0));
        let true_arclen = 0.5 * 5.0f64.sqrt() + 0.25 * (2.0 + 5.0f64.sqrt()).ln();
        for i in 0..12 {
            let accuracy = 0.1f64.powi(i);
            let est = q.length(accuracy);
            let error = est - true_arclen;
            assert!(error.abs() < accuracy, "{est} != {true_arclen}");
        }
    }

    #[test]
    fn quadbez_subsegment() {
        let q = QuadBez::new((3.1, 4.1), (5.9, 2.6), (5.3, 5.8));
        let t0 = 0.1;
        let t1 = 0.8;
        let qs = q.subsegment(t0..t1);
        let epsilon = 1e-12;
        let n = 10;
        for i in 0..=n {
            let t = (i as f64) * (n as f64).recip();
            let ts = t0 + t * (t1 - t0);
            assert_near(q.eval(ts), qs.eval(t), epsilon);
        }
        let (a, b) = q.subdivide(0.3);
        assert_near(a.eval(0.5), q.eval(0.15), epsilon);
        assert_near(b.eval(0.5), q.eval(0.65), epsilon);
    }

    #[test]
    fn quadbez_extrema_and_bounds() {
        // y = 2t(1 - t) peaks at t = 0.5
        let q = QuadBez::new((0.0, 0.0), (1.0, 1.0), (2.0, 0.0));
        assert_eq!(q.extrema().as_slice(), &[0.5]);
        let b = q.bounds_exact();
        assert!((b.y1 - 0.5).abs() < 1e-12);
        assert_eq!(b.x0, 0.0);
        assert_eq!(b.x1, 2.0);
        assert_eq!(q.bounds_fast().y1, 1.0);
        let local = q.bounds_local(Interval::new(0.0, 0.25));
        assert!(local.contains(q.eval(0.1)));
    }

    #[test]
    fn quadbez_roots_and_tangent() {
        let q = QuadBez::new((0.0, 0.0), (1.0, 1.0), (2.0, 0.0));
        let roots = q.roots(0.375, Dim2::Y);
        assert_eq!(roots.len(), 2);
        assert!((roots[0] - 0.25).abs() < 1e-9);
        assert!((roots[1] - 0.75).abs() < 1e-9);
        let tangent = q.unit_tangent_at(0.5);
        assert!((tangent - Vec2::new(1.0, 0.0)).hypot() < 1e-12);
    }

    #[test]
    fn quadbez_nearest() {
        let q = QuadBez::new((-1.0, 1.0), (0.0, -1.0), (1.0, 1.0));
        let nearest = q.nearest(Point::new(0.0, 0.0), 0.0..1.0);
        assert!((nearest.t - 0.5).abs() < 1e-9);
        assert!((nearest.distance_sq.sqrt() - 0.0).abs() < 1e-9);
        let far = q.nearest(Point::new(2.0, 2.0), 0.0..1.0);
        assert_eq!(far.t, 1.0);
    }
}
