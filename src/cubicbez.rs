// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use core::ops::Range;

use alloc::vec::Vec;
use arrayvec::ArrayVec;

use crate::bezier_curve::{coord_bezier, hull_bounds};
use crate::common::solve_quadratic;
use crate::sbasis_to_bezier::bezier_points_to_sbasis;
use crate::{Affine, Curve, Dim2, ParamCurve, Point, QuadBez, Rect, SBasis, D2};

const MAX_EXTREMA: usize = 4;

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct CubicBez {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// The control points.
    #[inline]
    pub fn points(&self) -> [Point; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// The quadratic with the same shape, degree-elevated to a cubic.
    pub fn from_quad(q: QuadBez) -> CubicBez {
        CubicBez::new(
            q.p0,
            q.p0 + (2.0 / 3.0) * (q.p1 - q.p0),
            q.p2 + (2.0 / 3.0) * (q.p1 - q.p2),
            q.p2,
        )
    }

    /// Parameters in `(0, 1)` where one coordinate of the tangent vanishes,
    /// ascending.
    pub fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        fn one_coord(result: &mut ArrayVec<f64, MAX_EXTREMA>, d0: f64, d1: f64, d2: f64) {
            let a = d0 - 2.0 * d1 + d2;
            let b = 2.0 * (d1 - d0);
            let c = d0;
            let roots = solve_quadratic(c, b, a);
            for &t in &roots {
                if t > 0.0 && t < 1.0 {
                    result.push(t);
                }
            }
        }
        let mut result = ArrayVec::new();
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let d2 = self.p3 - self.p2;
        one_coord(&mut result, d0.x, d1.x, d2.x);
        one_coord(&mut result, d0.y, d1.y, d2.y);
        result.sort_by(f64::total_cmp);
        result
    }

    /// Is this curve finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.points().iter().all(|p| p.is_finite())
    }
}

impl From<QuadBez> for CubicBez {
    #[inline]
    fn from(q: QuadBez) -> CubicBez {
        CubicBez::from_quad(q)
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    fn subsegment(&self, range: Range<f64>) -> CubicBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p3 = self.eval(t1);
        let d = self.derivative();
        let scale = (t1 - t0) * (1.0 / 3.0);
        let p1 = p0 + scale * d.eval(t0).to_vec2();
        let p2 = p3 - scale * d.eval(t1).to_vec2();
        CubicBez { p0, p1, p2, p3 }
    }

    /// Subdivide using de Casteljau.
    fn subdivide(&self, t: f64) -> (CubicBez, CubicBez) {
        let a = self.p0.lerp(self.p1, t);
        let b = self.p1.lerp(self.p2, t);
        let c = self.p2.lerp(self.p3, t);
        let ab = a.lerp(b, t);
        let bc = b.lerp(c, t);
        let pm = ab.lerp(bc, t);
        (
            CubicBez::new(self.p0, a, ab, pm),
            CubicBez::new(pm, bc, c, self.p3),
        )
    }

    #[inline]
    fn reverse(&self) -> CubicBez {
        CubicBez::new(self.p3, self.p2, self.p1, self.p0)
    }

    #[inline]
    fn transform(&self, affine: Affine) -> CubicBez {
        CubicBez::new(
            affine * self.p0,
            affine * self.p1,
            affine * self.p2,
            affine * self.p3,
        )
    }

    fn to_sbasis(&self) -> D2<SBasis> {
        bezier_points_to_sbasis(&self.points())
    }

    fn derivative(&self) -> Curve {
        Curve::Quad(QuadBez::new(
            (3.0 * (self.p1 - self.p0)).to_point(),
            (3.0 * (self.p2 - self.p1)).to_point(),
            (3.0 * (self.p3 - self.p2)).to_point(),
        ))
    }

    #[inline(always)]
    fn degrees_of_freedom(&self) -> usize {
        8
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p3
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
            .fold(Rect::from_points(self.p0, self.p3), |r, &t| {
                r.union_pt(self.eval(t))
            })
    }

    fn is_degenerate(&self) -> bool {
        self.points().iter().all(|&p| p == self.p0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec2;

    #[test]
    fn cubicbez_deriv() {
        // y = x^2
        let c = CubicBez::new(
            (0.0, 0.0),
            (1.0 / 3.0, 0.0),
            (2.0 / 3.0, 1.0 / 3.0),
            (1.0, 1.0),
        );
        let deriv = c.derivative();

        let n = 10;
        for i in 0..=n {
            let t = (i as f64) * (n as f64).recip();
            let delta = 1e-6;
            let p = c.eval(t);
            let p1 = c.eval(t + delta);
            let d_approx = (p1 - p) * delta.recip();
            let d = deriv.eval(t).to_vec2();
            assert!((d - d_approx).hypot() < delta * 2.0);
        }
    }

    #[test]
    fn cubicbez_arclen() {
        // y = x^2
        let c = CubicBez::new(
            (0.0, 0.0),
            (1.0 / 3.0, 0.0),
            (2.0 / 3.0, 1.0 / 3.0),
            (1.0, 1.0),
        );
        let true_arclen = 0.5 * 5.0f64.sqrt() + 0.25 * (2.0 + 5.0f64.sqrt()).ln();
        for i in 0..12 {
            let accuracy = 0.1f64.powi(i);
            let error = c.length(accuracy) - true_arclen;
            assert!(error.abs() < accuracy);
        }
    }

    #[test]
    fn cubicbez_subsegment() {
        let c = CubicBez::new((3.1, 4.1), (5.9, 2.6), (5.3, 5.8), (9.7, 9.3));
        let t0 = 0.1;
        let t1 = 0.8;
        let cs = c.subsegment(t0..t1);
        let epsilon = 1e-12;
        let n = 10;
        for i in 0..=n {
            let t = (i as f64) * (n as f64).recip();
            let ts = t0 + t * (t1 - t0);
            assert!((c.eval(ts) - cs.eval(t)).hypot() < epsilon);
        }
    }

    #[test]
    fn cubicbez_subdivide_matches_eval() {
        let c = CubicBez::new((0.0, 0.0), (0.3, 1.2), (1.5, -0.4), (2.0, 1.0));
        let (a, b) = c.subdivide(0.4);
        assert_eq!(a.end(), b.start());
        for i in 0..=8 {
            let t = i as f64 / 8.0;
            assert!(a.eval(t).distance(c.eval(0.4 * t)) < 1e-12);
            assert!(b.eval(t).distance(c.eval(0.4 + 0.6 * t)) < 1e-12);
        }
    }

    #[test]
    fn cubicbez_extrema_and_bounds() {
        // x = t, y = 4t(1-t)(1-2t)-ish wiggle
        let c = CubicBez::new((0.0, 0.0), (1.0, 2.0), (2.0, -2.0), (3.0, 0.0));
        let extrema = c.extrema();
        assert_eq!(extrema.len(), 2);
        assert!(extrema[0] < extrema[1]);
        let exact = c.bounds_exact();
        let fast = c.bounds_fast();
        assert!(fast.contains_rect(&exact));
        assert!(exact.y1 < 2.0 && exact.y1 > 0.0);
        for i in 0..=64 {
            let p = c.eval(i as f64 / 64.0);
            assert!(exact.inflate(1e-12, 1e-12).contains(p));
        }
        // The generic computation agrees.
        let generic = c.to_sbasis().bounds_exact();
        assert!((generic.y1 - exact.y1).abs() < 1e-9);
        assert!((generic.y0 - exact.y0).abs() < 1e-9);
    }

    #[test]
    fn cubicbez_roots_and_winding() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 2.0), (2.0, -2.0), (3.0, 0.0));
        let roots = c.roots(0.0, Dim2::Y);
        assert_eq!(roots.len(), 3);
        assert!((roots[1] - 0.5).abs() < 1e-9);
        // Up across the ray at t = 0, down at 0.5, up at 1; the end is
        // ignored since it arrives upwards.
        assert_eq!(c.winding(Point::new(-1.0, 0.0)), Some(0));
        assert_eq!(c.winding(Point::new(2.0, 0.5)), Some(0));
        let t = c.unit_tangent_at(0.0);
        assert!((t - Vec2::new(1.0, 2.0).normalize()).hypot() < 1e-12);
    }

    #[test]
    fn quad_elevation() {
        let q = QuadBez::new((0.0, 0.0), (1.0, 2.0), (2.0, 0.0));
        let c = CubicBez::from(q);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert!(q.eval(t).distance(c.eval(t)) < 1e-12);
        }
        assert!(matches!(c.derivative(), Curve::Quad(_)));
    }
}
