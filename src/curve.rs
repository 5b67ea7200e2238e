// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of curve types a path is built from.

use core::ops::Range;

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::intersection::{
    curve_intersections, curve_self_intersections, CurveIntersection, IntersectionOptions,
};
use crate::sbasis_to_bezier::{d2_natural_order, sbasis_to_bezier_points};
use crate::{
    Affine, BezierCurve, CubicBez, Dim2, EllipticalArc, GeomResult, Interval, LineSegment,
    Nearest, ParamCurve, Point, QuadBez, Rect, SBasis, SBasisCurve, Vec2, D2,
};

/// A curve of any supported type.
///
/// Paths own a sequence of these. Every query of [`ParamCurve`] dispatches
/// to the variant, so closed-form implementations are used where a type has
/// them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    /// A straight segment.
    Line(LineSegment),
    /// A quadratic Bézier.
    Quad(QuadBez),
    /// A cubic Bézier.
    Cubic(CubicBez),
    /// A Bézier of any order.
    Bezier(BezierCurve),
    /// An elliptical arc.
    Arc(EllipticalArc),
    /// A curve given by its polynomial form.
    SBasis(SBasisCurve),
}

macro_rules! dispatch {
    ($curve:expr, $c:ident => $body:expr) => {
        match $curve {
            Curve::Line($c) => $body,
            Curve::Quad($c) => $body,
            Curve::Cubic($c) => $body,
            Curve::Bezier($c) => $body,
            Curve::Arc($c) => $body,
            Curve::SBasis($c) => $body,
        }
    };
}

macro_rules! map_variant {
    ($curve:expr, $c:ident => $body:expr) => {
        match $curve {
            Curve::Line($c) => Curve::Line($body),
            Curve::Quad($c) => Curve::Quad($body),
            Curve::Cubic($c) => Curve::Cubic($body),
            Curve::Bezier($c) => Curve::Bezier($body),
            Curve::Arc($c) => Curve::Arc($body),
            Curve::SBasis($c) => Curve::SBasis($body),
        }
    };
}

impl Curve {
    /// Whether this is a straight segment.
    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self, Curve::Line(_))
    }

    /// The control polygon of this curve as a Bézier.
    ///
    /// Exact for the Bézier types. Arcs and polynomial curves go through
    /// their [`SBasis`] form at its natural order.
    pub fn bezier_points(&self) -> SmallVec<[Point; 8]> {
        match self {
            Curve::Line(l) => l.points().into_iter().collect(),
            Curve::Quad(q) => q.points().into_iter().collect(),
            Curve::Cubic(c) => c.points().into_iter().collect(),
            Curve::Bezier(b) => b.points().iter().copied().collect(),
            Curve::Arc(_) | Curve::SBasis(_) => {
                let sb = self.to_sbasis();
                sbasis_to_bezier_points(&sb, d2_natural_order(&sb))
            }
        }
    }

    /// The intersections of two curves, sorted by time on `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sbgeom::{Curve, IntersectionOptions, LineSegment};
    ///
    /// let a = Curve::from(LineSegment::new((0.0, 0.0), (2.0, 2.0)));
    /// let b = Curve::from(LineSegment::new((0.0, 2.0), (2.0, 0.0)));
    /// let xs = a.intersect(&b, &IntersectionOptions::default());
    /// assert_eq!(xs.len(), 1);
    /// assert!((xs[0].ta - 0.5).abs() < 1e-9);
    /// ```
    pub fn intersect(&self, other: &Curve, options: &IntersectionOptions) -> Vec<CurveIntersection> {
        curve_intersections(self, other, options)
    }

    /// The points where the curve crosses itself.
    ///
    /// Each result has `ta < tb`.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::NotImplemented`](crate::GeomError::NotImplemented)
    /// for a line segment.
    pub fn self_intersections(
        &self,
        options: &IntersectionOptions,
    ) -> GeomResult<Vec<CurveIntersection>> {
        curve_self_intersections(self, options)
    }
}

impl ParamCurve for Curve {
    fn eval(&self, t: f64) -> Point {
        dispatch!(self, c => c.eval(t))
    }

    fn subsegment(&self, range: Range<f64>) -> Curve {
        map_variant!(self, c => c.subsegment(range))
    }

    fn reverse(&self) -> Curve {
        map_variant!(self, c => c.reverse())
    }

    fn transform(&self, affine: Affine) -> Curve {
        map_variant!(self, c => c.transform(affine))
    }

    fn to_sbasis(&self) -> D2<SBasis> {
        dispatch!(self, c => c.to_sbasis())
    }

    fn derivative(&self) -> Curve {
        dispatch!(self, c => c.derivative())
    }

    fn degrees_of_freedom(&self) -> usize {
        dispatch!(self, c => c.degrees_of_freedom())
    }

    fn start(&self) -> Point {
        dispatch!(self, c => c.start())
    }

    fn end(&self) -> Point {
        dispatch!(self, c => c.end())
    }

    fn subdivide(&self, t: f64) -> (Curve, Curve) {
        match self {
            Curve::Line(c) => {
                let (a, b) = c.subdivide(t);
                (Curve::Line(a), Curve::Line(b))
            }
            Curve::Quad(c) => {
                let (a, b) = c.subdivide(t);
                (Curve::Quad(a), Curve::Quad(b))
            }
            Curve::Cubic(c) => {
                let (a, b) = c.subdivide(t);
                (Curve::Cubic(a), Curve::Cubic(b))
            }
            _ => (self.subsegment(0.0..t), self.subsegment(t..1.0)),
        }
    }

    fn value_at(&self, t: f64, dim: Dim2) -> f64 {
        dispatch!(self, c => c.value_at(t, dim))
    }

    fn point_and_derivatives(&self, t: f64, n: usize) -> (Point, Vec<Vec2>) {
        dispatch!(self, c => c.point_and_derivatives(t, n))
    }

    fn unit_tangent_at(&self, t: f64) -> Vec2 {
        dispatch!(self, c => c.unit_tangent_at(t))
    }

    fn roots(&self, v: f64, dim: Dim2) -> Vec<f64> {
        dispatch!(self, c => c.roots(v, dim))
    }

    fn bounds_fast(&self) -> Rect {
        dispatch!(self, c => c.bounds_fast())
    }

    fn bounds_exact(&self) -> Rect {
        dispatch!(self, c => c.bounds_exact())
    }

    fn bounds_local(&self, i: Interval) -> Rect {
        dispatch!(self, c => c.bounds_local(i))
    }

    fn nearest(&self, p: Point, range: Range<f64>) -> Nearest {
        dispatch!(self, c => c.nearest(p, range))
    }

    fn all_nearest_times(&self, p: Point, range: Range<f64>) -> Vec<f64> {
        dispatch!(self, c => c.all_nearest_times(p, range))
    }

    fn winding(&self, p: Point) -> Option<i32> {
        dispatch!(self, c => c.winding(p))
    }

    fn length(&self, accuracy: f64) -> f64 {
        dispatch!(self, c => c.length(accuracy))
    }

    fn is_degenerate(&self) -> bool {
        dispatch!(self, c => c.is_degenerate())
    }
}

impl From<LineSegment> for Curve {
    #[inline]
    fn from(l: LineSegment) -> Curve {
        Curve::Line(l)
    }
}

impl From<QuadBez> for Curve {
    #[inline]
    fn from(q: QuadBez) -> Curve {
        Curve::Quad(q)
    }
}

impl From<CubicBez> for Curve {
    #[inline]
    fn from(c: CubicBez) -> Curve {
        Curve::Cubic(c)
    }
}

impl From<BezierCurve> for Curve {
    #[inline]
    fn from(b: BezierCurve) -> Curve {
        Curve::Bezier(b)
    }
}

impl From<EllipticalArc> for Curve {
    #[inline]
    fn from(a: EllipticalArc) -> Curve {
        Curve::Arc(a)
    }
}

impl From<SBasisCurve> for Curve {
    #[inline]
    fn from(s: SBasisCurve) -> Curve {
        Curve::SBasis(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;

    fn samples() -> Vec<Curve> {
        alloc::vec![
            LineSegment::new((0.0, 0.0), (3.0, 1.0)).into(),
            QuadBez::new((0.0, 0.0), (1.0, 2.0), (3.0, 1.0)).into(),
            CubicBez::new((0.0, 0.0), (1.0, 2.0), (2.0, -1.0), (3.0, 1.0)).into(),
            BezierCurve::new([
                Point::new(0.0, 0.0),
                Point::new(1.0, 2.0),
                Point::new(2.0, -1.0),
                Point::new(2.5, 3.0),
                Point::new(3.0, 1.0),
            ])
            .unwrap()
            .into(),
            EllipticalArc::new((1.0, 0.0), (2.0, 1.0), 0.2, 0.1, 0.8 * PI).into(),
            SBasisCurve::new(CubicBez::new((0.0, 0.0), (1.0, 2.0), (2.0, -1.0), (3.0, 1.0)).to_sbasis())
                .into(),
        ]
    }

    #[test]
    fn subdivide_joins() {
        for c in samples() {
            let (a, b) = c.subdivide(0.3);
            assert!(a.end().distance(b.start()) < 1e-12);
            assert!(a.end().distance(c.eval(0.3)) < 1e-12);
            assert!(a.start().distance(c.start()) < 1e-12);
            assert!(b.end().distance(c.end()) < 1e-12);
            for i in 0..=4 {
                let t = i as f64 / 4.0;
                assert!(a.eval(t).distance(c.eval(0.3 * t)) < 1e-9);
                assert!(b.eval(t).distance(c.eval(0.3 + 0.7 * t)) < 1e-9);
            }
        }
    }

    #[test]
    fn reverse_and_transform() {
        let affine = Affine::rotate(0.4) * Affine::scale_non_uniform(2.0, 0.5);
        for c in samples() {
            let r = c.reverse();
            let tc = c.transform(affine);
            for i in 0..=4 {
                let t = i as f64 / 4.0;
                assert!(r.eval(t).distance(c.eval(1.0 - t)) < 1e-9);
                assert!(tc.eval(t).distance(affine * c.eval(t)) < 1e-9);
            }
        }
    }

    #[test]
    fn sbasis_matches_eval() {
        for c in samples() {
            let sb = c.to_sbasis();
            for i in 0..=8 {
                let t = i as f64 / 8.0;
                assert!(sb.value_at(t).distance(c.eval(t)) < 1e-6);
            }
        }
    }

    #[test]
    fn derivative_matches_difference() {
        let h = 1e-6;
        for c in samples() {
            let d = c.derivative();
            for i in 1..8 {
                let t = i as f64 / 8.0;
                let numeric = (c.eval(t + h) - c.eval(t - h)) / (2.0 * h);
                assert!((d.eval(t).to_vec2() - numeric).hypot() < 1e-4);
            }
        }
    }

    #[test]
    fn bezier_points_reproduce_curve() {
        for c in samples() {
            let points = c.bezier_points();
            let b = BezierCurve::new(points).unwrap();
            for i in 0..=8 {
                let t = i as f64 / 8.0;
                assert!(b.eval(t).distance(c.eval(t)) < 1e-6);
            }
        }
    }

    #[test]
    fn bounds_contain_samples() {
        for c in samples() {
            let exact = c.bounds_exact().inflate(1e-9, 1e-9);
            let fast = c.bounds_fast().inflate(1e-9, 1e-9);
            for i in 0..=32 {
                let p = c.eval(i as f64 / 32.0);
                assert!(exact.contains(p));
                assert!(fast.contains(p));
            }
        }
    }

    #[test]
    fn line_self_intersection_not_implemented() {
        let c: Curve = LineSegment::new((0.0, 0.0), (1.0, 1.0)).into();
        assert!(matches!(
            c.self_intersections(&IntersectionOptions::default()),
            Err(crate::GeomError::NotImplemented(_))
        ));
    }
}
