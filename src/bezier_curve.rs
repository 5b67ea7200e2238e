// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bezier curves of arbitrary order, and helpers shared by the fixed-order
//! types.

use core::ops::Range;

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::sbasis_to_bezier::bezier_points_to_sbasis;
use crate::{
    Affine, Bezier, CubicBez, Curve, Dim2, GeomError, GeomResult, LineSegment, ParamCurve, Point,
    QuadBez, Rect, SBasis, D2,
};

/// Control points of a Bezier curve, one more than its order.
pub(crate) type ControlPoints = SmallVec<[Point; 8]>;

/// A Bezier curve whose order is chosen at construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BezierCurve {
    points: ControlPoints,
}

impl BezierCurve {
    /// Create a curve from its control points.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::Logic`] for fewer than two points.
    pub fn new(points: impl IntoIterator<Item = Point>) -> GeomResult<BezierCurve> {
        let points: ControlPoints = points.into_iter().collect();
        if points.len() < 2 {
            return Err(GeomError::Logic("a Bezier curve needs at least two points"));
        }
        Ok(BezierCurve { points })
    }

    /// The order, one less than the number of control points.
    #[inline]
    pub fn order(&self) -> usize {
        self.points.len() - 1
    }

    /// The control points.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// One coordinate as a scalar Bezier.
    pub fn component(&self, dim: Dim2) -> Bezier {
        coord_bezier(&self.points, dim, 0.0)
    }

    fn from_points(points: ControlPoints) -> BezierCurve {
        BezierCurve { points }
    }
}

impl From<LineSegment> for BezierCurve {
    fn from(l: LineSegment) -> BezierCurve {
        BezierCurve::from_points(l.points().into_iter().collect())
    }
}

impl From<QuadBez> for BezierCurve {
    fn from(q: QuadBez) -> BezierCurve {
        BezierCurve::from_points(q.points().into_iter().collect())
    }
}

impl From<CubicBez> for BezierCurve {
    fn from(c: CubicBez) -> BezierCurve {
        BezierCurve::from_points(c.points().into_iter().collect())
    }
}

impl TryFrom<&BezierCurve> for LineSegment {
    type Error = GeomError;

    fn try_from(b: &BezierCurve) -> GeomResult<LineSegment> {
        match b.points[..] {
            [p0, p1] => Ok(LineSegment::new(p0, p1)),
            _ => Err(GeomError::Logic("Bezier order mismatch: expected 1")),
        }
    }
}

impl TryFrom<&BezierCurve> for QuadBez {
    type Error = GeomError;

    fn try_from(b: &BezierCurve) -> GeomResult<QuadBez> {
        match b.points[..] {
            [p0, p1, p2] => Ok(QuadBez::new(p0, p1, p2)),
            _ => Err(GeomError::Logic("Bezier order mismatch: expected 2")),
        }
    }
}

impl TryFrom<&BezierCurve> for CubicBez {
    type Error = GeomError;

    fn try_from(b: &BezierCurve) -> GeomResult<CubicBez> {
        match b.points[..] {
            [p0, p1, p2, p3] => Ok(CubicBez::new(p0, p1, p2, p3)),
            _ => Err(GeomError::Logic("Bezier order mismatch: expected 3")),
        }
    }
}

impl ParamCurve for BezierCurve {
    fn eval(&self, t: f64) -> Point {
        eval_points(&self.points, t)
    }

    fn subsegment(&self, range: Range<f64>) -> BezierCurve {
        BezierCurve::from_points(portion_points(&self.points, range.start, range.end))
    }

    fn reverse(&self) -> BezierCurve {
        BezierCurve::from_points(self.points.iter().rev().copied().collect())
    }

    fn transform(&self, affine: Affine) -> BezierCurve {
        BezierCurve::from_points(self.points.iter().map(|&p| affine * p).collect())
    }

    fn to_sbasis(&self) -> D2<SBasis> {
        bezier_points_to_sbasis(&self.points)
    }

    fn derivative(&self) -> Curve {
        let n = self.order() as f64;
        let mut points: ControlPoints = self
            .points
            .windows(2)
            .map(|w| ((w[1] - w[0]) * n).to_point())
            .collect();
        if points.len() == 1 {
            points.push(points[0]);
        }
        Curve::Bezier(BezierCurve::from_points(points))
    }

    fn degrees_of_freedom(&self) -> usize {
        2 * self.points.len()
    }

    fn start(&self) -> Point {
        self.points[0]
    }

    fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    fn roots(&self, v: f64, dim: Dim2) -> Vec<f64> {
        coord_bezier(&self.points, dim, v).roots()
    }

    fn bounds_fast(&self) -> Rect {
        hull_bounds(&self.points)
    }

    fn bounds_exact(&self) -> Rect {
        exact_bounds(&self.points)
    }

    fn is_degenerate(&self) -> bool {
        self.points.iter().all(|&p| p == self.points[0])
    }
}

/// One coordinate of a control polygon, shifted by `-offset`.
pub(crate) fn coord_bezier(points: &[Point], dim: Dim2, offset: f64) -> Bezier {
    Bezier::from_coeffs(points.iter().map(|p| p[dim] - offset).collect())
}

/// Evaluate by de Casteljau's algorithm.
pub(crate) fn eval_points(points: &[Point], t: f64) -> Point {
    let mut row: ControlPoints = points.iter().copied().collect();
    let n = row.len();
    for i in 1..n {
        for j in 0..n - i {
            row[j] = row[j].lerp(row[j + 1], t);
        }
    }
    row[0]
}

/// Split a control polygon at `t`.
pub(crate) fn split_points(points: &[Point], t: f64) -> (ControlPoints, ControlPoints) {
    let n = points.len();
    let mut row: ControlPoints = points.iter().copied().collect();
    let mut left = ControlPoints::with_capacity(n);
    let mut right: ControlPoints = SmallVec::from_elem(Point::ZERO, n);
    left.push(row[0]);
    right[n - 1] = row[n - 1];
    for i in 1..n {
        for j in 0..n - i {
            row[j] = row[j].lerp(row[j + 1], t);
        }
        left.push(row[0]);
        right[n - 1 - i] = row[n - 1 - i];
    }
    (left, right)
}

/// The control polygon of the part of the curve over `[from, to]`.
pub(crate) fn portion_points(points: &[Point], from: f64, to: f64) -> ControlPoints {
    if from == 0.0 && to == 1.0 {
        return points.iter().copied().collect();
    }
    if from > to {
        let mut p = portion_points(points, to, from);
        p.reverse();
        return p;
    }
    let (left, _) = split_points(points, to);
    if to == 0.0 {
        return left;
    }
    split_points(&left, from / to).1
}

/// The bounding box of the control polygon.
pub(crate) fn hull_bounds(points: &[Point]) -> Rect {
    Rect::from_point_iter(points.iter().copied()).unwrap_or_default()
}

/// The tight bounding box of a Bezier curve.
pub(crate) fn exact_bounds(points: &[Point]) -> Rect {
    Rect::from_intervals(
        coord_bezier(points, Dim2::X, 0.0).bounds_exact(),
        coord_bezier(points, Dim2::Y, 0.0).bounds_exact(),
    )
}
