// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line segments.

use core::ops::Range;

use alloc::vec;
use alloc::vec::Vec;

use crate::{
    Affine, Curve, Dim2, Interval, Nearest, ParamCurve, Point, Rect, SBasis, Vec2, D2,
};

/// A straight segment between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSegment {
    /// The start point.
    pub p0: Point,
    /// The end point.
    pub p1: Point,
}

impl LineSegment {
    /// Create a new line segment.
    #[inline(always)]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> LineSegment {
        LineSegment {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// The midpoint of the segment.
    #[inline]
    pub fn midpoint(&self) -> Point {
        self.p0.midpoint(self.p1)
    }

    /// The control points, for the intersection engine.
    #[inline]
    pub fn points(&self) -> [Point; 2] {
        [self.p0, self.p1]
    }

    /// Is this segment [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite()
    }
}

impl From<(Point, Point)> for LineSegment {
    #[inline(always)]
    fn from((from, to): (Point, Point)) -> Self {
        LineSegment::new(from, to)
    }
}

impl ParamCurve for LineSegment {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn subsegment(&self, range: Range<f64>) -> LineSegment {
        LineSegment {
            p0: self.eval(range.start),
            p1: self.eval(range.end),
        }
    }

    #[inline]
    fn reverse(&self) -> LineSegment {
        LineSegment {
            p0: self.p1,
            p1: self.p0,
        }
    }

    #[inline]
    fn transform(&self, affine: Affine) -> LineSegment {
        LineSegment {
            p0: affine * self.p0,
            p1: affine * self.p1,
        }
    }

    fn to_sbasis(&self) -> D2<SBasis> {
        D2::line(self.p0, self.p1)
    }

    fn derivative(&self) -> Curve {
        let d = (self.p1 - self.p0).to_point();
        Curve::Line(LineSegment::new(d, d))
    }

    #[inline(always)]
    fn degrees_of_freedom(&self) -> usize {
        4
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p1
    }

    fn point_and_derivatives(&self, t: f64, n: usize) -> (Point, Vec<Vec2>) {
        let mut derivs = vec![Vec2::ZERO; n];
        if let Some(first) = derivs.first_mut() {
            *first = self.p1 - self.p0;
        }
        (self.eval(t), derivs)
    }

    fn unit_tangent_at(&self, _t: f64) -> Vec2 {
        let d = self.p1 - self.p0;
        if d.hypot() > 0.0 {
            d.normalize()
        } else {
            Vec2::ZERO
        }
    }

    fn roots(&self, v: f64, dim: Dim2) -> Vec<f64> {
        let (a, b) = (self.p0[dim], self.p1[dim]);
        let mut result = Vec::new();
        if a != b {
            let t = (v - a) / (b - a);
            if (0.0..=1.0).contains(&t) {
                result.push(t);
            }
        }
        result
    }

    #[inline]
    fn bounds_fast(&self) -> Rect {
        Rect::from_points(self.p0, self.p1)
    }

    #[inline]
    fn bounds_exact(&self) -> Rect {
        Rect::from_points(self.p0, self.p1)
    }

    fn bounds_local(&self, i: Interval) -> Rect {
        Rect::from_points(self.eval(i.min()), self.eval(i.max()))
    }

    fn nearest(&self, p: Point, range: Range<f64>) -> Nearest {
        let (lo, hi) = if range.start <= range.end {
            (range.start, range.end)
        } else {
            (range.end, range.start)
        };
        let d = self.p1 - self.p0;
        let v = p - self.p0;
        // Infinite or NaN for a zero length segment; the clamp maps those
        // onto the range.
        let t = d.dot(v) / d.hypot2();
        let t = if t.is_nan() { lo } else { t.max(lo).min(hi) };
        let distance_sq = self.eval(t).distance_squared(p);
        Nearest { distance_sq, t }
    }

    fn all_nearest_times(&self, p: Point, range: Range<f64>) -> Vec<f64> {
        vec![self.nearest(p, range).t]
    }

    #[inline]
    fn length(&self, _accuracy: f64) -> f64 {
        (self.p1 - self.p0).hypot()
    }

    #[inline]
    fn is_degenerate(&self) -> bool {
        self.p0 == self.p1
    }
}
