// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elliptical arcs.

use core::f64::consts::{FRAC_PI_2, PI, TAU};
use core::ops::Range;

use alloc::vec::Vec;
use arrayvec::ArrayVec;

use crate::param_curve::{arclen_by_quadrature, winding_by_roots};
use crate::sbasis::{cos_linear, sin_linear};
use crate::{
    Affine, Curve, Dim2, GeomError, GeomResult, Interval, Linear, LineSegment, ParamCurve, Point,
    Rect, SBasis, Vec2, D2,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Angular distance below which an angle is taken to coincide with the
/// start of the arc.
const ANGLE_EPSILON: f64 = 1e-12;

/// Roots closer than this to an end of the arc are snapped onto it.
const ROOT_SNAP: f64 = 1e-9;

/// An arc of an ellipse, in centre parameterization.
///
/// The point at angle `θ` is `center + R(x_rotation) (rx cos θ, ry sin θ)`,
/// and the arc runs from `start_angle` through `start_angle + sweep_angle`.
/// A positive sweep runs anti-clockwise in a y-up frame. The endpoints are
/// kept exactly as given, so arcs joined to other curves stay joined.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EllipticalArc {
    center: Point,
    radii: Vec2,
    x_rotation: f64,
    start_angle: f64,
    sweep_angle: f64,
    p0: Point,
    p1: Point,
}

impl EllipticalArc {
    /// Create an arc from its centre parameters.
    ///
    /// Negative radii are replaced by their absolute values.
    pub fn new(
        center: impl Into<Point>,
        radii: impl Into<Vec2>,
        x_rotation: f64,
        start_angle: f64,
        sweep_angle: f64,
    ) -> EllipticalArc {
        let radii = radii.into();
        let mut arc = EllipticalArc {
            center: center.into(),
            radii: Vec2::new(radii.x.abs(), radii.y.abs()),
            x_rotation,
            start_angle,
            sweep_angle,
            p0: Point::ZERO,
            p1: Point::ZERO,
        };
        arc.p0 = arc.point_at_angle(start_angle);
        arc.p1 = arc.point_at_angle(start_angle + sweep_angle);
        arc
    }

    /// Create an arc from SVG endpoint parameters.
    ///
    /// `sweep` selects the direction of increasing angle. Radii too small to
    /// span the endpoints are scaled up uniformly until they do. Identical
    /// endpoints yield a degenerate arc at that point.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::Range`] when a parameter is not finite, or when a
    /// radius is zero but the endpoints differ.
    pub fn from_svg(
        from: Point,
        to: Point,
        radii: Vec2,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
    ) -> GeomResult<EllipticalArc> {
        if !(from.is_finite() && to.is_finite() && radii.is_finite() && x_rotation.is_finite()) {
            return Err(GeomError::Range("arc parameters must be finite"));
        }
        if from == to {
            return Ok(EllipticalArc::new(from, Vec2::ZERO, x_rotation, 0.0, 0.0));
        }
        let mut rx = radii.x.abs();
        let mut ry = radii.y.abs();
        if rx == 0.0 || ry == 0.0 {
            return Err(GeomError::Range("zero arc radius with distinct endpoints"));
        }

        let (sin_phi, cos_phi) = x_rotation.sin_cos();
        let hd_x = (from.x - to.x) * 0.5;
        let hd_y = (from.y - to.y) * 0.5;
        let hs_x = (from.x + to.x) * 0.5;
        let hs_y = (from.y + to.y) * 0.5;

        // The half chord in the frame of the ellipse axes.
        let p = Vec2::new(
            cos_phi * hd_x + sin_phi * hd_y,
            -sin_phi * hd_x + cos_phi * hd_y,
        );

        let rf = p.x * p.x / (rx * rx) + p.y * p.y / (ry * ry);
        if rf > 1.0 {
            let scale = rf.sqrt();
            rx *= scale;
            ry *= scale;
        }

        let rxry = rx * ry;
        let rxpy = rx * p.y;
        let rypx = ry * p.x;
        let sum_of_sq = rxpy * rxpy + rypx * rypx;

        let sign_coe = if large_arc == sweep { -1.0 } else { 1.0 };
        let coe = sign_coe * ((rxry * rxry - sum_of_sq) / sum_of_sq).abs().sqrt();
        let transformed_cx = coe * rxpy / ry;
        let transformed_cy = -coe * rypx / rx;

        let center = Point::new(
            cos_phi * transformed_cx - sin_phi * transformed_cy + hs_x,
            sin_phi * transformed_cx + cos_phi * transformed_cy + hs_y,
        );

        let start_v = Vec2::new((p.x - transformed_cx) / rx, (p.y - transformed_cy) / ry);
        let end_v = Vec2::new((-p.x - transformed_cx) / rx, (-p.y - transformed_cy) / ry);
        let start_angle = start_v.atan2();
        let mut sweep_angle = (end_v.atan2() - start_angle) % TAU;
        if sweep && sweep_angle < 0.0 {
            sweep_angle += TAU;
        } else if !sweep && sweep_angle > 0.0 {
            sweep_angle -= TAU;
        }

        log::trace!("svg arc from {from} to {to}: centre {center}, sweep {sweep_angle}");
        Ok(EllipticalArc {
            center,
            radii: Vec2::new(rx, ry),
            x_rotation,
            start_angle,
            sweep_angle,
            p0: from,
            p1: to,
        })
    }

    /// The centre of the ellipse.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// The radii along the rotated axes.
    #[inline]
    pub fn radii(&self) -> Vec2 {
        self.radii
    }

    /// The rotation of the ellipse's x axis, in radians.
    #[inline]
    pub fn x_rotation(&self) -> f64 {
        self.x_rotation
    }

    /// The angle at the start of the arc.
    #[inline]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// The signed angular extent.
    #[inline]
    pub fn sweep_angle(&self) -> f64 {
        self.sweep_angle
    }

    /// The angle at the end of the arc.
    #[inline]
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    /// Whether the arc spans more than half the ellipse.
    #[inline]
    pub fn large_arc(&self) -> bool {
        self.sweep_angle.abs() > PI
    }

    /// The straight segment joining the endpoints.
    #[inline]
    pub fn chord(&self) -> LineSegment {
        LineSegment::new(self.p0, self.p1)
    }

    /// The angle reached at parameter `t`.
    #[inline]
    pub fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + t * self.sweep_angle
    }

    /// The parameter at which the arc reaches `angle`.
    ///
    /// Angles the arc does not pass through map past 1; the result is never
    /// negative.
    pub fn time_at_angle(&self, angle: f64) -> f64 {
        let d = if self.sweep_angle >= 0.0 {
            angle - self.start_angle
        } else {
            self.start_angle - angle
        };
        let mut d = d - TAU * (d / TAU).floor();
        if TAU - d < ANGLE_EPSILON {
            d = 0.0;
        }
        if self.sweep_angle == 0.0 {
            return if d == 0.0 { 0.0 } else { f64::INFINITY };
        }
        d / self.sweep_angle.abs()
    }

    /// Whether the arc passes through `angle`.
    #[inline]
    pub fn contains_angle(&self, angle: f64) -> bool {
        self.time_at_angle(angle) <= 1.0
    }

    /// The point of the full ellipse at `angle`.
    #[inline]
    pub fn point_at_angle(&self, angle: f64) -> Point {
        self.center + self.radial(angle)
    }

    /// One coordinate of the full ellipse at `angle`.
    #[inline]
    pub fn value_at_angle(&self, angle: f64, dim: Dim2) -> f64 {
        self.point_at_angle(angle)[dim]
    }

    fn radial(&self, angle: f64) -> Vec2 {
        let (s, c) = angle.sin_cos();
        let (sin_rot, cos_rot) = self.x_rotation.sin_cos();
        let (u, v) = (self.radii.x * c, self.radii.y * s);
        Vec2::new(u * cos_rot - v * sin_rot, u * sin_rot + v * cos_rot)
    }

    /// Coefficients `(a, b)` of `cos θ` and `sin θ` in coordinate `dim`.
    fn harmonic(&self, dim: Dim2) -> (f64, f64) {
        let (sin_rot, cos_rot) = self.x_rotation.sin_cos();
        match dim {
            Dim2::X => (self.radii.x * cos_rot, -self.radii.y * sin_rot),
            Dim2::Y => (self.radii.x * sin_rot, self.radii.y * cos_rot),
        }
    }

    /// Angles at which coordinate `dim` of the full ellipse equals `v`.
    fn angles_at_value(&self, v: f64, dim: Dim2) -> ArrayVec<f64, 2> {
        // With s = tan(θ / 2), c + A cos θ + B sin θ = v becomes
        // (c - v - A) s² + 2 B s + (c - v + A) = 0.
        let (ha, hb) = self.harmonic(dim);
        let c_v = self.center[dim] - v;
        let a = c_v - ha;
        let b = hb;
        let c = c_v + ha;
        let mut angles = ArrayVec::new();
        let half_angle = |s: f64| 2.0 * s.atan2(1.0);
        if a == 0.0 {
            if b != 0.0 || c != 0.0 {
                angles.push(PI);
            }
            if b != 0.0 {
                angles.push(half_angle(-c / (2.0 * b)));
            }
        } else {
            let delta = b * b - a * c;
            if delta == 0.0 {
                angles.push(half_angle(-b / a));
            } else if delta > 0.0 {
                let sq = delta.sqrt();
                angles.push(half_angle((-b - sq) / a));
                angles.push(half_angle((-b + sq) / a));
            }
        }
        angles
    }

    fn is_flat_in(&self, dim: Dim2) -> bool {
        let (a, b) = self.harmonic(dim);
        self.sweep_angle == 0.0 || (a == 0.0 && b == 0.0)
    }
}

impl ParamCurve for EllipticalArc {
    fn eval(&self, t: f64) -> Point {
        if t == 0.0 {
            self.p0
        } else if t == 1.0 {
            self.p1
        } else {
            self.point_at_angle(self.angle_at(t))
        }
    }

    fn subsegment(&self, range: Range<f64>) -> EllipticalArc {
        let (t0, t1) = (range.start, range.end);
        EllipticalArc {
            start_angle: self.angle_at(t0),
            sweep_angle: self.sweep_angle * (t1 - t0),
            p0: self.eval(t0),
            p1: self.eval(t1),
            ..*self
        }
    }

    fn reverse(&self) -> EllipticalArc {
        EllipticalArc {
            start_angle: self.end_angle(),
            sweep_angle: -self.sweep_angle,
            p0: self.p1,
            p1: self.p0,
            ..*self
        }
    }

    fn transform(&self, affine: Affine) -> EllipticalArc {
        let [a, b, c, d, _, _] = affine.as_coeffs();
        let linear = Affine::new([a, b, c, d, 0.0, 0.0])
            * Affine::rotate(self.x_rotation)
            * Affine::scale_non_uniform(self.radii.x, self.radii.y);
        let (radii, x_rotation) = linear.svd();
        // Where the old start direction lands on the new unit circle,
        // scaled by rx * ry to avoid dividing by a vanishing radius.
        let v = Affine::rotate(-x_rotation) * (linear * Vec2::from_angle(self.start_angle).to_point());
        let start_angle = Vec2::new(v.x * radii.y, v.y * radii.x).atan2();
        let sweep_angle = if linear.determinant() < 0.0 {
            -self.sweep_angle
        } else {
            self.sweep_angle
        };
        EllipticalArc {
            center: affine * self.center,
            radii,
            x_rotation,
            start_angle,
            sweep_angle,
            p0: affine * self.p0,
            p1: affine * self.p1,
        }
    }

    /// An approximation exact at the endpoints, with more terms for arcs
    /// longer than half a turn.
    fn to_sbasis(&self) -> D2<SBasis> {
        let k = if self.sweep_angle.abs() > PI { 8 } else { 6 };
        let param = Linear::new(self.start_angle, self.end_angle());
        let arc_x = cos_linear(param, k) * self.radii.x;
        let arc_y = sin_linear(param, k) * self.radii.y;
        let (sin_rot, cos_rot) = self.x_rotation.sin_cos();
        let mut x = arc_x.clone() * cos_rot - arc_y.clone() * sin_rot + self.center.x;
        let mut y = arc_x * sin_rot + arc_y * cos_rot + self.center.y;
        x.pin_ends(self.p0.x, self.p1.x);
        y.pin_ends(self.p0.y, self.p1.y);
        D2::new(x, y)
    }

    /// The derivative of an arc is an arc about the origin, a quarter turn
    /// ahead and scaled by the sweep.
    fn derivative(&self) -> Curve {
        let shift = if self.sweep_angle < 0.0 { -FRAC_PI_2 } else { FRAC_PI_2 };
        let scale = self.sweep_angle.abs();
        Curve::Arc(EllipticalArc::new(
            Point::ZERO,
            self.radii * scale,
            self.x_rotation,
            self.start_angle + shift,
            self.sweep_angle,
        ))
    }

    #[inline(always)]
    fn degrees_of_freedom(&self) -> usize {
        7
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
        let angle = self.angle_at(t);
        let derivs = (1..=n)
            .map(|k| {
                let scale = self.sweep_angle.powi(k as i32);
                scale * self.radial(angle + k as f64 * FRAC_PI_2)
            })
            .collect();
        (self.eval(t), derivs)
    }

    fn roots(&self, v: f64, dim: Dim2) -> Vec<f64> {
        if self.is_flat_in(dim) {
            return Vec::new();
        }
        let mut result: Vec<f64> = self
            .angles_at_value(v, dim)
            .into_iter()
            .map(|angle| {
                let t = self.time_at_angle(angle);
                if t.abs() < ROOT_SNAP {
                    0.0
                } else if (t - 1.0).abs() < ROOT_SNAP {
                    1.0
                } else {
                    t
                }
            })
            .filter(|t| (0.0..=1.0).contains(t))
            .collect();
        if self.p0[dim] == v {
            result.push(0.0);
        }
        if self.p1[dim] == v {
            result.push(1.0);
        }
        result.sort_by(f64::total_cmp);
        result.dedup();
        result
    }

    fn bounds_fast(&self) -> Rect {
        self.bounds_exact()
    }

    fn bounds_exact(&self) -> Rect {
        let mut rect = Rect::from_points(self.p0, self.p1);
        for dim in [Dim2::X, Dim2::Y] {
            let (a, b) = self.harmonic(dim);
            let extreme = b.atan2(a);
            for angle in [extreme, extreme + PI] {
                if self.contains_angle(angle) {
                    rect = rect.union_pt(self.point_at_angle(angle));
                }
            }
        }
        rect
    }

    fn bounds_local(&self, i: Interval) -> Rect {
        self.subsegment(i.min()..i.max()).bounds_exact()
    }

    fn winding(&self, p: Point) -> Option<i32> {
        if self.is_flat_in(Dim2::Y) {
            return if self.p0.y == p.y { None } else { Some(0) };
        }
        Some(winding_by_roots(self, p))
    }

    fn length(&self, accuracy: f64) -> f64 {
        let sweep = self.sweep_angle.abs();
        arclen_by_quadrature(
            |t| {
                let (s, c) = self.angle_at(t).sin_cos();
                sweep * (self.radii.x * s).hypot(self.radii.y * c)
            },
            accuracy,
        )
    }

    fn is_degenerate(&self) -> bool {
        self.sweep_angle == 0.0 || (self.radii.x == 0.0 && self.radii.y == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{p0:?} != {p1:?}");
    }

    fn upper_half() -> EllipticalArc {
        EllipticalArc::from_svg(
            Point::new(1.0, 0.0),
            Point::new(-1.0, 0.0),
            Vec2::new(1.0, 1.0),
            0.0,
            false,
            true,
        )
        .unwrap()
    }

    #[test]
    fn svg_semicircle() {
        let arc = upper_half();
        assert_near(arc.center(), Point::ZERO, 1e-12);
        assert!((arc.sweep_angle() - PI).abs() < 1e-12);
        assert_near(arc.eval(0.5), Point::new(0.0, 1.0), 1e-12);
        assert_eq!(arc.start(), Point::new(1.0, 0.0));
        assert_eq!(arc.end(), Point::new(-1.0, 0.0));

        let lower = EllipticalArc::from_svg(
            Point::new(1.0, 0.0),
            Point::new(-1.0, 0.0),
            Vec2::new(1.0, 1.0),
            0.0,
            false,
            false,
        )
        .unwrap();
        assert_near(lower.eval(0.5), Point::new(0.0, -1.0), 1e-12);
    }

    #[test]
    fn svg_radii_scaled_up() {
        let arc = EllipticalArc::from_svg(
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Vec2::new(1.0, 1.0),
            0.0,
            false,
            true,
        )
        .unwrap();
        assert!((arc.radii().x - 2.0).abs() < 1e-12);
        assert_near(arc.center(), Point::new(2.0, 0.0), 1e-12);
    }

    #[test]
    fn svg_degenerate() {
        let p = Point::new(1.0, 2.0);
        let err = EllipticalArc::from_svg(p, Point::ZERO, Vec2::new(0.0, 1.0), 0.0, false, true);
        assert!(matches!(err, Err(GeomError::Range(_))));
        let err = EllipticalArc::from_svg(p, Point::ZERO, Vec2::new(f64::NAN, 1.0), 0.0, false, true);
        assert!(err.unwrap_err().is_range());
        let point = EllipticalArc::from_svg(p, p, Vec2::new(1.0, 1.0), 0.0, true, true).unwrap();
        assert!(point.is_degenerate());
        assert_eq!(point.eval(0.3), p);
    }

    #[test]
    fn angles() {
        let arc = EllipticalArc::new(Point::ZERO, (1.0, 1.0), 0.0, 0.0, 1.5 * PI);
        assert!(arc.contains_angle(PI));
        assert!(arc.contains_angle(-0.6 * PI));
        assert!(!arc.contains_angle(-0.25 * PI));
        assert!((arc.time_at_angle(PI) - 2.0 / 3.0).abs() < 1e-12);
        let rev = arc.reverse();
        assert!((rev.time_at_angle(PI) - 1.0 / 3.0).abs() < 1e-12);
        assert!((arc.angle_at(0.5) - 0.75 * PI).abs() < 1e-12);
    }

    #[test]
    fn roots_and_bounds() {
        let arc = EllipticalArc::new(Point::ZERO, (1.0, 1.0), 0.0, 0.0, 1.5 * PI);
        let roots = arc.roots(0.5, Dim2::X);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - 2.0 / 9.0).abs() < 1e-12);
        let on_axis = arc.roots(0.0, Dim2::Y);
        assert_eq!(on_axis.len(), 2);
        assert_eq!(on_axis[0], 0.0);
        assert!((on_axis[1] - 2.0 / 3.0).abs() < 1e-12);

        let quarter = EllipticalArc::new(Point::ZERO, (1.0, 1.0), 0.0, 0.0, FRAC_PI_2);
        let b = quarter.bounds_exact();
        assert!(b.x0.abs() < 1e-12 && (b.x1 - 1.0).abs() < 1e-12);
        assert!(b.y0.abs() < 1e-12 && (b.y1 - 1.0).abs() < 1e-12);

        let tilted = EllipticalArc::new((1.0, 2.0), (3.0, 1.0), 0.4, 0.3, 4.0);
        let exact = tilted.bounds_exact();
        for i in 0..=100 {
            let p = tilted.eval(i as f64 / 100.0);
            assert!(exact.inflate(1e-9, 1e-9).contains(p));
        }
    }

    #[test]
    fn winding_of_half_disk() {
        let arc = upper_half();
        assert_eq!(arc.winding(Point::new(0.0, 0.5)), Some(1));
        assert_eq!(arc.winding(Point::new(0.0, -0.5)), Some(0));
        assert_eq!(arc.winding(Point::new(2.0, 0.5)), Some(0));
        // The arc leaves (1, 0) upwards, so the start counts; it arrives
        // at (-1, 0) downwards, so the end counts too.
        assert_eq!(arc.winding(Point::new(-2.0, 0.0)), Some(0));
        assert_eq!(arc.winding(Point::new(0.0, 0.0)), Some(1));
    }

    #[test]
    fn transform_matches_points() {
        let arc = EllipticalArc::new((1.0, 2.0), (3.0, 1.0), 0.4, 0.3, 4.0);
        for affine in [
            Affine::rotate(0.7) * Affine::translate((1.0, -2.0)),
            Affine::scale_non_uniform(2.0, 0.5) * Affine::rotate(0.3),
            Affine::FLIP_Y * Affine::scale_non_uniform(1.0, 3.0),
        ] {
            let t_arc = arc.transform(affine);
            for i in 0..=10 {
                let t = i as f64 / 10.0;
                assert_near(t_arc.eval(t), affine * arc.eval(t), 1e-9);
            }
        }
    }

    #[test]
    fn derivatives() {
        let arc = EllipticalArc::new((1.0, 2.0), (3.0, 1.0), 0.4, 0.3, -2.5);
        let d = arc.derivative();
        let h = 1e-6;
        for i in 1..10 {
            let t = i as f64 / 10.0;
            let numeric = (arc.eval(t + h) - arc.eval(t - h)) / (2.0 * h);
            assert!((d.eval(t).to_vec2() - numeric).hypot() < 1e-5);
            let (_, derivs) = arc.point_and_derivatives(t, 2);
            assert!((derivs[0] - numeric).hypot() < 1e-5);
            let h2 = 1e-4;
            let (p0, p1, p2) = (arc.eval(t - h2), arc.eval(t), arc.eval(t + h2));
            let numeric2 = ((p2 - p1) - (p1 - p0)) / (h2 * h2);
            assert!((derivs[1] - numeric2).hypot() < 1e-3);
        }
    }

    #[test]
    fn sbasis_approximation() {
        for sweep in [1.0, -2.5, 1.5 * PI, 1.9 * PI] {
            let arc = EllipticalArc::new((1.0, 2.0), (3.0, 1.0), 0.4, 0.3, sweep);
            let sb = arc.to_sbasis();
            assert_eq!(sb.at0(), arc.start());
            assert_eq!(sb.at1(), arc.end());
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                assert_near(sb.value_at(t), arc.eval(t), 1e-6);
            }
        }
    }

    #[test]
    fn arc_length() {
        let arc = upper_half();
        assert!((arc.length(1e-9) - PI).abs() < 1e-9);
        let sub = arc.subsegment(0.25..0.75);
        assert!((sub.length(1e-9) - 0.5 * PI).abs() < 1e-9);
        assert_near(sub.start(), arc.eval(0.25), 1e-12);
    }
}
