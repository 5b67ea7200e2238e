// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve/curve intersection by recursive subdivision.
//!
//! Both curves are taken as Bézier control polygons and split in half until
//! they are flat enough, pruning every pair whose control-hull bounding
//! boxes are disjoint. At the leaves each piece is replaced by its chord and
//! the chords are intersected. The raw hits are then refined by Newton
//! iteration on the actual curves.

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::bezier_curve::{coord_bezier, hull_bounds, portion_points, split_points, ControlPoints};
use crate::common::{are_near, EPSILON};
use crate::{Curve, Dim2, GeomError, GeomResult, LineSegment, ParamCurve, Point};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Maximum number of halvings applied to either curve.
pub const MAX_SUBDIVISION_DEPTH: usize = 12;

/// Relative size of the chord cross product below which two segments are
/// taken as parallel.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Newton steps used to refine each raw intersection.
const POLISH_ITERATIONS: usize = 4;

/// Knobs of the intersection engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionOptions {
    /// Flatness below which a piece of curve is replaced by its chord.
    pub tolerance: f64,
    /// Cap on the number of halvings of each curve.
    pub max_depth: usize,
}

impl Default for IntersectionOptions {
    fn default() -> IntersectionOptions {
        IntersectionOptions {
            tolerance: EPSILON,
            max_depth: MAX_SUBDIVISION_DEPTH,
        }
    }
}

/// A point where two curves meet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveIntersection {
    /// Time on the first curve.
    pub ta: f64,
    /// Time on the second curve.
    pub tb: f64,
    /// The point, evaluated on the first curve.
    pub point: Point,
}

/// The number of halvings after which every piece of the Bézier with the
/// given control points lies within `tolerance` of its chord.
///
/// This is Wang's bound: `n (n - 1) L / 8` over the piece count squared,
/// where `L` is the largest second difference of the control points.
pub fn wang_depth(points: &[Point], tolerance: f64) -> usize {
    let n = points.len().saturating_sub(1);
    if n < 2 {
        return 0;
    }
    let l = points
        .windows(3)
        .map(|w| (w[2].to_vec2() - 2.0 * w[1].to_vec2() + w[0].to_vec2()).hypot())
        .fold(0.0, f64::max);
    let segments = ((n * (n - 1)) as f64 * l / (8.0 * tolerance)).sqrt();
    if !(segments > 1.0) {
        return 0;
    }
    let depth = segments.log2().ceil();
    if depth >= MAX_SUBDIVISION_DEPTH as f64 {
        MAX_SUBDIVISION_DEPTH
    } else {
        depth as usize
    }
}

#[derive(Clone)]
struct Piece {
    points: ControlPoints,
    t0: f64,
    t1: f64,
}

impl Piece {
    fn whole(points: &[Point]) -> Piece {
        Piece {
            points: points.iter().copied().collect(),
            t0: 0.0,
            t1: 1.0,
        }
    }

    fn halves(&self) -> [Piece; 2] {
        let (left, right) = split_points(&self.points, 0.5);
        let tm = 0.5 * (self.t0 + self.t1);
        [
            Piece {
                points: left,
                t0: self.t0,
                t1: tm,
            },
            Piece {
                points: right,
                t0: tm,
                t1: self.t1,
            },
        ]
    }

    fn split(&self, depth: usize) -> SmallVec<[Piece; 2]> {
        if depth == 0 {
            smallvec::smallvec![self.clone()]
        } else {
            SmallVec::from_iter(self.halves())
        }
    }

    fn time(&self, s: f64) -> f64 {
        self.t0 + s * (self.t1 - self.t0)
    }

    fn first(&self) -> Point {
        self.points[0]
    }

    fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }
}

/// Intersect the chords `k -> l` and `m -> n`.
///
/// Nearly parallel chords, whose determinant vanishes against 1, have no
/// intersection.
fn chord_intersection(k: Point, l: Point, m: Point, n: Point) -> Option<(f64, f64)> {
    let (xlk, ylk) = (l.x - k.x, l.y - k.y);
    let (xnm, ynm) = (n.x - m.x, n.y - m.y);
    let (xmk, ymk) = (m.x - k.x, m.y - k.y);
    let det = xnm * ylk - ynm * xlk;
    if 1.0 + det == 1.0 {
        return None;
    }
    let s = (xnm * ymk - ynm * xmk) / det;
    let t = (xlk * ymk - ylk * xmk) / det;
    if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
        Some((s, t))
    } else {
        None
    }
}

fn intersect_rec(a: &Piece, a_depth: usize, b: &Piece, b_depth: usize, out: &mut Vec<(f64, f64)>) {
    if !hull_bounds(&a.points).intersects(&hull_bounds(&b.points)) {
        return;
    }
    if a_depth == 0 && b_depth == 0 {
        if let Some((s, t)) = chord_intersection(a.first(), a.last(), b.first(), b.last()) {
            out.push((a.time(s), b.time(t)));
        }
        return;
    }
    let a_next = a_depth.saturating_sub(1);
    let b_next = b_depth.saturating_sub(1);
    for pa in a.split(a_depth) {
        for pb in b.split(b_depth) {
            intersect_rec(&pa, a_next, &pb, b_next, out);
        }
    }
}

fn sort_and_dedup(pairs: &mut Vec<(f64, f64)>) {
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    pairs.dedup_by(|next, prev| are_near(next.0, prev.0, EPSILON) && are_near(next.1, prev.1, EPSILON));
}

/// All parameter pairs at which two Bézier curves meet, sorted by the
/// time on `a`.
///
/// The curves are given by their control points. Touching bounding boxes
/// count as overlapping, so contacts at endpoints are found.
///
/// # Examples
///
/// ```
/// use sbgeom::{find_intersections, IntersectionOptions, Point};
///
/// let a = [Point::new(0.0, 0.0), Point::new(2.0, 2.0)];
/// let b = [Point::new(0.0, 2.0), Point::new(2.0, 0.0)];
/// let xs = find_intersections(&a, &b, &IntersectionOptions::default());
/// assert_eq!(xs.len(), 1);
/// assert!((xs[0].0 - 0.5).abs() < 1e-12 && (xs[0].1 - 0.5).abs() < 1e-12);
/// ```
pub fn find_intersections(a: &[Point], b: &[Point], options: &IntersectionOptions) -> Vec<(f64, f64)> {
    let mut result = Vec::new();
    if a.is_empty() || b.is_empty() {
        return result;
    }
    let a_depth = wang_depth(a, options.tolerance).min(options.max_depth);
    let b_depth = wang_depth(b, options.tolerance).min(options.max_depth);
    intersect_rec(&Piece::whole(a), a_depth, &Piece::whole(b), b_depth, &mut result);
    log::trace!(
        "subdivision depths {a_depth}/{b_depth}: {} chord hits",
        result.len()
    );
    sort_and_dedup(&mut result);
    result
}

/// The points where a Bézier curve crosses itself, as pairs `(s, t)` with
/// `s < t`.
///
/// The curve is cut where either coordinate turns, so every piece is
/// monotone and cannot cross itself, then the pieces are intersected
/// pairwise. Neighbouring pieces always meet at their shared cut, which is
/// not reported.
pub fn find_self_intersections(points: &[Point], options: &IntersectionOptions) -> Vec<(f64, f64)> {
    let mut result = Vec::new();
    if points.len() < 3 {
        return result;
    }
    let n = (points.len() - 1) as f64;
    let deriv: ControlPoints = points
        .windows(2)
        .map(|w| ((w[1] - w[0]) * n).to_point())
        .collect();
    let mut cuts = alloc::vec![0.0, 1.0];
    for dim in [Dim2::X, Dim2::Y] {
        cuts.extend(
            coord_bezier(&deriv, dim, 0.0)
                .roots()
                .into_iter()
                .filter(|&t| t > 0.0 && t < 1.0),
        );
    }
    cuts.sort_by(f64::total_cmp);
    cuts.dedup_by(|next, prev| are_near(*next, *prev, 1e-9));

    let pieces: Vec<Piece> = cuts
        .windows(2)
        .map(|w| Piece {
            points: portion_points(points, w[0], w[1]),
            t0: w[0],
            t1: w[1],
        })
        .collect();
    for (i, pi) in pieces.iter().enumerate() {
        for (j, pj) in pieces.iter().enumerate().skip(i + 1) {
            for (l, r) in find_intersections(&pi.points, &pj.points, options) {
                if j == i + 1 && are_near(l, 1.0, EPSILON) && are_near(r, 0.0, EPSILON) {
                    continue;
                }
                result.push((pi.time(l), pj.time(r)));
            }
        }
    }
    sort_and_dedup(&mut result);
    result
}

/// Intersect two line segments exactly.
///
/// Returns `None` for parallel or degenerate segments, judged by the cross
/// product of the directions relative to their lengths.
pub fn linear_intersect(a: &LineSegment, b: &LineSegment) -> Option<(f64, f64)> {
    let da = a.p1 - a.p0;
    let db = b.p1 - b.p0;
    let det = da.cross(db);
    if det.abs() <= PARALLEL_EPSILON * da.hypot() * db.hypot() {
        return None;
    }
    let w = b.p0 - a.p0;
    let ta = w.cross(db) / det;
    let tb = w.cross(da) / det;
    if (0.0..=1.0).contains(&ta) && (0.0..=1.0).contains(&tb) {
        Some((ta, tb))
    } else {
        None
    }
}

/// Refine an approximate intersection `(s, t)` of two curves by Newton
/// iteration on `A(s) - B(t) = 0`.
///
/// Times stay within `[0, 1]`. Iteration stops early when a step fails to
/// shrink the distance tenfold; the best pair seen is returned.
pub fn intersect_polish_root<A: ParamCurve, B: ParamCurve>(a: &A, b: &B, s: f64, t: f64) -> (f64, f64) {
    let (mut s, mut t) = (s, t);
    let mut best = a.eval(s).distance(b.eval(t));
    for _ in 0..POLISH_ITERATIONS {
        if best == 0.0 {
            break;
        }
        let (pa, da) = a.point_and_derivatives(s, 1);
        let (pb, db) = b.point_and_derivatives(t, 1);
        let f = pa - pb;
        let c1 = da[0];
        let c2 = -db[0];
        let det = c1.cross(c2);
        if det == 0.0 || !det.is_finite() {
            break;
        }
        let ns = (s - f.cross(c2) / det).clamp(0.0, 1.0);
        let nt = (t - c1.cross(f) / det).clamp(0.0, 1.0);
        let trial = a.eval(ns).distance(b.eval(nt));
        if trial < best {
            s = ns;
            t = nt;
        }
        if trial > best * 0.1 {
            break;
        }
        best = trial;
    }
    (s, t)
}

fn to_intersections(a: &Curve, pairs: Vec<(f64, f64)>) -> Vec<CurveIntersection> {
    pairs
        .into_iter()
        .map(|(ta, tb)| CurveIntersection {
            ta,
            tb,
            point: a.eval(ta),
        })
        .collect()
}

/// Intersections of two curves of any type, polished and sorted by `ta`.
pub fn curve_intersections(a: &Curve, b: &Curve, options: &IntersectionOptions) -> Vec<CurveIntersection> {
    if let (Curve::Line(la), Curve::Line(lb)) = (a, b) {
        return to_intersections(a, linear_intersect(la, lb).into_iter().collect());
    }
    let raw = find_intersections(&a.bezier_points(), &b.bezier_points(), options);
    let mut polished: Vec<(f64, f64)> = raw
        .into_iter()
        .map(|(s, t)| intersect_polish_root(a, b, s, t))
        .collect();
    sort_and_dedup(&mut polished);
    to_intersections(a, polished)
}

/// Self intersections of a curve, polished and sorted by `ta`.
pub fn curve_self_intersections(
    c: &Curve,
    options: &IntersectionOptions,
) -> GeomResult<Vec<CurveIntersection>> {
    if c.is_line() {
        return Err(GeomError::NotImplemented("self intersection of a line segment"));
    }
    let raw = find_self_intersections(&c.bezier_points(), options);
    let mut polished: Vec<(f64, f64)> = raw
        .into_iter()
        .map(|(s, t)| {
            let (ps, pt) = intersect_polish_root(c, c, s, t);
            // Newton may slide both times onto the trivial solution s = t.
            if are_near(ps, pt, EPSILON) {
                (s, t)
            } else {
                (ps.min(pt), ps.max(pt))
            }
        })
        .collect();
    sort_and_dedup(&mut polished);
    Ok(to_intersections(c, polished))
}
