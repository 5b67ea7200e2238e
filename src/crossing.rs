// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transversal crossings between paths.
//!
//! A [`Crossing`] records where two paths pass through each other and which
//! way they cross. Contacts where one path only touches the other are not
//! crossings and are dropped. A stretch the paths share is one crossing
//! when one path passes through the other along it, and none otherwise.

use core::borrow::Borrow;
use core::f64::consts::TAU;

use alloc::vec;
use alloc::vec::Vec;

use crate::common::EPSILON;
use crate::sweep::{sweep_bounds, sweep_bounds_cross};
use crate::{Curve, Dim2, IntersectionOptions, ParamCurve, Path, Rect, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Rays closer than this angle are treated as coincident.
const ANGLE_EPSILON: f64 = 1e-9;

/// A point where path `a` crosses path `b`.
///
/// Times are path times. `dir` is set when `a`, moving forward, leaves the
/// left-hand side of `b`; for a crossing in the middle of two curves that is
/// `cross(a', b') > 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crossing {
    /// Index of the first path.
    pub a: usize,
    /// Index of the second path.
    pub b: usize,
    /// Path time on `a`.
    pub ta: f64,
    /// Path time on `b`.
    pub tb: f64,
    /// Direction of the crossing.
    pub dir: bool,
}

impl Crossing {
    /// The path on the other side of the crossing from path `ix`.
    #[inline]
    pub fn other(&self, ix: usize) -> usize {
        if ix == self.a {
            self.b
        } else {
            self.a
        }
    }

    /// The time of the crossing on path `ix`.
    #[inline]
    pub fn time_on(&self, ix: usize) -> f64 {
        if ix == self.a {
            self.ta
        } else {
            self.tb
        }
    }
}

/// Crossings grouped by path: entry `i` holds every crossing involving path
/// `i`, sorted by time on that path.
pub type CrossingSet = Vec<Vec<Crossing>>;

/// Sort crossings by their time on path `ix`.
pub fn sort_crossings(crossings: &mut [Crossing], ix: usize) {
    crossings.sort_by(|x, y| x.time_on(ix).total_cmp(&y.time_on(ix)));
}

/// Move the crossings of `b` into `a`, keeping `a` sorted by time on path
/// `ix`.
pub fn merge_crossings(a: &mut Vec<Crossing>, b: Vec<Crossing>, ix: usize) {
    a.extend(b);
    sort_crossings(a, ix);
}

/// Renumber paths, adding `a_offset` to every `a` and `b_offset` to every
/// `b`.
pub fn offset_crossings(crossings: &mut [Crossing], a_offset: usize, b_offset: usize) {
    for c in crossings {
        c.a += a_offset;
        c.b += b_offset;
    }
}

/// Swap the roles of the two paths.
pub fn flip_crossings(crossings: &mut [Crossing]) {
    for c in crossings {
        *c = Crossing {
            a: c.b,
            b: c.a,
            ta: c.tb,
            tb: c.ta,
            dir: !c.dir,
        };
    }
}

/// Snap path times within [`EPSILON`] of a vertex onto the vertex. The end
/// of a closed path is its start.
fn snap_time(path: &Path, t: f64) -> f64 {
    let r = t.round();
    let t = if (t - r).abs() < EPSILON { r } else { t };
    if path.is_closed() && t >= path.len() as f64 {
        0.0
    } else {
        t
    }
}

fn same_time(path: &Path, s: f64, t: f64) -> bool {
    let d = (s - t).abs();
    d < EPSILON || (path.is_closed() && d > path.len() as f64 - EPSILON)
}

/// Direction of travel leaving vertex `k`, skipping degenerate curves.
fn outgoing(path: &Path, k: usize) -> Option<Vec2> {
    let n = path.len();
    for step in 0..n {
        let mut i = k + step;
        if i >= n {
            if !path.is_closed() {
                return None;
            }
            i -= n;
        }
        let c = &path[i];
        if !c.is_degenerate() {
            return Some(c.unit_tangent_at(0.0));
        }
    }
    None
}

/// Direction back along the path from vertex `k`.
fn incoming(path: &Path, k: usize) -> Option<Vec2> {
    let n = path.len();
    for step in 1..=n {
        let i = if k >= step {
            k - step
        } else if path.is_closed() {
            k + n - step
        } else {
            return None;
        };
        let c = &path[i];
        if !c.is_degenerate() {
            return Some(-c.unit_tangent_at(1.0));
        }
    }
    None
}

/// The backward and forward rays leaving the point at path time `t`.
fn rays(path: &Path, t: f64) -> Option<(Vec2, Vec2)> {
    let (back, fwd) = if t == t.floor() {
        let k = t as usize;
        (incoming(path, k)?, outgoing(path, k)?)
    } else {
        let i = t.floor() as usize;
        let fwd = path.get(i)?.unit_tangent_at(t - i as f64);
        (-fwd, fwd)
    };
    if back == Vec2::ZERO || fwd == Vec2::ZERO {
        return None;
    }
    Some((back, fwd))
}

/// The anticlockwise angle from `base` to `v`, in `[0, 2π)`.
fn angle_from(v: Vec2, base: Vec2) -> f64 {
    let a = v.atan2() - base.atan2();
    if a < 0.0 {
        a + TAU
    } else {
        a
    }
}

/// Whether `v` lies strictly inside the anticlockwise wedge from `from` to
/// `to`, or `None` when it lies along one of them.
fn wedge_side(v: Vec2, from: Vec2, to: Vec2) -> Option<bool> {
    let width = angle_from(to, from);
    let x = angle_from(v, from);
    if x < ANGLE_EPSILON || x > TAU - ANGLE_EPSILON || (x - width).abs() < ANGLE_EPSILON {
        return None;
    }
    Some(x < width)
}

/// Where the two rays of path `a` at `ta` fall relative to the left-hand
/// side of path `b` at `tb`: backward ray first, then forward ray.
///
/// The left-hand side of `b` near the point is the anticlockwise wedge
/// from its forward ray to its backward ray. A ray running along one of
/// `b`'s rays has no side. `None` when either path has no direction there.
fn sides(a: &Path, ta: f64, b: &Path, tb: f64) -> Option<(Option<bool>, Option<bool>)> {
    let (a_back, a_fwd) = rays(a, ta)?;
    let (b_back, b_fwd) = rays(b, tb)?;
    Some((
        wedge_side(a_back, b_fwd, b_back),
        wedge_side(a_fwd, b_fwd, b_back),
    ))
}

/// Decide whether path `a` at `ta` passes through path `b` at `tb`, and
/// in which direction. `a` crosses when its two rays fall on different
/// sides of `b`.
fn classify(a: &Path, ta: f64, b: &Path, tb: f64) -> Option<bool> {
    match sides(a, ta, b, tb)? {
        (Some(back_left), Some(fwd_left)) if back_left != fwd_left => Some(!fwd_left),
        _ => None,
    }
}

fn path_bounds<'a>(paths: impl Iterator<Item = &'a Path>) -> Vec<Rect> {
    paths.map(|p| p.bounds_fast().unwrap_or_default()).collect()
}

fn curve_bounds(path: &Path) -> Vec<Rect> {
    path.iter().map(Curve::bounds_fast).collect()
}

/// Remember a raw hit unless it repeats one already seen.
fn is_new_hit(a: &Path, ta: f64, b: &Path, tb: f64, seen: &mut Vec<(f64, f64)>) -> bool {
    if seen
        .iter()
        .any(|&(sa, sb)| same_time(a, sa, ta) && same_time(b, sb, tb))
    {
        return false;
    }
    seen.push((ta, tb));
    true
}

/// A point where `a` touches `b`, with the sides of `b` its rays fall on.
struct Contact {
    ta: f64,
    tb: f64,
    back: Option<bool>,
    fwd: Option<bool>,
}

/// Turn contacts, sorted by time on `a`, into crossings.
///
/// Where `a` runs along `b` for a stretch, the contact entering the
/// stretch has no forward side and the one leaving it has no backward
/// side. The pair is one crossing when `a` arrives and departs on
/// different sides of `b`; it is placed where `a` leaves the stretch.
fn resolve_contacts(a: &Path, contacts: &[Contact]) -> Vec<Crossing> {
    let crossing = |c: &Contact, fwd_left: bool| Crossing {
        a: 0,
        b: 1,
        ta: c.ta,
        tb: c.tb,
        dir: !fwd_left,
    };
    let mut result = Vec::new();
    let mut entry: Option<bool> = None;
    let mut first_exit: Option<&Contact> = None;
    for c in contacts {
        match (c.back, c.fwd) {
            (Some(back), Some(fwd)) => {
                if back != fwd {
                    result.push(crossing(c, fwd));
                } else {
                    log::debug!("dropped touching contact at path times {} and {}", c.ta, c.tb);
                }
            }
            (Some(back), None) => {
                if entry.is_some() {
                    log::debug!("overlap entered twice before path time {}", c.ta);
                }
                entry = Some(back);
            }
            (None, Some(fwd)) => match entry.take() {
                Some(back) if back != fwd => result.push(crossing(c, fwd)),
                Some(_) => log::debug!("dropped overlap touching at path time {}", c.ta),
                None => {
                    if first_exit.is_none() {
                        first_exit = Some(c);
                    }
                }
            },
            (None, None) => {}
        }
    }
    // The stretch runs through the closing point of `a`.
    if let (Some(back), Some(c)) = (entry, first_exit) {
        if a.is_closed() {
            if let Some(fwd) = c.fwd {
                if back != fwd {
                    result.push(crossing(c, fwd));
                }
            }
        }
    }
    result
}

/// The crossings of path `a` with path `b`, sorted by time on `a`.
///
/// The results have `a = 0` and `b = 1`. A crossing through a vertex is
/// reported once. Where the paths share a stretch, the crossing (if `a`
/// passes from one side of `b` to the other across it) is reported at the
/// end of the stretch along `a`.
///
/// # Examples
///
/// ```
/// use sbgeom::{crossings, Path, Rect};
///
/// let a = Path::rect(Rect::new(0.0, 0.0, 2.0, 2.0));
/// let b = Path::rect(Rect::new(1.0, 1.0, 3.0, 3.0));
/// let xs = crossings(&a, &b);
/// assert_eq!(xs.len(), 2);
/// assert_ne!(xs[0].dir, xs[1].dir);
/// ```
pub fn crossings(a: &Path, b: &Path) -> Vec<Crossing> {
    let options = IntersectionOptions::default();
    let pairs = sweep_bounds_cross(&curve_bounds(a), &curve_bounds(b));
    let mut seen = Vec::new();
    let mut contacts = Vec::new();
    for (i, js) in pairs.iter().enumerate() {
        for &j in js {
            for x in a[i].intersect(&b[j], &options) {
                let ta = snap_time(a, i as f64 + x.ta);
                let tb = snap_time(b, j as f64 + x.tb);
                if !is_new_hit(a, ta, b, tb, &mut seen) {
                    continue;
                }
                if let Some((back, fwd)) = sides(a, ta, b, tb) {
                    contacts.push(Contact { ta, tb, back, fwd });
                }
            }
        }
    }
    contacts.sort_by(|x, y| x.ta.total_cmp(&y.ta));
    let mut result = resolve_contacts(a, &contacts);
    sort_crossings(&mut result, 0);
    result
}

/// The points where a path crosses itself, each reported once with
/// `ta < tb`.
pub fn self_crossings(path: &Path) -> Vec<Crossing> {
    let options = IntersectionOptions::default();
    let mut seen = Vec::new();
    let mut result = Vec::new();
    let mut hits: Vec<(f64, f64)> = Vec::new();
    for (i, js) in sweep_bounds(&curve_bounds(path)).iter().enumerate() {
        for &j in js {
            for x in path[i].intersect(&path[j], &options) {
                hits.push((i as f64 + x.ta, j as f64 + x.tb));
            }
        }
    }
    for (i, c) in path.iter().enumerate() {
        if c.is_line() {
            continue;
        }
        if let Ok(xs) = c.self_intersections(&options) {
            hits.extend(xs.iter().map(|x| (i as f64 + x.ta, i as f64 + x.tb)));
        }
    }
    for (s, t) in hits {
        let (s, t) = (snap_time(path, s), snap_time(path, t));
        // Neighbouring curves meet at their shared vertex.
        if same_time(path, s, t) {
            continue;
        }
        let (s, t) = if s <= t { (s, t) } else { (t, s) };
        if !is_new_hit(path, s, path, t, &mut seen) {
            continue;
        }
        match classify(path, s, path, t) {
            Some(dir) => result.push(Crossing {
                a: 0,
                b: 1,
                ta: s,
                tb: t,
                dir,
            }),
            None => log::debug!("dropped non-transversal self contact at path times {s} and {t}"),
        }
    }
    for c in &mut result {
        c.b = 0;
    }
    sort_crossings(&mut result, 0);
    result
}

/// Crossings among a set of paths, one sorted list per path.
///
/// Every crossing appears in the lists of both of its paths, with `a < b`.
/// Self crossings are not included.
pub fn crossings_among<P: Borrow<Path>>(paths: &[P]) -> CrossingSet {
    let bounds = path_bounds(paths.iter().map(Borrow::borrow));
    let mut set: CrossingSet = vec![Vec::new(); paths.len()];
    for (i, js) in sweep_bounds(&bounds).iter().enumerate() {
        for &j in js {
            let (lo, hi) = (i.min(j), i.max(j));
            let mut cr = crossings(paths[lo].borrow(), paths[hi].borrow());
            offset_crossings(&mut cr, lo, hi - 1);
            set[lo].extend(cr.iter().copied());
            set[hi].extend(cr);
        }
    }
    for (i, list) in set.iter_mut().enumerate() {
        sort_crossings(list, i);
    }
    set
}

/// Crossings between two sets of paths, one sorted list per path.
///
/// Paths of `a` are numbered first, followed by the paths of `b`. Each
/// crossing has its `a` index in the first group and its `b` index in the
/// second.
pub fn crossings_between<P: Borrow<Path>, Q: Borrow<Path>>(a: &[P], b: &[Q]) -> CrossingSet {
    let a_bounds = path_bounds(a.iter().map(Borrow::borrow));
    let b_bounds = path_bounds(b.iter().map(Borrow::borrow));
    let mut set: CrossingSet = vec![Vec::new(); a.len() + b.len()];
    for (i, js) in sweep_bounds_cross(&a_bounds, &b_bounds).iter().enumerate() {
        for &j in js {
            let mut cr = crossings(a[i].borrow(), b[j].borrow());
            let jx = a.len() + j;
            offset_crossings(&mut cr, i, jx - 1);
            set[i].extend(cr.iter().copied());
            set[jx].extend(cr);
        }
    }
    for (i, list) in set.iter_mut().enumerate() {
        sort_crossings(list, i);
    }
    set
}

/// Times, including 0 and 1, splitting a curve into pieces monotone in
/// both coordinates.
pub fn curve_mono_splits(curve: &Curve) -> Vec<f64> {
    let d = curve.derivative();
    let mut splits = vec![0.0, 1.0];
    for dim in [Dim2::X, Dim2::Y] {
        splits.extend(d.roots(0.0, dim).into_iter().filter(|&t| t > 0.0 && t < 1.0));
    }
    splits.sort_by(f64::total_cmp);
    splits.dedup_by(|x, y| (*x - *y).abs() < EPSILON);
    splits
}

/// Path times, including both ends, splitting a path into pieces monotone
/// in both coordinates.
pub fn path_mono_splits(path: &Path) -> Vec<f64> {
    let mut splits: Vec<f64> = Vec::new();
    for (i, c) in path.iter().enumerate() {
        for t in curve_mono_splits(c) {
            let pt = i as f64 + t;
            if splits.last().map_or(true, |&last| pt - last >= EPSILON) {
                splits.push(pt);
            }
        }
    }
    splits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CubicBez, LineSegment, Point};

    fn square(x0: f64, y0: f64, size: f64) -> Path {
        Path::rect(Rect::new(x0, y0, x0 + size, y0 + size))
    }

    #[test]
    fn overlapping_squares() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        let xs = crossings(&a, &b);
        assert_eq!(xs.len(), 2);
        // (2, 1): up the right edge of `a`, along the bottom of `b`.
        assert!((xs[0].ta - 1.5).abs() < 1e-9);
        assert!((xs[0].tb - 0.5).abs() < 1e-9);
        assert!(!xs[0].dir);
        // (1, 2): leftwards along the top of `a`, up the left of `b`.
        assert!((xs[1].ta - 2.5).abs() < 1e-9);
        assert!((xs[1].tb - 3.5).abs() < 1e-9);
        assert!(xs[1].dir);
        for x in &xs {
            assert_eq!((x.a, x.b), (0, 1));
            let pa = a.point_at(x.ta).unwrap();
            let pb = b.point_at(x.tb).unwrap();
            assert!(pa.distance(pb) < 1e-9);
        }
    }

    #[test]
    fn crossing_through_vertex() {
        // The diagonal passes through the corner (2, 2) of the square.
        let a = square(0.0, 0.0, 2.0);
        let b = Path::from_polyline([Point::new(1.0, 3.0), Point::new(3.0, 1.0)], false);
        assert!(crossings(&a, &b).is_empty());
        let c = Path::from_polyline([Point::new(1.0, 1.0), Point::new(3.0, 3.0)], false);
        let xs = crossings(&a, &c);
        assert_eq!(xs.len(), 1);
        assert_eq!(xs[0].ta, 2.0);
        assert!((xs[0].tb - 0.5).abs() < 1e-9);
    }

    #[test]
    fn touching_and_coincident() {
        let a = square(0.0, 0.0, 2.0);
        // Shares the right edge of `a` without crossing it.
        let b = square(2.0, 0.0, 2.0);
        assert!(crossings(&a, &b).is_empty());
        assert!(crossings(&a, &a).is_empty());
        // Touches a corner.
        let c = square(2.0, 2.0, 1.0);
        assert!(crossings(&a, &c).is_empty());
    }

    #[test]
    fn shared_edges() {
        // Both squares run along y = 0 and y = 2 between x = 1 and x = 2.
        let a = square(0.0, 0.0, 2.0);
        let b = Path::rect(Rect::new(1.0, 0.0, 3.0, 2.0));
        let xs = crossings(&a, &b);
        assert_eq!(xs.len(), 2);
        // `a` turns up into `b` at (2, 0) and leaves it at (1, 2).
        assert!((xs[0].ta - 1.0).abs() < 1e-9 && !xs[0].dir);
        assert!((xs[0].tb - 0.5).abs() < 1e-9);
        assert!((xs[1].ta - 2.5).abs() < 1e-9);
        assert!((xs[1].tb - 3.0).abs() < 1e-9);
        assert!(xs[1].dir);

        let ys = crossings(&b, &a);
        assert_eq!(ys.len(), 2);
        assert!((ys[0].ta - 0.5).abs() < 1e-9 && ys[0].dir);
        assert!((ys[1].ta - 3.0).abs() < 1e-9 && !ys[1].dir);
    }

    #[test]
    fn flipping() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        let mut xs = crossings(&a, &b);
        let mut ys = crossings(&b, &a);
        flip_crossings(&mut xs);
        sort_crossings(&mut xs, 1);
        for (x, y) in xs.iter().zip(&ys) {
            assert!((x.ta - y.ta).abs() < 1e-9 && (x.tb - y.tb).abs() < 1e-9);
            assert_eq!(x.dir, y.dir);
        }
        offset_crossings(&mut ys, 3, 4);
        assert_eq!((ys[0].a, ys[0].b), (3, 5));
        assert_eq!(ys[0].other(3), 5);
        assert_eq!(ys[0].time_on(5), ys[0].tb);
    }

    #[test]
    fn sets() {
        let paths = [square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0), square(10.0, 0.0, 1.0)];
        let set = crossings_among(&paths);
        assert_eq!(set[0].len(), 2);
        assert_eq!(set[1].len(), 2);
        assert!(set[2].is_empty());
        assert!(set[1][0].tb <= set[1][1].tb);
        assert_eq!(set[1][0].other(1), 0);

        let between = crossings_between(&paths[..1], &paths[1..]);
        assert_eq!(between.len(), 3);
        assert_eq!(between[0].len(), 2);
        assert_eq!(between[1].len(), 2);
        assert_eq!((between[1][0].a, between[1][0].b), (0, 1));
        assert!(between[2].is_empty());

        let mut merged = set[0].clone();
        merged.reverse();
        merge_crossings(&mut merged, Vec::new(), 0);
        assert_eq!(merged, set[0]);
    }

    #[test]
    fn figure_eight() {
        let bow = Path::from_polyline(
            [
                Point::new(0.0, 0.0),
                Point::new(2.0, 2.0),
                Point::new(2.0, 0.0),
                Point::new(0.0, 2.0),
            ],
            true,
        );
        let xs = self_crossings(&bow);
        assert_eq!(xs.len(), 1);
        assert!((xs[0].ta - 0.5).abs() < 1e-9);
        assert!((xs[0].tb - 2.5).abs() < 1e-9);
        assert!(self_crossings(&square(0.0, 0.0, 1.0)).is_empty());

        let looped = CubicBez::new((0.0, 0.0), (2.0, 2.0), (-1.0, 2.0), (1.0, 0.0));
        let mut p = Path::from_curves([Curve::Cubic(looped)]).unwrap();
        p.close();
        assert_eq!(self_crossings(&p).len(), 1);
    }

    #[test]
    fn mono_splits() {
        let c = Curve::Cubic(CubicBez::new((0.0, 0.0), (1.0, 2.0), (2.0, 2.0), (3.0, 0.0)));
        let splits = curve_mono_splits(&c);
        assert_eq!(splits.len(), 3);
        assert!((splits[1] - 0.5).abs() < 1e-9);
        let line = Curve::Line(LineSegment::new((0.0, 0.0), (1.0, 1.0)));
        assert_eq!(curve_mono_splits(&line), [0.0, 1.0]);

        let mut p = Path::from_curves([c, Curve::Line(LineSegment::new((3.0, 0.0), (0.0, 0.0)))]).unwrap();
        p.set_closed(true).unwrap();
        let splits = path_mono_splits(&p);
        assert_eq!(splits.len(), 4);
        assert!((splits[1] - 0.5).abs() < 1e-9);
        assert_eq!(splits[2], 1.0);
        assert_eq!(splits[3], 2.0);
    }
}
