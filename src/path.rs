// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sequences of connected curves.

use core::ops::{Index, Range};

use alloc::vec::Vec;

use crate::common::EPSILON;
use crate::{
    Affine, Curve, Dim2, GeomError, GeomResult, LineSegment, Nearest, ParamCurve, Piecewise,
    Point, Rect, SBasis, D2,
};

/// A chain of curves, each starting where the previous one ends.
///
/// Positions along a path are given as *path time*: a value in
/// `[0, len]` whose integer part selects a curve and whose fractional part
/// is the time on that curve.
///
/// A closed path's last curve ends at its first curve's start; there is no
/// implicit closing segment. Every mutation keeps the chain connected or
/// fails with [`GeomError::Continuity`] and leaves the path untouched.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    curves: Vec<Curve>,
    start: Point,
    closed: bool,
}

fn continuity_error(index: usize, end: Point, start: Point) -> GeomError {
    let gap = end.distance(start);
    log::debug!("rejected path edit: curve {index} starts {gap} away from its predecessor");
    GeomError::Continuity { index, gap }
}

impl Path {
    /// An empty open path at the origin.
    pub fn new() -> Path {
        Path::default()
    }

    /// An empty open path at `p`.
    pub fn starting_at(p: impl Into<Point>) -> Path {
        Path {
            curves: Vec::new(),
            start: p.into(),
            closed: false,
        }
    }

    /// An open path from a sequence of curves.
    ///
    /// # Errors
    ///
    /// Fails if two consecutive curves do not meet.
    pub fn from_curves(curves: impl IntoIterator<Item = Curve>) -> GeomResult<Path> {
        let mut path = Path::new();
        let curves: Vec<Curve> = curves.into_iter().collect();
        path.replace(0..0, curves)?;
        Ok(path)
    }

    /// A path of straight segments through `points`.
    ///
    /// When `closed` is set a final segment returns to the first point if
    /// it is not already there.
    pub fn from_polyline(points: impl IntoIterator<Item = Point>, closed: bool) -> Path {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Path::new();
        };
        let mut path = Path::starting_at(first);
        let mut last = first;
        for p in points {
            path.curves.push(Curve::Line(LineSegment::new(last, p)));
            last = p;
        }
        if closed {
            path.close();
        }
        path
    }

    /// The boundary of `rect` as a closed path, running anti-clockwise in a
    /// y-up frame.
    pub fn rect(rect: Rect) -> Path {
        let pts = [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ];
        Path::from_polyline(pts, true)
    }

    /// Whether the path is closed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Mark the path as closed or open.
    ///
    /// # Errors
    ///
    /// Closing fails when the final point is not at the initial point.
    /// Use [`Path::close`] to bridge the gap instead.
    pub fn set_closed(&mut self, closed: bool) -> GeomResult<()> {
        if closed {
            let (start, end) = (self.initial_point(), self.final_point());
            if !end.is_near(start, EPSILON) {
                return Err(continuity_error(0, end, start));
            }
        }
        self.closed = closed;
        Ok(())
    }

    /// Close the path, adding a straight segment back to the start if the
    /// ends do not already meet.
    pub fn close(&mut self) {
        let (start, end) = (self.initial_point(), self.final_point());
        if !end.is_near(start, EPSILON) {
            self.curves.push(Curve::Line(LineSegment::new(end, start)));
        }
        self.closed = true;
    }

    /// The number of curves.
    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Whether the path has no curves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// The curves of the path.
    #[inline]
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    /// The curve at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Curve> {
        self.curves.get(index)
    }

    /// Iterate over the curves.
    pub fn iter(&self) -> core::slice::Iter<'_, Curve> {
        self.curves.iter()
    }

    /// Where the path starts.
    pub fn initial_point(&self) -> Point {
        self.curves.first().map_or(self.start, Curve::start)
    }

    /// Where the path ends.
    pub fn final_point(&self) -> Point {
        self.curves.last().map_or(self.start, Curve::end)
    }

    /// Append a curve.
    ///
    /// # Errors
    ///
    /// Fails unless the curve starts at the path's final point; an empty
    /// open path accepts any curve.
    pub fn append(&mut self, curve: Curve) -> GeomResult<()> {
        let n = self.curves.len();
        self.replace(n..n, [curve])
    }

    /// Append a curve, first adding a straight segment from the final
    /// point if the curve starts elsewhere.
    ///
    /// # Errors
    ///
    /// Fails as [`Path::replace`] does, which for a closed path means the
    /// new end no longer meets the start.
    pub fn append_stitched(&mut self, curve: Curve) -> GeomResult<()> {
        let end = self.final_point();
        if !self.curves.is_empty() && !curve.start().is_near(end, EPSILON) {
            let bridge = Curve::Line(LineSegment::new(end, curve.start()));
            let n = self.curves.len();
            return self.replace(n..n, [bridge, curve]);
        }
        self.append(curve)
    }

    /// Insert curves before the curve at `index`.
    ///
    /// # Errors
    ///
    /// Fails if `index` is past the end, or if the inserted curves do not
    /// join each other and their neighbours. The path is unchanged on
    /// failure.
    pub fn insert(&mut self, index: usize, curves: impl IntoIterator<Item = Curve>) -> GeomResult<()> {
        self.replace(index..index, curves)
    }

    /// Remove the curves in `range`.
    ///
    /// # Errors
    ///
    /// Fails if `range` is out of bounds, or if the curves on either side
    /// of it do not meet. The path is unchanged on failure.
    pub fn erase(&mut self, range: Range<usize>) -> GeomResult<()> {
        self.replace(range, [])
    }

    /// Remove the last curve, if any.
    ///
    /// Removing the last curve of a closed path opens it.
    pub fn erase_last(&mut self) -> Option<Curve> {
        let curve = self.curves.pop()?;
        if self.curves.is_empty() {
            self.start = curve.start();
        }
        self.closed = false;
        Some(curve)
    }

    /// Remove every curve, keeping the initial point.
    pub fn clear(&mut self) {
        self.start = self.initial_point();
        self.curves.clear();
        self.closed = false;
    }

    /// Replace the curves in `range` with `curves`.
    ///
    /// The edit is checked against the curves on both sides of the range
    /// (and across the closing point of a closed path) before anything
    /// changes.
    ///
    /// # Errors
    ///
    /// [`GeomError::Range`] if `range` is not within the path;
    /// [`GeomError::Continuity`] if the result would not be connected.
    pub fn replace(
        &mut self,
        range: Range<usize>,
        curves: impl IntoIterator<Item = Curve>,
    ) -> GeomResult<()> {
        if range.start > range.end || range.end > self.curves.len() {
            return Err(GeomError::Range("curve range outside the path"));
        }
        let new: Vec<Curve> = curves.into_iter().collect();
        self.check_splice(&range, &new)?;
        let start = self.initial_point();
        self.curves.splice(range, new);
        if self.curves.is_empty() {
            self.start = start;
        }
        Ok(())
    }

    fn check_splice(&self, range: &Range<usize>, new: &[Curve]) -> GeomResult<()> {
        let removed = range.end - range.start;
        let len = self.curves.len() - removed + new.len();
        let at = |i: usize| {
            if i < range.start {
                &self.curves[i]
            } else if i < range.start + new.len() {
                &new[i - range.start]
            } else {
                &self.curves[i - new.len() + removed]
            }
        };
        let first = range.start.saturating_sub(1);
        let last = (range.start + new.len()).min(len.saturating_sub(1));
        for i in first..last {
            let (end, start) = (at(i).end(), at(i + 1).start());
            if !end.is_near(start, EPSILON) {
                return Err(continuity_error(i + 1, end, start));
            }
        }
        if self.closed && len > 0 {
            let (end, start) = (at(len - 1).end(), at(0).start());
            if !end.is_near(start, EPSILON) {
                return Err(continuity_error(0, end, start));
            }
        }
        Ok(())
    }

    fn check_time(&self, name: &'static str, t: f64) -> GeomResult<()> {
        GeomError::check_time(name, t, 0.0, self.curves.len() as f64)
    }

    /// Split a path time into a curve index and a time on that curve.
    ///
    /// The end of the path maps to the end of the last curve.
    fn split_time(&self, t: f64) -> (usize, f64) {
        let last = self.curves.len().saturating_sub(1);
        let i = (t.floor().max(0.0) as usize).min(last);
        (i, t - i as f64)
    }

    /// The point at path time `t`.
    ///
    /// # Errors
    ///
    /// Fails if `t` is outside `[0, len]`. An empty path has only time 0,
    /// which maps to its initial point.
    pub fn point_at(&self, t: f64) -> GeomResult<Point> {
        self.check_time("t", t)?;
        if self.curves.is_empty() {
            return Ok(self.start);
        }
        let (i, local) = self.split_time(t);
        Ok(self.curves[i].eval(local))
    }

    /// One coordinate of the point at path time `t`.
    ///
    /// # Errors
    ///
    /// Fails as [`Path::point_at`] does.
    pub fn value_at(&self, t: f64, dim: Dim2) -> GeomResult<f64> {
        Ok(self.point_at(t)?[dim])
    }

    /// The path times at which coordinate `dim` equals `v`, ascending.
    ///
    /// A root at a vertex is reported once.
    pub fn roots(&self, v: f64, dim: Dim2) -> Vec<f64> {
        let mut result: Vec<f64> = Vec::new();
        for (i, c) in self.curves.iter().enumerate() {
            for t in c.roots(v, dim) {
                let pt = i as f64 + t;
                if result.last().map_or(true, |&last| pt - last > EPSILON) {
                    result.push(pt);
                }
            }
        }
        if self.closed && result.len() > 1 {
            let n = self.curves.len() as f64;
            if result[0] < EPSILON && n - result[result.len() - 1] < EPSILON {
                result.pop();
            }
        }
        result
    }

    /// The path time nearest to `p`, or `None` for an empty path.
    pub fn nearest_time(&self, p: Point) -> Option<Nearest> {
        if self.curves.is_empty() {
            return None;
        }
        self.nearest_time_in(p, 0.0..self.curves.len() as f64).ok()
    }

    /// The path time in `range` nearest to `p`.
    ///
    /// # Errors
    ///
    /// Fails if the path is empty or `range` is not within `[0, len]`.
    pub fn nearest_time_in(&self, p: Point, range: Range<f64>) -> GeomResult<Nearest> {
        if self.curves.is_empty() {
            return Err(GeomError::Range("nearest time on an empty path"));
        }
        self.check_time("from", range.start)?;
        self.check_time("to", range.end)?;
        let (from, to) = if range.start <= range.end {
            (range.start, range.end)
        } else {
            (range.end, range.start)
        };
        let (fi, ft) = self.split_time(from);
        let (ti, tt) = self.split_time(to);
        let mut best = Nearest {
            distance_sq: f64::INFINITY,
            t: from,
        };
        for i in fi..=ti {
            let lo = if i == fi { ft } else { 0.0 };
            let hi = if i == ti { tt } else { 1.0 };
            let n = self.curves[i].nearest(p, lo..hi);
            if n.distance_sq < best.distance_sq {
                best = Nearest {
                    distance_sq: n.distance_sq,
                    t: i as f64 + n.t,
                };
            }
        }
        Ok(best)
    }

    /// The part of the path between two path times.
    ///
    /// See [`Path::append_portion_to`] for the treatment of `from > to`.
    pub fn portion(&self, from: f64, to: f64) -> GeomResult<Path> {
        let mut out = Path::starting_at(self.point_at(from)?);
        self.append_portion_to(&mut out, from, to)?;
        Ok(out)
    }

    /// Append the part of the path between two path times to `target`.
    ///
    /// When `from > to` a closed path is followed forwards through its
    /// closing point, while an open path is followed backwards.
    ///
    /// # Errors
    ///
    /// Fails if either time is outside `[0, len]`, or if the portion does
    /// not start at `target`'s final point.
    pub fn append_portion_to(&self, target: &mut Path, from: f64, to: f64) -> GeomResult<()> {
        self.check_time("from", from)?;
        self.check_time("to", to)?;
        if from == to || self.curves.is_empty() {
            return Ok(());
        }
        let mut pieces = Vec::new();
        if from < to {
            self.forward_pieces(from, to, &mut pieces);
        } else if self.closed {
            self.forward_pieces(from, self.curves.len() as f64, &mut pieces);
            self.forward_pieces(0.0, to, &mut pieces);
        } else {
            self.forward_pieces(to, from, &mut pieces);
            pieces.reverse();
            for c in &mut pieces {
                *c = c.reverse();
            }
        }
        let n = target.curves.len();
        target.replace(n..n, pieces)
    }

    fn forward_pieces(&self, from: f64, to: f64, out: &mut Vec<Curve>) {
        let (fi, _) = self.split_time(from);
        let (ti, _) = self.split_time(to);
        for i in fi..=ti {
            let lo = (from - i as f64).max(0.0);
            let hi = (to - i as f64).min(1.0);
            if lo < hi {
                let c = &self.curves[i];
                out.push(if lo == 0.0 && hi == 1.0 {
                    c.clone()
                } else {
                    c.subsegment(lo..hi)
                });
            }
        }
    }

    /// The path traversed backwards.
    #[must_use]
    pub fn reverse(&self) -> Path {
        Path {
            curves: self.curves.iter().rev().map(Curve::reverse).collect(),
            start: self.final_point(),
            closed: self.closed,
        }
    }

    /// The image of the path under `affine`.
    #[must_use]
    pub fn transform(&self, affine: Affine) -> Path {
        Path {
            curves: self.curves.iter().map(|c| c.transform(affine)).collect(),
            start: affine * self.start,
            closed: self.closed,
        }
    }

    /// A cheap bounding box, or `None` for an empty path.
    pub fn bounds_fast(&self) -> Option<Rect> {
        self.curves
            .iter()
            .map(Curve::bounds_fast)
            .reduce(|a, b| a.union(b))
    }

    /// The tight bounding box, or `None` for an empty path.
    pub fn bounds_exact(&self) -> Option<Rect> {
        self.curves
            .iter()
            .map(Curve::bounds_exact)
            .reduce(|a, b| a.union(b))
    }

    /// The path as a piecewise polynomial over `[0, len]`.
    pub fn to_pw_sb(&self) -> Piecewise<D2<SBasis>> {
        let mut pw = Piecewise::new();
        for (i, c) in self.curves.iter().enumerate() {
            pw.push(c.to_sbasis(), (i + 1) as f64);
        }
        pw
    }

    /// The signed area enclosed, positive for anti-clockwise paths in a
    /// y-up frame.
    ///
    /// An open path is closed by a straight chord for this purpose.
    pub fn signed_area(&self) -> f64 {
        self.to_pw_sb().signed_area()
    }

    /// Whether the path runs anti-clockwise, that is, encloses positive
    /// area.
    pub fn path_direction(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// The total arc length.
    pub fn length(&self, accuracy: f64) -> f64 {
        let n = self.curves.len().max(1) as f64;
        self.curves.iter().map(|c| c.length(accuracy / n)).sum()
    }

    /// The winding number of the path around `p`.
    ///
    /// Counted along a horizontal ray towards `+x`. The top edge of every
    /// curve's bounding box is excluded, which makes horizontal segments
    /// and vertices on the ray count consistently. Meaningful for closed
    /// paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use sbgeom::{Path, Point, Rect};
    ///
    /// let square = Path::rect(Rect::new(0.0, 0.0, 2.0, 2.0));
    /// assert_eq!(square.winding(Point::new(1.0, 1.0)), 1);
    /// assert_eq!(square.winding(Point::new(3.0, 1.0)), 0);
    /// assert_eq!(square.reverse().winding(Point::new(1.0, 1.0)), -1);
    /// ```
    pub fn winding(&self, p: Point) -> i32 {
        let mut wind = 0;
        for c in &self.curves {
            let bounds = c.bounds_fast();
            if bounds.height() == 0.0 {
                continue;
            }
            if p.x > bounds.x1 || !bounds.axis(Dim2::Y).lower_contains(p.y) {
                continue;
            }
            if p.x < bounds.x0 {
                // Left of the box the curve acts like its chord.
                let (ip, fp) = (c.start(), c.end());
                let chord = Rect::from_points(ip, fp);
                if chord.axis(Dim2::Y).lower_contains(p.y) {
                    if ip.y < fp.y {
                        wind += 1;
                    } else if ip.y > fp.y {
                        wind -= 1;
                    }
                }
            } else {
                wind += c.winding(p).unwrap_or(0);
            }
        }
        wind
    }
}

impl Index<usize> for Path {
    type Output = Curve;

    fn index(&self, index: usize) -> &Curve {
        &self.curves[index]
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Curve;
    type IntoIter = core::slice::Iter<'a, Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::PI;

    use super::*;
    use crate::{CubicBez, EllipticalArc, QuadBez, Vec2};

    fn square() -> Path {
        Path::rect(Rect::new(0.0, 0.0, 2.0, 2.0))
    }

    fn line(p0: (f64, f64), p1: (f64, f64)) -> Curve {
        Curve::Line(LineSegment::new(p0, p1))
    }

    fn half_disk() -> Path {
        let arc = EllipticalArc::from_svg(
            Point::new(1.0, 0.0),
            Point::new(-1.0, 0.0),
            Vec2::new(1.0, 1.0),
            0.0,
            false,
            true,
        )
        .unwrap();
        let mut p = Path::from_curves([line((-1.0, 0.0), (1.0, 0.0)), Curve::Arc(arc)]).unwrap();
        p.set_closed(true).unwrap();
        p
    }

    #[test]
    fn build_and_close() {
        let p = square();
        assert_eq!(p.len(), 4);
        assert!(p.is_closed());
        assert_eq!(p.initial_point(), Point::ZERO);
        assert_eq!(p.final_point(), Point::ZERO);
        assert_eq!(p[1].start(), Point::new(2.0, 0.0));
        assert_eq!(p.iter().count(), 4);

        let mut open = Path::from_polyline([Point::ZERO, Point::new(1.0, 0.0)], false);
        assert!(open.set_closed(true).is_err());
        assert!(!open.is_closed());
        open.close();
        assert_eq!(open.len(), 2);
        assert!(open.is_closed());
    }

    #[test]
    fn append_checks_continuity() {
        let mut p = Path::new();
        p.append(line((1.0, 1.0), (2.0, 1.0))).unwrap();
        assert_eq!(p.initial_point(), Point::new(1.0, 1.0));
        let before = p.clone();
        let err = p.append(line((3.0, 1.0), (4.0, 1.0))).unwrap_err();
        assert_eq!(err, GeomError::Continuity { index: 1, gap: 1.0 });
        assert_eq!(p, before);
        p.append_stitched(line((3.0, 1.0), (4.0, 1.0))).unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.final_point(), Point::new(4.0, 1.0));
    }

    #[test]
    fn replace_is_all_or_nothing() {
        let mut p = square();
        let before = p.clone();
        // Breaks the closing point.
        assert!(p.erase(3..4).is_err());
        assert!(p.replace(1..2, [line((2.0, 0.0), (3.0, 3.0))]).is_err());
        assert!(p.replace(2..9, []).unwrap_err().is_range());
        assert_eq!(p, before);

        // Split the right edge in two.
        p.replace(
            1..2,
            [line((2.0, 0.0), (2.0, 1.0)), line((2.0, 1.0), (2.0, 2.0))],
        )
        .unwrap();
        assert_eq!(p.len(), 5);
        assert!((p.signed_area() - 4.0).abs() < 1e-12);

        p.insert(0, [line((0.0, 0.0), (0.0, 0.0))]).unwrap();
        assert_eq!(p.len(), 6);
        assert_eq!(p.erase_last(), Some(line((0.0, 2.0), (0.0, 0.0))));
        assert!(!p.is_closed());
        p.clear();
        assert!(p.is_empty());
        assert_eq!(p.initial_point(), Point::ZERO);
    }

    #[test]
    fn path_time() {
        let p = square();
        assert_eq!(p.point_at(0.5).unwrap(), Point::new(1.0, 0.0));
        assert_eq!(p.point_at(4.0).unwrap(), Point::ZERO);
        assert_eq!(p.value_at(1.5, Dim2::Y).unwrap(), 1.0);
        assert!(p.point_at(4.5).unwrap_err().is_range());
        assert!(p.point_at(-0.1).is_err());
        assert_eq!(p.roots(1.0, Dim2::Y), [1.5, 3.5]);
        // The origin is a vertex touched at both ends of the closed path.
        assert_eq!(p.roots(0.0, Dim2::X).len(), 2);
    }

    #[test]
    fn nearest() {
        let p = square();
        let n = p.nearest_time(Point::new(3.0, 1.0)).unwrap();
        assert!((n.t - 1.5).abs() < 1e-9);
        assert!((n.distance_sq - 1.0).abs() < 1e-9);
        let n = p.nearest_time_in(Point::new(3.0, 1.0), 2.0..4.0).unwrap();
        assert!((n.t - 2.0).abs() < 1e-9);
        assert!(p.nearest_time_in(Point::ZERO, 0.0..5.0).is_err());
        assert!(Path::new().nearest_time(Point::ZERO).is_none());
    }

    #[test]
    fn portions() {
        let p = square();
        let part = p.portion(0.5, 2.5).unwrap();
        assert_eq!(part.len(), 3);
        assert_eq!(part.initial_point(), Point::new(1.0, 0.0));
        assert_eq!(part.final_point(), Point::new(1.0, 2.0));

        // Wraps through the closing point.
        let wrap = p.portion(3.5, 0.5).unwrap();
        assert_eq!(wrap.len(), 2);
        assert_eq!(wrap.initial_point(), Point::new(0.0, 1.0));
        assert_eq!(wrap.final_point(), Point::new(1.0, 0.0));

        // Open paths run backwards.
        let open = Path::from_polyline(
            [Point::ZERO, Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
            false,
        );
        let back = open.portion(1.5, 0.5).unwrap();
        assert_eq!(back.initial_point(), Point::new(1.0, 0.5));
        assert_eq!(back.final_point(), Point::new(0.5, 0.0));
        assert_eq!(back.len(), 2);

        let mut target = Path::starting_at((9.0, 9.0));
        target.append(line((9.0, 9.0), (1.0, 0.0))).unwrap();
        assert!(p.append_portion_to(&mut target, 0.0, 1.0).is_err());
        assert!(p.append_portion_to(&mut target, 0.5, 1.0).is_ok());
        assert_eq!(target.final_point(), Point::new(2.0, 0.0));
    }

    #[test]
    fn area_and_direction() {
        let p = square();
        assert!((p.signed_area() - 4.0).abs() < 1e-12);
        assert!(p.path_direction());
        let r = p.reverse();
        assert!((r.signed_area() + 4.0).abs() < 1e-12);
        assert!(!r.path_direction());
        assert_eq!(r.initial_point(), Point::ZERO);
        assert!((p.length(1e-9) - 8.0).abs() < 1e-9);
        let disk = half_disk();
        assert!((disk.signed_area() - PI / 2.0).abs() < 1e-5);
        let moved = p.transform(Affine::translate((1.0, 1.0)));
        assert_eq!(moved.bounds_exact(), Some(Rect::new(1.0, 1.0, 3.0, 3.0)));
    }

    #[test]
    fn winding_numbers() {
        let p = square();
        assert_eq!(p.winding(Point::new(1.0, 1.0)), 1);
        assert_eq!(p.winding(Point::new(-1.0, 1.0)), 0);
        assert_eq!(p.winding(Point::new(3.0, 1.0)), 0);
        assert_eq!(p.winding(Point::new(1.0, 3.0)), 0);
        // On the level of a horizontal edge and of a vertex.
        assert_eq!(p.winding(Point::new(1.0, 0.0)), 1);
        assert_eq!(p.winding(Point::new(-1.0, 0.0)), 0);
        assert_eq!(p.winding(Point::new(-1.0, 2.0)), 0);

        let disk = half_disk();
        assert_eq!(disk.winding(Point::new(0.0, 0.5)), 1);
        assert_eq!(disk.winding(Point::new(0.9, 0.9)), 0);
        assert_eq!(disk.winding(Point::new(-2.0, 0.5)), 0);
        assert_eq!(disk.reverse().winding(Point::new(0.2, 0.2)), -1);
    }

    #[test]
    fn winding_with_cubic() {
        // A teardrop: a cubic bulging to the right, closed by a line.
        let c = CubicBez::new((0.0, 0.0), (3.0, 0.0), (3.0, 2.0), (0.0, 2.0));
        let mut p = Path::from_curves([Curve::Cubic(c)]).unwrap();
        p.close();
        assert_eq!(p.winding(Point::new(1.0, 1.0)), 1);
        // Below the curve's flat start.
        assert_eq!(p.winding(Point::new(1.0, 0.0)), 0);
        assert_eq!(p.winding(Point::new(2.5, 1.0)), 0);
        assert_eq!(p.winding(Point::new(-0.5, 1.0)), 0);
    }

    #[test]
    fn winding_with_root_on_the_split_point() {
        // y(t) = (t - 0.5)(t - 0.75): the curve dips below the x axis
        // between x = 1 and x = 1.5 before the line closes it from above.
        let q = QuadBez::new((0.0, 0.375), (1.0, -0.25), (2.0, 0.125));
        let mut p = Path::from_curves([Curve::Quad(q)]).unwrap();
        p.close();
        assert_eq!(p.roots(0.0, Dim2::Y).len(), 2);
        assert_eq!(p.winding(Point::new(1.2, 0.0)), 1);
        assert_eq!(p.winding(Point::new(1.45, 0.0)), 1);
        assert_eq!(p.winding(Point::new(0.5, 0.0)), 0);
        assert_eq!(p.winding(Point::new(1.7, 0.0)), 0);
    }
}
