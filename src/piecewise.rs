// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Functions defined piece by piece over a partition of an interval.

use alloc::vec::Vec;

use crate::{Interval, Point, SBasis, D2};

/// A function made of segments, each reparameterized over `[0, 1]`.
///
/// Segment `i` covers `[cuts[i], cuts[i + 1]]`, so there is always one more
/// cut than segment unless both are empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Piecewise<T> {
    cuts: Vec<f64>,
    segs: Vec<T>,
}

impl<T> Piecewise<T> {
    /// An empty function.
    pub fn new() -> Piecewise<T> {
        Piecewise {
            cuts: Vec::new(),
            segs: Vec::new(),
        }
    }

    /// A single segment over `[0, 1]`.
    pub fn from_segment(seg: T) -> Piecewise<T> {
        let mut pw = Piecewise::new();
        pw.push(seg, 1.0);
        pw
    }

    /// Append a segment ending at `to`.
    ///
    /// The first segment starts at 0. `to` must exceed the previous cut.
    pub fn push(&mut self, seg: T, to: f64) {
        if self.cuts.is_empty() {
            self.cuts.push(0.0);
        }
        debug_assert!(
            self.cuts.last().is_some_and(|&c| c < to),
            "cuts must increase"
        );
        self.cuts.push(to);
        self.segs.push(seg);
    }

    /// The number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segs.len()
    }

    /// Whether there are no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }

    /// The segments.
    #[inline]
    pub fn segs(&self) -> &[T] {
        &self.segs
    }

    /// The cut points.
    #[inline]
    pub fn cuts(&self) -> &[f64] {
        &self.cuts
    }

    /// The interval the function is defined over.
    pub fn domain(&self) -> Option<Interval> {
        Some(Interval::new(*self.cuts.first()?, *self.cuts.last()?))
    }

    /// The segment containing `t` and the local time within it.
    ///
    /// Times outside the domain clamp to the first or last segment.
    pub fn segment_time(&self, t: f64) -> Option<(usize, f64)> {
        if self.segs.is_empty() {
            return None;
        }
        let i = self
            .cuts
            .partition_point(|&c| c <= t)
            .saturating_sub(1)
            .min(self.segs.len() - 1);
        let (c0, c1) = (self.cuts[i], self.cuts[i + 1]);
        Some((i, (t - c0) / (c1 - c0)))
    }
}

impl Piecewise<D2<SBasis>> {
    /// Evaluate at `t`, or `None` when there are no segments.
    pub fn value_at(&self, t: f64) -> Option<Point> {
        let (i, local) = self.segment_time(t)?;
        Some(self.segs[i].value_at(local))
    }

    /// The signed area enclosed, positive when the curve runs
    /// anti-clockwise in a y-up frame.
    ///
    /// Computed as `½ ∫ (x y' - y x')`, which is exact for polynomial
    /// segments. An open curve is treated as closed by a straight chord.
    pub fn signed_area(&self) -> f64 {
        let mut area = 0.0;
        for seg in &self.segs {
            let d = seg.derivative();
            let integrand = seg.x.multiply(&d.y) - seg.y.multiply(&d.x);
            let integral = integrand.integral();
            area += integral.at1() - integral.at0();
        }
        if let (Some(first), Some(last)) = (self.segs.first(), self.segs.last()) {
            let (p0, p1) = (last.at1(), first.at0());
            area += p0.x * p1.y - p0.y * p1.x;
        }
        0.5 * area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Piecewise<D2<SBasis>> {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ];
        let mut pw = Piecewise::new();
        for i in 0..4 {
            pw.push(D2::line(pts[i], pts[(i + 1) % 4]), (i + 1) as f64);
        }
        pw
    }

    #[test]
    fn segment_lookup() {
        let pw = square();
        assert_eq!(pw.len(), 4);
        assert_eq!(pw.segment_time(1.5), Some((1, 0.5)));
        assert_eq!(pw.segment_time(4.0), Some((3, 1.0)));
        assert_eq!(pw.segment_time(-1.0).map(|s| s.0), Some(0));
        assert_eq!(pw.domain(), Some(Interval::new(0.0, 4.0)));
        assert!(pw.value_at(2.5).unwrap().distance(Point::new(1.0, 2.0)) < 1e-12);
        assert!(Piecewise::<D2<SBasis>>::new().value_at(0.0).is_none());
    }

    #[test]
    fn area_sign() {
        let pw = square();
        assert!((pw.signed_area() - 4.0).abs() < 1e-12);
        let mut rev = Piecewise::new();
        for (i, seg) in pw.segs().iter().rev().enumerate() {
            rev.push(seg.reverse(), (i + 1) as f64);
        }
        assert!((rev.signed_area() + 4.0).abs() < 1e-12);
    }
}
