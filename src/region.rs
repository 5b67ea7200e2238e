// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Areas bounded by a single closed path.

use crate::{self_crossings, Affine, GeomError, GeomResult, Path, Point, Rect};

/// The area enclosed by a closed path, or its complement.
///
/// The boundary always runs anti-clockwise (in a y-up frame) around a
/// filled region and clockwise around a hole, so the area a region
/// includes is on the left of its boundary.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    boundary: Path,
    fill: bool,
    bounds: Rect,
}

impl Region {
    /// A region bounded by `boundary`, filled when the path runs
    /// anti-clockwise.
    ///
    /// An open path is closed with a straight segment.
    pub fn new(mut boundary: Path) -> Region {
        if !boundary.is_closed() {
            boundary.close();
        }
        let fill = boundary.path_direction();
        let bounds = boundary.bounds_exact().unwrap_or_default();
        Region {
            boundary,
            fill,
            bounds,
        }
    }

    /// A region with the given fill, reversing `boundary` if it runs the
    /// wrong way for it.
    pub fn with_fill(boundary: Path, fill: bool) -> Region {
        let region = Region::new(boundary);
        if region.fill == fill {
            region
        } else {
            region.inverse()
        }
    }

    /// The boundary path.
    #[inline]
    pub fn boundary(&self) -> &Path {
        &self.boundary
    }

    /// Replace the boundary, keeping the fill.
    pub fn set_boundary(&mut self, boundary: Path) {
        *self = Region::with_fill(boundary, self.fill);
    }

    /// Whether the region is filled rather than a hole.
    #[inline]
    pub fn fill(&self) -> bool {
        self.fill
    }

    /// The bounding box of the boundary.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The number of curves in the boundary.
    #[inline]
    pub fn len(&self) -> usize {
        self.boundary.len()
    }

    /// Whether the boundary has no curves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boundary.is_empty()
    }

    /// The complementary region: the boundary reversed, the fill flipped.
    #[must_use]
    pub fn inverse(&self) -> Region {
        Region {
            boundary: self.boundary.reverse(),
            fill: !self.fill,
            bounds: self.bounds,
        }
    }

    /// Whether `p` lies inside the boundary, whatever the fill.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p) && self.boundary.winding(p) != 0
    }

    /// Whether the boundary of `other` lies inside this one.
    ///
    /// Only meaningful when the two boundaries do not cross.
    pub fn contains_region(&self, other: &Region) -> bool {
        self.bounds.contains_rect(&other.bounds) && self.contains(other.boundary.initial_point())
    }

    /// Whether `p` belongs to the area the region includes: the inside of
    /// a filled region, the outside of a hole.
    pub fn includes(&self, p: Point) -> bool {
        self.fill == self.contains(p)
    }

    /// The image of the region under `affine`.
    ///
    /// A reflection reverses the boundary, which is then turned back so
    /// the fill is preserved.
    #[must_use]
    pub fn transform(&self, affine: Affine) -> Region {
        Region::with_fill(self.boundary.transform(affine), self.fill)
    }

    /// Check that the boundary is closed, runs the right way for the fill
    /// and does not cross itself.
    pub fn invariants(&self) -> GeomResult<()> {
        if !self.boundary.is_closed() {
            return Err(GeomError::Logic("region boundary is not closed"));
        }
        if !self.boundary.is_empty() && self.boundary.path_direction() != self.fill {
            return Err(GeomError::Logic("region boundary runs against its fill"));
        }
        if !self_crossings(&self.boundary).is_empty() {
            return Err(GeomError::Logic("region boundary crosses itself"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Path {
        Path::rect(Rect::new(x0, y0, x0 + size, y0 + size))
    }

    #[test]
    fn fill_follows_direction() {
        let r = Region::new(square(0.0, 0.0, 2.0));
        assert!(r.fill());
        assert_eq!(r.bounds(), Rect::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(r.len(), 4);
        let hole = Region::new(square(0.0, 0.0, 2.0).reverse());
        assert!(!hole.fill());
        let forced = Region::with_fill(square(0.0, 0.0, 2.0), false);
        assert!(!forced.fill());
        assert!(!forced.boundary().path_direction());
        assert!(r.invariants().is_ok() && hole.invariants().is_ok());
    }

    #[test]
    fn containment() {
        let r = Region::new(square(0.0, 0.0, 2.0));
        let inside = Point::new(1.0, 1.0);
        let outside = Point::new(3.0, 1.0);
        assert!(r.contains(inside) && !r.contains(outside));
        assert!(r.includes(inside) && !r.includes(outside));
        let inv = r.inverse();
        assert!(inv.contains(inside));
        assert!(!inv.includes(inside) && inv.includes(outside));
        let small = Region::new(square(0.5, 0.5, 1.0));
        assert!(r.contains_region(&small));
        assert!(!small.contains_region(&r));
    }

    #[test]
    fn transform_keeps_fill() {
        let r = Region::new(square(0.0, 0.0, 2.0));
        let flipped = r.transform(Affine::FLIP_Y);
        assert!(flipped.fill());
        assert!(flipped.boundary().path_direction());
        assert_eq!(flipped.bounds(), Rect::new(0.0, -2.0, 2.0, 0.0));
        assert!(flipped.contains(Point::new(1.0, -1.0)));
    }

    #[test]
    fn invariant_failures() {
        let open = Path::from_polyline([Point::ZERO, Point::new(1.0, 0.0), Point::new(1.0, 1.0)], false);
        let mut r = Region::new(open);
        assert!(r.boundary().is_closed());
        assert!(r.invariants().is_ok());
        let bow = Path::from_polyline(
            [
                Point::new(0.0, 0.0),
                Point::new(2.0, 2.0),
                Point::new(2.0, 0.0),
                Point::new(0.0, 2.0),
            ],
            true,
        );
        r.set_boundary(bow);
        assert!(matches!(r.invariants(), Err(GeomError::Logic(_))));
    }
}
