// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shapes built from regions, and boolean operations on them.

use core::ops::BitOr;

use alloc::vec;
use alloc::vec::Vec;

use crate::common::EPSILON;
use crate::{
    crossings_among, crossings_between, Affine, CrossingSet, GeomError, GeomResult, Path, Point,
    Rect, Region,
};

/// A set of points in the plane, bounded by non-crossing regions.
///
/// Regions nest: each lies inside or outside every other. A point belongs
/// to the shape when the innermost region around it is filled. Points
/// outside every region belong to the shape when `fill` is false, so a
/// shape with `fill` set is bounded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    regions: Vec<Region>,
    fill: bool,
}

impl Default for Shape {
    fn default() -> Shape {
        Shape::new(true)
    }
}

impl Shape {
    /// A shape with no regions: empty when `fill` is set, the whole plane
    /// otherwise.
    pub fn new(fill: bool) -> Shape {
        Shape {
            regions: Vec::new(),
            fill,
        }
    }

    /// A shape made of a single region.
    pub fn from_region(region: Region) -> Shape {
        let fill = region.fill();
        Shape {
            regions: vec![region],
            fill,
        }
    }

    /// A shape made of nested regions.
    ///
    /// The fill is taken from the outermost region, the one with the
    /// largest bounding box.
    pub fn from_regions(regions: Vec<Region>) -> Shape {
        let fill = regions
            .iter()
            .max_by(|a, b| a.bounds().area().total_cmp(&b.bounds().area()))
            .map_or(true, Region::fill);
        Shape { regions, fill }
    }

    /// The regions.
    #[inline]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Whether the outermost regions are filled.
    #[inline]
    pub fn fill(&self) -> bool {
        self.fill
    }

    /// Whether the shape contains no points.
    pub fn is_empty(&self) -> bool {
        self.fill && self.regions.is_empty()
    }

    /// The complement of the shape.
    #[must_use]
    pub fn inverse(&self) -> Shape {
        Shape {
            regions: self.regions.iter().map(Region::inverse).collect(),
            fill: !self.fill,
        }
    }

    /// The indices of the regions whose boundary encloses `p`, outermost
    /// first.
    pub fn containment_list(&self, p: Point) -> Vec<usize> {
        let mut list: Vec<usize> = (0..self.regions.len())
            .filter(|&i| self.regions[i].contains(p))
            .collect();
        list.sort_by(|&i, &j| {
            let (a, b) = (self.regions[i].bounds().area(), self.regions[j].bounds().area());
            b.total_cmp(&a)
        });
        list
    }

    /// Whether `p` belongs to the shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use sbgeom::{Path, Point, Rect, Region, Shape};
    ///
    /// let square = Shape::from_region(Region::new(Path::rect(Rect::new(0.0, 0.0, 2.0, 2.0))));
    /// assert!(square.contains(Point::new(1.0, 1.0)));
    /// assert!(!square.contains(Point::new(3.0, 1.0)));
    /// assert!(square.inverse().contains(Point::new(3.0, 1.0)));
    /// ```
    pub fn contains(&self, p: Point) -> bool {
        match self.containment_list(p).last() {
            Some(&i) => self.regions[i].fill(),
            None => !self.fill,
        }
    }

    /// The image of the shape under `affine`.
    #[must_use]
    pub fn transform(&self, affine: Affine) -> Shape {
        Shape {
            regions: self.regions.iter().map(|r| r.transform(affine)).collect(),
            fill: self.fill,
        }
    }

    /// The bounding box of all regions, or `None` without regions.
    pub fn bounds(&self) -> Option<Rect> {
        self.regions.iter().map(Region::bounds).reduce(|a, b| a.union(b))
    }

    /// Check that every region is valid, that no two regions cross, and
    /// that fills alternate from the outside in.
    pub fn invariants(&self) -> GeomResult<()> {
        for r in &self.regions {
            r.invariants()?;
        }
        let boundaries: Vec<&Path> = self.regions.iter().map(Region::boundary).collect();
        if crossings_among(&boundaries).iter().any(|l| !l.is_empty()) {
            return Err(GeomError::Logic("shape regions cross each other"));
        }
        for (i, r) in self.regions.iter().enumerate() {
            let depth = self
                .regions
                .iter()
                .enumerate()
                .filter(|&(j, other)| j != i && other.contains_region(r))
                .count();
            if r.fill() != (self.fill ^ (depth % 2 == 1)) {
                return Err(GeomError::Logic("shape region fills do not alternate"));
            }
        }
        Ok(())
    }
}

/// A truth table selecting the result of a boolean operation.
///
/// Each bit says whether points in one of the four zones of the plane
/// belong to the result: only in `a`, only in `b`, in both, or in neither.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoolFlags(u8);

impl BoolFlags {
    /// Points only in `a`.
    pub const JUST_A: BoolFlags = BoolFlags(1);
    /// Points only in `b`.
    pub const JUST_B: BoolFlags = BoolFlags(2);
    /// Points in both.
    pub const BOTH: BoolFlags = BoolFlags(4);
    /// Points in neither.
    pub const NEITHER: BoolFlags = BoolFlags(8);

    /// The empty result.
    pub const NULL: BoolFlags = BoolFlags(0);
    /// `a ∩ b`.
    pub const INTERSECT: BoolFlags = BoolFlags(4);
    /// `a - b`.
    pub const SUBTRACT_A_B: BoolFlags = BoolFlags(1);
    /// `b - a`.
    pub const SUBTRACT_B_A: BoolFlags = BoolFlags(2);
    /// `a` unchanged.
    pub const IDENTITY_A: BoolFlags = BoolFlags(5);
    /// `b` unchanged.
    pub const IDENTITY_B: BoolFlags = BoolFlags(6);
    /// Points in exactly one operand.
    pub const EXCLUSION: BoolFlags = BoolFlags(3);
    /// `a ∪ b`.
    pub const UNION: BoolFlags = BoolFlags(7);
    /// The complement of `a ∪ b`.
    pub const NOT_UNION: BoolFlags = BoolFlags(8);
    /// The complement of `a ∩ b`.
    pub const NOT_INTERSECT: BoolFlags = BoolFlags(11);
    /// The complement of the exclusion.
    pub const NOT_EXCLUSION: BoolFlags = BoolFlags(12);
    /// The complement of `a`.
    pub const NOT_A: BoolFlags = BoolFlags(10);
    /// The complement of `b`.
    pub const NOT_B: BoolFlags = BoolFlags(9);
    /// The whole plane.
    pub const ALL: BoolFlags = BoolFlags(15);

    /// Flags from their bit pattern.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::Range`] when bits above the lowest four are set.
    pub fn from_bits(bits: u8) -> GeomResult<BoolFlags> {
        if bits > 15 {
            return Err(GeomError::Range("boolean operation flags above 15"));
        }
        Ok(BoolFlags(bits))
    }

    /// The bit pattern.
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether every zone of `other` is selected.
    #[inline]
    pub fn contains(self, other: BoolFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// The table selecting exactly the zones this one leaves out.
    #[inline]
    #[must_use]
    pub fn complement(self) -> BoolFlags {
        BoolFlags(!self.0 & 15)
    }
}

impl BitOr for BoolFlags {
    type Output = BoolFlags;

    #[inline]
    fn bitor(self, rhs: BoolFlags) -> BoolFlags {
        BoolFlags(self.0 | rhs.0)
    }
}

/// Union (`rev = false`) or intersection (`rev = true`) of two shapes.
///
/// # Errors
///
/// Returns [`GeomError::NotImplemented`] when a region without crossings
/// cannot be placed inside or outside the other shape, which happens when
/// the boundaries meet along a stretch the crossings do not resolve.
/// Propagates path errors from stitching the result.
///
/// # Examples
///
/// ```
/// use sbgeom::{shape_boolean, Path, Point, Rect, Region, Shape};
///
/// let square = |x: f64, y: f64| {
///     Shape::from_region(Region::new(Path::rect(Rect::new(x, y, x + 2.0, y + 2.0))))
/// };
/// let both = shape_boolean(true, &square(0.0, 0.0), &square(1.0, 1.0)).unwrap();
/// assert_eq!(both.regions().len(), 1);
/// assert!((both.regions()[0].boundary().signed_area() - 1.0).abs() < 1e-9);
/// ```
pub fn shape_boolean(rev: bool, a: &Shape, b: &Shape) -> GeomResult<Shape> {
    let a_paths: Vec<&Path> = a.regions.iter().map(Region::boundary).collect();
    let b_paths: Vec<&Path> = b.regions.iter().map(Region::boundary).collect();
    let crossings = crossings_between(&a_paths, &b_paths);
    shape_boolean_with(rev, a, b, &crossings)
}

/// [`shape_boolean`] with the crossings already computed.
///
/// `crossings` holds one list per region boundary, those of `a` first, as
/// built by [`crossings_between`].
///
/// # Errors
///
/// Returns [`GeomError::Logic`] when the crossing set does not match the
/// shapes, and fails as [`shape_boolean`] does otherwise.
pub fn shape_boolean_with(
    rev: bool,
    a: &Shape,
    b: &Shape,
    crossings: &CrossingSet,
) -> GeomResult<Shape> {
    let na = a.regions.len();
    if crossings.len() != na + b.regions.len() {
        return Err(GeomError::Logic("crossing set does not match the shapes"));
    }
    let region = |ix: usize| {
        if ix < na {
            &a.regions[ix]
        } else {
            &b.regions[ix - na]
        }
    };

    let mut chunks = trace_boundaries(rev, crossings, |ix| region(ix).boundary())?;

    // Regions without crossings are either kept whole or dropped.
    let mut dropped = vec![false; crossings.len()];
    for ix in 0..crossings.len() {
        if !crossings[ix].is_empty() || dropped[ix] {
            continue;
        }
        let r = region(ix);
        let (other, offset) = if ix < na { (b, na) } else { (a, 0) };
        let twin = other
            .regions
            .iter()
            .position(|q| coincident(r, q))
            .filter(|&j| crossings[offset + j].is_empty() && !dropped[offset + j]);
        if let Some(j) = twin {
            // The matching copy is skipped; opposite orientations cancel.
            dropped[offset + j] = true;
            if r.fill() == other.regions[j].fill() {
                chunks.push(r.clone());
            }
            continue;
        }
        if lies_inside(r, other)? == rev {
            chunks.push(r.clone());
        }
    }

    let fill = if rev { a.fill || b.fill } else { a.fill && b.fill };
    log::trace!("boolean produced {} regions", chunks.len());
    Ok(Shape {
        regions: chunks,
        fill,
    })
}

/// Follow boundaries from crossing to crossing, switching operand at each
/// one, and collect the closed loops.
fn trace_boundaries<'a>(
    rev: bool,
    crossings: &CrossingSet,
    boundary: impl Fn(usize) -> &'a Path,
) -> GeomResult<Vec<Region>> {
    let total: usize = crossings.iter().map(Vec::len).sum();
    let mut visited: Vec<Vec<bool>> = crossings.iter().map(|l| vec![false; l.len()]).collect();
    let mut chunks = Vec::new();
    for i in 0..crossings.len() {
        for j in 0..crossings[i].len() {
            if visited[i][j] {
                continue;
            }
            let start = crossings[i][j];
            let mut res = Path::new();
            let (mut ix, mut jx) = (i, j);
            let mut steps = 0;
            loop {
                visited[ix][jx] = true;
                let cur = crossings[ix][jx];
                let io = cur.other(ix);
                let dual = crossings[io].iter().position(|c| *c == cur);
                if let Some(jo) = dual {
                    visited[io][jo] = true;
                }
                let follow = if cur.dir != rev { cur.a } else { cur.b };
                if follow != ix {
                    let Some(jo) = dual else {
                        log::warn!("crossing on path {ix} has no counterpart on path {io}");
                        break;
                    };
                    ix = io;
                    jx = jo;
                }
                let list = &crossings[ix];
                let next_j = (jx + 1) % list.len();
                let path = boundary(ix);
                let from = cur.time_on(ix);
                let to = list[next_j].time_on(ix);
                if next_j == jx {
                    // The only crossing on this path: go all the way round.
                    path.append_portion_to(&mut res, from, path.len() as f64)?;
                    path.append_portion_to(&mut res, 0.0, from)?;
                } else {
                    path.append_portion_to(&mut res, from, to)?;
                }
                jx = next_j;
                steps += 1;
                if visited[ix][jx] {
                    if list[jx] != start {
                        log::warn!("boolean trace closed on a crossing other than its start");
                    }
                    break;
                }
                if steps > total {
                    log::warn!("boolean trace did not close after {steps} steps");
                    break;
                }
            }
            if !res.is_empty() {
                res.close();
                chunks.push(Region::new(res));
            }
        }
    }
    Ok(chunks)
}

/// Whether two regions have the same boundary, up to direction.
fn coincident(r: &Region, q: &Region) -> bool {
    let (a, b) = (r.bounds(), q.bounds());
    let tol = EPSILON * (1.0 + a.max_extent());
    let near = |x: f64, y: f64| (x - y).abs() <= tol;
    if !(near(a.x0, b.x0) && near(a.y0, b.y0) && near(a.x1, b.x1) && near(a.y1, b.y1)) {
        return false;
    }
    samples(r.boundary()).all(|p| {
        q.boundary()
            .nearest_time(p)
            .is_some_and(|n| n.distance_sq <= tol * tol)
    })
}

/// One point in the middle of every curve of a path.
fn samples(path: &Path) -> impl Iterator<Item = Point> + '_ {
    (0..path.len()).filter_map(move |i| path.point_at(i as f64 + 0.5).ok())
}

/// Whether `r`, which does not cross any boundary of `other`, lies inside
/// `other`.
///
/// Decided from points along the boundary of `r` away from the boundaries
/// of `other`. They must exist and must all agree; otherwise the two
/// boundaries meet in a way the crossings did not capture.
fn lies_inside(r: &Region, other: &Shape) -> GeomResult<bool> {
    let clear = |p: Point| {
        other.regions.iter().all(|q| {
            q.boundary()
                .nearest_time(p)
                .map_or(true, |n| n.distance_sq > EPSILON * EPSILON)
        })
    };
    let path = r.boundary();
    let mut verdict = None;
    for i in 0..path.len() {
        for t in [0.25, 0.5, 0.75] {
            let Ok(p) = path.point_at(i as f64 + t) else {
                continue;
            };
            if !clear(p) {
                continue;
            }
            let inside = other.contains(p);
            match verdict {
                None => verdict = Some(inside),
                Some(v) if v != inside => {
                    log::warn!("region is partly inside the other shape without crossing it");
                    return Err(GeomError::NotImplemented(
                        "boolean of boundaries that meet without a resolvable crossing",
                    ));
                }
                Some(_) => {}
            }
        }
    }
    verdict.ok_or(GeomError::NotImplemented(
        "boolean of a region lying on the other operand's boundary",
    ))
}

/// The boolean combination of two shapes selected by `flags`.
///
/// Tables including [`BoolFlags::NEITHER`] are computed as the complement
/// of the opposite table.
///
/// # Errors
///
/// Fails as [`shape_boolean`] does.
pub fn boolop(a: &Shape, b: &Shape, flags: BoolFlags) -> GeomResult<Shape> {
    if flags.contains(BoolFlags::NEITHER) {
        return Ok(boolop(a, b, flags.complement())?.inverse());
    }
    match flags.bits() {
        0 => Ok(Shape::new(true)),
        1 => shape_boolean(true, a, &b.inverse()),
        2 => shape_boolean(true, &a.inverse(), b),
        3 => {
            let ab = boolop(a, b, BoolFlags::SUBTRACT_A_B)?;
            let ba = boolop(a, b, BoolFlags::SUBTRACT_B_A)?;
            shape_boolean(false, &ab, &ba)
        }
        4 => shape_boolean(true, a, b),
        5 => Ok(a.clone()),
        6 => Ok(b.clone()),
        _ => shape_boolean(false, a, b),
    }
}

/// `a ∪ b`.
pub fn shape_union(a: &Shape, b: &Shape) -> GeomResult<Shape> {
    shape_boolean(false, a, b)
}

/// `a ∩ b`.
pub fn shape_intersect(a: &Shape, b: &Shape) -> GeomResult<Shape> {
    shape_boolean(true, a, b)
}

/// `a - b`.
pub fn shape_subtract(a: &Shape, b: &Shape) -> GeomResult<Shape> {
    boolop(a, b, BoolFlags::SUBTRACT_A_B)
}

/// The points in exactly one of `a` and `b`.
pub fn shape_exclude(a: &Shape, b: &Shape) -> GeomResult<Shape> {
    boolop(a, b, BoolFlags::EXCLUSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Curve, EllipticalArc, Vec2};

    fn square(x0: f64, y0: f64, size: f64) -> Shape {
        Shape::from_region(Region::new(Path::rect(Rect::new(x0, y0, x0 + size, y0 + size))))
    }

    fn area(s: &Shape) -> f64 {
        s.regions()
            .iter()
            .map(|r| r.boundary().signed_area())
            .sum()
    }

    fn disk() -> Shape {
        let upper = EllipticalArc::from_svg(
            Point::new(1.0, 0.0),
            Point::new(-1.0, 0.0),
            Vec2::new(1.0, 1.0),
            0.0,
            false,
            true,
        )
        .unwrap();
        let lower = EllipticalArc::from_svg(
            Point::new(-1.0, 0.0),
            Point::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            0.0,
            false,
            true,
        )
        .unwrap();
        let mut p = Path::from_curves([Curve::Arc(upper), Curve::Arc(lower)]).unwrap();
        p.set_closed(true).unwrap();
        Shape::from_region(Region::new(p))
    }

    #[test]
    fn shape_basics() {
        let s = square(0.0, 0.0, 2.0);
        assert!(s.fill());
        assert!(!s.is_empty());
        assert!(Shape::new(true).is_empty());
        assert!(!Shape::new(false).is_empty());
        assert!(Shape::new(false).contains(Point::new(100.0, 0.0)));
        assert_eq!(s.bounds(), Some(Rect::new(0.0, 0.0, 2.0, 2.0)));
        let moved = s.transform(Affine::translate((5.0, 0.0)));
        assert!(moved.contains(Point::new(6.0, 1.0)));
        assert!(s.invariants().is_ok());
        assert!(s.inverse().invariants().is_ok());
    }

    #[test]
    fn nested_regions() {
        let outer = Region::new(Path::rect(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let hole = Region::with_fill(Path::rect(Rect::new(2.0, 2.0, 4.0, 4.0)), false);
        let island = Region::new(Path::rect(Rect::new(2.5, 2.5, 3.5, 3.5)));
        let s = Shape::from_regions(vec![hole, island, outer]);
        assert!(s.fill());
        assert!(s.invariants().is_ok());
        assert!(s.contains(Point::new(1.0, 1.0)));
        assert!(!s.contains(Point::new(2.2, 2.2)));
        assert!(s.contains(Point::new(3.0, 3.0)));
        assert!(!s.contains(Point::new(11.0, 3.0)));
        assert_eq!(s.containment_list(Point::new(3.0, 3.0)), [2, 0, 1]);

        let bad = Shape::from_regions(vec![
            Region::new(Path::rect(Rect::new(0.0, 0.0, 10.0, 10.0))),
            Region::new(Path::rect(Rect::new(2.0, 2.0, 4.0, 4.0))),
        ]);
        assert!(bad.invariants().is_err());
        let crossing = Shape::from_regions(vec![
            Region::new(Path::rect(Rect::new(0.0, 0.0, 2.0, 2.0))),
            Region::new(Path::rect(Rect::new(1.0, 1.0, 3.0, 3.0))),
        ]);
        assert!(crossing.invariants().is_err());
    }

    #[test]
    fn overlapping_squares() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);

        let u = shape_union(&a, &b).unwrap();
        assert_eq!(u.regions().len(), 1);
        assert!((area(&u) - 7.0).abs() < 1e-9);
        assert!(u.contains(Point::new(0.5, 0.5)) && u.contains(Point::new(2.5, 2.5)));
        assert!(!u.contains(Point::new(0.5, 2.5)));
        assert!(u.invariants().is_ok());

        let i = shape_intersect(&a, &b).unwrap();
        assert_eq!(i.regions().len(), 1);
        assert!((area(&i) - 1.0).abs() < 1e-9);
        assert_eq!(i.bounds(), Some(Rect::new(1.0, 1.0, 2.0, 2.0)));

        let d = shape_subtract(&a, &b).unwrap();
        assert!((area(&d) - 3.0).abs() < 1e-9);
        assert!(d.contains(Point::new(0.5, 0.5)));
        assert!(!d.contains(Point::new(1.5, 1.5)));
        let e = boolop(&a, &b, BoolFlags::SUBTRACT_B_A).unwrap();
        assert!((area(&e) - 3.0).abs() < 1e-9);
        assert!(e.contains(Point::new(2.5, 2.5)));

        let x = shape_exclude(&a, &b).unwrap();
        assert_eq!(x.regions().len(), 2);
        assert!((area(&x) - 6.0).abs() < 1e-9);
        assert!(!x.contains(Point::new(1.5, 1.5)));
        assert!(x.contains(Point::new(0.5, 0.5)) && x.contains(Point::new(2.5, 2.5)));
    }

    #[test]
    fn disjoint_and_identical() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(5.0, 0.0, 1.0);
        let u = shape_union(&a, &b).unwrap();
        assert_eq!(u.regions().len(), 2);
        assert!(u.regions().contains(&a.regions()[0]));
        assert!(u.regions().contains(&b.regions()[0]));
        assert!(shape_intersect(&a, &b).unwrap().is_empty());

        assert_eq!(shape_union(&a, &a).unwrap(), a);
        assert_eq!(shape_intersect(&a, &a).unwrap(), a);
        let cancel = shape_union(&a, &a.inverse()).unwrap();
        assert!(cancel.regions().is_empty());
        assert!(!cancel.fill());
        assert!(shape_intersect(&a, &a.inverse()).unwrap().is_empty());
    }

    #[test]
    fn holes_from_subtraction() {
        let big = square(0.0, 0.0, 10.0);
        let small = square(2.0, 2.0, 2.0);
        let ring = shape_subtract(&big, &small).unwrap();
        assert_eq!(ring.regions().len(), 2);
        assert!(ring.fill());
        assert!(ring.contains(Point::new(1.0, 1.0)));
        assert!(!ring.contains(Point::new(3.0, 3.0)));
        assert!((area(&ring) - 96.0).abs() < 1e-9);
        assert!(ring.invariants().is_ok());
        // Filling the hole back in.
        let whole = shape_union(&ring, &small).unwrap();
        assert!(whole.contains(Point::new(3.0, 3.0)));
    }

    #[test]
    fn curved_boundaries() {
        let d = disk();
        let s = Shape::from_region(Region::new(Path::rect(Rect::new(0.0, -2.0, 2.0, 2.0))));
        let half = shape_intersect(&d, &s).unwrap();
        assert_eq!(half.regions().len(), 1);
        assert!((area(&half) - core::f64::consts::FRAC_PI_2).abs() < 1e-4);
        assert!(half.contains(Point::new(0.5, 0.0)));
        assert!(!half.contains(Point::new(-0.5, 0.0)));
        let rest = shape_subtract(&d, &s).unwrap();
        assert!(rest.contains(Point::new(-0.5, 0.0)));
        assert!(!rest.contains(Point::new(0.5, 0.0)));
    }

    #[test]
    fn flags() {
        assert_eq!(BoolFlags::JUST_A | BoolFlags::JUST_B | BoolFlags::BOTH, BoolFlags::UNION);
        assert_eq!(BoolFlags::UNION.complement(), BoolFlags::NOT_UNION);
        assert_eq!(BoolFlags::from_bits(12), Ok(BoolFlags::NOT_EXCLUSION));
        assert!(BoolFlags::from_bits(16).unwrap_err().is_range());

        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        assert!(boolop(&a, &b, BoolFlags::NULL).unwrap().is_empty());
        assert_eq!(boolop(&a, &b, BoolFlags::IDENTITY_A).unwrap(), a);
        assert_eq!(boolop(&a, &b, BoolFlags::IDENTITY_B).unwrap(), b);
        let all = boolop(&a, &b, BoolFlags::ALL).unwrap();
        assert!(all.regions().is_empty() && !all.fill());
        let nor = boolop(&a, &b, BoolFlags::NOT_UNION).unwrap();
        assert!(!nor.contains(Point::new(0.5, 0.5)));
        assert!(nor.contains(Point::new(5.0, 5.0)));
        let nand = boolop(&a, &b, BoolFlags::NOT_INTERSECT).unwrap();
        assert!(!nand.contains(Point::new(1.5, 1.5)));
        assert!(nand.contains(Point::new(0.5, 0.5)));
    }

    #[test]
    fn mismatched_crossings() {
        let a = square(0.0, 0.0, 2.0);
        let err = shape_boolean_with(false, &a, &a, &Vec::new()).unwrap_err();
        assert!(matches!(err, GeomError::Logic(_)));
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Shape::from_region(Region::new(Path::rect(Rect::new(x0, y0, x1, y1))))
    }

    #[test]
    fn shared_edge_stretch() {
        let a = square(0.0, 0.0, 2.0);
        let b = rect(1.0, 0.0, 3.0, 2.0);

        let u = shape_union(&a, &b).unwrap();
        assert_eq!(u.regions().len(), 1);
        assert!((area(&u) - 6.0).abs() < 1e-9);
        assert!(u.contains(Point::new(0.5, 1.0)) && u.contains(Point::new(2.5, 1.0)));
        assert!(!u.contains(Point::new(3.5, 1.0)));

        let i = shape_intersect(&a, &b).unwrap();
        assert_eq!(i.regions().len(), 1);
        assert!((area(&i) - 2.0).abs() < 1e-9);
        assert!(i.contains(Point::new(1.5, 1.0)));
        assert!(!i.contains(Point::new(0.5, 1.0)) && !i.contains(Point::new(2.5, 1.0)));
    }

    #[test]
    fn touching_along_part_of_an_edge() {
        let a = square(0.0, 0.0, 2.0);
        let b = rect(2.0, 0.5, 3.0, 1.5);

        let u = shape_union(&a, &b).unwrap();
        assert_eq!(u.regions().len(), 2);
        assert!((area(&u) - 5.0).abs() < 1e-9);
        assert!(shape_intersect(&a, &b).unwrap().is_empty());
    }

    #[test]
    fn unresolved_overlap_is_an_error() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        let err = shape_boolean_with(false, &a, &b, &vec![Vec::new(); 2]).unwrap_err();
        assert!(matches!(err, GeomError::NotImplemented(_)));
    }
}
