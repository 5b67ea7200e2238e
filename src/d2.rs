// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifting scalar functions into the plane.

use core::ops::{Index, IndexMut};

use alloc::vec::Vec;

use crate::{Affine, Dim2, Interval, Linear, Point, Rect, SBasis, Vec2};

/// A pair of values, one per coordinate.
///
/// `D2<SBasis>` is the polynomial form of every curve in the crate.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct D2<T> {
    /// The x component.
    pub x: T,
    /// The y component.
    pub y: T,
}

impl<T> D2<T> {
    /// Create a pair from its components.
    #[inline]
    pub const fn new(x: T, y: T) -> D2<T> {
        D2 { x, y }
    }

    /// Apply `f` to both components.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> D2<U> {
        D2::new(f(&self.x), f(&self.y))
    }
}

impl<T> Index<Dim2> for D2<T> {
    type Output = T;

    #[inline]
    fn index(&self, dim: Dim2) -> &T {
        match dim {
            Dim2::X => &self.x,
            Dim2::Y => &self.y,
        }
    }
}

impl<T> IndexMut<Dim2> for D2<T> {
    #[inline]
    fn index_mut(&mut self, dim: Dim2) -> &mut T {
        match dim {
            Dim2::X => &mut self.x,
            Dim2::Y => &mut self.y,
        }
    }
}

impl D2<SBasis> {
    /// The constant curve at `p`.
    pub fn constant(p: Point) -> D2<SBasis> {
        D2::new(SBasis::constant(p.x), SBasis::constant(p.y))
    }

    /// The straight segment from `p0` to `p1`.
    pub fn line(p0: Point, p1: Point) -> D2<SBasis> {
        D2::new(
            SBasis::from_linear(Linear::new(p0.x, p1.x)),
            SBasis::from_linear(Linear::new(p0.y, p1.y)),
        )
    }

    /// Evaluate at `t`.
    #[inline]
    pub fn value_at(&self, t: f64) -> Point {
        Point::new(self.x.value_at(t), self.y.value_at(t))
    }

    /// The point at `t = 0`.
    #[inline]
    pub fn at0(&self) -> Point {
        Point::new(self.x.at0(), self.y.at0())
    }

    /// The point at `t = 1`.
    #[inline]
    pub fn at1(&self) -> Point {
        Point::new(self.x.at1(), self.y.at1())
    }

    /// The point at `t` and the first `n` derivative vectors.
    pub fn point_and_derivatives(&self, t: f64, n: usize) -> (Point, Vec<Vec2>) {
        let xs = self.x.value_and_derivatives(t, n);
        let ys = self.y.value_and_derivatives(t, n);
        let derivs = xs[1..]
            .iter()
            .zip(&ys[1..])
            .map(|(&x, &y)| Vec2::new(x, y))
            .collect();
        (Point::new(xs[0], ys[0]), derivs)
    }

    /// The derivative, component-wise.
    #[must_use]
    pub fn derivative(&self) -> D2<SBasis> {
        self.map(SBasis::derivative)
    }

    /// The restriction to `[from, to]`.
    #[must_use]
    pub fn portion(&self, from: f64, to: f64) -> D2<SBasis> {
        self.map(|c| c.portion(from, to))
    }

    /// The curve traversed backwards.
    #[must_use]
    pub fn reverse(&self) -> D2<SBasis> {
        self.map(SBasis::reverse)
    }

    /// Substitute `g` for the parameter.
    #[must_use]
    pub fn compose(&self, g: &SBasis) -> D2<SBasis> {
        self.map(|c| c.compose(g))
    }

    /// Keep the first `n` terms of each component.
    #[must_use]
    pub fn truncate(&self, n: usize) -> D2<SBasis> {
        self.map(|c| c.truncate(n))
    }

    /// The image under an affine transform.
    #[must_use]
    pub fn transform(&self, affine: Affine) -> D2<SBasis> {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        D2::new(
            self.x.clone() * a + self.y.clone() * c + e,
            self.x.clone() * b + self.y.clone() * d + f,
        )
    }

    /// The dot product of two curves, as a scalar function.
    pub fn dot(&self, other: &D2<SBasis>) -> SBasis {
        self.x.multiply(&other.x) + self.y.multiply(&other.y)
    }

    /// The cross product `x0 y1 - y0 x1`, as a scalar function.
    pub fn cross(&self, other: &D2<SBasis>) -> SBasis {
        self.x.multiply(&other.y) - self.y.multiply(&other.x)
    }

    /// Translate by `-p`.
    #[must_use]
    pub fn offset_by(&self, p: Point) -> D2<SBasis> {
        D2::new(self.x.clone() - p.x, self.y.clone() - p.y)
    }

    /// Whether the curve stays within `eps` of one point.
    pub fn is_constant(&self, eps: f64) -> bool {
        self.x.is_constant(eps) && self.y.is_constant(eps)
    }

    /// Whether every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// A cheap bounding box.
    pub fn bounds_fast(&self) -> Rect {
        Rect::from_intervals(self.x.bounds_fast(0), self.y.bounds_fast(0))
    }

    /// The tight bounding box.
    pub fn bounds_exact(&self) -> Rect {
        Rect::from_intervals(self.x.bounds_exact(), self.y.bounds_exact())
    }

    /// A bounding box of the part of the curve over `i`.
    pub fn bounds_local(&self, i: Interval) -> Rect {
        Rect::from_intervals(self.x.bounds_local(i, 0), self.y.bounds_local(i, 0))
    }
}
