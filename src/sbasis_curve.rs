// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curves given directly by their polynomial form.

use core::ops::Range;

use crate::{Affine, Curve, ParamCurve, Point, SBasis, D2};

/// A curve defined by a pair of [`SBasis`] functions.
///
/// Every other curve type converts into this one, and derivatives of
/// curves with no closed-form derivative are expressed with it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SBasisCurve {
    inner: D2<SBasis>,
}

impl SBasisCurve {
    /// Wrap a polynomial curve.
    #[inline]
    pub fn new(inner: D2<SBasis>) -> SBasisCurve {
        SBasisCurve { inner }
    }

    /// The underlying functions.
    #[inline]
    pub fn sbasis(&self) -> &D2<SBasis> {
        &self.inner
    }
}

impl From<D2<SBasis>> for SBasisCurve {
    fn from(inner: D2<SBasis>) -> SBasisCurve {
        SBasisCurve::new(inner)
    }
}

impl ParamCurve for SBasisCurve {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.inner.value_at(t)
    }

    fn subsegment(&self, range: Range<f64>) -> SBasisCurve {
        SBasisCurve::new(self.inner.portion(range.start, range.end))
    }

    fn reverse(&self) -> SBasisCurve {
        SBasisCurve::new(self.inner.reverse())
    }

    fn transform(&self, affine: Affine) -> SBasisCurve {
        SBasisCurve::new(self.inner.transform(affine))
    }

    fn to_sbasis(&self) -> D2<SBasis> {
        self.inner.clone()
    }

    fn derivative(&self) -> Curve {
        Curve::SBasis(SBasisCurve::new(self.inner.derivative()))
    }

    fn degrees_of_freedom(&self) -> usize {
        self.inner.x.degrees_of_freedom() + self.inner.y.degrees_of_freedom()
    }

    #[inline]
    fn start(&self) -> Point {
        self.inner.at0()
    }

    #[inline]
    fn end(&self) -> Point {
        self.inner.at1()
    }
}
