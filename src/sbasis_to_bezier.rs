// Copyright 2025 the sbgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion between the symmetric power basis and Bernstein form.
//!
//! The term `s^k ((1 - t) a + t b)` of an [`SBasis`] expands into Bernstein
//! polynomials of order `n` with the weights given by [`weight`]. The map is
//! triangular, so the inverse is a back-substitution over the same weights.

use smallvec::SmallVec;

use crate::bezier::Coeffs;
use crate::common::choose;
use crate::{Bezier, Linear, Point, SBasis, D2};

/// The weight of `s^k (1 - t)` on the Bernstein basis polynomial `j` of
/// order `n`.
///
/// This is `C(n - 2k - 1, j - k) / C(n, j)` for `k < (n + 1) / 2` and
/// `k <= j < n - k`, and zero elsewhere. For even `n` the symmetric middle
/// term `s^(n/2)` has unnormalized weight 1 on `j = n / 2`.
pub fn weight(n: usize, j: usize, k: usize) -> f64 {
    let q = (n + 1) / 2;
    if n % 2 == 0 && j == q && k == q {
        return 1.0 / choose(n, j);
    }
    if k >= q || j >= n - k || j < k {
        return 0.0;
    }
    choose(n - 2 * k - 1, j - k) / choose(n, j)
}

/// The smallest Bezier order that represents `sb` exactly.
///
/// A final term with equal endpoints is a symmetric term of even degree.
pub fn sbasis_natural_order(sb: &SBasis) -> usize {
    let len = sb.len();
    let last = sb[len - 1];
    if last.v0 == last.v1 {
        2 * (len - 1)
    } else {
        2 * len - 1
    }
}

/// Convert to a Bezier of the given order.
///
/// Terms beyond what the order can hold are dropped; for an even order the
/// middle term keeps only its symmetric part. Missing terms count as zero.
/// The endpoint values are always exact.
pub fn sbasis_to_bezier(sb: &SBasis, order: usize) -> Bezier {
    let n = order;
    let q = (n + 1) / 2;
    let mut bz: Coeffs = SmallVec::from_elem(0.0, n + 1);
    for k in 0..q.min(sb.len()) {
        let Linear { v0: a, v1: b } = sb[k];
        for (j, c) in bz.iter_mut().enumerate() {
            *c += weight(n, j, k) * a + weight(n, n - j, k) * b;
        }
    }
    if n % 2 == 0 && q < sb.len() {
        bz[q] += sb[q].hat() * weight(n, q, q);
    }
    Bezier::from_coeffs(bz)
}

/// Convert to a Bezier of the natural order, losslessly.
pub fn sbasis_to_bezier_natural(sb: &SBasis) -> Bezier {
    sbasis_to_bezier(sb, sbasis_natural_order(sb))
}

/// Convert a Bezier to the symmetric power basis, exactly.
pub fn bezier_to_sbasis(bz: &Bezier) -> SBasis {
    let n = bz.order();
    let q = (n + 1) / 2;
    let even = n % 2 == 0;
    let mut terms: SmallVec<[Linear; 4]> =
        SmallVec::from_elem(Linear::ZERO, q + usize::from(even));
    for k in 0..q {
        let mut a = bz[k];
        let mut b = bz[n - k];
        for (i, term) in terms[..k].iter().enumerate() {
            let near = weight(n, k, i);
            let far = weight(n, n - k, i);
            a -= near * term.v0 + far * term.v1;
            b -= far * term.v0 + near * term.v1;
        }
        let scale = choose(n, k);
        terms[k] = Linear::new(a * scale, b * scale);
    }
    if even {
        let mut m = bz[q];
        for (i, term) in terms[..q].iter().enumerate() {
            m -= weight(n, q, i) * (term.v0 + term.v1);
        }
        terms[q] = Linear::constant(m * choose(n, q));
    }
    SBasis::new(terms)
}

/// Convert a pair of functions to Bezier control points of the given order.
pub fn sbasis_to_bezier_points(sb: &D2<SBasis>, order: usize) -> SmallVec<[Point; 8]> {
    let x = sbasis_to_bezier(&sb.x, order);
    let y = sbasis_to_bezier(&sb.y, order);
    x.coeffs()
        .iter()
        .zip(y.coeffs())
        .map(|(&x, &y)| Point::new(x, y))
        .collect()
}

/// The natural order of a pair of functions, the larger of the two.
pub fn d2_natural_order(sb: &D2<SBasis>) -> usize {
    sbasis_natural_order(&sb.x).max(sbasis_natural_order(&sb.y))
}

/// Convert Bezier control points to a pair of functions, exactly.
///
/// `points` must not be empty.
pub fn bezier_points_to_sbasis(points: &[Point]) -> D2<SBasis> {
    let x = Bezier::from_coeffs(points.iter().map(|p| p.x).collect());
    let y = Bezier::from_coeffs(points.iter().map(|p| p.y).collect());
    D2::new(bezier_to_sbasis(&x), bezier_to_sbasis(&y))
}
